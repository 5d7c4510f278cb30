#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },
}
