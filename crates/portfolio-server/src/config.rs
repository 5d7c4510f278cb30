use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Server configuration loaded explicitly from environment variables.
///
/// The catalog path is required and must exist at startup. The bind address
/// and static asset directory are optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the static catalog JSON (the list of project records).
    pub data_path: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Directory of site assets served at `/`. `None` disables static serving.
    pub static_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `PORTFOLIO_DATA_PATH`: path to the catalog JSON file
    ///
    /// Optional:
    /// - `PORTFOLIO_BIND_ADDR`: listen address (default 127.0.0.1:8080)
    /// - `PORTFOLIO_STATIC_DIR`: site asset directory served at `/`
    pub fn from_env() -> Result<Self, AppError> {
        let data_path = std::env::var("PORTFOLIO_DATA_PATH").map_err(|_| {
            AppError::Config("PORTFOLIO_DATA_PATH environment variable is required".to_string())
        })?;

        if !std::path::Path::new(&data_path).exists() {
            return Err(AppError::Config(format!(
                "catalog data not found at {data_path}"
            )));
        }

        let bind_addr =
            std::env::var("PORTFOLIO_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let static_dir = std::env::var("PORTFOLIO_STATIC_DIR").ok();
        if let Some(dir) = &static_dir {
            if !std::path::Path::new(dir).is_dir() {
                return Err(AppError::Config(format!(
                    "static asset directory not found at {dir}"
                )));
            }
        }

        Ok(Self {
            data_path,
            bind_addr,
            static_dir,
        })
    }
}
