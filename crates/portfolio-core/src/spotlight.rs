/// Random project spotlight shown on the landing page.
///
/// Shares the catalog store with the query engine instead of issuing its own
/// fetch.
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::warn;

use crate::catalog::CatalogStore;
use crate::model::Project;

pub struct Spotlight {
    store: Arc<CatalogStore>,
}

impl Spotlight {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// One uniformly random record, or `None` when the catalog is empty or
    /// failed to load.
    pub async fn pick(&self) -> Option<Project> {
        let catalog = match self.store.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "catalog load failed, no spotlight");
                return None;
            }
        };
        catalog.projects().choose(&mut rand::thread_rng()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"[
        {"title": "Nebula", "description": "A space shooter", "genre": ["Action", "Plugin"], "page": "nebula.html"},
        {"title": "Quiet Woods", "description": "A walking sim", "genre": ["Exploration"], "page": "woods.html"}
    ]"#;

    fn spotlight_over(data: &str) -> (Spotlight, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(data.as_bytes()).expect("write");
        let store = Arc::new(CatalogStore::new(file.path()));
        (Spotlight::new(store), file)
    }

    #[tokio::test]
    async fn pick_returns_a_catalog_member() {
        let (spotlight, _file) = spotlight_over(SAMPLE);
        let picked = spotlight.pick().await.expect("some record");
        assert!(["Nebula", "Quiet Woods"].contains(&picked.title.as_str()));
    }

    #[tokio::test]
    async fn single_record_catalog_always_picks_it() {
        let data = r#"[{"title": "Solo", "description": "only one", "genre": ["Puzzle"], "page": "solo.html"}]"#;
        let (spotlight, _file) = spotlight_over(data);
        for _ in 0..5 {
            assert_eq!(spotlight.pick().await.expect("some record").title, "Solo");
        }
    }

    #[tokio::test]
    async fn empty_catalog_yields_none() {
        let (spotlight, _file) = spotlight_over("[]");
        assert!(spotlight.pick().await.is_none());
    }

    #[tokio::test]
    async fn failed_load_yields_none() {
        let store = Arc::new(CatalogStore::new("/nonexistent/projects.json"));
        let spotlight = Spotlight::new(store);
        assert!(spotlight.pick().await.is_none());
    }
}
