/// Catalog store: owns the static data source and the once-per-process
/// in-memory copy of it.
///
/// The catalog is loaded lazily on first use. Concurrent first callers share
/// a single in-flight load; a failed load leaves the store empty, and the
/// next caller retries against the source. Once loaded, the catalog is
/// immutable for the remainder of the process lifetime.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;
use tracing::info;

use crate::error::CatalogError;
use crate::model::Project;

/// The loaded catalog: all project records in source order, plus the derived
/// set of unique genre tags.
#[derive(Debug)]
pub struct Catalog {
    projects: Vec<Project>,
    genres: Vec<String>,
}

impl Catalog {
    /// All records, in original load order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Unique genre tags across all records, in first-seen order.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

pub struct CatalogStore {
    source: PathBuf,
    catalog: OnceCell<Catalog>,
}

impl CatalogStore {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            catalog: OnceCell::new(),
        }
    }

    /// Ensure the catalog is loaded and return it.
    ///
    /// The first caller performs the read and parse; concurrent callers await
    /// the same in-flight load instead of issuing duplicates. On failure the
    /// cell stays empty, so a later call retries against the source. Callers
    /// decide what a failure means: the query engine serves empty results,
    /// a stricter consumer could propagate instead.
    pub async fn load(&self) -> Result<&Catalog, CatalogError> {
        self.catalog
            .get_or_try_init(|| async {
                let raw = tokio::fs::read_to_string(&self.source).await.map_err(|e| {
                    CatalogError::Read {
                        path: self.source.display().to_string(),
                        message: e.to_string(),
                    }
                })?;
                let catalog = parse_catalog(&raw, &self.source)?;
                info!(
                    projects = catalog.len(),
                    genres = catalog.genres().len(),
                    path = %self.source.display(),
                    "catalog loaded"
                );
                Ok(catalog)
            })
            .await
    }
}

/// Parse the raw JSON source into a catalog, deriving the genre set by
/// unioning each record's tags in first-seen order.
fn parse_catalog(raw: &str, path: &Path) -> Result<Catalog, CatalogError> {
    let projects: Vec<Project> =
        serde_json::from_str(raw).map_err(|e| CatalogError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut genres = Vec::new();
    let mut seen = HashSet::new();
    for project in &projects {
        for tag in &project.genre {
            if seen.insert(tag.clone()) {
                genres.push(tag.clone());
            }
        }
    }

    Ok(Catalog { projects, genres })
}
