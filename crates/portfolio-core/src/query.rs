/// Query engine over the portfolio catalog.
///
/// Every operation ensures the catalog is loaded, then filters synchronously.
/// A failed load is logged and served as an empty result; no error crosses
/// this boundary, so the frontend never breaks on a data problem.
use std::sync::Arc;

use tracing::warn;

use crate::catalog::{Catalog, CatalogStore};
use crate::model::{Category, Project};

pub struct QueryEngine {
    store: Arc<CatalogStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    async fn catalog(&self) -> Option<&Catalog> {
        match self.store.load().await {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                warn!(error = %e, "catalog load failed, serving empty results");
                None
            }
        }
    }

    /// All records in original load order, unfiltered.
    pub async fn all_projects(&self) -> Vec<Project> {
        match self.catalog().await {
            Some(catalog) => catalog.projects().to_vec(),
            None => Vec::new(),
        }
    }

    /// Case-insensitive search across title, description, and genre tags.
    ///
    /// Title and description match on substring; genre matches on exact tag
    /// equality. Results keep catalog order. No ranking or scoring.
    pub async fn search(&self, term: &str) -> Vec<Project> {
        let Some(catalog) = self.catalog().await else {
            return Vec::new();
        };
        let term = term.to_lowercase();
        catalog
            .projects()
            .iter()
            .filter(|p| matches_term(p, &term))
            .cloned()
            .collect()
    }

    /// Unique genre tags across the catalog, in first-seen order.
    pub async fn all_genres(&self) -> Vec<String> {
        match self.catalog().await {
            Some(catalog) => catalog.genres().to_vec(),
            None => Vec::new(),
        }
    }

    /// The subset of the catalog belonging to a sidebar category.
    pub async fn by_category(&self, category: Category) -> Vec<Project> {
        let Some(catalog) = self.catalog().await else {
            return Vec::new();
        };
        catalog
            .projects()
            .iter()
            .filter(|p| category.matches(p))
            .cloned()
            .collect()
    }
}

/// `term` must already be lowercased.
fn matches_term(project: &Project, term: &str) -> bool {
    project.title.to_lowercase().contains(term)
        || project.description.to_lowercase().contains(term)
        || project.genre.iter().any(|g| g.to_lowercase() == term)
}
