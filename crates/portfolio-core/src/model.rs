use serde::{Deserialize, Serialize};

/// Genre tag that marks a record as an editor plugin rather than a game.
pub const PLUGIN_TAG: &str = "Plugin";

/// A single portfolio entry (a game or an editor plugin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Display title, e.g. "Nebula"
    pub title: String,
    /// Short description shown on cards and in search results
    pub description: String,
    /// Ordered genre tags, e.g. ["Action", "Plugin"]. Non-empty in well-formed data.
    pub genre: Vec<String>,
    /// Relative path to the detail page, e.g. "nebula.html"
    pub page: String,
}

impl Project {
    /// Whether this record carries the plugin tag (exact match, case-sensitive).
    pub fn is_plugin(&self) -> bool {
        self.genre.iter().any(|g| g == PLUGIN_TAG)
    }
}

/// Sidebar category partition over the catalog.
///
/// `Plugins` keeps records carrying the plugin tag, `Games` keeps records
/// lacking it. Together they cover the whole catalog with no overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Games,
    Plugins,
}

impl Category {
    /// Parse the literal category keys the frontend sends ("jogos"/"plugins").
    ///
    /// Anything else is unrecognized; the API answers those with an empty
    /// result rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "jogos" => Some(Self::Games),
            "plugins" => Some(Self::Plugins),
            _ => None,
        }
    }

    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::Plugins => project.is_plugin(),
            Self::Games => !project.is_plugin(),
        }
    }
}
