//! Runtime configuration
//!
//! Resolves where the catalog lives and loads it into memory.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Catalog, CatalogData};

/// Environment variable overriding the catalog location
pub const DATA_PATH_ENV: &str = "DASH_PLANNER_DATA_PATH";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DASH_PLANNER_LOG";

/// Log directive used when no filter is configured
pub const DEFAULT_LOG_DIRECTIVE: &str = "dash_planner=info";

/// Catalog loading error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid ingredient {id}: {reason}")]
    InvalidIngredient { id: i64, reason: String },
}

/// Result type for catalog loading
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            data_path: data_path_from(std::env::var(DATA_PATH_ENV).ok()),
            log_filter: std::env::var(LOG_ENV)
                .ok()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string()),
        }
    }
}

/// Resolve the catalog path: an explicit override wins, otherwise
/// `data/catalog.json` next to the project root
fn data_path_from(override_path: Option<String>) -> PathBuf {
    override_path.map(PathBuf::from).unwrap_or_else(|| {
        let mut path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        // Go up from target/release or target/debug to project root
        if path.ends_with("release") || path.ends_with("debug") {
            if let Some(parent) = path.parent() {
                if let Some(grandparent) = parent.parent() {
                    path = grandparent.to_path_buf();
                }
            }
        }

        path.push("data");
        path.push("catalog.json");
        path
    })
}

/// Load and validate a catalog file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data: CatalogData = serde_json::from_str(&text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    for ingredient in &data.ingredients {
        ingredient
            .validate()
            .map_err(|e| CatalogError::InvalidIngredient {
                id: ingredient.id,
                reason: e.to_string(),
            })?;
    }

    tracing::info!(
        "Loaded catalog from {}: {} ingredients, {} recipes, {} menus, {} daily plans",
        path.display(),
        data.ingredients.len(),
        data.recipes.len(),
        data.menus.len(),
        data.daily_plans.len()
    );

    Ok(Catalog::from(data))
}
