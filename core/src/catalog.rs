//! Fixed registry of selectable maps.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;

/// Resolved sources for one map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSource {
    pub id: String,
    pub data: PathBuf,
    pub image: PathBuf,
}

/// Map identifiers in display order with their sources
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    maps: Vec<MapSource>,
}

impl MapCatalog {
    pub fn new(maps: Vec<MapSource>) -> Self {
        Self { maps }
    }

    /// Build the catalog from config, resolving relative paths against
    /// `data_dir`. Later entries with an id already seen are ignored.
    pub fn from_config(config: &AppConfig) -> Self {
        let base = Path::new(&config.data_dir);
        let mut maps: Vec<MapSource> = Vec::with_capacity(config.maps.len());

        for entry in &config.maps {
            if maps.iter().any(|m| m.id == entry.id) {
                tracing::warn!(id = %entry.id, "Ignoring duplicate map id in config");
                continue;
            }
            maps.push(MapSource {
                id: entry.id.clone(),
                data: base.join(&entry.data),
                image: base.join(&entry.image),
            });
        }

        Self { maps }
    }

    /// Find a map by id. Exact matches win; otherwise ids are compared
    /// ignoring ASCII case.
    pub fn get(&self, id: &str) -> Option<&MapSource> {
        self.maps
            .iter()
            .find(|m| m.id == id)
            .or_else(|| self.maps.iter().find(|m| m.id.eq_ignore_ascii_case(id)))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.maps.iter().map(|m| m.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
