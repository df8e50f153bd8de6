//! Memoizing loader for region tables and base images.
//!
//! Sources are static for the lifetime of the process, so entries are
//! never invalidated. Failed loads are not cached.

use hashbrown::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::MapSource;
use crate::error::LoadError;
use crate::image::MapImage;
use crate::registry::{RegionSet, load_region_table};

/// A fully loaded map: its regions and the unlabeled base image
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub regions: Arc<RegionSet>,
    pub image: Arc<MapImage>,
}

#[derive(Debug, Default)]
pub struct MapLoader {
    tables: HashMap<PathBuf, Arc<RegionSet>>,
    images: HashMap<PathBuf, Arc<MapImage>>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_table(&mut self, path: &Path) -> Result<Arc<RegionSet>, LoadError> {
        if let Some(regions) = self.tables.get(path) {
            tracing::debug!(path = %path.display(), "Region table cache hit");
            return Ok(Arc::clone(regions));
        }

        let regions = Arc::new(load_region_table(path)?);
        tracing::info!(path = %path.display(), regions = regions.len(), "Loaded region table");
        self.tables.insert(path.to_path_buf(), Arc::clone(&regions));
        Ok(regions)
    }

    pub fn load_image(&mut self, path: &Path) -> Result<Arc<MapImage>, LoadError> {
        if let Some(image) = self.images.get(path) {
            tracing::debug!(path = %path.display(), "Map image cache hit");
            return Ok(Arc::clone(image));
        }

        let image = Arc::new(MapImage::load(path)?);
        tracing::info!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "Loaded map image"
        );
        self.images.insert(path.to_path_buf(), Arc::clone(&image));
        Ok(image)
    }

    /// Load both halves of a map. Either failure fails the whole map.
    pub fn load_map(&mut self, source: &MapSource) -> Result<LoadedMap, LoadError> {
        let regions = self.load_table(&source.data)?;
        let image = self.load_image(&source.image)?;
        Ok(LoadedMap { regions, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::encode_png;

    #[test]
    fn test_repeated_loads_share_data() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("regions.csv");
        let image = dir.path().join("map.png");
        std::fs::write(&table, "name,x,y\nTexas,10,20\n").unwrap();
        std::fs::write(&image, encode_png(1, 1, png::ColorType::Rgba, &[1, 2, 3, 4])).unwrap();

        let mut loader = MapLoader::new();
        let source = MapSource {
            id: "Test".to_string(),
            data: table.clone(),
            image: image.clone(),
        };
        let first = loader.load_map(&source).unwrap();

        // Cached entries survive the files going away
        std::fs::remove_file(&table).unwrap();
        std::fs::remove_file(&image).unwrap();
        let second = loader.load_map(&source).unwrap();

        assert!(Arc::ptr_eq(&first.regions, &second.regions));
        assert!(Arc::ptr_eq(&first.image, &second.image));
    }

    #[test]
    fn test_missing_image_fails_map() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("regions.csv");
        std::fs::write(&table, "name,x,y\nTexas,10,20\n").unwrap();

        let mut loader = MapLoader::new();
        let source = MapSource {
            id: "Test".to_string(),
            data: table,
            image: dir.path().join("missing.png"),
        };
        let err = loader.load_map(&source).unwrap_err();
        assert!(matches!(err, LoadError::ReadFile { .. }));
    }
}
