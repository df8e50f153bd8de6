//! Application configuration
//!
//! Persisted with confy under `mapquiz/config.toml` in the platform config
//! directory. A missing or unreadable file falls back to the defaults, which
//! ship the four built-in maps.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const APP_NAME: &str = "mapquiz";
pub const CONFIG_NAME: &str = "config";

/// One selectable map: a region table plus its unlabeled base image.
///
/// Relative paths are resolved against [`AppConfig::data_dir`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: String,
    pub data: String,
    pub image: String,
}

impl MapEntry {
    pub fn new(id: &str, data: &str, image: &str) -> Self {
        Self {
            id: id.to_string(),
            data: data.to_string(),
            image: image.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding region tables and map images
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_maps")]
    pub maps: Vec<MapEntry>,
    /// Font family for labels; the font database default when unset
    #[serde(default)]
    pub font_family: Option<String>,
    /// Extra font file to register before rendering
    #[serde(default)]
    pub font_path: Option<String>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_label_color")]
    pub label_color: [u8; 4],
    /// Where `render` writes the annotated map when no path is given
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// Re-render to `output_path` after every correct guess
    #[serde(default)]
    pub auto_render: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            maps: default_maps(),
            font_family: None,
            font_path: None,
            font_size: default_font_size(),
            label_color: default_label_color(),
            output_path: default_output_path(),
            auto_render: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        match confy::load(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    pub fn path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).ok()
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| ".".to_string())
}

fn default_maps() -> Vec<MapEntry> {
    vec![
        MapEntry::new("US States", "50_states.csv", "blank_states_img.gif"),
        MapEntry::new("Indian States", "indian_states.csv", "indian_states_map.gif"),
        MapEntry::new("European Countries", "europe_map.csv", "europe_map.gif"),
        MapEntry::new(
            "South American Countries",
            "south_america_countries.csv",
            "south_america_map.gif",
        ),
    ]
}

fn default_font_size() -> f32 {
    11.0
}

/// Opaque black
fn default_label_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

fn default_output_path() -> String {
    "map.png".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_ship_builtin_maps() {
        let config = AppConfig::default();
        let ids: Vec<_> = config.maps.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "US States",
                "Indian States",
                "European Countries",
                "South American Countries"
            ]
        );
        assert_eq!(config.label_color, [0, 0, 0, 255]);
        assert_eq!(config.maps[0].image, "blank_states_img.gif");
    }

    #[test]
    fn test_partial_config_keeps_user_maps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "font_size = 14.0\n\n[[maps]]\nid = \"Mine\"\ndata = \"mine.csv\"\nimage = \"mine.png\"\n",
        )
        .unwrap();

        let config: AppConfig = confy::load_path(&path).unwrap();
        assert_eq!(config.maps, vec![MapEntry::new("Mine", "mine.csv", "mine.png")]);
        assert_eq!(config.font_size, 14.0);
        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.output_path, "map.png");
    }
}
