pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod image;
pub mod loader;
pub mod registry;
pub mod session;

#[cfg(test)]
mod controller_tests;

// Re-exports for convenience
pub use catalog::{MapCatalog, MapSource};
pub use config::{AppConfig, MapEntry};
pub use controller::{QuizController, Selection};
pub use error::{LoadError, QuizError};
pub use export::{missing_names_csv, write_missing_csv};
pub use image::MapImage;
pub use loader::{LoadedMap, MapLoader};
pub use registry::{Region, RegionSet, normalize};
pub use session::{GameSession, GuessOutcome};
