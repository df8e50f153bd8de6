//! Guess state for one map.

use hashbrown::HashSet;
use std::sync::Arc;

use crate::image::MapImage;
use crate::loader::LoadedMap;
use crate::registry::{Region, RegionSet, normalize};

/// Result of one submitted guess
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// First correct guess of this region
    Correct(Region),
    /// Region was guessed earlier in this session; nothing changed
    AlreadyGuessed(Region),
    /// Input does not name any region of the active map; carries the raw input
    Invalid(String),
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Correct(_))
    }
}

/// Progress through one map.
///
/// The guessed set only grows until [`GameSession::reset`]; switching maps
/// replaces the whole session.
#[derive(Debug, Clone)]
pub struct GameSession {
    map_id: String,
    map: LoadedMap,
    /// Normalized names in the order they were guessed
    guessed: Vec<String>,
    guessed_set: HashSet<String>,
}

impl GameSession {
    pub fn new(map_id: impl Into<String>, map: LoadedMap) -> Self {
        Self {
            map_id: map_id.into(),
            map,
            guessed: Vec::new(),
            guessed_set: HashSet::new(),
        }
    }

    pub fn map_id(&self) -> &str {
        &self.map_id
    }

    pub fn regions(&self) -> &Arc<RegionSet> {
        &self.map.regions
    }

    pub fn image(&self) -> &Arc<MapImage> {
        &self.map.image
    }

    /// Submit a raw guess. Blank input is ignored and yields `None`.
    pub fn submit_guess(&mut self, raw: &str) -> Option<GuessOutcome> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return None;
        }

        let Some(region) = self.map.regions.lookup(&normalized) else {
            tracing::debug!(map = %self.map_id, guess = %normalized, "Invalid guess");
            return Some(GuessOutcome::Invalid(raw.to_string()));
        };

        if self.guessed_set.contains(&normalized) {
            return Some(GuessOutcome::AlreadyGuessed(region.clone()));
        }

        tracing::debug!(map = %self.map_id, region = %region.canonical_name, "Correct guess");
        let region = region.clone();
        self.guessed_set.insert(normalized.clone());
        self.guessed.push(normalized);
        Some(GuessOutcome::Correct(region))
    }

    /// Forget all guesses; the region set stays loaded
    pub fn reset(&mut self) {
        self.guessed.clear();
        self.guessed_set.clear();
    }

    pub fn is_guessed(&self, normalized_name: &str) -> bool {
        self.guessed_set.contains(normalized_name)
    }

    /// Normalized names in guess order
    pub fn guessed_names(&self) -> impl Iterator<Item = &str> {
        self.guessed.iter().map(String::as_str)
    }

    /// Guessed regions in guess order
    pub fn guessed_regions(&self) -> impl Iterator<Item = &Region> {
        self.guessed
            .iter()
            .filter_map(|name| self.map.regions.lookup(name))
    }

    /// Regions not guessed yet, sorted by canonical name
    pub fn missing_regions(&self) -> Vec<&Region> {
        let mut missing: Vec<&Region> = self
            .map
            .regions
            .iter()
            .filter(|r| !self.guessed_set.contains(&r.normalized_name))
            .collect();
        missing.sort_by(|a, b| a.canonical_name.cmp(&b.canonical_name));
        missing
    }

    pub fn guessed_count(&self) -> usize {
        self.guessed.len()
    }

    pub fn total_count(&self) -> usize {
        self.map.regions.len()
    }

    /// Fraction of regions guessed, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        match self.total_count() {
            0 => 0.0,
            total => self.guessed_count() as f64 / total as f64,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_count() > 0 && self.guessed_count() == self.total_count()
    }
}
