//! Session lifecycle for the interactive front end.
//!
//! The controller owns at most one [`GameSession`]. Selecting a different map
//! replaces it wholesale, reset clears it in place, and a failed selection
//! leaves the previous session untouched.

use crate::catalog::MapCatalog;
use crate::error::QuizError;
use crate::export;
use crate::loader::MapLoader;
use crate::session::{GameSession, GuessOutcome};

/// What a map selection did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A new session was started
    Started,
    /// The map was already active; progress kept
    Unchanged,
}

#[derive(Debug)]
pub struct QuizController {
    catalog: MapCatalog,
    loader: MapLoader,
    session: Option<GameSession>,
}

impl QuizController {
    pub fn new(catalog: MapCatalog) -> Self {
        Self {
            catalog,
            loader: MapLoader::new(),
            session: None,
        }
    }

    pub fn catalog(&self) -> &MapCatalog {
        &self.catalog
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// The active session, or [`QuizError::NoMapSelected`]
    pub fn active(&self) -> Result<&GameSession, QuizError> {
        self.session.as_ref().ok_or(QuizError::NoMapSelected)
    }

    fn active_mut(&mut self) -> Result<&mut GameSession, QuizError> {
        self.session.as_mut().ok_or(QuizError::NoMapSelected)
    }

    /// Select a map by id. Loads its table and image before touching the
    /// current session.
    pub fn select_map(&mut self, id: &str) -> Result<Selection, QuizError> {
        let source = self
            .catalog
            .get(id)
            .ok_or_else(|| QuizError::UnknownMap(id.to_string()))?
            .clone();

        if self
            .session
            .as_ref()
            .is_some_and(|s| s.map_id() == source.id)
        {
            return Ok(Selection::Unchanged);
        }

        let map = self.loader.load_map(&source)?;
        tracing::info!(map = %source.id, regions = map.regions.len(), "Started session");
        self.session = Some(GameSession::new(source.id, map));
        Ok(Selection::Started)
    }

    pub fn submit_guess(&mut self, raw: &str) -> Result<Option<GuessOutcome>, QuizError> {
        Ok(self.active_mut()?.submit_guess(raw))
    }

    pub fn reset(&mut self) -> Result<(), QuizError> {
        let session = self.active_mut()?;
        session.reset();
        tracing::info!(map = %session.map_id(), "Session reset");
        Ok(())
    }

    pub fn missing_csv(&self) -> Result<String, QuizError> {
        Ok(export::missing_names_csv(self.active()?))
    }
}
