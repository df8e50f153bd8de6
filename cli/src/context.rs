use mapquiz_core::{AppConfig, MapCatalog, QuizController};
use mapquiz_render::{
    FontOptions, MapRenderer, RenderError, TextRenderer, color_from_rgba, write_png,
};
use std::path::{Path, PathBuf};

use crate::commands::error_chain;

/// Holds all state for the CLI application.
/// Commands run one at a time, so everything is owned directly.
pub struct CliContext {
    pub config: AppConfig,
    pub quiz: QuizController,
    /// Created on first render; loading the font database is slow
    renderer: Option<MapRenderer<TextRenderer>>,
}

impl CliContext {
    pub fn new(config: AppConfig) -> Self {
        let quiz = QuizController::new(MapCatalog::from_config(&config));
        Self {
            config,
            quiz,
            renderer: None,
        }
    }

    /// Render the active session to a PNG file. Returns the number of labels.
    pub fn render_to(&mut self, path: &Path) -> Result<usize, String> {
        let session = self.quiz.active().map_err(|e| error_chain(&e))?;

        let renderer = match self.renderer.take() {
            Some(renderer) => renderer,
            None => self.build_renderer().map_err(|e| error_chain(&e))?,
        };
        let renderer = self.renderer.insert(renderer);

        let image = renderer.render_session(session);
        write_png(&image, path).map_err(|e| error_chain(&e))?;
        tracing::debug!(path = %path.display(), labels = session.guessed_count(), "Rendered map");
        Ok(session.guessed_count())
    }

    fn build_renderer(&self) -> Result<MapRenderer<TextRenderer>, RenderError> {
        let options = FontOptions {
            family: self.config.font_family.clone(),
            font_path: self.config.font_path.as_ref().map(PathBuf::from),
            size: self.config.font_size,
        };
        let painter = TextRenderer::new(&options)?;
        Ok(MapRenderer::new(
            painter,
            color_from_rgba(self.config.label_color),
        ))
    }
}
