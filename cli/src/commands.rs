use mapquiz_core::{AppConfig, GuessOutcome, QuizError, Selection, normalize, write_missing_csv};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::context::CliContext;

/// Format an error with its whole source chain
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn report(out: &mut impl Write, err: &QuizError) -> io::Result<()> {
    match err {
        QuizError::NoMapSelected => writeln!(out, "No map selected, use `select <map>` first"),
        other => writeln!(out, "Error: {}", error_chain(other)),
    }
}

pub fn list_maps(ctx: &CliContext, out: &mut impl Write) -> io::Result<()> {
    let catalog = ctx.quiz.catalog();
    if catalog.is_empty() {
        return writeln!(out, "No maps configured");
    }

    let active = ctx.quiz.session().map(|s| s.map_id());
    for id in catalog.ids() {
        let marker = if Some(id) == active { "*" } else { " " };
        writeln!(out, "{marker} {id}")?;
    }
    Ok(())
}

pub fn select_map(ctx: &mut CliContext, id: &str, out: &mut impl Write) -> io::Result<()> {
    match ctx.quiz.select_map(id) {
        Ok(Selection::Started) => show_status(ctx, out),
        Ok(Selection::Unchanged) => {
            writeln!(out, "Already playing this map")?;
            show_status(ctx, out)
        }
        Err(e) => report(out, &e),
    }
}

pub fn guess(ctx: &mut CliContext, raw: &str, out: &mut impl Write) -> io::Result<()> {
    let outcome = match ctx.quiz.submit_guess(raw) {
        Ok(outcome) => outcome,
        Err(e) => return report(out, &e),
    };

    let map_id = ctx.quiz.session().map(|s| s.map_id()).unwrap_or_default();
    match &outcome {
        None => return Ok(()),
        Some(GuessOutcome::Correct(region)) => {
            writeln!(out, "Correct! {}", region.canonical_name)?
        }
        Some(GuessOutcome::AlreadyGuessed(region)) => {
            writeln!(out, "Already guessed {}", region.canonical_name)?
        }
        Some(GuessOutcome::Invalid(raw)) => {
            writeln!(out, "'{}' is not valid in {}", normalize(raw), map_id)?
        }
    }

    show_status(ctx, out)?;

    if outcome.as_ref().is_some_and(GuessOutcome::is_correct) {
        if ctx.quiz.session().is_some_and(|s| s.is_complete()) {
            writeln!(out, "You completed this map!")?;
        }
        if ctx.config.auto_render {
            let path = PathBuf::from(&ctx.config.output_path);
            if let Err(e) = ctx.render_to(&path) {
                writeln!(out, "Render failed: {e}")?;
            }
        }
    }
    Ok(())
}

pub fn show_status(ctx: &CliContext, out: &mut impl Write) -> io::Result<()> {
    let session = match ctx.quiz.active() {
        Ok(session) => session,
        Err(e) => return report(out, &e),
    };
    writeln!(
        out,
        "{}: {}/{} guessed ({:.0}%)",
        session.map_id(),
        session.guessed_count(),
        session.total_count(),
        session.progress() * 100.0
    )
}

pub fn reset(ctx: &mut CliContext, out: &mut impl Write) -> io::Result<()> {
    if let Err(e) = ctx.quiz.reset() {
        return report(out, &e);
    }
    writeln!(out, "Progress reset")?;
    show_status(ctx, out)
}

pub fn missing(ctx: &CliContext, path: Option<&Path>, out: &mut impl Write) -> io::Result<()> {
    let session = match ctx.quiz.active() {
        Ok(session) => session,
        Err(e) => return report(out, &e),
    };

    match path {
        None => write!(out, "{}", mapquiz_core::missing_names_csv(session)),
        Some(path) => match write_missing_csv(session, path) {
            Ok(rows) => writeln!(out, "Wrote {} missing names to {}", rows, path.display()),
            Err(e) => report(out, &e),
        },
    }
}

pub fn render(ctx: &mut CliContext, path: Option<&Path>, out: &mut impl Write) -> io::Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&ctx.config.output_path));

    match ctx.render_to(&path) {
        Ok(labels) => writeln!(out, "Rendered {} labels to {}", labels, path.display()),
        Err(e) => writeln!(out, "Render failed: {e}"),
    }
}

pub fn show_config(ctx: &CliContext, save: bool, out: &mut impl Write) -> io::Result<()> {
    if save && let Err(e) = ctx.config.save() {
        writeln!(out, "Failed to save config: {}", error_chain(&e))?;
    }

    let path = AppConfig::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    writeln!(out, "Config file: {path}")?;
    writeln!(out, "Data directory: {}", ctx.config.data_dir)?;
    writeln!(out, "Maps: {}", ctx.quiz.catalog().len())?;
    writeln!(
        out,
        "Font: {} {}pt",
        ctx.config.font_family.as_deref().unwrap_or("sans-serif"),
        ctx.config.font_size
    )?;
    writeln!(out, "Output: {}", ctx.config.output_path)?;
    writeln!(out, "Auto render: {}", ctx.config.auto_render)
}

pub fn exit(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "quitting...")?;
    out.flush()
}
