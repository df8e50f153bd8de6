//! Controller lifecycle tests against region tables and images on disk.

use std::path::Path;

use tempfile::TempDir;

use crate::catalog::MapCatalog;
use crate::config::{AppConfig, MapEntry};
use crate::controller::{QuizController, Selection};
use crate::error::{LoadError, QuizError};
use crate::image::tests::encode_png;
use crate::session::GuessOutcome;

fn write_png(path: &Path, width: u32, height: u32) {
    let data = vec![255u8; (width * height * 4) as usize];
    std::fs::write(path, encode_png(width, height, png::ColorType::Rgba, &data)).unwrap();
}

/// Data dir with two valid maps sharing "Texas" and one map with a broken table
fn fixture() -> (TempDir, QuizController) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    std::fs::write(root.join("alpha.csv"), "name,x,y\nTexas,10,20\nMaine,-5,30\n").unwrap();
    std::fs::write(root.join("beta.csv"), "name,x,y\nTexas,0,0\nOhio,1,1\nUtah,2,2\n").unwrap();
    std::fs::write(root.join("broken.csv"), "name,x\nTexas,1\n").unwrap();
    write_png(&root.join("alpha.png"), 100, 100);
    write_png(&root.join("beta.png"), 40, 20);

    let config = AppConfig {
        data_dir: root.to_string_lossy().to_string(),
        maps: vec![
            MapEntry::new("Alpha", "alpha.csv", "alpha.png"),
            MapEntry::new("Beta", "beta.csv", "beta.png"),
            MapEntry::new("Broken", "broken.csv", "alpha.png"),
            MapEntry::new("No Image", "alpha.csv", "missing.png"),
        ],
        ..AppConfig::default()
    };

    let controller = QuizController::new(MapCatalog::from_config(&config));
    (dir, controller)
}

#[test]
fn test_commands_need_a_map() {
    let (_dir, mut quiz) = fixture();
    assert!(matches!(quiz.submit_guess("texas"), Err(QuizError::NoMapSelected)));
    assert!(matches!(quiz.reset(), Err(QuizError::NoMapSelected)));
    assert!(matches!(quiz.missing_csv(), Err(QuizError::NoMapSelected)));
}

#[test]
fn test_select_and_guess() {
    let (_dir, mut quiz) = fixture();
    assert_eq!(quiz.select_map("Alpha").unwrap(), Selection::Started);

    let session = quiz.active().unwrap();
    assert_eq!(session.map_id(), "Alpha");
    assert_eq!(session.total_count(), 2);
    assert_eq!(session.image().width, 100);

    let outcome = quiz.submit_guess(" texas ").unwrap();
    assert!(matches!(outcome, Some(GuessOutcome::Correct(_))));
    assert_eq!(quiz.missing_csv().unwrap(), "name\nMaine\n");
}

#[test]
fn test_reselecting_same_map_keeps_progress() {
    let (_dir, mut quiz) = fixture();
    quiz.select_map("Alpha").unwrap();
    quiz.submit_guess("maine").unwrap();

    assert_eq!(quiz.select_map("alpha").unwrap(), Selection::Unchanged);
    assert_eq!(quiz.active().unwrap().guessed_count(), 1);
}

#[test]
fn test_switch_resets_even_with_shared_names() {
    let (_dir, mut quiz) = fixture();
    quiz.select_map("Alpha").unwrap();
    quiz.submit_guess("texas").unwrap();

    assert_eq!(quiz.select_map("Beta").unwrap(), Selection::Started);
    let session = quiz.active().unwrap();
    assert_eq!(session.map_id(), "Beta");
    assert_eq!(session.guessed_count(), 0);
    assert_eq!(session.total_count(), 3);

    // Texas exists in both maps but must be guessed again
    let outcome = quiz.submit_guess("texas").unwrap();
    assert!(matches!(outcome, Some(GuessOutcome::Correct(_))));

    // Switching back starts over as well
    quiz.select_map("Alpha").unwrap();
    assert_eq!(quiz.active().unwrap().guessed_count(), 0);
}

#[test]
fn test_reset_clears_progress() {
    let (_dir, mut quiz) = fixture();
    quiz.select_map("Alpha").unwrap();
    quiz.submit_guess("texas").unwrap();
    quiz.submit_guess("maine").unwrap();
    assert!(quiz.active().unwrap().is_complete());

    quiz.reset().unwrap();
    quiz.reset().unwrap();
    let session = quiz.active().unwrap();
    assert_eq!(session.guessed_count(), 0);
    assert_eq!(session.total_count(), 2);
}

#[test]
fn test_unknown_map() {
    let (_dir, mut quiz) = fixture();
    assert!(matches!(
        quiz.select_map("Atlantis"),
        Err(QuizError::UnknownMap(id)) if id == "Atlantis"
    ));
    assert!(quiz.session().is_none());
}

#[test]
fn test_failed_load_keeps_previous_session() {
    let (_dir, mut quiz) = fixture();
    quiz.select_map("Alpha").unwrap();
    quiz.submit_guess("texas").unwrap();

    let err = quiz.select_map("Broken").unwrap_err();
    assert!(matches!(
        err,
        QuizError::Load(LoadError::MissingColumn { column: "y", .. })
    ));

    let err = quiz.select_map("No Image").unwrap_err();
    assert!(matches!(err, QuizError::Load(LoadError::ReadFile { .. })));

    let session = quiz.active().unwrap();
    assert_eq!(session.map_id(), "Alpha");
    assert_eq!(session.guessed_count(), 1);
}

#[test]
fn test_failed_first_selection_leaves_no_session() {
    let (_dir, mut quiz) = fixture();
    assert!(quiz.select_map("Broken").is_err());
    assert!(quiz.session().is_none());
}
