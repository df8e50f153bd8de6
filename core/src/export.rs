//! Missing-names export: a single `name` column, one row per region not yet
//! guessed, sorted by canonical name.

use std::path::Path;

use crate::error::QuizError;
use crate::session::GameSession;

pub const MISSING_HEADER: &str = "name";

/// Render the missing regions of a session as CSV text
pub fn missing_names_csv(session: &GameSession) -> String {
    let mut out = String::new();
    out.push_str(MISSING_HEADER);
    out.push('\n');
    for region in session.missing_regions() {
        out.push_str(&csv_field(&region.canonical_name));
        out.push('\n');
    }
    out
}

/// Write the missing-names CSV to `path` as UTF-8. Returns the row count.
pub fn write_missing_csv(session: &GameSession, path: &Path) -> Result<usize, QuizError> {
    let csv = missing_names_csv(session);
    std::fs::write(path, csv.as_bytes()).map_err(|source| QuizError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(session.total_count() - session.guessed_count())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Maine"), "Maine");
        assert_eq!(csv_field("Korea, South"), "\"Korea, South\"");
        assert_eq!(csv_field("The \"Big\" One"), "\"The \"\"Big\"\" One\"");
    }
}
