//! Region table parsing.
//!
//! CSV format: header row naming at least `name`, `x` and `y` (any order,
//! extra columns ignored), then one row per region.

use std::path::Path;

use super::{Region, RegionSet};
use crate::error::LoadError;

/// Read and parse a region table from disk.
pub fn load_region_table(path: &Path) -> Result<RegionSet, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_region_table(path, &content)
}

/// Parse region table content. `path` is only used for error reporting.
pub fn parse_region_table(path: &Path, content: &str) -> Result<RegionSet, LoadError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(LoadError::EmptyTable {
            path: path.to_path_buf(),
        });
    };

    let header = split_record(header.trim_start_matches('\u{feff}'));
    let column = |name: &'static str| {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
    };
    let name_col = column("name")?;
    let x_col = column("x")?;
    let y_col = column("y")?;
    let width = name_col.max(x_col).max(y_col) + 1;

    let mut regions = Vec::new();
    for (line_num, line) in lines {
        let fields = split_record(line);
        if fields.len() < width {
            return Err(LoadError::InvalidRow {
                path: path.to_path_buf(),
                line: line_num,
                reason: format!("expected at least {} fields, found {}", width, fields.len()),
            });
        }

        let coord = |col: usize, axis: &str| {
            let raw = fields[col].trim();
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(LoadError::InvalidRow {
                    path: path.to_path_buf(),
                    line: line_num,
                    reason: format!("{axis} coordinate '{raw}' is not a finite number"),
                }),
            }
        };
        let x = coord(x_col, "x")?;
        let y = coord(y_col, "y")?;

        let name = fields[name_col].trim();
        if name.is_empty() {
            return Err(LoadError::InvalidRow {
                path: path.to_path_buf(),
                line: line_num,
                reason: "empty region name".to_string(),
            });
        }

        regions.push(Region::new(name, x, y));
    }

    let set = RegionSet::from_regions(regions);
    if set.is_empty() {
        return Err(LoadError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    Ok(set)
}

/// Split one CSV record, honoring double-quoted fields with `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<RegionSet, LoadError> {
        parse_region_table(Path::new("test.csv"), content)
    }

    #[test]
    fn test_parse_basic_table() {
        let set = parse("name,x,y\nTexas,10,20\nMaine,-5,30.5\n").unwrap();
        assert_eq!(set.len(), 2);
        let maine = set.lookup("Maine").unwrap();
        assert_eq!(maine.canonical_name, "Maine");
        assert_eq!(maine.x, -5.0);
        assert_eq!(maine.y, 30.5);
    }

    #[test]
    fn test_parse_reordered_columns_and_bom() {
        let set = parse("\u{feff}y,Name,x,capital\r\n20,texas,10,Austin\r\n\r\n").unwrap();
        let texas = set.lookup("Texas").unwrap();
        assert_eq!(texas.canonical_name, "texas");
        assert_eq!((texas.x, texas.y), (10.0, 20.0));
    }

    #[test]
    fn test_parse_quoted_names() {
        let set = parse("name,x,y\n\"Korea, Republic of\",1,2\n\"The \"\"Big\"\" One\",3,4\n")
            .unwrap();
        assert!(set.contains("Korea, Republic Of"));
        assert!(set.contains("The \"Big\" One"));
    }

    #[test]
    fn test_missing_column() {
        let err = parse("name,x\nTexas,1\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "y", .. }));
    }

    #[test]
    fn test_bad_coordinate_reports_line() {
        let err = parse("name,x,y\nTexas,1,2\nMaine,abc,2\n").unwrap_err();
        match err {
            LoadError::InvalidRow { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        for row in ["Texas,inf,1", "Texas,1,NaN", "Texas,-infinity,1"] {
            let err = parse(&format!("name,x,y\n{row}\n")).unwrap_err();
            assert!(
                matches!(err, LoadError::InvalidRow { line: 2, .. }),
                "{row}: {err:?}"
            );
        }
    }

    #[test]
    fn test_short_row() {
        let err = parse("name,x,y\nTexas,1\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn test_empty_table() {
        assert!(matches!(parse(""), Err(LoadError::EmptyTable { .. })));
        assert!(matches!(parse("name,x,y\n"), Err(LoadError::EmptyTable { .. })));
    }

    #[test]
    fn test_split_record() {
        assert_eq!(split_record("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(split_record("\"a,b\",c"), vec!["a,b", "c"]);
    }
}
