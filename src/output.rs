//! Persistence of aggregate views to flat files.
//!
//! Each view is written exactly once per run; files are replaced, never
//! appended, so re-running over the same input reproduces the same bytes.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Writes `rows` to `path` as CSV with a header row, replacing any
/// existing file.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV view");

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the one-line highest-average-protein result, value to two
/// decimal places.
pub fn write_highest_protein(path: &Path, diet: &str, value: f64) -> Result<()> {
    debug!(path = %path.display(), diet, "Writing highest-protein result");

    fs::write(path, format!("Highest average protein diet: {diet} ({value:.2} g)\n"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::CuisineMode;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_rows() -> Vec<CuisineMode> {
        vec![
            CuisineMode {
                diet_type: "keto".to_string(),
                cuisine_type: "american".to_string(),
                count: 1,
            },
            CuisineMode {
                diet_type: "vegan".to_string(),
                cuisine_type: "asian".to_string(),
                count: 2,
            },
        ]
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let path = temp_path("diet_analyzer_test_view.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        write_csv(&path, &sample_rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Diet_type,Cuisine_type,Count");
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_rewrites_identically() {
        let path = temp_path("diet_analyzer_test_rewrite.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &sample_rows()).unwrap();
        let first = fs::read(&path).unwrap();
        write_csv(&path, &sample_rows()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_highest_protein_exact_line() {
        let path = temp_path("diet_analyzer_test_highest.txt");
        let _ = fs::remove_file(&path);

        write_highest_protein(&path, "keto", 20.456).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Highest average protein diet: keto (20.46 g)\n");

        fs::remove_file(&path).unwrap();
    }
}
