//! CSV parser and schema validation for the nutrition dataset.

use csv::Reader;

use crate::dataset::RawRecord;
use crate::error::{AnalysisError, Result};

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Diet_type",
    "Recipe_name",
    "Cuisine_type",
    "Protein(g)",
    "Carbs(g)",
    "Fat(g)",
];

/// Parses CSV bytes into raw rows, preserving file order.
///
/// # Errors
///
/// Returns [`AnalysisError::Schema`] naming every required column absent
/// from the header row. Malformed cell contents are not an error here.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_reader(bytes);

    let headers = reader.headers()?.clone();
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();

    if !missing.is_empty() {
        missing.sort();
        return Err(AnalysisError::Schema(missing));
    }

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let record: RawRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "\
Diet_type,Recipe_name,Cuisine_type,Protein(g),Carbs(g),Fat(g)
vegan,A,asian,10,5,2
keto,C,american,20,10,0
";

    #[test]
    fn test_parse_valid_csv() {
        let rows = parse_dataset(VALID.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].diet_type, "vegan");
        assert_eq!(rows[1].protein_g, "20");
    }

    #[test]
    fn test_parse_tolerates_extra_columns() {
        let csv = "\
Diet_type,Recipe_name,Cuisine_type,Protein(g),Carbs(g),Fat(g),Extraction_day
vegan,A,asian,10,5,2,1
";
        let rows = parse_dataset(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_parse_missing_column_is_named() {
        let csv = "\
Diet_type,Recipe_name,Cuisine_type,Protein(g),Carbs(g)
vegan,A,asian,10,5
";
        let err = parse_dataset(csv.as_bytes()).unwrap_err();

        match err {
            AnalysisError::Schema(missing) => assert_eq!(missing, vec!["Fat(g)".to_string()]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_input_reports_all_columns() {
        let err = parse_dataset(b"").unwrap_err();

        match err {
            AnalysisError::Schema(missing) => assert_eq!(missing.len(), REQUIRED_COLUMNS.len()),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_header_only_yields_zero_rows() {
        let csv = "Diet_type,Recipe_name,Cuisine_type,Protein(g),Carbs(g),Fat(g)\n";
        let rows = parse_dataset(csv.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}
