//! The in-memory nutrition dataset and its cleaning passes.
//!
//! Rows are loaded once, coerced, imputed, and then read-only for the rest
//! of the run. Load order is preserved because the top-recipes view uses it
//! as a sort tie-break.

use serde::Deserialize;

use crate::analyzers::utility::{mean, safe_divide};

/// One CSV row as read from disk. Metric cells stay raw text here so that
/// malformed values survive loading and can be coerced leniently.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Recipe_name")]
    pub recipe_name: String,
    #[serde(rename = "Cuisine_type")]
    pub cuisine_type: String,
    #[serde(rename = "Protein(g)")]
    pub protein_g: String,
    #[serde(rename = "Carbs(g)")]
    pub carbs_g: String,
    #[serde(rename = "Fat(g)")]
    pub fat_g: String,
}

/// A typed row. Metrics are `None` until imputation resolves them, and stay
/// `None` only when an entire column had no usable values.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub diet_type: String,
    pub recipe_name: String,
    pub cuisine_type: String,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

impl Record {
    /// Protein-to-carbs ratio. `None` when either side is missing or the
    /// denominator is zero, never an error or infinity.
    pub fn protein_to_carbs_ratio(&self) -> Option<f64> {
        safe_divide(self.protein_g, self.carbs_g)
    }

    /// Carbs-to-fat ratio, same missing/zero rules as above.
    pub fn carbs_to_fat_ratio(&self) -> Option<f64> {
        safe_divide(self.carbs_g, self.fat_g)
    }
}

/// Lenient numeric coercion: anything that does not parse as a finite
/// number counts as missing.
fn coerce(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Coerces raw rows into typed records, preserving row order. No row is
    /// ever dropped for being malformed.
    pub fn from_raw(rows: Vec<RawRecord>) -> Self {
        let records = rows
            .into_iter()
            .map(|row| Record {
                diet_type: row.diet_type,
                recipe_name: row.recipe_name,
                cuisine_type: row.cuisine_type,
                protein_g: coerce(&row.protein_g),
                carbs_g: coerce(&row.carbs_g),
                fat_g: coerce(&row.fat_g),
            })
            .collect();

        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column-wide means over the values present before imputation.
    /// A column with no values at all has an undefined mean.
    fn column_means(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        let protein: Vec<f64> = self.records.iter().filter_map(|r| r.protein_g).collect();
        let carbs: Vec<f64> = self.records.iter().filter_map(|r| r.carbs_g).collect();
        let fat: Vec<f64> = self.records.iter().filter_map(|r| r.fat_g).collect();

        (mean(&protein), mean(&carbs), mean(&fat))
    }

    /// Replaces every missing metric with its column mean, computed once
    /// over the whole dataset before any replacement. An entirely-missing
    /// column keeps its `None`s.
    pub fn impute_missing(&mut self) {
        let (protein_mean, carbs_mean, fat_mean) = self.column_means();

        for record in &mut self.records {
            if record.protein_g.is_none() {
                record.protein_g = protein_mean;
            }
            if record.carbs_g.is_none() {
                record.carbs_g = carbs_mean;
            }
            if record.fat_g.is_none() {
                record.fat_g = fat_mean;
            }
        }
    }
}
