//! Row types for the aggregate views and the run summary.
//!
//! Serde renames keep the CSV headers identical to the input dataset's
//! column names. Undefined means serialize as empty cells.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the per-diet macro averages view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietAverages {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Protein(g)")]
    pub protein_g: Option<f64>,
    #[serde(rename = "Carbs(g)")]
    pub carbs_g: Option<f64>,
    #[serde(rename = "Fat(g)")]
    pub fat_g: Option<f64>,
}

/// One row of the top-protein recipes view.
#[derive(Debug, Clone, Serialize)]
pub struct TopRecipe {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Recipe_name")]
    pub recipe_name: String,
    #[serde(rename = "Cuisine_type")]
    pub cuisine_type: String,
    #[serde(rename = "Protein(g)")]
    pub protein_g: Option<f64>,
    #[serde(rename = "Carbs(g)")]
    pub carbs_g: Option<f64>,
    #[serde(rename = "Fat(g)")]
    pub fat_g: Option<f64>,
}

/// One row of the modal-cuisine view: the most frequent cuisine for a diet
/// and how many recipes that pair has.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuisineMode {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Cuisine_type")]
    pub cuisine_type: String,
    #[serde(rename = "Count")]
    pub count: usize,
}

/// Final run summary, logged and printed as JSON by the CLI.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub row_count: usize,
    pub highest_protein_diet: String,
    pub highest_protein_value: f64,
}
