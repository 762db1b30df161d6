//! Grouped aggregation over the cleaned dataset.
//!
//! All orderings and tie-breaks are fixed so that two runs over the same
//! input produce byte-identical output files.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analyzers::types::{CuisineMode, DietAverages, TopRecipe};
use crate::analyzers::utility::mean;
use crate::dataset::{Dataset, Record};
use crate::error::{AnalysisError, Result};

/// Mean of each macro per diet type, one row per distinct diet.
///
/// Rows are ordered by protein mean descending; equal protein means fall
/// back to diet name ascending, and diets whose protein mean is undefined
/// sort last.
pub fn average_macros(dataset: &Dataset) -> Vec<DietAverages> {
    let mut groups: HashMap<&str, (Vec<f64>, Vec<f64>, Vec<f64>)> = HashMap::new();

    for record in dataset.records() {
        let entry = groups.entry(record.diet_type.as_str()).or_default();
        if let Some(v) = record.protein_g {
            entry.0.push(v);
        }
        if let Some(v) = record.carbs_g {
            entry.1.push(v);
        }
        if let Some(v) = record.fat_g {
            entry.2.push(v);
        }
    }

    let mut rows: Vec<DietAverages> = groups
        .into_iter()
        .map(|(diet, (protein, carbs, fat))| DietAverages {
            diet_type: diet.to_string(),
            protein_g: mean(&protein),
            carbs_g: mean(&carbs),
            fat_g: mean(&fat),
        })
        .collect();

    rows.sort_by(|a, b| match (a.protein_g, b.protein_g) {
        (Some(x), Some(y)) => y
            .partial_cmp(&x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.diet_type.cmp(&b.diet_type)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.diet_type.cmp(&b.diet_type),
    });

    rows
}

/// Up to `n` highest-protein recipes per diet.
///
/// Records are sorted once, globally, by protein descending; the sort is
/// stable so equal values keep their load order, and records with an
/// undefined protein sort last. Per-diet rows keep the global order.
pub fn top_protein_recipes(dataset: &Dataset, n: usize) -> Vec<TopRecipe> {
    let mut sorted: Vec<&Record> = dataset.records().iter().collect();
    sorted.sort_by(|a, b| match (a.protein_g, b.protein_g) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let mut taken: HashMap<&str, usize> = HashMap::new();
    let mut rows = Vec::new();

    for record in sorted {
        let count = taken.entry(record.diet_type.as_str()).or_insert(0);
        if *count < n {
            *count += 1;
            rows.push(TopRecipe {
                diet_type: record.diet_type.clone(),
                recipe_name: record.recipe_name.clone(),
                cuisine_type: record.cuisine_type.clone(),
                protein_g: record.protein_g,
                carbs_g: record.carbs_g,
                fat_g: record.fat_g,
            });
        }
    }

    rows
}

/// The diet with the highest mean protein, from the already-sorted
/// averages view.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDataset`] when the view has no rows or no
/// diet has a defined protein mean.
pub fn highest_protein_diet(averages: &[DietAverages]) -> Result<(String, f64)> {
    averages
        .iter()
        .filter_map(|row| row.protein_g.map(|v| (row.diet_type.clone(), v)))
        .next()
        .ok_or(AnalysisError::EmptyDataset(
            "no diet group with a defined protein mean",
        ))
}

/// Most frequent cuisine per diet, one row per diet, ordered by diet name.
/// Count ties go to the lexicographically smaller cuisine name.
pub fn cuisine_modes(dataset: &Dataset) -> Vec<CuisineMode> {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for record in dataset.records() {
        *counts
            .entry((record.diet_type.as_str(), record.cuisine_type.as_str()))
            .or_insert(0) += 1;
    }

    let mut best: HashMap<&str, (&str, usize)> = HashMap::new();
    for ((diet, cuisine), count) in counts {
        match best.get(diet) {
            Some(&(held, held_count))
                if held_count > count || (held_count == count && held < cuisine) => {}
            _ => {
                best.insert(diet, (cuisine, count));
            }
        }
    }

    let mut rows: Vec<CuisineMode> = best
        .into_iter()
        .map(|(diet, (cuisine, count))| CuisineMode {
            diet_type: diet.to_string(),
            cuisine_type: cuisine.to_string(),
            count,
        })
        .collect();

    rows.sort_by(|a, b| a.diet_type.cmp(&b.diet_type));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, RawRecord};

    fn raw(diet: &str, recipe: &str, cuisine: &str, p: &str, c: &str, f: &str) -> RawRecord {
        RawRecord {
            diet_type: diet.to_string(),
            recipe_name: recipe.to_string(),
            cuisine_type: cuisine.to_string(),
            protein_g: p.to_string(),
            carbs_g: c.to_string(),
            fat_g: f.to_string(),
        }
    }

    fn sample() -> Dataset {
        // vegan protein mean = 20, keto protein mean = 20: an exact tie.
        let mut dataset = Dataset::from_raw(vec![
            raw("vegan", "A", "asian", "10", "5", "2"),
            raw("vegan", "B", "asian", "30", "0", "2"),
            raw("keto", "C", "american", "20", "10", "0"),
        ]);
        dataset.impute_missing();
        dataset
    }

    #[test]
    fn test_averages_one_row_per_diet_with_tie_break() {
        let averages = average_macros(&sample());

        assert_eq!(averages.len(), 2);
        // Tied protein means resolve by diet name ascending.
        assert_eq!(averages[0].diet_type, "keto");
        assert_eq!(averages[0].protein_g, Some(20.0));
        assert_eq!(averages[1].diet_type, "vegan");
        assert_eq!(averages[1].protein_g, Some(20.0));
        assert_eq!(averages[1].carbs_g, Some(2.5));
    }

    #[test]
    fn test_averages_sorted_descending_by_protein() {
        let mut dataset = Dataset::from_raw(vec![
            raw("paleo", "P", "french", "5", "1", "1"),
            raw("dash", "D", "indian", "40", "1", "1"),
            raw("mediterranean", "M", "greek", "25", "1", "1"),
        ]);
        dataset.impute_missing();

        let averages = average_macros(&dataset);
        let diets: Vec<&str> = averages.iter().map(|r| r.diet_type.as_str()).collect();
        assert_eq!(diets, vec!["dash", "mediterranean", "paleo"]);
    }

    #[test]
    fn test_undefined_protein_mean_sorts_last() {
        // No imputation here, so the "mystery" group keeps an undefined
        // protein mean.
        let dataset = Dataset::from_raw(vec![
            raw("mystery", "X", "fusion", "?", "1", "1"),
            raw("vegan", "A", "asian", "10", "1", "1"),
        ]);

        let averages = average_macros(&dataset);
        assert_eq!(averages[0].diet_type, "vegan");
        assert_eq!(averages[1].diet_type, "mystery");
        assert_eq!(averages[1].protein_g, None);
    }

    #[test]
    fn test_top_recipes_capped_and_non_increasing() {
        let mut rows = vec![
            raw("vegan", "A", "asian", "10", "1", "1"),
            raw("vegan", "B", "asian", "30", "1", "1"),
            raw("vegan", "C", "asian", "20", "1", "1"),
            raw("vegan", "D", "asian", "25", "1", "1"),
            raw("vegan", "E", "asian", "15", "1", "1"),
            raw("vegan", "F", "asian", "5", "1", "1"),
        ];
        rows.push(raw("keto", "G", "american", "50", "1", "1"));
        let mut dataset = Dataset::from_raw(rows);
        dataset.impute_missing();

        let top = top_protein_recipes(&dataset, 5);

        let vegan: Vec<&TopRecipe> = top.iter().filter(|r| r.diet_type == "vegan").collect();
        assert_eq!(vegan.len(), 5);
        for pair in vegan.windows(2) {
            assert!(pair[0].protein_g >= pair[1].protein_g);
        }
        // The lowest-protein vegan recipe fell off the cut.
        assert!(vegan.iter().all(|r| r.recipe_name != "F"));

        // Global order: keto's 50g recipe leads the whole view.
        assert_eq!(top[0].recipe_name, "G");
    }

    #[test]
    fn test_top_recipes_ties_keep_load_order() {
        let mut dataset = Dataset::from_raw(vec![
            raw("vegan", "first", "asian", "10", "1", "1"),
            raw("vegan", "second", "asian", "10", "1", "1"),
        ]);
        dataset.impute_missing();

        let top = top_protein_recipes(&dataset, 5);
        assert_eq!(top[0].recipe_name, "first");
        assert_eq!(top[1].recipe_name, "second");
    }

    #[test]
    fn test_highest_protein_diet_picks_sorted_head() {
        let averages = average_macros(&sample());
        let (diet, value) = highest_protein_diet(&averages).unwrap();

        // keto wins the tie through the ascending-name tie-break.
        assert_eq!(diet, "keto");
        assert_eq!(value, 20.0);
    }

    #[test]
    fn test_highest_protein_diet_empty_view() {
        let err = highest_protein_diet(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset(_)));
    }

    #[test]
    fn test_cuisine_mode_counts() {
        let modes = cuisine_modes(&sample());

        assert_eq!(
            modes,
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
        );
    }

    #[test]
    fn test_cuisine_mode_tie_is_lexicographic() {
        let dataset = Dataset::from_raw(vec![
            raw("vegan", "A", "mexican", "1", "1", "1"),
            raw("vegan", "B", "asian", "1", "1", "1"),
        ]);

        let modes = cuisine_modes(&dataset);
        assert_eq!(modes[0].cuisine_type, "asian");
        assert_eq!(modes[0].count, 1);
    }
}
