//! Chart rendering over the aggregate views.
//!
//! Consumes the already-computed views and feeds nothing back into the
//! pipeline. Layout mirrors the result files: one bar chart and one
//! heatmap over the per-diet averages, one scatter over the top-protein
//! recipes.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use crate::analyzers::types::{DietAverages, TopRecipe};

const MACROS: [&str; 3] = ["Protein(g)", "Carbs(g)", "Fat(g)"];

/// Renders all three charts as PNGs under `chart_dir`.
pub fn render_all(
    chart_dir: &Path,
    averages: &[DietAverages],
    top_recipes: &[TopRecipe],
) -> Result<()> {
    std::fs::create_dir_all(chart_dir)?;

    render_bar(&chart_dir.join("avg_macros_bar.png"), averages)?;
    render_heatmap(&chart_dir.join("avg_macros_heatmap.png"), averages)?;
    render_scatter(&chart_dir.join("top_protein_scatter.png"), top_recipes)?;

    info!(dir = %chart_dir.display(), "Charts rendered");
    Ok(())
}

/// An undefined mean draws as a zero-height bar / blank cell.
fn macro_values(row: &DietAverages) -> [f64; 3] {
    [
        row.protein_g.unwrap_or(0.0),
        row.carbs_g.unwrap_or(0.0),
        row.fat_g.unwrap_or(0.0),
    ]
}

/// Grouped bar chart: one cluster per diet, one bar per macro.
fn render_bar(path: &Path, averages: &[DietAverages]) -> Result<()> {
    let y_max = averages
        .iter()
        .flat_map(macro_values)
        .fold(0.0f64, f64::max)
        * 1.1;
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    let root = BitMapBackend::new(path, (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    // Each diet occupies 4 x-units: three bars and a gap.
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Macronutrients by Diet Type", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0i32..(averages.len() as i32 * 4), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Diet")
        .y_desc("Average (g)")
        .x_labels(averages.len())
        .x_label_formatter(&|x| {
            averages
                .get((*x / 4) as usize)
                .map(|row| row.diet_type.clone())
                .unwrap_or_default()
        })
        .draw()?;

    for (i, row) in averages.iter().enumerate() {
        for (j, value) in macro_values(row).into_iter().enumerate() {
            let x0 = i as i32 * 4 + j as i32;
            let series = chart.draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x0 + 1, value)],
                Palette99::pick(j).filled(),
            )))?;
            if i == 0 {
                series.label(MACROS[j]).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], Palette99::pick(j).filled())
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Diet-by-macro grid, cell color scaled to the mean value.
fn render_heatmap(path: &Path, averages: &[DietAverages]) -> Result<()> {
    let max = averages
        .iter()
        .flat_map(macro_values)
        .fold(0.0f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let root = BitMapBackend::new(path, (900, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Heatmap: Average Macronutrients by Diet Type",
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(140)
        .build_cartesian_2d(0i32..3i32, 0i32..averages.len() as i32)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(MACROS.len())
        .x_label_formatter(&|x| {
            MACROS
                .get(*x as usize)
                .map(|m| m.to_string())
                .unwrap_or_default()
        })
        .y_labels(averages.len())
        .y_label_formatter(&|y| {
            averages
                .get(*y as usize)
                .map(|row| row.diet_type.clone())
                .unwrap_or_default()
        })
        .draw()?;

    for (y, row) in averages.iter().enumerate() {
        for (x, value) in macro_values(row).into_iter().enumerate() {
            let cold = (255.0 * (1.0 - value / max)) as u8;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x as i32, y as i32), (x as i32 + 1, y as i32 + 1)],
                RGBColor(255, cold, cold).filled(),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Carbs vs protein for the top-protein recipes, point color keyed by
/// cuisine.
fn render_scatter(path: &Path, top_recipes: &[TopRecipe]) -> Result<()> {
    let points: Vec<(f64, f64, &str)> = top_recipes
        .iter()
        .filter_map(|row| match (row.carbs_g, row.protein_g) {
            (Some(carbs), Some(protein)) => Some((carbs, protein, row.cuisine_type.as_str())),
            _ => None,
        })
        .collect();

    let x_max = points.iter().map(|p| p.0).fold(0.0f64, f64::max) * 1.1;
    let x_max = if x_max > 0.0 { x_max } else { 1.0 };
    let y_max = points.iter().map(|p| p.1).fold(0.0f64, f64::max) * 1.1;
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    let mut cuisines: Vec<&str> = points.iter().map(|p| p.2).collect();
    cuisines.sort_unstable();
    cuisines.dedup();

    let root = BitMapBackend::new(path, (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Top Protein Recipes (Top 5 per Diet): Protein vs Carbs",
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Carbs (g)")
        .y_desc("Protein (g)")
        .draw()?;

    for (idx, cuisine) in cuisines.iter().enumerate() {
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.2 == *cuisine)
                    .map(|p| Circle::new((p.0, p.1), 4, Palette99::pick(idx).filled())),
            )?
            .label(*cuisine)
            .legend(move |(x, y)| Circle::new((x, y), 4, Palette99::pick(idx).filled()));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
