//! Two-panel figure for the sensitive attributes.
//!
//! Left: share of each outcome value per category of the categorical
//! attribute, as grouped bars. Right: box plot of the numeric attribute per
//! outcome value. A panel whose columns are missing only gets its caption.

use super::boxplot::{BoxStats, box_stats};
use super::{ensure_font, ensure_parent, font, scaled};
use crate::config::{AnalysisConfig, ChartSettings};
use crate::error::Result;
use crate::sensitive::{Crosstab, crosstab_normalized, group_values_by_outcome};
use crate::utils::{format_outcome, numeric_values, string_values};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::{DataFrame, Series};
use std::path::PathBuf;
use tracing::{debug, info};

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FIGURE_TITLE: &str = "Sensitive Attribute Analysis";

const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

const BOX_HALF_WIDTH: f64 = 0.25;
const CAP_HALF_WIDTH: f64 = 0.125;

fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Render the sensitive-attribute figure and return its path.
pub fn render_sensitive_attributes(df: &DataFrame, config: &AnalysisConfig) -> Result<PathBuf> {
    ensure_font()?;
    let path = config.sensitive_chart_path();
    ensure_parent(&path)?;
    let settings = &config.chart;

    let outcome = optional_values(df, &config.outcome_column, numeric_values)?;

    let crosstab = match (
        optional_values(df, &config.categorical_sensitive_column, string_values)?,
        outcome.as_deref(),
    ) {
        (Some(categories), Some(outcome)) => Some(crosstab_normalized(&categories, outcome)),
        _ => None,
    };

    let groups = match (
        optional_values(df, &config.numeric_sensitive_column, numeric_values)?,
        outcome.as_deref(),
    ) {
        (Some(values), Some(outcome)) => Some(group_values_by_outcome(&values, outcome)),
        _ => None,
    };

    {
        let root = BitMapBackend::new(&path, settings.pixel_size()).into_drawing_area();
        root.fill(&WHITE)?;
        let figure = root.titled(FIGURE_TITLE, font(settings, 16.0))?;
        let panels = figure.split_evenly((1, 2));

        draw_crosstab_panel(
            &panels[0],
            crosstab.as_ref(),
            &config.categorical_sensitive_column,
            &config.outcome_column,
            settings,
        )?;
        draw_boxplot_panel(
            &panels[1],
            groups.as_deref(),
            &config.numeric_sensitive_column,
            &config.outcome_column,
            settings,
        )?;

        root.present()?;
    }

    info!("Saved sensitive attribute chart to {}", path.display());
    Ok(path)
}

fn optional_values<T>(
    df: &DataFrame,
    name: &str,
    extract: fn(&Series) -> Result<Vec<Option<T>>>,
) -> Result<Option<Vec<Option<T>>>> {
    match df.column(name) {
        Ok(col) => extract(col.as_materialized_series()).map(Some),
        Err(_) => {
            debug!("Column '{}' missing, its panel stays empty", name);
            Ok(None)
        }
    }
}

fn draw_crosstab_panel(
    area: &Panel<'_>,
    table: Option<&Crosstab>,
    category_col: &str,
    outcome_col: &str,
    settings: &ChartSettings,
) -> Result<()> {
    let caption = format!("{} vs {} (proportion)", category_col, outcome_col);
    let Some(table) = table.filter(|t| !t.is_empty() && !t.outcomes.is_empty()) else {
        area.titled(&caption, font(settings, 12.0))?;
        return Ok(());
    };

    let n = table.categories.len();
    let mut chart = ChartBuilder::on(area)
        .caption(&caption, font(settings, 12.0))
        .margin(scaled(settings, 8.0))
        .x_label_area_size(scaled(settings, 24.0))
        .y_label_area_size(scaled(settings, 32.0))
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..1.05f64)?;

    let category_label = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < n {
            table.categories[idx as usize].clone()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n * 2 + 1)
        .x_label_formatter(&category_label)
        .x_desc(category_col)
        .y_desc("Proportion")
        .label_style(font(settings, 9.0))
        .axis_desc_style(font(settings, 10.0))
        .draw()?;

    let width = 0.8 / table.outcomes.len() as f64;
    let marker = scaled(settings, 4.0) as i32;

    for (j, outcome) in table.outcomes.iter().enumerate() {
        let color = palette_color(j);
        chart
            .draw_series(table.proportions.iter().enumerate().map(|(i, row)| {
                let x0 = i as f64 - 0.4 + width * j as f64;
                Rectangle::new([(x0, 0.0), (x0 + width, row[j])], color.mix(0.9).filled())
            }))?
            .label(format!("{} = {}", outcome_col, format_outcome(*outcome)))
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - marker), (x + 2 * marker, y + marker)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .label_font(font(settings, 9.0))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    Ok(())
}

fn draw_boxplot_panel(
    area: &Panel<'_>,
    groups: Option<&[(f64, Vec<f64>)]>,
    value_col: &str,
    outcome_col: &str,
    settings: &ChartSettings,
) -> Result<()> {
    let caption = format!("{} by {}", value_col, outcome_col);
    let boxes: Vec<(String, BoxStats)> = groups
        .unwrap_or_default()
        .iter()
        .filter_map(|(outcome, values)| Some((format_outcome(*outcome), box_stats(values)?)))
        .collect();
    if boxes.is_empty() {
        area.titled(&caption, font(settings, 12.0))?;
        return Ok(());
    }

    let (lo, hi) = boxes
        .iter()
        .flat_map(|(_, b)| {
            [b.lower_whisker, b.upper_whisker]
                .into_iter()
                .chain(b.outliers.iter().copied())
        })
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let pad = ((hi - lo) * 0.05).max(0.5);
    let n = boxes.len();

    let mut chart = ChartBuilder::on(area)
        .caption(&caption, font(settings, 12.0))
        .margin(scaled(settings, 8.0))
        .x_label_area_size(scaled(settings, 24.0))
        .y_label_area_size(scaled(settings, 32.0))
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), (lo - pad)..(hi + pad))?;

    let outcome_label = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < n {
            boxes[idx as usize].0.clone()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n * 2 + 1)
        .x_label_formatter(&outcome_label)
        .x_desc(outcome_col)
        .y_desc(value_col)
        .label_style(font(settings, 9.0))
        .axis_desc_style(font(settings, 10.0))
        .draw()?;

    let stroke = scaled(settings, 1.0);
    let radius = scaled(settings, 2.5) as i32;
    for (i, (_, b)) in boxes.iter().enumerate() {
        let x = i as f64;
        let style = palette_color(i).stroke_width(stroke);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - BOX_HALF_WIDTH, b.q1), (x + BOX_HALF_WIDTH, b.q3)],
            style,
        )))?;
        chart.draw_series(
            [
                (BOX_HALF_WIDTH, b.median, b.median),
                (0.0, b.q3, b.upper_whisker),
                (0.0, b.q1, b.lower_whisker),
                (CAP_HALF_WIDTH, b.upper_whisker, b.upper_whisker),
                (CAP_HALF_WIDTH, b.lower_whisker, b.lower_whisker),
            ]
            .into_iter()
            .map(|(half, y0, y1)| PathElement::new(vec![(x - half, y0), (x + half, y1)], style)),
        )?;
        chart.draw_series(b.outliers.iter().map(|v| Circle::new((x, *v), radius, style)))?;
    }

    Ok(())
}
