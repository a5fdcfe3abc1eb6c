//! Before/after histogram figure for the cleaning step.

use super::histogram::{Bin, histogram, max_count};
use super::{ensure_font, ensure_parent, font, scaled};
use crate::config::{AnalysisConfig, ChartSettings};
use crate::error::Result;
use crate::utils::{column_series, numeric_values};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::info;

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const ORIGINAL_COLOR: RGBColor = RED;
const CLEANED_COLOR: RGBColor = GREEN;

/// Render histograms of the configured column for the original and the
/// cleaned table side by side, and return the figure path.
///
/// Fails with `ColumnNotFound` if either table lacks the column.
pub fn render_cleaning_impact(
    original: &DataFrame,
    cleaned: &DataFrame,
    config: &AnalysisConfig,
) -> Result<PathBuf> {
    let column = &config.histogram_column;
    let before = present_values(original, column)?;
    let after = present_values(cleaned, column)?;

    ensure_font()?;
    let path = config.cleaning_chart_path();
    ensure_parent(&path)?;
    let settings = &config.chart;

    {
        let root = BitMapBackend::new(&path, settings.pixel_size()).into_drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, 2));

        draw_histogram_panel(
            &panels[0],
            &histogram(&before, config.histogram_bins),
            &format!("{} distribution (original)", column),
            column,
            ORIGINAL_COLOR,
            settings,
        )?;
        draw_histogram_panel(
            &panels[1],
            &histogram(&after, config.histogram_bins),
            &format!("{} distribution (cleaned)", column),
            column,
            CLEANED_COLOR,
            settings,
        )?;

        root.present()?;
    }

    info!("Saved cleaning impact chart to {}", path.display());
    Ok(path)
}

fn present_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    Ok(numeric_values(column_series(df, column)?)?
        .into_iter()
        .flatten()
        .collect())
}

fn draw_histogram_panel(
    area: &Panel<'_>,
    bins: &[Bin],
    caption: &str,
    x_desc: &str,
    color: RGBColor,
    settings: &ChartSettings,
) -> Result<()> {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        area.titled(caption, font(settings, 12.0))?;
        return Ok(());
    };

    let y_max = (max_count(bins) as f64 * 1.1).max(1.0);
    let mut chart = ChartBuilder::on(area)
        .caption(caption, font(settings, 12.0))
        .margin(scaled(settings, 8.0))
        .x_label_area_size(scaled(settings, 24.0))
        .y_label_area_size(scaled(settings, 32.0))
        .build_cartesian_2d(first.start..last.end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .label_style(font(settings, 9.0))
        .axis_desc_style(font(settings, 10.0))
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            color.mix(0.7).filled(),
        )
    }))?;

    Ok(())
}
