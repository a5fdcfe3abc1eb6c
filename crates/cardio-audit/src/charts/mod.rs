//! PNG rendering of the two audit figures.
//!
//! Both figures are drawn with the `plotters` bitmap backend at the size and
//! resolution given by [`crate::config::ChartSettings`]:
//!
//! - the sensitive-attribute figure: outcome proportions per category next
//!   to a box plot of the numeric attribute per outcome
//! - the cleaning-impact figure: histograms of one column before and after
//!   cleaning
//!
//! Text is rendered with a bundled DejaVu Sans registered as `sans-serif`,
//! so no system font is needed.

mod boxplot;
mod cleaning;
mod histogram;
mod sensitive;

pub use boxplot::{BoxStats, box_stats};
pub use cleaning::render_cleaning_impact;
pub use histogram::{Bin, histogram, max_count};
pub use sensitive::render_sensitive_attributes;

use crate::config::ChartSettings;
use crate::error::{AnalysisError, Result};
use once_cell::sync::OnceCell;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::style::{FontDesc, FontFamily, FontStyle, register_font};
use std::path::Path;

static SANS_SERIF: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans.ttf"
));

static FONT_REGISTERED: OnceCell<()> = OnceCell::new();

impl<E> From<DrawingAreaErrorKind<E>> for AnalysisError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::ChartRendering(err.to_string())
    }
}

/// Register the bundled font under the `sans-serif` family, once per process.
pub(crate) fn ensure_font() -> Result<()> {
    FONT_REGISTERED
        .get_or_try_init(|| {
            register_font(FontFamily::SansSerif.as_str(), FontStyle::Normal, SANS_SERIF).map_err(
                |_| AnalysisError::ChartRendering("bundled font could not be parsed".to_string()),
            )
        })
        .map(|_| ())
}

/// Sans-serif font at the given point size.
pub(crate) fn font(settings: &ChartSettings, points: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, settings.font_px(points), FontStyle::Normal)
}

/// Margin and label-area sizes scaled to the figure resolution.
pub(crate) fn scaled(settings: &ChartSettings, points: f64) -> u32 {
    settings.font_px(points).round().max(1.0) as u32
}

/// Create the parent directory of a chart path.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
