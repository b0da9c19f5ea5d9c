//! Peak-viewership chart rendering.
//!
//! Draws concurrent viewers against minutes-since-start as a line chart
//! with a vertical marker and annotation at the peak, at a fixed
//! resolution, in two encodings (SVG and PNG) named deterministically
//! from the caller's stem.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use streamwatch_core::{PeakStat, Sample};

use crate::error::PlotError;

const SIZE: (u32, u32) = (1280, 720);

/// The two image encodings produced for one broadcast.
#[derive(Debug, Clone)]
pub struct PlotArtifacts {
    pub svg: PathBuf,
    pub png: PathBuf,
}

/// Renders `<stem>.svg` and `<stem>.png` under `<out_dir>/plots/`.
///
/// # Errors
///
/// - [`PlotError::EmptySeries`] if `series` has no samples.
/// - [`PlotError::Io`] if the plots directory cannot be created.
/// - [`PlotError::Render`] on backend drawing failure.
pub fn render(
    series: &[Sample],
    start_epoch_secs: i64,
    peak: PeakStat,
    out_dir: &Path,
    stem: &str,
) -> Result<PlotArtifacts, PlotError> {
    if series.is_empty() {
        return Err(PlotError::EmptySeries {
            broadcast: stem.to_owned(),
        });
    }

    let plots_dir = out_dir.join("plots");
    std::fs::create_dir_all(&plots_dir).map_err(|e| PlotError::Io {
        path: plots_dir.clone(),
        source: e,
    })?;

    let svg = plots_dir.join(format!("{stem}.svg"));
    let png = plots_dir.join(format!("{stem}.png"));

    draw_chart(
        SVGBackend::new(&svg, SIZE).into_drawing_area(),
        series,
        start_epoch_secs,
        peak,
    )
    .map_err(|message| PlotError::Render {
        path: svg.clone(),
        message,
    })?;

    draw_chart(
        BitMapBackend::new(&png, SIZE).into_drawing_area(),
        series,
        start_epoch_secs,
        peak,
    )
    .map_err(|message| PlotError::Render {
        path: png.clone(),
        message,
    })?;

    Ok(PlotArtifacts { svg, png })
}

/// Draws one chart onto a backend-agnostic drawing area. Errors are
/// flattened to their display form since each backend has its own error
/// type.
#[allow(clippy::cast_precision_loss)]
fn draw_chart<DB: DrawingBackend>(
    area: DrawingArea<DB, Shift>,
    series: &[Sample],
    start_epoch_secs: i64,
    peak: PeakStat,
) -> Result<(), String> {
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|s| {
            (
                (s.epoch_secs - start_epoch_secs) as f64 / 60.0,
                s.viewers as f64,
            )
        })
        .collect();

    let x_max = points.iter().map(|p| p.0).fold(1.0_f64, f64::max);
    let y_top = series
        .iter()
        .map(|s| s.viewers)
        .max()
        .unwrap_or(1)
        .max(1) as f64
        * 1.1;

    area.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&area)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(0.0..x_max, 0.0..y_top)
        .map_err(|e| e.to_string())?;

    // Mesh labels need a system font; hosts without one still get the
    // data series and marker below.
    if let Err(e) = chart
        .configure_mesh()
        .x_desc("minutes since start")
        .y_desc("concurrent viewers")
        .draw()
    {
        tracing::warn!(error = %e, "axis labels unavailable; rendering chart without them");
    }

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(|e| e.to_string())?;

    // Peak marker spans the full count axis, with the value annotated
    // beside it.
    let peak_x = peak.offset_secs as f64 / 60.0;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(peak_x, 0.0), (peak_x, y_top)],
            RED.stroke_width(1),
        )))
        .map_err(|e| e.to_string())?;
    if let Err(e) = chart.draw_series(std::iter::once(Text::new(
        format!("peak {}", peak.viewers),
        (peak_x, y_top * 0.97),
        ("sans-serif", 18).into_font().color(&RED),
    ))) {
        tracing::warn!(error = %e, "peak annotation unavailable; rendering chart without it");
    }

    area.present().map_err(|e| e.to_string())?;
    Ok(())
}
