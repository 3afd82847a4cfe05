//! Two-panel error-analysis figure.
//!
//! Panel A scatters predictions against true values with the identity line;
//! a well-fit model hugs the diagonal. Panel B scatters predictions against
//! residuals with the zero line; structure here means the model is missing
//! something. The figure is written as an SVG.

use std::path::Path;

use plotters::prelude::*;

use super::DiagnosticsError;

/// Point color for both scatters.
const POINT_COLOR: RGBColor = RGBColor(0xff, 0x5a, 0x36);
/// Reference-line color (identity and zero lines).
const LINE_COLOR: RGBColor = RGBColor(0x19, 0x32, 0x51);

/// Axis domain for the diagnostic panels.
///
/// Whether the bounds are pinned or derived from the data is a deliberate
/// configuration choice; pinned bounds keep successive runs comparable,
/// derived bounds always frame the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotDomain {
    /// Fixed bounds shared by both axes of the identity panel.
    Fixed { min: f32, max: f32 },
    /// Bounds derived from the data's min/max with a small margin.
    Auto,
}

impl PlotDomain {
    /// Resolve to concrete bounds over the values that share the axis.
    fn resolve(&self, values: &[&[f32]]) -> (f32, f32) {
        match *self {
            PlotDomain::Fixed { min, max } => (min, max),
            PlotDomain::Auto => {
                let mut lo = f32::INFINITY;
                let mut hi = f32::NEG_INFINITY;
                for slice in values {
                    for &v in *slice {
                        lo = lo.min(v);
                        hi = hi.max(v);
                    }
                }
                if !lo.is_finite() || !hi.is_finite() {
                    return (-1.0, 1.0);
                }
                let pad = ((hi - lo) * 0.05).max(1.0);
                (lo - pad, hi + pad)
            }
        }
    }
}

/// Render the two-panel figure to `path`.
///
/// Inputs must be the same non-empty, positionally aligned sequences used
/// for evaluation; `residuals` comes from [`super::residuals`].
pub fn render_error_analysis(
    y_true: &[f32],
    y_pred: &[f32],
    residuals: &[f32],
    path: &Path,
    domain: PlotDomain,
) -> Result<(), DiagnosticsError> {
    let render_err = |message: String| DiagnosticsError::Render {
        path: path.to_owned(),
        message,
    };

    let (lo, hi) = domain.resolve(&[y_pred, y_true]);
    // Residuals live on their own scale even when the x-axis is pinned.
    let (rlo, rhi) = PlotDomain::Auto.resolve(&[residuals]);

    let root = SVGBackend::new(path, (1500, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_err(e.to_string()))?;
    let panels = root.split_evenly((1, 2));

    // Panel A: true vs. predicted with the identity reference.
    {
        let mut chart = ChartBuilder::on(&panels[0])
            .caption("True vs. predicted values", ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(44)
            .y_label_area_size(56)
            .build_cartesian_2d(lo..hi, lo..hi)
            .map_err(|e| render_err(e.to_string()))?;
        chart
            .configure_mesh()
            .x_desc("predicted values")
            .y_desc("true values")
            .draw()
            .map_err(|e| render_err(e.to_string()))?;
        chart
            .draw_series(
                y_pred
                    .iter()
                    .zip(y_true)
                    .map(|(&p, &t)| Circle::new((p, t), 3, POINT_COLOR.mix(0.7).filled())),
            )
            .map_err(|e| render_err(e.to_string()))?;
        chart
            .draw_series(LineSeries::new(vec![(lo, lo), (hi, hi)], &LINE_COLOR))
            .map_err(|e| render_err(e.to_string()))?;
    }

    // Panel B: residuals vs. predicted with the zero reference.
    {
        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Residual Scatter Plot", ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(44)
            .y_label_area_size(56)
            .build_cartesian_2d(lo..hi, rlo..rhi)
            .map_err(|e| render_err(e.to_string()))?;
        chart
            .configure_mesh()
            .x_desc("predicted values")
            .y_desc("residuals")
            .draw()
            .map_err(|e| render_err(e.to_string()))?;
        chart
            .draw_series(
                y_pred
                    .iter()
                    .zip(residuals)
                    .map(|(&p, &r)| Circle::new((p, r), 3, POINT_COLOR.mix(0.7).filled())),
            )
            .map_err(|e| render_err(e.to_string()))?;
        chart
            .draw_series(LineSeries::new(vec![(lo, 0.0), (hi, 0.0)], &LINE_COLOR))
            .map_err(|e| render_err(e.to_string()))?;
    }

    root.present().map_err(|e| render_err(e.to_string()))?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
