use serde::{Deserialize, Serialize};

use crate::core::decimation::{DecimationAlgorithm, lttb};
use crate::core::scale::ChartScales;
use crate::error::DashboardResult;

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Splits `(x, value)` samples into contiguous runs, breaking at gaps.
///
/// Each run is trimmed to the visible x window, keeping one neighbour on each
/// side so lines still reach the plot edges.
#[must_use]
pub fn visible_runs(points: &[(f64, Option<f64>)], x_min: f64, x_max: f64) -> Vec<Vec<(f64, f64)>> {
    let (low, high) = if x_min <= x_max {
        (x_min, x_max)
    } else {
        (x_max, x_min)
    };

    points
        .split(|(_, value)| value.is_none())
        .filter(|run| !run.is_empty())
        .filter_map(|run| {
            let first_inside = run.iter().position(|(x, _)| *x >= low)?;
            let last_inside = run.iter().rposition(|(x, _)| *x <= high)?;
            if first_inside > last_inside + 1 {
                return None;
            }
            let start = first_inside.saturating_sub(1);
            let end = (last_inside + 1).min(run.len() - 1);
            Some(
                run[start..=end]
                    .iter()
                    .filter_map(|(x, value)| value.map(|v| (*x, v)))
                    .collect(),
            )
        })
        .collect()
}

/// Projects series samples into pixel segments for the current scales.
///
/// Gaps (`None`) are never bridged. When `algorithm` is LTTB and the visible
/// sample count exceeds `samples`, each run is reduced in proportion to its
/// share of the visible samples.
pub fn project_series_segments(
    points: &[(f64, Option<f64>)],
    scales: ChartScales,
    algorithm: DecimationAlgorithm,
    samples: usize,
) -> DashboardResult<Vec<LineSegment>> {
    scales.validate()?;
    let runs = visible_runs(points, scales.x.min, scales.x.max);
    let visible_total: usize = runs.iter().map(Vec::len).sum();
    let decimate = algorithm == DecimationAlgorithm::Lttb && visible_total > samples;

    let mut segments = Vec::new();
    for run in runs {
        let run = if decimate {
            let share = (samples as f64 * run.len() as f64 / visible_total as f64).round() as usize;
            lttb(&run, share.max(3))
        } else {
            run
        };

        let mut mapped = Vec::with_capacity(run.len());
        for (x, y) in run {
            mapped.push((scales.x.value_to_pixel_x(x)?, scales.y.value_to_pixel_y(y)?));
        }
        for pair in mapped.windows(2) {
            segments.push(LineSegment {
                x1: pair[0].0,
                y1: pair[0].1,
                x2: pair[1].0,
                y2: pair[1].1,
            });
        }
    }

    Ok(segments)
}
