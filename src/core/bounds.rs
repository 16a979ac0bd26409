use serde::{Deserialize, Serialize};

/// Fraction of the value range added below `min` and above `max`.
pub const BOUNDS_PADDING_RATIO: f64 = 0.05;

/// Padded numeric axis range for one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Derives padded bounds from non-null series values.
///
/// Empty input yields `{0, 1}`. A zero range falls back to `abs(min)`, then
/// to `1`, so constant series still get a usable axis.
#[must_use]
pub fn calculate_bounds(values: &[f64]) -> AxisBounds {
    let Some((min, max)) = min_max(values) else {
        return AxisBounds::default();
    };

    let mut range = max - min;
    if range == 0.0 {
        range = min.abs();
    }
    if range == 0.0 {
        range = 1.0;
    }

    AxisBounds {
        min: min - range * BOUNDS_PADDING_RATIO,
        max: max + range * BOUNDS_PADDING_RATIO,
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = values.split_first()?;
    Some(
        rest.iter()
            .fold((*first, *first), |(min, max), value| (min.min(*value), max.max(*value))),
    )
}
