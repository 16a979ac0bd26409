use serde::{Deserialize, Serialize};

use crate::core::{AxisBounds, DecimationAlgorithm, Viewport, unix_millis_to_instant};
use crate::render::Color;

/// Down-sampling settings for long series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimationOptions {
    pub enabled: bool,
    pub algorithm: DecimationAlgorithm,
    /// Target sample count; `None` uses the plot width in pixels.
    #[serde(default)]
    pub samples: Option<usize>,
}

impl Default for DecimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            algorithm: DecimationAlgorithm::Lttb,
            samples: None,
        }
    }
}

impl DecimationOptions {
    #[must_use]
    pub fn effective_algorithm(self) -> DecimationAlgorithm {
        if self.enabled {
            self.algorithm
        } else {
            DecimationAlgorithm::None
        }
    }

    #[must_use]
    pub fn effective_samples(self, viewport: Viewport) -> usize {
        self.samples.unwrap_or(viewport.width as usize)
    }
}

/// Display unit of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeUnit {
    #[default]
    Day,
}

impl TimeUnit {
    #[must_use]
    pub fn millis(self) -> f64 {
        match self {
            Self::Day => 86_400_000.0,
        }
    }

    #[must_use]
    pub fn label_format(self) -> &'static str {
        match self {
            Self::Day => "%b %-d",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub border_color: Color,
    pub fill_color: Color,
    pub border_width: f64,
    pub tension: f64,
}

/// Time x axis fitted to the data extent (Unix milliseconds).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxisOptions {
    pub min: f64,
    pub max: f64,
    pub unit: TimeUnit,
    pub tooltip_format: String,
    pub show_grid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxisOptions {
    pub bounds: AxisBounds,
    pub max_ticks: usize,
    pub grid_color: Color,
}

/// Everything a backend needs to construct one line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub label: String,
    pub viewport: Viewport,
    /// `(unix_millis, value)`; `None` is a gap.
    pub points: Vec<(f64, Option<f64>)>,
    pub line: LineStyle,
    pub x_axis: TimeAxisOptions,
    pub y_axis: ValueAxisOptions,
    pub decimation: DecimationOptions,
    pub show_legend: bool,
    pub animation: bool,
}

impl ChartConfig {
    /// Tooltip body, e.g. `"A: 1,234.5"`.
    #[must_use]
    pub fn tooltip_label(&self, value: f64) -> String {
        format!("{}: {}", self.label, format_axis_value(value))
    }

    /// Tooltip heading for a point's time.
    #[must_use]
    pub fn tooltip_title(&self, millis: f64) -> String {
        format_time_label(millis, &self.x_axis.tooltip_format)
    }
}

/// Formats a value for ticks and tooltips: rounded to two decimals, trailing
/// zeros trimmed, thousands grouped with `,`.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let mut text = format!("{value:.2}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_owned();
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Formats an axis time (Unix milliseconds, UTC) with a chrono pattern.
#[must_use]
pub fn format_time_label(millis: f64, pattern: &str) -> String {
    match unix_millis_to_instant(millis) {
        Ok(instant) => instant.format(pattern).to_string(),
        Err(_) => format_axis_value(millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_grouped_and_trimmed() {
        assert_eq!(format_axis_value(1234.5), "1,234.5");
        assert_eq!(format_axis_value(1_234_567.891), "1,234,567.89");
        assert_eq!(format_axis_value(12.0), "12");
        assert_eq!(format_axis_value(-0.001), "0");
        assert_eq!(format_axis_value(-98_765.4), "-98,765.4");
        assert_eq!(format_axis_value(0.105), "0.1");
        assert_eq!(format_axis_value(999.999), "1,000");
    }

    #[test]
    fn day_labels_use_short_month() {
        // 2024-03-05T12:00:00Z
        assert_eq!(format_time_label(1_709_640_000_000.0, "%b %-d"), "Mar 5");
    }
}
