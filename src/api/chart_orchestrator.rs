use tracing::debug;

use crate::core::{PointerPosition, Series, Viewport, calculate_bounds};
use crate::error::{DashboardError, DashboardResult};
use crate::interaction::{ViewportController, ZoomBehavior};
use crate::render::{
    ChartBackend, ChartConfig, ChartSurface, Color, DecimationOptions, LineStyle, RedrawMode,
    TimeAxisOptions, TimeUnit, ToolbarButton, ValueAxisOptions,
};

use super::DashboardConfig;

pub const DAY_MILLIS: f64 = 86_400_000.0;
/// Area fill opacity relative to the line color (`0x20` of `0xff`).
pub const FILL_ALPHA: f64 = 32.0 / 255.0;
pub const LINE_TENSION: f64 = 0.1;
pub const LINE_BORDER_WIDTH: f64 = 1.0;
pub const VALUE_AXIS_MAX_TICKS: usize = 5;
pub const TOOLTIP_TIME_FORMAT: &str = "%b %-d";

const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);

/// Input event routed to one chart card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    Toolbar(ToolbarButton),
    PointerDown(PointerPosition),
    PointerMove(PointerPosition),
    PointerUp,
    PointerLeave,
    Wheel {
        delta_y: f64,
        position: PointerPosition,
    },
    Pinch {
        scale: f64,
        center: PointerPosition,
    },
}

/// Turns series into configured, interactive charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOrchestrator {
    viewport: Viewport,
    zoom: ZoomBehavior,
    decimation: DecimationOptions,
    animation: bool,
}

impl ChartOrchestrator {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            zoom: ZoomBehavior::default(),
            decimation: DecimationOptions::default(),
            animation: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            viewport: Viewport::new(config.chart_width_px, config.chart_height_px),
            zoom: config.zoom,
            decimation: config.decimation,
            animation: config.animation,
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomBehavior) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_decimation(mut self, decimation: DecimationOptions) -> Self {
        self.decimation = decimation;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Chart configuration for `series` drawn in `color`.
    #[must_use]
    pub fn chart_config(&self, series: &Series, color: Color) -> ChartConfig {
        let points = series.points_millis();
        let (x_min, x_max) = time_extent(&points);
        let bounds = calculate_bounds(&series.numeric_values());

        ChartConfig {
            title: format!("{} Over Time", series.label()),
            label: series.label().to_owned(),
            viewport: self.viewport,
            points,
            line: LineStyle {
                border_color: color,
                fill_color: color.with_alpha(FILL_ALPHA),
                border_width: LINE_BORDER_WIDTH,
                tension: LINE_TENSION,
            },
            x_axis: TimeAxisOptions {
                min: x_min,
                max: x_max,
                unit: TimeUnit::Day,
                tooltip_format: TOOLTIP_TIME_FORMAT.to_owned(),
                show_grid: false,
            },
            y_axis: ValueAxisOptions {
                bounds,
                max_ticks: VALUE_AXIS_MAX_TICKS,
                grid_color: GRID_COLOR,
            },
            decimation: self.decimation,
            show_legend: false,
            animation: self.animation,
        }
    }

    /// Builds the chart through `backend` and attaches a viewport controller
    /// to its live scales.
    pub fn build_chart<B: ChartBackend>(
        &self,
        series: &Series,
        color: Color,
        backend: &mut B,
    ) -> DashboardResult<InteractiveChart<B::Chart>> {
        let config = self.chart_config(series, color);
        let bounds = config.y_axis.bounds;
        let mut chart = backend.create_chart(config).map_err(as_construction_error)?;
        let controller = ViewportController::attach(&mut chart, self.zoom)?;
        // Shows the zoom indicator and grab cursor set by attach.
        chart.update(RedrawMode::Immediate).map_err(as_construction_error)?;

        debug!(
            label = series.label(),
            points = series.len(),
            y_min = bounds.min,
            y_max = bounds.max,
            "chart ready"
        );
        Ok(InteractiveChart {
            label: series.label().to_owned(),
            chart,
            controller,
        })
    }
}

/// Color for the value column at `index`, cycling through `palette`.
pub fn palette_color(palette: &[Color], index: usize) -> DashboardResult<Color> {
    if palette.is_empty() {
        return Err(DashboardError::InvalidConfig("palette is empty".to_owned()));
    }
    Ok(palette[index % palette.len()])
}

/// One chart card: the backend chart plus its viewport controller.
pub struct InteractiveChart<C: ChartSurface> {
    label: String,
    chart: C,
    controller: ViewportController,
}

impl<C: ChartSurface> InteractiveChart<C> {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn chart(&self) -> &C {
        &self.chart
    }

    #[must_use]
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    /// Dispatches `event`. Returns whether the viewport reacted to it.
    pub fn handle(&mut self, event: ChartEvent) -> DashboardResult<bool> {
        let chart = &mut self.chart;
        let controller = &mut self.controller;
        match event {
            ChartEvent::Toolbar(ToolbarButton::Zoom) => controller.select_zoom(chart).map(|()| true),
            ChartEvent::Toolbar(ToolbarButton::Pan) => controller.select_pan(chart).map(|()| true),
            ChartEvent::Toolbar(ToolbarButton::Reset) => controller.reset_zoom(chart).map(|()| true),
            ChartEvent::PointerDown(position) => controller.pointer_down(chart, position),
            ChartEvent::PointerMove(position) => controller.pointer_move(chart, position),
            ChartEvent::PointerUp => controller.pointer_up(chart),
            ChartEvent::PointerLeave => controller.pointer_leave(chart),
            ChartEvent::Wheel { delta_y, position } => controller.wheel(chart, delta_y, position),
            ChartEvent::Pinch { scale, center } => controller.pinch(chart, scale, center),
        }
    }

    /// Follows a container resize. Extents are kept; pixel spans change.
    pub fn resize(&mut self, width: u32, height: u32) -> DashboardResult<()> {
        self.chart.resize(Viewport::new(width, height))?;
        self.chart.update(RedrawMode::Animated)
    }
}

/// Data extent of the time axis. Degenerate extents widen to a day so the
/// scale stays invertible.
fn time_extent(points: &[(f64, Option<f64>)]) -> (f64, f64) {
    let mut times = points.iter().map(|(time, _)| *time);
    let Some(first) = times.next() else {
        return (0.0, DAY_MILLIS);
    };
    let (min, max) = times.fold((first, first), |(min, max), t| (min.min(t), max.max(t)));
    if min == max {
        return (min - DAY_MILLIS / 2.0, max + DAY_MILLIS / 2.0);
    }
    (min, max)
}

fn as_construction_error(err: DashboardError) -> DashboardError {
    match err {
        DashboardError::RenderConstruction(_) => err,
        other => DashboardError::RenderConstruction(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_time_extents_widen() {
        assert_eq!(time_extent(&[]), (0.0, DAY_MILLIS));
        assert_eq!(
            time_extent(&[(1_000.0, Some(1.0)), (1_000.0, None)]),
            (1_000.0 - DAY_MILLIS / 2.0, 1_000.0 + DAY_MILLIS / 2.0)
        );
        assert_eq!(time_extent(&[(5.0, None), (2.0, Some(1.0))]), (2.0, 5.0));
    }

    #[test]
    fn palette_wraps_by_index() {
        let palette = [Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 1.0, 0.0)];
        assert_eq!(palette_color(&palette, 3).ok(), Some(palette[1]));
        assert!(palette_color(&[], 0).is_err());
    }
}
