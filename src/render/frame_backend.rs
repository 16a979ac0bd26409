use tracing::{debug, trace};

use crate::core::{ChartScales, Viewport, project_series_segments};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{
    ChartBackend, ChartConfig, ChartSurface, Color, CursorStyle, LinePrimitive, RectPrimitive,
    RedrawMode, RenderFrame, Renderer, TextHAlign, TextPrimitive, TimeUnit, ToolbarButton,
    format_axis_value, format_time_label,
};

const TITLE_FONT_PX: f64 = 14.0;
const TICK_FONT_PX: f64 = 11.0;
const TOOLBAR_BUTTON_PX: f64 = 24.0;
const TOOLBAR_GAP_PX: f64 = 4.0;
const TIME_LABEL_SLOT_PX: u32 = 96;
const LABEL_COLOR: Color = Color::rgb(0.4, 0.4, 0.4);
const IDLE_BUTTON_COLOR: Color = Color::rgb(0.94, 0.94, 0.94);

type RendererFactory<R> = Box<dyn FnMut(Viewport) -> DashboardResult<R>>;

/// Backend that turns chart state into `RenderFrame`s for a `Renderer`.
pub struct FrameChartBackend<R: Renderer> {
    factory: RendererFactory<R>,
}

impl<R: Renderer + Default + 'static> FrameChartBackend<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(|_| Ok(R::default()))
    }
}

impl<R: Renderer + Default + 'static> Default for FrameChartBackend<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> FrameChartBackend<R> {
    /// Uses `factory` to build one renderer per chart, sized to its viewport.
    #[must_use]
    pub fn with_factory(factory: impl FnMut(Viewport) -> DashboardResult<R> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
        }
    }
}

impl<R: Renderer> ChartBackend for FrameChartBackend<R> {
    type Chart = FrameChart<R>;

    fn create_chart(&mut self, config: ChartConfig) -> DashboardResult<Self::Chart> {
        validate_config(&config).map_err(|err| DashboardError::RenderConstruction(err.to_string()))?;
        let scales = ChartScales::new(
            (config.x_axis.min, config.x_axis.max),
            (config.y_axis.bounds.min, config.y_axis.bounds.max),
            config.viewport,
        )
        .map_err(|err| DashboardError::RenderConstruction(err.to_string()))?;
        let renderer = (self.factory)(config.viewport)
            .map_err(|err| DashboardError::RenderConstruction(err.to_string()))?;

        let mut chart = FrameChart {
            config,
            scales,
            renderer,
            cursor: CursorStyle::Default,
            active_tool: None,
            redraws: Vec::new(),
            last_frame: None,
        };
        chart
            .draw()
            .map_err(|err| DashboardError::RenderConstruction(err.to_string()))?;
        debug!(label = %chart.config.label, points = chart.config.points.len(), "chart constructed");
        Ok(chart)
    }
}

/// One chart drawn through a frame `Renderer`.
pub struct FrameChart<R: Renderer> {
    config: ChartConfig,
    scales: ChartScales,
    renderer: R,
    cursor: CursorStyle,
    active_tool: Option<ToolbarButton>,
    redraws: Vec<RedrawMode>,
    last_frame: Option<RenderFrame>,
}

impl<R: Renderer> FrameChart<R> {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    #[must_use]
    pub fn active_tool(&self) -> Option<ToolbarButton> {
        self.active_tool
    }

    /// Modes of every `update` call so far, oldest first.
    #[must_use]
    pub fn redraws(&self) -> &[RedrawMode] {
        &self.redraws
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Materializes the current state into backend-agnostic primitives.
    pub fn build_frame(&self) -> DashboardResult<RenderFrame> {
        let viewport = self.config.viewport;
        let mut frame = RenderFrame::new(viewport);
        let width = f64::from(viewport.width);

        for value in value_ticks(self.scales.y.min, self.scales.y.max, self.config.y_axis.max_ticks) {
            let y = self.scales.y.value_to_pixel_y(value)?;
            frame.push_line(LinePrimitive::new(0.0, y, width, y, 1.0, self.config.y_axis.grid_color));
            frame.push_text(TextPrimitive::new(
                format_axis_value(value),
                4.0,
                y,
                TICK_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            ));
        }

        let x_axis = &self.config.x_axis;
        let max_time_ticks = (viewport.width / TIME_LABEL_SLOT_PX).max(2) as usize;
        let label_y = f64::from(viewport.height) - TICK_FONT_PX;
        for time in time_ticks(self.scales.x.min, self.scales.x.max, x_axis.unit, max_time_ticks) {
            let x = self.scales.x.value_to_pixel_x(time)?;
            if x_axis.show_grid {
                let height = f64::from(viewport.height);
                frame.push_line(LinePrimitive::new(x, 0.0, x, height, 1.0, self.config.y_axis.grid_color));
            }
            frame.push_text(TextPrimitive::new(
                format_time_label(time, x_axis.unit.label_format()),
                x,
                label_y,
                TICK_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Center,
            ));
        }

        let segments = project_series_segments(
            &self.config.points,
            self.scales,
            self.config.decimation.effective_algorithm(),
            self.config.decimation.effective_samples(viewport),
        )?;
        for segment in segments {
            frame.push_line(LinePrimitive::new(
                segment.x1,
                segment.y1,
                segment.x2,
                segment.y2,
                self.config.line.border_width,
                self.config.line.border_color,
            ));
        }

        if !self.config.title.is_empty() {
            frame.push_text(TextPrimitive::new(
                self.config.title.clone(),
                4.0,
                TITLE_FONT_PX,
                TITLE_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            ));
        }

        for (slot, button) in ToolbarButton::ALL.iter().rev().enumerate() {
            let x = width - (slot as f64 + 1.0) * (TOOLBAR_BUTTON_PX + TOOLBAR_GAP_PX);
            let fill = if self.active_tool == Some(*button) {
                self.config.line.fill_color
            } else {
                IDLE_BUTTON_COLOR
            };
            frame.push_rect(
                RectPrimitive::new(x.max(0.0), TOOLBAR_GAP_PX, TOOLBAR_BUTTON_PX, TOOLBAR_BUTTON_PX, fill)
                    .with_border(1.0, self.config.line.border_color)
                    .with_corner_radius(4.0),
            );
        }

        Ok(frame)
    }

    fn draw(&mut self) -> DashboardResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.last_frame = Some(frame);
        Ok(())
    }
}

impl<R: Renderer> ChartSurface for FrameChart<R> {
    fn scales(&self) -> &ChartScales {
        &self.scales
    }

    fn scales_mut(&mut self) -> &mut ChartScales {
        &mut self.scales
    }

    fn update(&mut self, mode: RedrawMode) -> DashboardResult<()> {
        trace!(label = %self.config.label, ?mode, "chart update");
        self.redraws.push(mode);
        self.draw()
    }

    fn resize(&mut self, viewport: Viewport) -> DashboardResult<()> {
        self.scales.resize(viewport)?;
        self.config.viewport = viewport;
        Ok(())
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn set_active_tool(&mut self, button: ToolbarButton) {
        self.active_tool = Some(button);
    }
}

fn validate_config(config: &ChartConfig) -> DashboardResult<()> {
    if !config.viewport.is_valid() {
        return Err(DashboardError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }
    if config.label.is_empty() {
        return Err(DashboardError::InvalidData("series label must not be empty".to_owned()));
    }
    for (x, y) in &config.points {
        if !x.is_finite() || y.is_some_and(|v| !v.is_finite()) {
            return Err(DashboardError::InvalidData(
                "series samples must be finite".to_owned(),
            ));
        }
    }
    if !config.line.border_width.is_finite() || config.line.border_width <= 0.0 {
        return Err(DashboardError::InvalidData(
            "line border width must be finite and > 0".to_owned(),
        ));
    }
    if config.y_axis.max_ticks < 2 {
        return Err(DashboardError::InvalidData("value axis needs at least 2 ticks".to_owned()));
    }
    config.line.border_color.validate()?;
    config.line.fill_color.validate()?;
    config.y_axis.grid_color.validate()
}

/// Evenly spaced "nice" tick values inside `[min, max]`, at most `max_ticks`.
fn value_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || max_ticks < 2 {
        return Vec::new();
    }

    let mut step = nice_step(span / (max_ticks - 1) as f64);
    let mut ticks = ticks_with_step(min, max, step);
    while ticks.len() > max_ticks {
        step = nice_step(step * 1.5);
        ticks = ticks_with_step(min, max, step);
    }
    ticks
}

/// Unit-aligned times inside `[min, max]`, stepping by whole units so at most
/// `max_ticks` fit.
fn time_ticks(min: f64, max: f64, unit: TimeUnit, max_ticks: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || max_ticks == 0 {
        return Vec::new();
    }
    let units = (span / unit.millis()).ceil().max(1.0);
    let step = unit.millis() * (units / max_ticks as f64).ceil().max(1.0);
    let mut ticks = ticks_with_step(min, max, step);
    ticks.truncate(max_ticks);
    ticks
}

fn ticks_with_step(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|index| index as f64 * step).collect()
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
