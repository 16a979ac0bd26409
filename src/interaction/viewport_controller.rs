use tracing::{debug, trace};

use crate::core::{ChartScales, PointerPosition};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{ChartSurface, CursorStyle, RedrawMode, ToolbarButton};

use super::{GestureGates, ViewportMode, ViewportState, ZoomBehavior};

/// Smallest visible span reachable by zooming, relative to the original span.
pub const MIN_ZOOM_SPAN_RATIO: f64 = 1e-6;

/// Pan/zoom/reset state machine bound to one chart's scale model.
///
/// Every handler runs synchronously and writes new extents straight into
/// `chart.scales_mut()` before requesting a redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    state: ViewportState,
    original_x: (f64, f64),
    original_y: (f64, f64),
    zoom: ZoomBehavior,
}

impl ViewportController {
    /// Captures the chart's current extents as the reset target and puts the
    /// controller in zoom mode.
    ///
    /// Cursor and toolbar indicator are set but not drawn; the caller issues
    /// the next `update`.
    pub fn attach<C: ChartSurface + ?Sized>(chart: &mut C, zoom: ZoomBehavior) -> DashboardResult<Self> {
        let zoom = zoom.validate()?;
        let scales = *chart.scales();
        scales.validate()?;

        chart.set_cursor(CursorStyle::Grab);
        chart.set_active_tool(ToolbarButton::Zoom);
        Ok(Self {
            state: ViewportState {
                x_min: scales.x.min,
                x_max: scales.x.max,
                y_min: scales.y.min,
                y_max: scales.y.max,
                mode: ViewportMode::Zoom,
                is_dragging: false,
                last_pointer: None,
            },
            original_x: scales.x.extent(),
            original_y: scales.y.extent(),
            zoom,
        })
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> ViewportMode {
        self.state.mode
    }

    #[must_use]
    pub fn gates(&self) -> GestureGates {
        self.state.gates()
    }

    /// Extents restored by [`Self::reset_zoom`].
    #[must_use]
    pub fn original_extents(&self) -> ((f64, f64), (f64, f64)) {
        (self.original_x, self.original_y)
    }

    /// Ends any drag in progress and re-enables wheel and pinch zoom.
    pub fn select_zoom<C: ChartSurface + ?Sized>(&mut self, chart: &mut C) -> DashboardResult<()> {
        self.end_drag(chart);
        self.state.mode = ViewportMode::Zoom;
        chart.set_active_tool(ToolbarButton::Zoom);
        debug!(mode = ?self.state.mode, "viewport mode selected");
        chart.update(RedrawMode::Animated)
    }

    pub fn select_pan<C: ChartSurface + ?Sized>(&mut self, chart: &mut C) -> DashboardResult<()> {
        self.state.mode = ViewportMode::Pan;
        chart.set_active_tool(ToolbarButton::Pan);
        debug!(mode = ?self.state.mode, "viewport mode selected");
        chart.update(RedrawMode::Animated)
    }

    /// Starts a drag. Returns `false` outside pan mode.
    pub fn pointer_down<C: ChartSurface + ?Sized>(
        &mut self,
        chart: &mut C,
        position: PointerPosition,
    ) -> DashboardResult<bool> {
        validate_position(position)?;
        if !self.gates().drag_pan {
            return Ok(false);
        }

        self.state.is_dragging = true;
        self.state.last_pointer = Some(position);
        chart.set_cursor(CursorStyle::Grabbing);
        trace!(x = position.x, y = position.y, "drag started");
        Ok(true)
    }

    /// Translates the view by the pointer delta since the last event.
    ///
    /// Dragging right moves the x window left; dragging down moves the y
    /// window up in value space, since screen y grows downwards.
    pub fn pointer_move<C: ChartSurface + ?Sized>(
        &mut self,
        chart: &mut C,
        position: PointerPosition,
    ) -> DashboardResult<bool> {
        validate_position(position)?;
        let (true, Some(last)) = (self.state.is_dragging, self.state.last_pointer) else {
            return Ok(false);
        };

        let dx = position.x - last.x;
        let dy = position.y - last.y;
        let scales = chart.scales_mut();
        let x_shift = scales.x.pixels_to_data_delta(dx);
        let y_shift = scales.y.pixels_to_data_delta(dy);
        scales.x.set_extent(scales.x.min - x_shift, scales.x.max - x_shift);
        scales.y.set_extent(scales.y.min + y_shift, scales.y.max + y_shift);
        let scales = *scales;

        self.sync_extents(scales);
        self.state.last_pointer = Some(position);
        trace!(dx, dy, x_shift, y_shift, "drag step");
        chart.update(RedrawMode::Immediate)?;
        Ok(true)
    }

    pub fn pointer_up<C: ChartSurface + ?Sized>(&mut self, chart: &mut C) -> DashboardResult<bool> {
        self.release(chart)
    }

    pub fn pointer_leave<C: ChartSurface + ?Sized>(&mut self, chart: &mut C) -> DashboardResult<bool> {
        self.release(chart)
    }

    /// Zooms around `position` by one wheel notch. Returns `false` when wheel
    /// zoom is disabled or `delta_y` is zero.
    pub fn wheel<C: ChartSurface + ?Sized>(
        &mut self,
        chart: &mut C,
        delta_y: f64,
        position: PointerPosition,
    ) -> DashboardResult<bool> {
        validate_position(position)?;
        if !self.gates().wheel_zoom || delta_y == 0.0 || !delta_y.is_finite() {
            return Ok(false);
        }

        let step = 1.0 + self.zoom.wheel_speed;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        self.zoom_around(chart, factor, position)?;
        Ok(true)
    }

    /// Zooms around `center` by a pinch scale (`> 1` zooms in).
    pub fn pinch<C: ChartSurface + ?Sized>(
        &mut self,
        chart: &mut C,
        scale: f64,
        center: PointerPosition,
    ) -> DashboardResult<bool> {
        validate_position(center)?;
        if !self.gates().pinch_zoom {
            return Ok(false);
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DashboardError::InvalidData(
                "pinch scale must be finite and > 0".to_owned(),
            ));
        }

        self.zoom_around(chart, scale, center)?;
        Ok(true)
    }

    /// Restores the extents captured at attach time. Mode is unchanged.
    pub fn reset_zoom<C: ChartSurface + ?Sized>(&mut self, chart: &mut C) -> DashboardResult<()> {
        self.end_drag(chart);
        let scales = chart.scales_mut();
        scales.x.set_extent(self.original_x.0, self.original_x.1);
        scales.y.set_extent(self.original_y.0, self.original_y.1);
        let scales = *scales;

        self.sync_extents(scales);
        debug!("viewport reset to original extents");
        chart.update(RedrawMode::Animated)
    }

    fn release<C: ChartSurface + ?Sized>(&mut self, chart: &mut C) -> DashboardResult<bool> {
        if !self.end_drag(chart) {
            return Ok(false);
        }
        trace!("drag released");
        chart.update(RedrawMode::Animated)?;
        Ok(true)
    }

    fn end_drag<C: ChartSurface + ?Sized>(&mut self, chart: &mut C) -> bool {
        if !self.state.is_dragging {
            return false;
        }
        self.state.is_dragging = false;
        self.state.last_pointer = None;
        chart.set_cursor(CursorStyle::Grab);
        true
    }

    fn zoom_around<C: ChartSurface + ?Sized>(
        &mut self,
        chart: &mut C,
        factor: f64,
        center: PointerPosition,
    ) -> DashboardResult<()> {
        let current = *chart.scales();
        let anchor_x = current.x.pixel_to_value_x(center.x)?;
        let anchor_y = current.y.pixel_to_value_y(center.y)?;
        let (x_min, x_max) = zoom_extent(current.x.extent(), anchor_x, factor, self.original_x);
        let (y_min, y_max) = zoom_extent(current.y.extent(), anchor_y, factor, self.original_y);

        let scales = chart.scales_mut();
        scales.x.set_extent(x_min, x_max);
        scales.y.set_extent(y_min, y_max);
        let scales = *scales;

        self.sync_extents(scales);
        trace!(factor, anchor_x, anchor_y, "zoom step");
        chart.update(RedrawMode::Immediate)
    }

    fn sync_extents(&mut self, scales: ChartScales) {
        self.state.x_min = scales.x.min;
        self.state.x_max = scales.x.max;
        self.state.y_min = scales.y.min;
        self.state.y_max = scales.y.max;
    }
}

/// Scales `(min, max)` around `anchor`, then keeps the result inside `limit`.
fn zoom_extent(extent: (f64, f64), anchor: f64, factor: f64, limit: (f64, f64)) -> (f64, f64) {
    let min_span = (limit.1 - limit.0) * MIN_ZOOM_SPAN_RATIO;
    let factor = factor.min((extent.1 - extent.0) / min_span);
    let min = anchor - (anchor - extent.0) / factor;
    let max = anchor + (extent.1 - anchor) / factor;
    clamp_to_limit(min, max, limit)
}

fn clamp_to_limit(min: f64, max: f64, limit: (f64, f64)) -> (f64, f64) {
    let span = max - min;
    if span >= limit.1 - limit.0 {
        return limit;
    }
    if min < limit.0 {
        return (limit.0, limit.0 + span);
    }
    if max > limit.1 {
        return (limit.1 - span, limit.1);
    }
    (min, max)
}

fn validate_position(position: PointerPosition) -> DashboardResult<()> {
    if !position.x.is_finite() || !position.y.is_finite() {
        return Err(DashboardError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{MIN_ZOOM_SPAN_RATIO, clamp_to_limit, zoom_extent};

    #[test]
    fn zoom_in_keeps_anchor_fraction() {
        let (min, max) = zoom_extent((0.0, 100.0), 25.0, 2.0, (0.0, 100.0));
        assert!((min - 12.5).abs() <= 1e-9);
        assert!((max - 62.5).abs() <= 1e-9);
    }

    #[test]
    fn zoom_out_never_exceeds_original() {
        assert_eq!(zoom_extent((40.0, 60.0), 50.0, 0.01, (0.0, 100.0)), (0.0, 100.0));
        assert_eq!(clamp_to_limit(-10.0, 20.0, (0.0, 100.0)), (0.0, 30.0));
        assert_eq!(clamp_to_limit(90.0, 110.0, (0.0, 100.0)), (80.0, 100.0));
    }

    #[test]
    fn zoom_in_stops_at_min_span() {
        let mut extent = (0.0, 100.0);
        for _ in 0..100 {
            extent = zoom_extent(extent, 50.0, 2.0, (0.0, 100.0));
        }
        let span = extent.1 - extent.0;
        assert!((span - 100.0 * MIN_ZOOM_SPAN_RATIO).abs() <= 1e-12);
    }
}
