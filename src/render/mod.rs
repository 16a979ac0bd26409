mod chart_config;
mod frame;
mod frame_backend;
mod null_renderer;
mod primitives;
mod surface;

pub use chart_config::{
    ChartConfig, DecimationOptions, LineStyle, TimeAxisOptions, TimeUnit, ValueAxisOptions,
    format_axis_value, format_time_label,
};
pub use frame::RenderFrame;
pub use frame_backend::{FrameChart, FrameChartBackend};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use surface::{ChartBackend, ChartSurface, CursorStyle, RedrawMode, ToolbarButton};

use crate::error::DashboardResult;

/// Contract implemented by any frame rasterizer.
///
/// Rasterizers receive a fully materialized `RenderFrame`, so drawing code
/// stays isolated from ingestion and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
