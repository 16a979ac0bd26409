use serde::{Deserialize, Serialize};

use crate::core::{ChartScales, Viewport};
use crate::error::DashboardResult;
use crate::render::ChartConfig;

/// Redraw policy requested from the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedrawMode {
    /// Default transition, for discrete actions.
    Animated,
    /// Apply immediately without transition, for per-frame drag updates.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// The three toolbar controls attached to every chart card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolbarButton {
    Zoom,
    Pan,
    Reset,
}

impl ToolbarButton {
    pub const ALL: [Self; 3] = [Self::Zoom, Self::Pan, Self::Reset];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Zoom => "Zoom",
            Self::Pan => "Pan",
            Self::Reset => "Reset Zoom",
        }
    }
}

/// Live chart handle exposed by a rendering backend.
///
/// The scale model is mutable in place; changes take effect on the next
/// `update`. There is no reset hook: `ViewportController` restores the
/// extents it captured at attach.
pub trait ChartSurface {
    fn scales(&self) -> &ChartScales;
    fn scales_mut(&mut self) -> &mut ChartScales;
    fn update(&mut self, mode: RedrawMode) -> DashboardResult<()>;
    fn resize(&mut self, viewport: Viewport) -> DashboardResult<()>;
    fn set_cursor(&mut self, cursor: CursorStyle);
    fn set_active_tool(&mut self, button: ToolbarButton);
}

/// Chart factory. Rejecting a config is a `RenderConstruction` error.
pub trait ChartBackend {
    type Chart: ChartSurface;

    fn create_chart(&mut self, config: ChartConfig) -> DashboardResult<Self::Chart>;
}
