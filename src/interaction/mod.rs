mod viewport_controller;

pub use viewport_controller::{MIN_ZOOM_SPAN_RATIO, ViewportController};

use serde::{Deserialize, Serialize};

use crate::core::PointerPosition;
use crate::error::{DashboardError, DashboardResult};

/// Mutually exclusive input mode of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewportMode {
    /// Wheel and pinch rescale the visible extent; drag does nothing.
    #[default]
    Zoom,
    /// Drag translates the visible extent; wheel and pinch do nothing.
    Pan,
}

/// Which gestures currently mutate the extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureGates {
    pub wheel_zoom: bool,
    pub pinch_zoom: bool,
    pub drag_pan: bool,
}

impl GestureGates {
    #[must_use]
    pub fn for_mode(mode: ViewportMode) -> Self {
        match mode {
            ViewportMode::Zoom => Self {
                wheel_zoom: true,
                pinch_zoom: true,
                drag_pan: false,
            },
            ViewportMode::Pan => Self {
                wheel_zoom: false,
                pinch_zoom: false,
                drag_pan: true,
            },
        }
    }

    #[must_use]
    pub fn zoom_enabled(self) -> bool {
        self.wheel_zoom || self.pinch_zoom
    }
}

/// Tuning for wheel zoom steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBehavior {
    /// Zoom-in factor per wheel notch is `1 + wheel_speed`.
    pub wheel_speed: f64,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self { wheel_speed: 0.1 }
    }
}

impl ZoomBehavior {
    pub fn validate(self) -> DashboardResult<Self> {
        if !self.wheel_speed.is_finite() || self.wheel_speed <= 0.0 {
            return Err(DashboardError::InvalidConfig(
                "zoom wheel_speed must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Per-chart viewport state owned by a [`ViewportController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub mode: ViewportMode,
    pub is_dragging: bool,
    pub last_pointer: Option<PointerPosition>,
}

impl ViewportState {
    #[must_use]
    pub fn x_extent(self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    #[must_use]
    pub fn y_extent(self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    #[must_use]
    pub fn gates(self) -> GestureGates {
        GestureGates::for_mode(self.mode)
    }
}
