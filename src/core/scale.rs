use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{DashboardError, DashboardResult};

/// Mutable linear axis: visible data extent plus its length in pixels.
///
/// For the x axis `pixel_span` is the plot width, for the y axis the plot
/// height. Pixel `0` sits at `min` on x and at `max` on y (screen y grows
/// downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub pixel_span: f64,
}

impl AxisScale {
    pub fn new(min: f64, max: f64, pixel_span: f64) -> DashboardResult<Self> {
        let scale = Self {
            min,
            max,
            pixel_span,
        };
        scale.validate()?;
        Ok(scale)
    }

    pub fn validate(self) -> DashboardResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min == self.max {
            return Err(DashboardError::InvalidData(
                "scale extent must be finite and non-zero".to_owned(),
            ));
        }
        if !self.pixel_span.is_finite() || self.pixel_span <= 0.0 {
            return Err(DashboardError::InvalidData(
                "scale pixel span must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn extent(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn data_span(self) -> f64 {
        self.max - self.min
    }

    pub fn set_extent(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    /// Converts a pixel distance along this axis into a data distance.
    #[must_use]
    pub fn pixels_to_data_delta(self, pixels: f64) -> f64 {
        pixels / self.pixel_span * self.data_span()
    }

    /// Maps a data value to a horizontal pixel offset.
    pub fn value_to_pixel_x(self, value: f64) -> DashboardResult<f64> {
        self.validate()?;
        if !value.is_finite() {
            return Err(DashboardError::InvalidData("value must be finite".to_owned()));
        }
        Ok((value - self.min) / self.data_span() * self.pixel_span)
    }

    /// Maps a data value to a vertical pixel offset.
    pub fn value_to_pixel_y(self, value: f64) -> DashboardResult<f64> {
        self.validate()?;
        if !value.is_finite() {
            return Err(DashboardError::InvalidData("value must be finite".to_owned()));
        }
        Ok((self.max - value) / self.data_span() * self.pixel_span)
    }

    pub fn pixel_to_value_x(self, pixel: f64) -> DashboardResult<f64> {
        self.validate()?;
        if !pixel.is_finite() {
            return Err(DashboardError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(self.min + pixel / self.pixel_span * self.data_span())
    }

    pub fn pixel_to_value_y(self, pixel: f64) -> DashboardResult<f64> {
        self.validate()?;
        if !pixel.is_finite() {
            return Err(DashboardError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(self.max - pixel / self.pixel_span * self.data_span())
    }
}

/// The chart's live scale model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: AxisScale,
    pub y: AxisScale,
}

impl ChartScales {
    pub fn new(x_extent: (f64, f64), y_extent: (f64, f64), viewport: Viewport) -> DashboardResult<Self> {
        if !viewport.is_valid() {
            return Err(DashboardError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            x: AxisScale::new(x_extent.0, x_extent.1, f64::from(viewport.width))?,
            y: AxisScale::new(y_extent.0, y_extent.1, f64::from(viewport.height))?,
        })
    }

    pub fn validate(self) -> DashboardResult<()> {
        self.x.validate()?;
        self.y.validate()
    }

    /// Updates pixel spans after a resize, keeping the data extents.
    pub fn resize(&mut self, viewport: Viewport) -> DashboardResult<()> {
        if !viewport.is_valid() {
            return Err(DashboardError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.x.pixel_span = f64::from(viewport.width);
        self.y.pixel_span = f64::from(viewport.height);
        Ok(())
    }
}
