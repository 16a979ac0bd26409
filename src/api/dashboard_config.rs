use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::ingest::DEFAULT_DATE_FORMAT;
use crate::interaction::ZoomBehavior;
use crate::render::{Color, DecimationOptions};

/// Published CSV export of the shared dashboard sheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQTwkWR18z4rqGOIVEBMpqwd3PdpymCgFMwTiZMDzfKkunyR42Zy74JIr20LDvTRipzql6QqneQnOZv/pub?gid=0&single=true&output=csv";

pub const DEFAULT_TIME_COLUMN: &str = "H";

/// Series colors, assigned to value columns by index.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "rgb(255, 99, 132)",
    "rgb(255, 159, 64)",
    "rgb(255, 205, 86)",
    "rgb(75, 192, 192)",
    "rgb(54, 162, 235)",
    "rgb(153, 102, 255)",
    "rgb(255, 99, 255)",
];

/// Dashboard bootstrap configuration.
///
/// Serializable so hosts can keep the sheet layout next to their own
/// settings. Every field has a default, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_sheet_url")]
    pub sheet_url: String,
    #[serde(default = "default_time_column")]
    pub time_column: String,
    #[serde(default = "default_value_columns")]
    pub value_columns: Vec<String>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_chart_width_px")]
    pub chart_width_px: u32,
    #[serde(default = "default_chart_height_px")]
    pub chart_height_px: u32,
    #[serde(default)]
    pub zoom: ZoomBehavior,
    #[serde(default)]
    pub decimation: DecimationOptions,
    #[serde(default)]
    pub animation: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sheet_url: default_sheet_url(),
            time_column: default_time_column(),
            value_columns: default_value_columns(),
            date_format: default_date_format(),
            palette: default_palette(),
            chart_width_px: default_chart_width_px(),
            chart_height_px: default_chart_height_px(),
            zoom: ZoomBehavior::default(),
            decimation: DecimationOptions::default(),
            animation: false,
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_sheet_url(mut self, url: impl Into<String>) -> Self {
        self.sheet_url = url.into();
        self
    }

    #[must_use]
    pub fn with_time_column(mut self, column: impl Into<String>) -> Self {
        self.time_column = column.into();
        self
    }

    /// Replaces the charted columns; charts are built in this order.
    #[must_use]
    pub fn with_value_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_chart_size(mut self, width_px: u32, height_px: u32) -> Self {
        self.chart_width_px = width_px;
        self.chart_height_px = height_px;
        self
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

    pub fn validate(&self) -> DashboardResult<()> {
        if self.time_column.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "time_column must not be empty".to_owned(),
            ));
        }
        if self.date_format.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "date_format must not be empty".to_owned(),
            ));
        }
        if let Some(column) = self
            .value_columns
            .iter()
            .find(|column| column.trim().is_empty() || **column == self.time_column)
        {
            return Err(DashboardError::InvalidConfig(format!(
                "value column `{column}` must be non-empty and differ from the time column"
            )));
        }
        if self.palette.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "palette must contain at least one color".to_owned(),
            ));
        }
        if self.chart_width_px == 0 || self.chart_height_px == 0 {
            return Err(DashboardError::InvalidConfig(format!(
                "chart size must be non-zero, got {}x{}",
                self.chart_width_px, self.chart_height_px
            )));
        }
        if self.decimation.samples.is_some_and(|samples| samples < 3) {
            return Err(DashboardError::InvalidConfig(
                "decimation samples must be >= 3".to_owned(),
            ));
        }
        self.zoom.validate()?;
        self.palette_colors().map(|_| ())
    }

    /// Parsed palette; fails on the first unsupported token.
    pub fn palette_colors(&self) -> DashboardResult<Vec<Color>> {
        self.palette.iter().map(|token| Color::parse_css(token)).collect()
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_sheet_url() -> String {
    DEFAULT_SHEET_URL.to_owned()
}

fn default_time_column() -> String {
    DEFAULT_TIME_COLUMN.to_owned()
}

fn default_value_columns() -> Vec<String> {
    ["A", "B", "C", "D", "E", "F", "G"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_owned()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.into_iter().map(str::to_owned).collect()
}

fn default_chart_width_px() -> u32 {
    800
}

fn default_chart_height_px() -> u32 {
    400
}
