//! Public entry points: configuration, chart construction, dashboard load.

mod chart_orchestrator;
mod dashboard;
mod dashboard_config;

pub use chart_orchestrator::{
    ChartEvent, ChartOrchestrator, DAY_MILLIS, FILL_ALPHA, InteractiveChart, LINE_BORDER_WIDTH,
    LINE_TENSION, TOOLTIP_TIME_FORMAT, VALUE_AXIS_MAX_TICKS, palette_color,
};
pub use dashboard::{Dashboard, Dataset, LoadObserver, NoopLoadObserver};
pub use dashboard_config::{
    DEFAULT_PALETTE, DEFAULT_SHEET_URL, DEFAULT_TIME_COLUMN, DashboardConfig,
};
