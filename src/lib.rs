//! sheet-charts: spreadsheet CSV ingestion and interactive time-series charts.
//!
//! A published sheet export is fetched, tokenized, validated row by row, and
//! split into one series per value column. Each series becomes a chart with
//! pan/zoom/reset controls driven by [`interaction::ViewportController`].

pub mod api;
pub mod core;
pub mod error;
pub mod ingest;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    ChartEvent, ChartOrchestrator, Dashboard, DashboardConfig, Dataset, InteractiveChart,
    LoadObserver,
};
pub use error::{DashboardError, DashboardResult};
