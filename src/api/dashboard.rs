use tracing::{info, warn};

use crate::core::{Series, ValidatedRecord, build_series};
use crate::error::{DashboardError, DashboardResult};
use crate::ingest::{SheetSource, read_records, validate_rows};
use crate::render::{ChartBackend, ChartSurface};

use super::{ChartOrchestrator, DashboardConfig, InteractiveChart, palette_color};

/// Page-level feedback hooks: loading indicator and error banner.
pub trait LoadObserver {
    fn loading_started(&mut self) {}
    fn loading_finished(&mut self) {}
    fn load_failed(&mut self, _error: &DashboardError) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLoadObserver;

impl LoadObserver for NoopLoadObserver {}

/// Validated rows and per-column series of one load.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<ValidatedRecord>,
    pub series: Vec<Series>,
    pub dropped_count: usize,
}

impl Dataset {
    /// Tokenizes, validates, and splits `csv_text` into the configured series.
    pub fn from_csv(csv_text: &str, config: &DashboardConfig) -> DashboardResult<Self> {
        let raw = read_records(csv_text)?;
        let raw_count = raw.len();
        let records = validate_rows(raw, &config.time_column, &config.date_format);
        let series = build_series(&records, &config.value_columns);
        Ok(Self {
            dropped_count: raw_count - records.len(),
            records,
            series,
        })
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Every chart card of one successful load, in value-column order.
pub struct Dashboard<C: ChartSurface> {
    charts: Vec<InteractiveChart<C>>,
    dataset: Dataset,
}

impl<C: ChartSurface> Dashboard<C> {
    /// Runs the full load: fetch, parse, validate, build, chart.
    ///
    /// `observer` sees `loading_started` first and `loading_finished` last,
    /// with `load_failed` in between when any stage fails. A failed chart
    /// fails the whole load.
    pub fn load<S, B, O>(
        source: &S,
        backend: &mut B,
        observer: &mut O,
        config: &DashboardConfig,
    ) -> DashboardResult<Self>
    where
        S: SheetSource + ?Sized,
        B: ChartBackend<Chart = C>,
        O: LoadObserver + ?Sized,
    {
        observer.loading_started();
        let result = Self::load_inner(source, backend, config);
        if let Err(err) = &result {
            warn!(error = %err, "dashboard load failed");
            observer.load_failed(err);
        }
        observer.loading_finished();
        result
    }

    fn load_inner<S, B>(source: &S, backend: &mut B, config: &DashboardConfig) -> DashboardResult<Self>
    where
        S: SheetSource + ?Sized,
        B: ChartBackend<Chart = C>,
    {
        config.validate()?;
        let palette = config.palette_colors()?;
        let text = source.fetch_csv()?;
        let dataset = Dataset::from_csv(&text, config)?;
        info!(
            record_count = dataset.record_count(),
            dropped_count = dataset.dropped_count,
            "dataset loaded"
        );

        let orchestrator = ChartOrchestrator::from_config(config);
        let charts = dataset
            .series
            .iter()
            .enumerate()
            .map(|(index, series)| {
                let color = palette_color(&palette, index)?;
                orchestrator.build_chart(series, color, backend)
            })
            .collect::<DashboardResult<Vec<_>>>()?;

        Ok(Self { charts, dataset })
    }

    #[must_use]
    pub fn charts(&self) -> &[InteractiveChart<C>] {
        &self.charts
    }

    #[must_use]
    pub fn charts_mut(&mut self) -> &mut [InteractiveChart<C>] {
        &mut self.charts
    }

    #[must_use]
    pub fn chart(&self, label: &str) -> Option<&InteractiveChart<C>> {
        self.charts.iter().find(|chart| chart.label() == label)
    }

    pub fn chart_mut(&mut self, label: &str) -> Option<&mut InteractiveChart<C>> {
        self.charts.iter_mut().find(|chart| chart.label() == label)
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.dataset.record_count()
    }

    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dataset.dropped_count
    }

    /// Resizes every chart to the same container size.
    pub fn resize(&mut self, width: u32, height: u32) -> DashboardResult<()> {
        self.charts
            .iter_mut()
            .try_for_each(|chart| chart.resize(width, height))
    }
}

#[cfg(feature = "http-source")]
impl<C: ChartSurface> Dashboard<C> {
    /// Loads from `config.sheet_url` over HTTP.
    pub fn load_from_url<B, O>(backend: &mut B, observer: &mut O, config: &DashboardConfig) -> DashboardResult<Self>
    where
        B: ChartBackend<Chart = C>,
        O: LoadObserver + ?Sized,
    {
        match crate::ingest::HttpSheetSource::new(config.sheet_url.clone()) {
            Ok(source) => Self::load(&source, backend, observer, config),
            Err(err) => {
                observer.loading_started();
                observer.load_failed(&err);
                observer.loading_finished();
                Err(err)
            }
        }
    }
}
