use chrono::NaiveDateTime;
use tracing::debug;

use crate::core::primitives::instant_to_unix_millis;
use crate::core::record::ValidatedRecord;

/// Time series for one target column.
///
/// `timestamps` and `values` are index-aligned with the validated record
/// order. A `None` value is a gap, not a dropped point.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    timestamps: Vec<NaiveDateTime>,
    values: Vec<Option<f64>>,
}

impl Series {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Non-null values in record order, the input of bounds calculation.
    #[must_use]
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// `(unix_millis, value)` pairs for chart configuration.
    #[must_use]
    pub fn points_millis(&self) -> Vec<(f64, Option<f64>)> {
        self.timestamps
            .iter()
            .zip(&self.values)
            .map(|(time, value)| (instant_to_unix_millis(*time), *value))
            .collect()
    }
}

/// Projects validated records into one series per target column.
pub fn build_series<S: AsRef<str>>(records: &[ValidatedRecord], columns: &[S]) -> Vec<Series> {
    let timestamps: Vec<NaiveDateTime> = records.iter().map(ValidatedRecord::time).collect();

    let series: Vec<Series> = columns
        .iter()
        .map(|column| {
            let column = column.as_ref();
            Series {
                label: column.to_owned(),
                timestamps: timestamps.clone(),
                values: records.iter().map(|record| record.number(column)).collect(),
            }
        })
        .collect();

    debug!(
        records = records.len(),
        columns = series.len(),
        "built series"
    );
    series
}
