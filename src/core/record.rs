use chrono::NaiveDateTime;
use indexmap::IndexMap;

/// Dynamically typed scalar read from one spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    /// Present but blank cell.
    Empty,
    /// Resolved time-source value. Only produced by row validation.
    Instant(NaiveDateTime),
}

impl CellValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether a validated record may carry this value outside its time field.
    #[must_use]
    pub fn is_chartable(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Empty)
    }
}

/// One input row keyed by trimmed header label, in header order.
///
/// A label missing from the map is an absent cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: IndexMap<String, CellValue>,
}

impl RawRecord {
    #[must_use]
    pub fn new(fields: IndexMap<String, CellValue>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub(crate) fn into_fields(self) -> IndexMap<String, CellValue> {
        self.fields
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, CellValue)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        }
    }
}

/// A record that passed validation.
///
/// The time-source field holds `CellValue::Instant(time)`; every other field
/// is a number or empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    time: NaiveDateTime,
    fields: IndexMap<String, CellValue>,
}

impl ValidatedRecord {
    pub(crate) fn new(time: NaiveDateTime, fields: IndexMap<String, CellValue>) -> Self {
        Self { time, fields }
    }

    #[must_use]
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    /// Numeric value of `column`, `None` for empty or absent cells.
    #[must_use]
    pub fn number(&self, column: &str) -> Option<f64> {
        self.fields.get(column).and_then(CellValue::as_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(label, value)| (label.as_str(), value))
    }
}
