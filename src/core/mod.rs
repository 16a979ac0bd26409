pub mod bounds;
pub mod decimation;
pub mod line_series;
pub mod primitives;
pub mod record;
pub mod scale;
pub mod series;
pub mod types;

pub use bounds::{AxisBounds, calculate_bounds};
pub use decimation::{DecimationAlgorithm, lttb};
pub use line_series::{LineSegment, project_series_segments, visible_runs};
pub use primitives::{instant_to_unix_millis, unix_millis_to_instant};
pub use record::{CellValue, RawRecord, ValidatedRecord};
pub use scale::{AxisScale, ChartScales};
pub use series::{Series, build_series};
pub use types::{PointerPosition, Viewport};
