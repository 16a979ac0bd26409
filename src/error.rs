use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP error! status: {status}")]
    Fetch { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("chart construction failed: {0}")]
    RenderConstruction(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}
