use crate::error::DashboardResult;

/// Supplier of the raw spreadsheet export.
///
/// One call per load; implementations must not retry.
pub trait SheetSource {
    fn fetch_csv(&self) -> DashboardResult<String>;
}

/// In-memory export, used by tests and offline hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticSheetSource {
    text: String,
}

impl StaticSheetSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SheetSource for StaticSheetSource {
    fn fetch_csv(&self) -> DashboardResult<String> {
        Ok(self.text.clone())
    }
}

#[cfg(feature = "http-source")]
pub use http::HttpSheetSource;

#[cfg(feature = "http-source")]
mod http {
    use tracing::{debug, info};

    use super::SheetSource;
    use crate::error::{DashboardError, DashboardResult};

    /// Blocking GET against a published sheet CSV URL.
    ///
    /// The client carries no request timeout; a stalled transfer blocks the
    /// load until the transport gives up.
    #[derive(Debug, Clone)]
    pub struct HttpSheetSource {
        url: String,
        client: reqwest::blocking::Client,
    }

    impl HttpSheetSource {
        pub fn new(url: impl Into<String>) -> DashboardResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(None::<std::time::Duration>)
                .build()
                .map_err(|e| DashboardError::Network(format!("http client error: {e}")))?;
            Ok(Self {
                url: url.into(),
                client,
            })
        }

        #[must_use]
        pub fn url(&self) -> &str {
            &self.url
        }
    }

    impl SheetSource for HttpSheetSource {
        fn fetch_csv(&self) -> DashboardResult<String> {
            info!(url = %self.url, "fetching sheet export");
            let response = self
                .client
                .get(&self.url)
                .send()
                .map_err(|e| DashboardError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(DashboardError::Fetch {
                    status: status.as_u16(),
                });
            }

            let body = response
                .text()
                .map_err(|e| DashboardError::Network(format!("failed to decode body: {e}")))?;
            debug!(bytes = body.len(), "sheet export received");
            Ok(body)
        }
    }
}
