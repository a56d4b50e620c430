use reqwest::Client;
use thiserror::Error;

use crate::traits::SheetSource;

/// Errors fetching the published sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheet request failed (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Fetches a spreadsheet published to the web as CSV.
#[derive(Debug, Clone, Default)]
pub struct SheetClient {
    http: Client,
}

impl SheetClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetSource for SheetClient {
    type Error = SheetError;

    async fn fetch_csv(&self, url: &str) -> Result<String, SheetError> {
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "Sheet fetch failed");
            return Err(SheetError::Api {
                status,
                message: body,
            });
        }
        let text = resp.text().await?;
        tracing::debug!(bytes = text.len(), "Fetched sheet CSV");
        Ok(text)
    }
}
