use async_trait::async_trait;
use searchpilot_core::{AnalysisRequest, Report};
use searchpilot_proxy::SEO_CHECK_PATH;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid server URL '{0}': {1}")]
    InvalidServer(String, url::ParseError),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error(transparent)]
    Report(#[from] searchpilot_core::Error),
}

/// Anything that can turn an analysis request into a report
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_report(&self, request: &AnalysisRequest) -> Result<Report, FetchError>;
}

/// Client for the SearchPilot proxy
pub struct ReportClient {
    http: reqwest::Client,
    server: Url,
}

impl ReportClient {
    pub fn new(server: &str) -> Result<Self, FetchError> {
        let server =
            Url::parse(server).map_err(|e| FetchError::InvalidServer(server.to_string(), e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            server,
        })
    }

    /// Proxy endpoint URL for a request
    pub fn endpoint(&self, request: &AnalysisRequest) -> Result<Url, FetchError> {
        let mut url = self
            .server
            .join(SEO_CHECK_PATH)
            .map_err(|e| FetchError::InvalidServer(self.server.to_string(), e))?;

        url.query_pairs_mut()
            .append_pair("url", request.url())
            .append_pair("strategy", request.strategy().as_str());

        Ok(url)
    }
}

#[async_trait]
impl ReportSource for ReportClient {
    async fn fetch_report(&self, request: &AnalysisRequest) -> Result<Report, FetchError> {
        let endpoint = self.endpoint(request)?;
        tracing::debug!("Fetching report from {}", endpoint);

        let response = self.http.get(endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        let report = Report::from_value(body)?;

        tracing::info!(
            "Fetched {} report for {}",
            request.strategy(),
            request.url()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchpilot_core::Strategy;

    #[test]
    fn test_endpoint_encodes_query() {
        let client = ReportClient::new("http://localhost:5000").unwrap();
        let request = AnalysisRequest::new("https://example.com/?a=1&b=2", Strategy::Desktop).unwrap();

        let endpoint = client.endpoint(&request).unwrap();

        assert_eq!(endpoint.path(), "/api/seo-check");
        let pairs: Vec<(String, String)> = endpoint.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("url".to_string(), "https://example.com/?a=1&b=2".to_string()),
                ("strategy".to_string(), "desktop".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_server_url() {
        assert!(matches!(
            ReportClient::new("localhost"),
            Err(FetchError::InvalidServer(..))
        ));
    }
}
