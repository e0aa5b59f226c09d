use crate::{Error, ProxyConfig, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::IgnoredAny;
use url::Url;

/// Parameters of one upstream PageSpeed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpeedQuery {
    pub url: String,
    /// Forwarded as given; PageSpeed decides what it accepts
    pub strategy: Option<String>,
    pub api_key: String,
}

/// Source of PageSpeed results
#[async_trait]
pub trait PageSpeedApi: Send + Sync {
    /// Run an analysis and return the raw JSON body
    async fn run_pagespeed(&self, query: &PageSpeedQuery) -> Result<Bytes>;
}

/// PageSpeed Insights client backed by reqwest
pub struct PageSpeedClient {
    http: reqwest::Client,
    upstream: Url,
    categories: Vec<String>,
}

impl PageSpeedClient {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            upstream: config.upstream.clone(),
            categories: config.categories.clone(),
        }
    }

    /// Full upstream URL for a query, credential included
    pub fn request_url(&self, query: &PageSpeedQuery) -> Url {
        let mut url = self.upstream.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("url", &query.url);
            if let Some(strategy) = &query.strategy {
                pairs.append_pair("strategy", strategy);
            }
            for category in &self.categories {
                pairs.append_pair("category", category);
            }
            pairs.append_pair("key", &query.api_key);
        }
        url
    }
}

#[async_trait]
impl PageSpeedApi for PageSpeedClient {
    async fn run_pagespeed(&self, query: &PageSpeedQuery) -> Result<Bytes> {
        tracing::debug!(
            "Requesting PageSpeed analysis for {} (strategy: {})",
            query.url,
            query.strategy.as_deref().unwrap_or("default")
        );

        // The request URL carries the API key, so it is stripped from every error
        let response = self
            .http
            .get(self.request_url(query))
            .send()
            .await
            .map_err(|e| Error::Upstream(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Upstream(e.without_url()))?;
        serde_json::from_slice::<IgnoredAny>(&body)?;

        tracing::debug!("PageSpeed returned {} bytes", body.len());

        Ok(body)
    }
}
