use crate::upstream::{PageSpeedApi, PageSpeedClient, PageSpeedQuery};
use crate::ProxyConfig;
use bytes::Bytes;
use http::{Method, Request, Response, StatusCode, header};
use http_body_util::Full;
use std::sync::Arc;

pub const SEO_CHECK_PATH: &str = "/api/seo-check";

const MISSING_INPUT: &str = "Missing URL or API key";
const UPSTREAM_FAILED: &str = "Failed to fetch from PageSpeed API";

pub type ProxyBody = Full<Bytes>;

/// Read-only state shared by every request
#[derive(Clone)]
pub struct ProxyState {
    api_key: Option<String>,
    api: Arc<dyn PageSpeedApi>,
}

impl ProxyState {
    pub fn new(config: &ProxyConfig) -> Self {
        Self::with_api(config.api_key.clone(), Arc::new(PageSpeedClient::new(config)))
    }

    /// State with a custom upstream, e.g. a fake in tests
    pub fn with_api(api_key: Option<String>, api: Arc<dyn PageSpeedApi>) -> Self {
        Self { api_key, api }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Route a request. Only the URI and method are read, so the body type is free.
pub async fn handle<B>(state: &ProxyState, req: Request<B>) -> Response<ProxyBody> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    tracing::debug!("{} {}", method, req.uri());

    if path != SEO_CHECK_PATH {
        return error_response(StatusCode::NOT_FOUND, "Not found");
    }
    if method != Method::GET {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let (url, strategy) = parse_query(req.uri().query().unwrap_or_default());

    let (Some(url), Some(api_key)) = (url, state.api_key.clone()) else {
        tracing::warn!("Rejecting SEO check: missing URL or API key");
        return error_response(StatusCode::BAD_REQUEST, MISSING_INPUT);
    };

    let query = PageSpeedQuery {
        url,
        strategy,
        api_key,
    };

    match state.api.run_pagespeed(&query).await {
        Ok(body) => {
            tracing::info!("SEO check for {} succeeded", query.url);
            json_response(StatusCode::OK, body)
        }
        Err(e) => {
            tracing::error!("SEO check for {} failed: {}", query.url, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILED)
        }
    }
}

/// First `url` and `strategy` values; an empty `url` counts as missing
fn parse_query(query: &str) -> (Option<String>, Option<String>) {
    let mut url = None;
    let mut strategy = None;

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "url" if url.is_none() => url = Some(value.into_owned()),
            "strategy" if strategy.is_none() => strategy = Some(value.into_owned()),
            _ => {}
        }
    }

    (url.filter(|u| !u.is_empty()), strategy)
}

fn json_response(status: StatusCode, body: Bytes) -> Response<ProxyBody> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

fn error_response(status: StatusCode, message: &str) -> Response<ProxyBody> {
    let body = serde_json::json!({ "error": message }).to_string();
    json_response(status, Bytes::from(body))
}
