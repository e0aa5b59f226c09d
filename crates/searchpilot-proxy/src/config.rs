use crate::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use url::Url;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
pub const DEFAULT_CATEGORIES: [&str; 4] = ["performance", "seo", "accessibility", "best-practices"];

/// Startup configuration handed to the proxy server
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: IpAddr,
    pub port: u16,
    /// PageSpeed API key; `None` makes every request fail with 400
    pub api_key: Option<String>,
    pub upstream: Url,
    /// Lighthouse categories requested upstream
    pub categories: Vec<String>,
}

impl ProxyConfig {
    /// Defaults: all interfaces on port 5000, the public PageSpeed endpoint and every category
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_key: normalize_key(api_key),
            upstream: parse_upstream(DEFAULT_UPSTREAM)?,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        })
    }

    pub fn with_address(mut self, host: IpAddr, port: u16) -> Self {
        self.host = host;
        self.port = port;
        self
    }

    pub fn with_upstream(mut self, upstream: &str) -> Result<Self> {
        self.upstream = parse_upstream(upstream)?;
        Ok(self)
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_upstream(upstream: &str) -> Result<Url> {
    Url::parse(upstream)
        .map_err(|e| Error::Config(format!("Invalid upstream URL '{}': {}", upstream, e)))
}

/// Blank keys count as not configured
fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}
