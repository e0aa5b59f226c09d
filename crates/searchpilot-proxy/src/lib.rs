// Pass-through proxy for the PageSpeed Insights API

pub mod config;
pub mod error;
pub mod handler;
pub mod server;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::{Error, Result};
pub use handler::{ProxyState, SEO_CHECK_PATH};
pub use server::ProxyServer;
pub use upstream::{PageSpeedApi, PageSpeedClient, PageSpeedQuery};
