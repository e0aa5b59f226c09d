use anyhow::Result;
use searchpilot_proxy::{ProxyConfig, ProxyServer};
use std::net::IpAddr;

pub fn execute(
    host: IpAddr,
    port: u16,
    api_key: Option<String>,
    upstream: &str,
    categories: &[String],
) -> Result<()> {
    tracing::info!("Starting SearchPilot proxy on {}:{}", host, port);

    let config = ProxyConfig::new(api_key)?
        .with_address(host, port)
        .with_upstream(upstream)?
        .with_categories(categories.iter().cloned());

    tracing::debug!(
        "Upstream: {} (categories: {})",
        config.upstream,
        config.categories.join(", ")
    );

    println!("✓ SearchPilot proxy listening on http://{}", config.addr());
    println!("  Endpoint: GET /api/seo-check?url=<url>&strategy=<mobile|desktop>");
    if config.api_key.is_none() {
        println!("⚠️  PAGESPEED_API_KEY is not set; requests will be rejected with 400");
    }
    println!();
    println!("Press Ctrl+C to stop...");

    let server = ProxyServer::new(config);

    // Runs until Ctrl+C
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;

    println!("✅ Proxy stopped gracefully");

    Ok(())
}
