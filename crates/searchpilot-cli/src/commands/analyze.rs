use crate::OutputFormat;
use crate::client::{ReportClient, ReportSource};
use crate::render::{self, FETCH_ERROR_MESSAGE, RenderOptions, ReportView};
use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use searchpilot_core::{AnalysisRequest, Report, Strategy};
use std::io;
use std::time::Duration;

/// Fetch a report for one (url, strategy) pair from the proxy at `server`
pub async fn fetch_report(server: &str, request: &AnalysisRequest) -> Result<Report> {
    let client = ReportClient::new(server)?;
    Ok(client.fetch_report(request).await?)
}

pub fn execute(
    url: &str,
    strategy: Strategy,
    server: &str,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<()> {
    let request = AnalysisRequest::new(url, strategy)?;

    tracing::info!(
        "Analyzing {} ({}) via {}",
        request.url(),
        request.strategy(),
        server
    );

    let spinner = (format == OutputFormat::Pretty).then(|| loading_spinner(strategy));

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(fetch_report(server, &request));

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("{:#}", e);
            bail!(FETCH_ERROR_MESSAGE);
        }
    };

    let view = ReportView::new(&request, &report);
    render::render(&mut io::stdout().lock(), &view, format, options)?;

    Ok(())
}

fn loading_spinner(strategy: Strategy) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing {}…", strategy));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
