use crate::OutputFormat;
use crate::client::ReportClient;
use crate::render::{self, RenderOptions, ReportView};
use crate::session::{ReportEvent, ReportSession};
use anyhow::Result;
use console::style;
use searchpilot_core::{AnalysisRequest, Strategy};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A line typed into the watch prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Url(String),
    Strategy(Strategy),
    Toggle,
    Retry,
    Help,
    Quit,
    Empty,
}

impl WatchCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => WatchCommand::Empty,
            "q" | "quit" | "exit" => WatchCommand::Quit,
            "h" | "help" | "?" => WatchCommand::Help,
            "t" | "toggle" => WatchCommand::Toggle,
            "r" | "retry" => WatchCommand::Retry,
            "m" | "mobile" => WatchCommand::Strategy(Strategy::Mobile),
            "d" | "desktop" => WatchCommand::Strategy(Strategy::Desktop),
            _ => WatchCommand::Url(line.to_string()),
        }
    }
}

pub fn execute(
    url: Option<&str>,
    strategy: Strategy,
    server: &str,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<()> {
    let client = ReportClient::new(server)?;

    tracing::info!("Starting watch session against {}", server);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(Arc::new(client), url, strategy, format, options));

    // A pending stdin read would otherwise hold up runtime shutdown
    runtime.shutdown_background();

    result
}

async fn run(
    client: Arc<ReportClient>,
    url: Option<&str>,
    strategy: Strategy,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<()> {
    let (mut session, mut events) = ReportSession::new(client, strategy);

    print_help();

    if let Some(url) = url {
        report_started(session.set_url(url)?);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed, ending watch session");
                    break;
                };

                match WatchCommand::parse(&line) {
                    WatchCommand::Quit => break,
                    WatchCommand::Empty => {}
                    WatchCommand::Help => print_help(),
                    WatchCommand::Toggle => report_started(session.toggle_strategy()),
                    WatchCommand::Strategy(s) => report_started(session.set_strategy(s)),
                    WatchCommand::Retry => match session.refresh() {
                        Some(request) => report_started(Some(request)),
                        None => println!("{}", style("Enter a URL first").yellow()),
                    },
                    WatchCommand::Url(url) => match session.set_url(&url) {
                        Ok(Some(request)) => report_started(Some(request)),
                        Ok(None) => println!(
                            "{}",
                            style("Already showing this URL; use 'r' to fetch it again").dim()
                        ),
                        Err(e) => println!("{}", style(e).red()),
                    },
                }
            }
            Some(event) = events.recv() => {
                if session.accept(&event) {
                    show_event(&event, format, options)?;
                } else {
                    tracing::debug!("Dropping stale report for generation {}", event.generation);
                }
            }
        }
    }

    session.cancel();
    Ok(())
}

fn report_started(request: Option<AnalysisRequest>) {
    if let Some(request) = request {
        println!("{}", style(format!("Analyzing {}…", request.strategy())).dim());
    }
}

fn show_event(event: &ReportEvent, format: OutputFormat, options: &RenderOptions) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match &event.outcome {
        Ok(report) => {
            let view = ReportView::new(&event.request, report);
            render::render(&mut stdout, &view, format, options)?;
        }
        Err(e) => {
            tracing::error!("Fetch for {} failed: {}", event.request.url(), e);
            render::render_error(&mut stdout)?;
        }
    }
    Ok(())
}

fn print_help() {
    println!("{}", style("SearchPilot watch").bold().cyan());
    println!("  <url>        analyze a URL");
    println!("  m, mobile    switch to the mobile strategy");
    println!("  d, desktop   switch to the desktop strategy");
    println!("  t, toggle    toggle the strategy");
    println!("  r, retry     fetch the current URL again");
    println!("  q, quit      exit");
    println!();
}
