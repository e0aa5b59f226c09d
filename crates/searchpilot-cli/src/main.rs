use anyhow::Result;
use clap::{Parser, Subcommand};
use searchpilot_cli::render::{RenderOptions, Section};
use searchpilot_cli::{DEFAULT_SERVER, OutputFormat, commands};
use searchpilot_core::Strategy;
use searchpilot_proxy::config::{DEFAULT_CATEGORIES, DEFAULT_PORT, DEFAULT_UPSTREAM};
use std::net::IpAddr;

#[derive(Parser)]
#[command(name = "searchpilot")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI for checking page performance and SEO with the PageSpeed Insights API",
    long_about = "SearchPilot runs a small proxy that adds your PageSpeed Insights API key to \
                  requests, and renders field and lab metrics with improvement suggestions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the PageSpeed proxy server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// PageSpeed Insights API key
        #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// PageSpeed endpoint to forward to
        #[arg(long, default_value = DEFAULT_UPSTREAM)]
        upstream: String,

        /// Lighthouse categories to request (repeatable)
        #[arg(long = "category", value_name = "CATEGORY", default_values = DEFAULT_CATEGORIES)]
        categories: Vec<String>,
    },

    /// Analyze a URL once and print the report
    Analyze {
        /// URL to analyze
        #[arg(value_name = "URL")]
        url: String,

        /// Device strategy
        #[arg(short, long, default_value = "mobile", value_parser = parse_strategy)]
        strategy: Strategy,

        /// SearchPilot proxy base URL
        #[arg(long, env = "SEARCHPILOT_SERVER", default_value = DEFAULT_SERVER)]
        server: String,

        /// Collapse a report section (field, lab)
        #[arg(long, value_enum)]
        collapse: Vec<Section>,
    },

    /// Interactively analyze URLs, re-fetching on every URL or strategy change
    Watch {
        /// URL to analyze first
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Initial device strategy
        #[arg(short, long, default_value = "mobile", value_parser = parse_strategy)]
        strategy: Strategy,

        /// SearchPilot proxy base URL
        #[arg(long, env = "SEARCHPILOT_SERVER", default_value = DEFAULT_SERVER)]
        server: String,

        /// Collapse a report section (field, lab)
        #[arg(long, value_enum)]
        collapse: Vec<Section>,
    },
}

fn parse_strategy(s: &str) -> std::result::Result<Strategy, String> {
    s.parse().map_err(|e: searchpilot_core::Error| e.to_string())
}

fn main() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Serve {
            host,
            port,
            api_key,
            upstream,
            categories,
        } => commands::serve::execute(host, port, api_key, &upstream, &categories),
        Commands::Analyze {
            url,
            strategy,
            server,
            collapse,
        } => commands::analyze::execute(
            &url,
            strategy,
            &server,
            cli.format,
            &RenderOptions {
                collapsed: collapse,
            },
        ),
        Commands::Watch {
            url,
            strategy,
            server,
            collapse,
        } => commands::watch::execute(
            url.as_deref(),
            strategy,
            &server,
            cli.format,
            &RenderOptions {
                collapsed: collapse,
            },
        ),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "searchpilot=debug,searchpilot_cli=debug,searchpilot_core=debug,searchpilot_proxy=debug"
    } else {
        "searchpilot=info,searchpilot_cli=info,searchpilot_proxy=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
