use clap::ValueEnum;

pub mod client;
pub mod commands;
pub mod render;
pub mod session;

/// Proxy the clients talk to when `--server` is not given
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }
}
