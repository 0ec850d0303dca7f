use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use datafetcher::config::Config;
use datafetcher::core::{DatasetKind, Session};
use datafetcher::services::FetchClient;
use datafetcher::tui::{self, App};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Fetch issues and events from a credentialed backend and browse them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable file logging at the given level (RUST_LOG directives still apply)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Write the log here instead of ./datafetcher.log
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Backend root URL; takes precedence over the config file
    #[arg(long = "service-root", value_name = "URL")]
    service_root: Option<String>,
    /// Dataset shown at startup
    #[arg(
        long = "dataset",
        value_name = "KIND",
        value_parser = DatasetKind::from_str,
        default_value = "issues"
    )]
    dataset: DatasetKind,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    datafetcher::errors::init()?;
    datafetcher::logging::init_with(args.log_file, args.logging.map(Into::into))?;

    let config = Config::from_path(args.config.as_deref()).wrap_err("failed to load config")?;
    let service_root = args.service_root.unwrap_or_else(|| config.service_root.clone());
    let client = FetchClient::new(&service_root, config.request_timeout())
        .wrap_err_with(|| format!("invalid service root '{service_root}'"))?;
    info!(root = %client.service_root(), dataset = %args.dataset, "starting");

    let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
    let app = App::new(
        Session::with_active(args.dataset),
        config.keybindings(),
        config.theme(),
        fetch_tx,
    );

    tui::runner::run(app, Arc::new(client), fetch_rx).await
}
