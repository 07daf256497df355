//! Hafiz Events - S3 event notification handler
//!
//! Reads one notification payload from a file or stdin, processes every
//! record and prints the batch result as JSON.

use std::sync::Arc;

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use hafiz_events_core::config::{HandlerConfig, LoggingConfig};
use hafiz_events_core::types::NotificationBatch;
use hafiz_events_handler::{
    response_json, BatchCoordinator, InvocationContext, JsonLinesSink, LogSink, TracingSink,
};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hafiz-events")]
#[command(author = "Hafiz Team")]
#[command(version = hafiz_events_core::VERSION)]
#[command(about = "S3 Event Notification Handler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Service name for log entries
    #[arg(long, env = "HAFIZ_EVENTS_SERVICE")]
    service: Option<String>,

    /// Per-batch deadline in milliseconds
    #[arg(long, env = "HAFIZ_EVENTS_BATCH_DEADLINE_MS")]
    deadline_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HAFIZ_EVENTS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long, env = "HAFIZ_EVENTS_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log the untouched payload before processing (true/false)
    #[arg(long, env = "HAFIZ_EVENTS_LOG_RAW_EVENT", value_parser = BoolishValueParser::new())]
    log_raw_event: Option<bool>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one notification payload
    Process {
        /// Payload file; reads stdin when omitted
        #[arg(short, long)]
        file: Option<String>,

        /// Function name recorded in the invocation context
        #[arg(long)]
        function_name: Option<String>,

        /// Request id recorded in the invocation context
        #[arg(long)]
        request_id: Option<String>,

        /// Print only statusCode and body
        #[arg(long)]
        compat: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load or create config
    let mut config = if let Some(config_path) = &cli.config {
        HandlerConfig::from_file(config_path)?
    } else {
        HandlerConfig::from_env()
    };

    // Override with CLI args
    if let Some(service) = cli.service {
        config.service = service;
    }
    if let Some(deadline_ms) = cli.deadline_ms {
        config.batch_deadline_ms = Some(deadline_ms);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(log_raw_event) = cli.log_raw_event {
        config.log_raw_event = log_raw_event;
    }
    config.validate()?;

    init_logging(&config.logging);

    match cli.command {
        Some(Commands::Process {
            file,
            function_name,
            request_id,
            compat,
        }) => {
            let mut ctx = match function_name {
                Some(name) => InvocationContext::new(name),
                None => InvocationContext::default(),
            };
            if let Some(request_id) = request_id {
                ctx = ctx.with_request_id(request_id);
            }
            run_process(config, file.as_deref(), &ctx, compat).await?;
        }
        Some(Commands::Version) | None => {
            println!("hafiz-events {}", hafiz_events_core::VERSION);
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Diagnostics go to stderr; stdout carries the result.
    if logging.is_json() {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

async fn read_payload(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read payload from {}", path)),
        None => {
            let mut payload = String::new();
            tokio::io::stdin()
                .read_to_string(&mut payload)
                .await
                .context("Failed to read payload from stdin")?;
            Ok(payload)
        }
    }
}

async fn run_process(
    config: HandlerConfig,
    file: Option<&str>,
    ctx: &InvocationContext,
    compat: bool,
) -> anyhow::Result<()> {
    let payload = read_payload(file).await?;
    let batch = NotificationBatch::from_json(&payload)?;
    info!("Loaded notification batch with {} record(s)", batch.len());

    let sink: Arc<dyn LogSink> = if config.logging.is_json() {
        Arc::new(JsonLinesSink::stderr(config.service.clone()))
    } else {
        Arc::new(TracingSink::new(config.service.clone()))
    };
    let coordinator = BatchCoordinator::new(sink, config);
    let result = coordinator.process_with_context(&batch, ctx);

    let output = if compat {
        response_json(&result)
    } else {
        serde_json::to_value(&result)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
