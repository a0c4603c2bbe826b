mod client;
mod receipt;
mod terminal_output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use billscan_config::Config;
use billscan_gateway::{start_server, GatewayState};
use billscan_understanding::BillExtractor;

use client::{ExtractOutcome, GatewayClient, FAILED_MESSAGE};
use terminal_output::{note_error, note_info, note_success, note_warn, supports_color};

#[derive(Parser)]
#[command(name = "billscan")]
#[command(about = "billscan: extract bill line items with a vision model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the extraction HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Extract line items from a bill image URL using a running server
    Extract {
        /// Image URL of the bill
        url: String,
        /// Base URL of the billscan server (default: http://127.0.0.1:<port>)
        #[arg(short, long)]
        server: Option<String>,
        /// Print the raw JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show server health
    Status {
        /// Base URL of the billscan server (default: http://127.0.0.1:<port>)
        #[arg(short, long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_env();
    billscan_logging::init_logger(&config.log_settings());
    debug!(?config, "Loaded configuration");

    let cli = Cli::parse();
    let local_server = format!("http://127.0.0.1:{}", config.port);

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                bind_address: bind.unwrap_or(config.bind_address),
                ..config
            };
            run_server(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Extract { url, server, json } => {
            let client = GatewayClient::new(server.unwrap_or(local_server))?;
            run_extract(&client, &url, json).await
        }
        Commands::Status { server } => {
            let client = GatewayClient::new(server.unwrap_or(local_server))?;
            match client.health().await {
                Ok(body) => {
                    note_info(&format!("billscan at {}", client.base_url()));
                    println!("{}", serde_json::to_string_pretty(&body)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(_) => {
                    note_error(&format!("billscan is not running at {}", client.base_url()));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        addr = %config.listen_addr(),
        model = %config.model,
        max_concurrent_model_calls = config.max_concurrent_model_calls,
        "Starting billscan gateway"
    );
    if config.api_key.is_none() {
        warn!("Neither GEMINI_API_KEY nor OPENAI_API_KEY is set; every extraction will fail");
    }

    let extractor = BillExtractor::from_config(&config)?;
    let state = GatewayState::new(Arc::new(extractor), config.model.clone());
    start_server(&config.listen_addr(), state).await
}

async fn run_extract(client: &GatewayClient, url: &str, json: bool) -> Result<ExitCode> {
    note_info(&format!("Scanning bill {url}"));

    let outcome = client.request_extraction(url).await;
    match &outcome {
        ExtractOutcome::Extracted { response, raw } => {
            if json {
                println!("{}", serde_json::to_string_pretty(raw)?);
            } else {
                print!("{}", receipt::render_receipt(response, supports_color()));
            }
            note_success("Extraction complete");
        }
        ExtractOutcome::Failed { raw } => {
            if json {
                println!("{}", serde_json::to_string_pretty(raw)?);
            }
            note_error(FAILED_MESSAGE);
        }
        ExtractOutcome::Unreachable(e) | ExtractOutcome::Error(e) => note_error(&format!("{e:#}")),
    }
    if let Some(hint) = outcome.hint() {
        note_warn(hint);
    }
    Ok(outcome.exit_code())
}
