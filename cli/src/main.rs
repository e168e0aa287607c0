//! ChainAdapter CLI — run the constant-call adapter locally or as a server.
//!
//! # Commands
//! ```text
//! chainadapter serve     --bind 0.0.0.0:8080
//! chainadapter invoke    [--input job.json]          (stdin by default)
//! chainadapter lambda    [--input event.json]
//! chainadapter lambda-v2 [--input event.json]
//! chainadapter encode    --inputs '[{"type":"address","value":"41..."}]'
//! chainadapter decode    --types uint256 --output 0x... [--ignore-method-hash]
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use chainadapter_codec::{AbiValue, ParameterCodec, TypedValue};
use chainadapter_job::{
    handler, handler_v2, init_tracing, router, Adapter, AdapterConfig, HttpApiEvent, LogConfig,
};

#[derive(Parser)]
#[command(
    name = "chainadapter",
    about = "TRON constant-call job adapter — ChainAdapter CLI",
    long_about = "
ChainAdapter CLI: run the confirmedTokensForUser(address) job adapter as an
HTTP service, invoke it once, or encode/decode ABI parameter payloads.

ENVIRONMENT VARIABLES:
  CHAINADAPTER_CONFIG             Path to a JSON config file
  CHAINADAPTER_ENDPOINT_URL       triggerconstantcontract endpoint
  CHAINADAPTER_OWNER_ADDRESS      owner_address of the call
  CHAINADAPTER_CONTRACT_ADDRESS   contract_address of the call
  CHAINADAPTER_FUNCTION_SELECTOR  function_selector of the call
  CHAINADAPTER_TIMEOUT_MS         per-request timeout
  CHAINADAPTER_MAX_RETRIES        retries after the first attempt
  RUST_LOG                        log filter (overrides --log-level)
",
    version
)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true, env = "CHAINADAPTER_CONFIG")]
    config: Option<PathBuf>,

    /// Default log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit JSON structured logs
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the cloud-function HTTP handler
    Serve {
        /// Listen address
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
    },

    /// Run one job request and print the job result
    Invoke {
        /// Job request JSON file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Run the classic lambda handler on an event
    Lambda {
        /// Event JSON file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Run the HTTP-API lambda handler on an event
    #[command(name = "lambda-v2")]
    LambdaV2 {
        /// Event JSON file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Encode typed values into a parameter payload
    Encode {
        /// JSON array of {"type", "value"} objects
        #[arg(long)]
        inputs: String,
    },

    /// Decode a parameter payload
    Decode {
        /// Comma-separated ABI types, e.g. "address,uint256"
        #[arg(long, value_delimiter = ',', required = true)]
        types: Vec<String>,
        /// Hex payload, with or without 0x
        #[arg(long)]
        output: String,
        /// Drop a leading 4-byte method selector when present
        #[arg(long)]
        ignore_method_hash: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(&LogConfig {
        level: cli.log_level.clone(),
        json: cli.json_logs,
        ..Default::default()
    });

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { bind } => {
            let adapter = load_adapter(cli.config.as_deref())?;
            cmd_serve(adapter, bind).await
        }
        Commands::Invoke { input } => {
            let adapter = load_adapter(cli.config.as_deref())?;
            let job = read_json(input.as_deref())?;
            let (status, result) = adapter.create_request(job).await;
            print_json(&serde_json::to_value(&result)?)?;
            if status >= 400 {
                process::exit(1);
            }
            Ok(())
        }
        Commands::Lambda { input } => {
            let adapter = load_adapter(cli.config.as_deref())?;
            let event = read_json(input.as_deref())?;
            let result = handler(&adapter, event).await;
            print_json(&serde_json::to_value(&result)?)
        }
        Commands::LambdaV2 { input } => {
            let adapter = load_adapter(cli.config.as_deref())?;
            let event: HttpApiEvent = serde_json::from_value(read_json(input.as_deref())?)
                .context("event is not an HTTP-API lambda event")?;
            let resp = handler_v2(&adapter, event).await;
            print_json(&serde_json::to_value(&resp)?)
        }
        Commands::Encode { inputs } => {
            let inputs: Vec<TypedValue> =
                serde_json::from_str(&inputs).context("--inputs must be a JSON array of {type, value}")?;
            println!("{}", ParameterCodec::encode(&inputs)?);
            Ok(())
        }
        Commands::Decode {
            types,
            output,
            ignore_method_hash,
        } => {
            let types: Vec<&str> = types.iter().map(|t| t.trim()).collect();
            let values = ParameterCodec::decode(&types, &output, ignore_method_hash)?;
            print_json(&Value::Array(values.iter().map(AbiValue::to_json).collect()))
        }
    }
}

async fn cmd_serve(adapter: Adapter, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("cannot bind {bind}"))?;
    tracing::info!(
        %bind,
        endpoint = %adapter.config().endpoint_url,
        selector = %adapter.config().function_selector,
        "serving job adapter"
    );

    axum::serve(listener, router(Arc::new(adapter)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")
}

fn load_adapter(config_path: Option<&Path>) -> Result<Adapter> {
    let config = match config_path {
        Some(path) => AdapterConfig::from_file(path)?.with_env_overrides()?,
        None => AdapterConfig::from_env()?,
    };
    Ok(Adapter::new(config)?)
}

fn read_json(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("cannot read {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("input is not valid JSON")
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
