//! Retail Pay CLI
//!
//! Builds signed payment parameters and authenticated URLs from the command
//! line, using credentials from a config file or `RETAIL_PAY_*` variables.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retail_pay_core::{ApiClient, ClientConfig, CombinedPaymentRequest, PaymentBuilder};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "retail-pay", version, about = "Sign mobile retail payment parameters")]
struct Cli {
    /// Config file (TOML, JSON, YAML). Falls back to environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print `wx.requestCommonPayment` parameters for an order file.
    Sign {
        /// Order JSON file.
        #[arg(long)]
        order: PathBuf,
        /// User session key from the login exchange.
        #[arg(long)]
        session_key: String,
        /// Treat the order as a combined payment with `combined_order_list`.
        #[arg(long)]
        combined: bool,
    },
    /// Print an authenticated URL, signed when a body is given.
    Url {
        #[arg(long)]
        path: String,
        /// Request body file to sign.
        #[arg(long)]
        body: Option<PathBuf>,
    },
    /// POST a signed JSON body to the platform and print the response.
    Call {
        #[arg(long)]
        path: String,
        #[arg(long)]
        body: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retail_pay=info,retail_pay_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let client = Arc::new(ApiClient::new(config).context("Invalid client configuration")?);

    match cli.command {
        Command::Sign {
            order,
            session_key,
            combined,
        } => {
            let raw = read_file(&order)?;
            let builder = PaymentBuilder::new(Arc::clone(&client));
            let params = if combined {
                let request: CombinedPaymentRequest = serde_json::from_slice(&raw)
                    .context("Order is not a combined payment request")?;
                builder.build_combined_payment_params(&request, &session_key)?
            } else {
                let order: serde_json::Value =
                    serde_json::from_slice(&raw).context("Order is not valid JSON")?;
                builder.build_payment_params(&order, &session_key)?
            };
            info!(mode = %params.mode, "Payment params built");
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Command::Url { path, body } => {
            let url = match body {
                Some(file) => client.build_signed_url(&path, &read_file(&file)?)?,
                None => client.build_authenticated_url(&path),
            };
            println!("{}{}", client.base_url(), url);
        }
        Command::Call { path, body } => {
            let body = read_file(&body)?;
            let url = client.build_signed_url(&path, &body)?;
            let response = client.execute(reqwest::Method::POST, &url, body).await?;
            let status = response.status();
            let text = response.text().await?;
            info!(status = %status, "Platform responded");
            println!("{}", text);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => ClientConfig::from_env().context("Failed to load config from environment"),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
