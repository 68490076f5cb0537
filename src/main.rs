//! Command line client for the Elrond REST gateway.
//!
//! ```text
//!   CLI args ─┐
//!             ├─▶ GatewayConfig ─▶ GatewayClient ─┬─▶ lookups
//!   TOML file ┘                                   ├─▶ TxSubmitter      ─▶ /transaction/send
//!                                                 └─▶ HistoryAggregator ─▶ /transactions + /transaction/{hash}
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use elrond_gateway::config::{resolve_config, ConfigOverrides};
use elrond_gateway::gateway::{GatewayClient, HistoryAggregator, TransferOperation, TxSubmitter};
use elrond_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "elrond-cli")]
#[command(about = "Query and submit transactions through an Elrond REST gateway", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gateway base URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Log level (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show balance and nonce of an account
    Account { address: String },
    /// List validator statistics
    Validators,
    /// Show current network parameters
    NetworkConfig,
    /// Show current metachain block height
    BlockHeight,
    /// Show the block that confirmed a transaction
    Transaction { hash: String },
    /// Rebuild the transaction history of an address
    History {
        address: String,
        /// Only include transactions after this timestamp
        #[arg(long, default_value_t = 0)]
        after: u64,
    },
    /// Submit a signed transfer
    Submit {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        receiver: String,
        /// Amount in the smallest denomination
        #[arg(long)]
        value: String,
        #[arg(long)]
        nonce: u64,
        #[arg(long)]
        signature: String,
        /// The signature was made over the transaction hash
        #[arg(long)]
        sign_using_hash: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        base_url: cli.url,
        log_level: cli.log_level,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    logging::init_logging(&config.observability.log_level);

    tracing::debug!(
        base_url = %config.api.base_url,
        page_size = config.history.page_size,
        "Configuration loaded"
    );

    let client = GatewayClient::new(&config.api)?;

    match cli.command {
        Commands::Account { address } => {
            print_json(&client.get_account_details(&address).await?)?;
        }
        Commands::Validators => {
            print_json(&client.get_validators().await)?;
        }
        Commands::NetworkConfig => {
            print_json(&client.get_network_config().await?)?;
        }
        Commands::BlockHeight => {
            print_json(&client.get_blockchain_block_height().await?)?;
        }
        Commands::Transaction { hash } => {
            print_json(&client.get_confirmed_transaction(&hash).await?)?;
        }
        Commands::History { address, after } => {
            let aggregator = HistoryAggregator::new(client, config.history);
            print_json(&aggregator.get_history(&address, after).await?)?;
        }
        Commands::Submit {
            sender,
            receiver,
            value,
            nonce,
            signature,
            sign_using_hash,
        } => {
            let operation = TransferOperation {
                senders: vec![sender],
                recipients: vec![receiver],
                value,
                transaction_sequence_number: nonce,
            };
            let submitter = TxSubmitter::new(client);
            print_json(&submitter.submit(&operation, &signature, sign_using_hash).await?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
