#![forbid(unsafe_code)]
//! HTTP node for quarrychain: one ledger instance behind the REST API.

use clap::Parser;
use quarrychain::api::{run_api_server, Node};
use quarrychain::blockchain::Blockchain;
use quarrychain::config::load_config;
use quarrychain::wallet::Wallet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "quarry-node", version, about = "Run a quarrychain HTTP node")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the API port from the configuration file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = load_config(&args.config)?;
    let port = args.port.unwrap_or(config.network.api_port);

    let miner_address = match &config.miner.address {
        Some(address) => address.clone(),
        None => {
            let wallet = Wallet::generate();
            info!(private_key = %wallet.secret_key_hex(), "generated miner wallet");
            info!(public_key = %wallet.public_key_hex(), "generated miner wallet");
            info!(address = %wallet.address(), "generated miner wallet");
            wallet.address().to_string()
        }
    };

    info!(%miner_address, %port, "starting quarrychain node");

    let node = Arc::new(Node::new(Blockchain::new(&miner_address)));
    run_api_server(node, port).await
}
