//! CRC registry admin tool.
//!
//! `deploy` brings up the whole registry on a Soroban network, `set-proxy`
//! whitelists a registrar in the eternal storage contract, and `publish-abi`
//! uploads a compiled-contract interface artifact to the drive store.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crc_admin::abi::{self, DriveClient};
use crc_admin::account::Resolver;
use crc_admin::deploy::{self, RpcBackend};
use crc_admin::rpc::RpcClient;

#[derive(Parser, Debug)]
#[command(name = "crc-admin")]
#[command(about = "Deploy the CRC registry contracts and publish their interface artifacts")]
struct Args {
    /// Soroban RPC endpoint URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000/soroban/rpc")]
    rpc_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy the eternal storage contract and the four registrars in order
    Deploy {
        /// Directory holding the compiled contract wasm files
        #[arg(long, default_value = "target/wasm32-unknown-unknown/release")]
        wasm_dir: PathBuf,

        /// Numbered dev account to deploy from
        #[arg(long)]
        account_index: Option<usize>,

        /// Named identity to deploy from
        #[arg(long)]
        identity: Option<String>,
    },

    /// Whitelist a deployed registrar in the eternal storage contract
    SetProxy {
        /// Hex contract id of the eternal storage contract
        storage_id: String,

        /// Hex contract id of the registrar to whitelist
        registrar_id: String,

        /// Numbered dev account to sign with
        #[arg(long)]
        account_index: Option<usize>,

        /// Named identity to sign with
        #[arg(long)]
        identity: Option<String>,
    },

    /// Upload a compiled-contract interface artifact to the drive store
    PublishAbi {
        /// Artifact name; the .json suffix is optional
        contract_name: String,

        /// Directory holding the interface artifacts
        #[arg(long, default_value = abi::ARTIFACT_DIR)]
        artifact_dir: PathBuf,

        /// Drive API base URL
        #[arg(long, default_value = abi::DEFAULT_BASE_URL)]
        drive_url: String,
    },
}

fn parse_contract_id(value: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = hex::decode(value).context("contract id is not hex")?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("contract id must be 32 bytes, got {}", bytes.len()))
}

async fn connect(
    rpc_url: &str,
    account_index: Option<usize>,
    identity: Option<&str>,
) -> anyhow::Result<RpcBackend> {
    let rpc = RpcClient::new(rpc_url)?;
    let network = rpc.get_network().await.context("fetching network info")?;
    tracing::info!(passphrase = %network.passphrase, "active network");

    let resolver = Resolver::from_env(network.passphrase.clone());
    let account = resolver.resolve(account_index, identity)?;
    tracing::info!(account = %account.public_key_hex(), "signing as");

    Ok(RpcBackend::new(
        rpc,
        account.into_signing_key(),
        network.passphrase,
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Deploy {
            wasm_dir,
            account_index,
            identity,
        } => {
            let mut backend = connect(&args.rpc_url, account_index, identity.as_deref()).await?;
            let admin = backend.deployer();
            let summary = deploy::deploy_registry(&mut backend, &wasm_dir, admin).await?;

            for contract in &summary.contracts {
                println!("{}: {}", contract.name, hex::encode(contract.contract_id));
            }
        }

        Command::SetProxy {
            storage_id,
            registrar_id,
            account_index,
            identity,
        } => {
            let storage_id = parse_contract_id(&storage_id)?;
            let registrar_id = parse_contract_id(&registrar_id)?;

            let mut backend = connect(&args.rpc_url, account_index, identity.as_deref()).await?;
            deploy::set_proxy(&mut backend, storage_id, registrar_id).await?;

            println!("{} whitelisted", hex::encode(registrar_id));
        }

        Command::PublishAbi {
            contract_name,
            artifact_dir,
            drive_url,
        } => {
            let drive = DriveClient::from_env(drive_url)?;
            let stored = abi::publish(&drive, &artifact_dir, &contract_name).await?;

            println!("{stored} stored in drive");
        }
    }

    Ok(())
}
