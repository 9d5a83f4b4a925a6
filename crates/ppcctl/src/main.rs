// ppcctl/src/main.rs
use anyhow::Context;
use clap::{Parser, Subcommand};
use ppc_crypto::ShaHash;
use ppc_rpcclient::{Client, MsgTx};
use ppcctl::CtlConfig;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ppcctl")]
#[command(about = "Proof-of-stake RPC client for Peercoin nodes", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "./ppcctl.toml")]
    config: String,

    /// Override the node's host:port
    #[arg(long, global = true)]
    host: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Kernel stake modifier of a block
    StakeModifier {
        /// Block hash; the best block when omitted
        #[arg(long)]
        hash: Option<String>,

        /// Return the block hash alongside the modifier
        #[arg(short, long)]
        verbose: bool,
    },

    /// Difficulty target the next block must meet
    NextTarget {
        /// Proof-of-stake target instead of proof-of-work
        #[arg(long)]
        proof_of_stake: bool,

        /// Return a structured record
        #[arg(short, long)]
        verbose: bool,
    },

    /// Subsidy of the last proof-of-work block
    LastPowReward,

    /// Submit a signed coin-stake transaction
    SendCoinstake {
        /// Hex-encoded transaction
        #[arg(long)]
        tx: String,
    },

    /// Write a default configuration file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "./ppcctl.toml")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ppcctl={0},ppc_rpcclient={0},hyper=warn", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::InitConfig { output } => init_config(&output),
        command => {
            let mut config = CtlConfig::load_or_default(&cli.config)
                .with_context(|| format!("failed to load config from {}", cli.config))?;
            if let Some(host) = cli.host {
                config.rpc.host = host;
            }
            let client =
                Client::connect_http(&config.rpc).context("failed to set up RPC client")?;
            run(&client, command).await
        }
    }
}

async fn run(client: &Client, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::StakeModifier { hash, verbose } => {
            let hash = hash
                .as_deref()
                .map(str::parse::<ShaHash>)
                .transpose()
                .context("invalid block hash")?;
            if verbose {
                print_json(&client.get_kernel_stake_modifier_verbose(hash.as_ref()).await?)
            } else {
                print_json(&client.get_kernel_stake_modifier(hash.as_ref()).await?)
            }
        }
        Commands::NextTarget {
            proof_of_stake,
            verbose,
        } => {
            if verbose {
                print_json(&client.get_next_required_target_verbose(proof_of_stake).await?)
            } else {
                let target = client.get_next_required_target(proof_of_stake).await?;
                print_json(&format!("{:08x}", target))
            }
        }
        Commands::LastPowReward => print_json(&client.get_last_proof_of_work_reward().await?),
        Commands::SendCoinstake { tx } => {
            let tx = MsgTx::from_hex(&tx).context("invalid transaction hex")?;
            if !tx.is_coin_stake() {
                tracing::warn!("Transaction {} does not look like a coin-stake", tx.tx_sha());
            }
            let id = client.send_coin_stake_transaction(Some(&tx)).await?;
            tracing::info!("Coin-stake accepted as {}", id);
            print_json(&id)
        }
        Commands::InitConfig { output } => init_config(&output),
    }
}

fn init_config(output: &str) -> anyhow::Result<()> {
    CtlConfig::default()
        .to_file(output)
        .with_context(|| format!("failed to write {}", output))?;
    tracing::info!("Wrote default configuration to {}", output);
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
