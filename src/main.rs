// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use slotscan::{
    Commitment, HttpLedgerClient, RpcEndpointConfig, ScanConfigBuilder, Slot, SlotScanner,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slotscan")]
#[command(about = "Cached slot and transaction-count queries against a Solana RPC node")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC endpoint URL (defaults to SOLANA_RPC_URL, then public mainnet-beta)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Commitment level: confirmed or finalized
    #[arg(long, global = true, default_value_t = Commitment::Confirmed)]
    commitment: Commitment,

    /// Per-slot fetches kept in flight during range and recent scans
    #[arg(long, global = true, default_value_t = 1)]
    concurrency: usize,

    /// Widest range accepted by `range` (0 = unlimited)
    #[arg(long, global = true, default_value_t = 10_000)]
    max_range: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest slot
    Latest,

    /// Transaction count at one slot
    Count { slot: Slot },

    /// Block summary at one slot
    Summary { slot: Slot },

    /// Counts over an inclusive slot range, in either order
    Range {
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true)]
        end: i64,
    },

    /// Counts for the newest slots, most recent first
    Recent {
        /// Number of slots, clamped to 1..=200
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("slotscan failed: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let endpoint = RpcEndpointConfig::from_env_with_url(cli.rpc_url)
        .context("Invalid RPC settings in environment")?;
    let ledger =
        Arc::new(HttpLedgerClient::new(&endpoint).context("Failed to create ledger client")?);

    let builder = ScanConfigBuilder::new().concurrency(cli.concurrency);
    let config = match cli.max_range {
        0 => builder.unbounded_range(),
        max => builder.max_range_width(max),
    }
    .build();
    let scanner = SlotScanner::with_memory_cache(ledger, &config);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling scan");
            on_signal.cancel();
        }
    });

    let commitment = cli.commitment;
    match cli.command {
        Commands::Latest => print_json(&scanner.latest_slot(commitment).await?)?,
        Commands::Count { slot } => print_json(&scanner.transaction_count(slot, commitment).await)?,
        Commands::Summary { slot } => print_json(&scanner.block_summary(slot, commitment).await)?,
        Commands::Range { start, end } => print_json(
            &scanner
                .range_counts_with_cancel(start, end, commitment, &cancel)
                .await?,
        )?,
        Commands::Recent { limit } => print_json(
            &scanner
                .recent_counts_with_cancel(limit, commitment, &cancel)
                .await?,
        )?,
    }

    debug!(stats = %scanner.cache_stats().await, "Cache statistics");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{json}");
    Ok(())
}
