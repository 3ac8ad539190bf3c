use clap::{Args, Parser, Subcommand};

use crate::series::Timeframe;

#[derive(Debug, Parser)]
#[command(
    name = "slotscope",
    version,
    about = "Ethereum network telemetry series builder"
)]
pub struct Cli {
    /// Base URL of the telemetry REST backend.
    #[arg(long, env = "SLOTSCOPE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Network to query (e.g. mainnet, holesky).
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// Config file path. Defaults to slotscope.toml / slotscope.json.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory for chart images and JSON exports.
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    /// Rows per page for list requests.
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Per-node block first-seen latency chart.
    Latency(SlotWindowArgs),
    /// Blob timing chart from backend pre-aggregated statistics.
    BlobTiming(SlotWindowArgs),
    /// State size growth with a period-over-period delta.
    StateGrowth(StateGrowthArgs),
    /// Node geography summary.
    Geo,
}

#[derive(Debug, Args)]
pub struct SlotWindowArgs {
    /// First slot of the query window. Defaults from the table bounds.
    #[arg(long)]
    pub start_slot: Option<u64>,

    /// Last slot of the query window. Defaults from the table bounds.
    #[arg(long)]
    pub end_slot: Option<u64>,

    /// Window length when the bounds drive the default window (one epoch is
    /// 32 slots).
    #[arg(long, default_value_t = 320)]
    pub slot_window: u64,
}

#[derive(Debug, Args)]
pub struct StateGrowthArgs {
    #[arg(long, value_enum, default_value_t = Timeframe::Daily)]
    pub timeframe: Timeframe,
}
