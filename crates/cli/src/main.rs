//! Terminal dashboard for riven auctions ranked by Endo yield per platinum.

mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use riven_core::config::SourceKind;
use riven_core::{Config, EndoEstimate, Row, SellerStatus, SortKey, StatusFilter};
use riven_ingestion::{split_auctions_str, AuctionProjector};
use riven_market::{MarketClient, Tracker};
use riven_ranking::Ranker;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::render::{group_thousands, render_table};

#[derive(Parser)]
#[command(name = "riven-tracker", version)]
#[command(about = "Rank riven mod auctions by Endo yield per platinum")]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch live auctions and print the ranked table
    List {
        /// Endpoint to read
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Rank auctions from a saved JSON payload
    Rank {
        /// JSON file: an array of auctions or an API/page-state envelope
        #[arg(long, short)]
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Estimate the Endo yield of a hypothetical riven
    Calc {
        /// Mastery rank recorded on the riven (8-30)
        #[arg(long, default_value_t = 8)]
        mastery: i64,

        /// Mod rank (0-8)
        #[arg(long, default_value_t = 8)]
        rank: i64,

        /// Number of rerolls (0-100)
        #[arg(long, default_value_t = 30)]
        rerolls: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Api,
    Scrape,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Api => SourceKind::Api,
            SourceArg::Scrape => SourceKind::Scrape,
        }
    }
}

#[derive(Args)]
struct ViewArgs {
    /// Comma-separated seller statuses to keep (ingame, online, offline)
    #[arg(long, value_delimiter = ',')]
    status: Vec<SellerStatus>,

    /// Sort order: efficiency or price
    #[arg(long)]
    sort: Option<SortKey>,

    /// Drop auctions whose item type is not a riven
    #[arg(long)]
    require_item_type: bool,

    /// Keep only rank 8 mods
    #[arg(long)]
    max_rank_only: bool,

    /// Show at most this many rows
    #[arg(long)]
    limit: Option<usize>,

    /// Print rows as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ViewArgs {
    /// Overlay command-line choices on the loaded configuration.
    fn apply_to(&self, config: &mut Config) {
        if !self.status.is_empty() {
            let filter: StatusFilter = self.status.iter().copied().collect();
            config.ranking.status_filter = Some(filter);
        }
        if let Some(sort) = self.sort {
            config.ranking.sort_key = sort;
        }
        config.projector.require_item_type |= self.require_item_type;
        config.projector.require_max_rank |= self.max_rank_only;
    }

    fn print(&self, rows: &[Row], config: &Config) -> Result<()> {
        if self.json {
            let shown = self.limit.map_or(rows.len(), |n| n.min(rows.len()));
            println!("{}", serde_json::to_string_pretty(&rows[..shown])?);
        } else {
            print!("{}", render_table(rows, &config.display, self.limit));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Command::List { source, view } => {
            if let Some(source) = source {
                config.market.source = source.into();
            }
            view.apply_to(&mut config);
            run_list(&config, &view)
        }
        Command::Rank { file, view } => {
            view.apply_to(&mut config);
            run_rank(&config, &view, &file)
        }
        Command::Calc { mastery, rank, rerolls } => run_calc(mastery, rank, rerolls),
    }
}

fn run_list(config: &Config, view: &ViewArgs) -> Result<()> {
    let client = MarketClient::new(config.market.clone())?;
    let mut tracker = Tracker::new(client, config);
    let snapshot = tracker.refresh().context("refreshing riven auctions")?;

    if let Some(error) = &snapshot.fetch_error {
        warn!("could not fetch auctions: {error}");
    }
    if snapshot.stats.accepted == 0 {
        warn!("no riven auctions found");
        return Ok(());
    }
    info!(
        fetched = snapshot.stats.total,
        accepted = snapshot.stats.accepted,
        shown = snapshot.rows.len(),
        "riven auctions ranked"
    );
    view.print(&snapshot.rows, config)?;
    if let Some(at) = snapshot.fetched_at {
        info!("data fetched at {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
}

fn run_rank(config: &Config, view: &ViewArgs, file: &Path) -> Result<()> {
    let json =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let auctions =
        split_auctions_str(&json).with_context(|| format!("parsing {}", file.display()))?;

    let projector =
        AuctionProjector::new(config.projector.clone(), config.market.site_url.clone());
    let (rows, stats) = projector.project_all(&auctions);
    let rows = Ranker::from_config(&config.ranking).apply(rows);
    info!(
        total = stats.total,
        rejected = stats.rejected(),
        shown = rows.len(),
        "auctions ranked"
    );
    view.print(&rows, config)
}

fn run_calc(mastery: i64, rank: i64, rerolls: i64) -> Result<()> {
    let estimate = EndoEstimate::new(mastery, rank, rerolls)?;
    println!(
        "Estimated Endo yield (MR {mastery}, rank {rank}, {rerolls} rerolls): {}",
        group_thousands(estimate.endo())
    );
    Ok(())
}
