//! UmaGuide CLI - command line front end for the guide data core.
//!
//! Loads the character dataset through a SQLite-backed cache and prints
//! listings and comparisons. Machine-readable output goes to stdout as JSON;
//! logs go to stderr.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use umaguide_core::config::NetworkConfig;
use umaguide_core::{
    CacheDefaults, CharacterFilter, CharacterType, GuideContext, LoaderConfig, SelectOutcome,
    SelectionConfig, SelectionModel, SqliteStore,
};

#[derive(Parser, Debug)]
#[command(name = "umaguide")]
#[command(about = "Browse and compare Uma Musume characters")]
struct Args {
    /// Dataset location: http(s) URL or local path
    #[arg(long, default_value = NetworkConfig::DATA_PATH)]
    data_url: String,

    /// Cache database (defaults to <data dir>/umaguide/cache.sqlite)
    #[arg(long)]
    cache_db: Option<PathBuf>,

    /// Cache expiry in hours
    #[arg(long, default_value = "24")]
    max_age_hours: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the dataset and report where it came from
    Load,
    /// Show the cache status
    Status,
    /// Remove the cached dataset
    ClearCache,
    /// List characters matching the given filters
    List {
        /// Substring of the English or Japanese name
        #[arg(long)]
        search: Option<String>,

        /// Character type (speed, stamina, power, guts, wisdom)
        #[arg(long = "type")]
        character_type: Option<CharacterType>,

        /// Rarity (1-5)
        #[arg(long)]
        rarity: Option<u8>,
    },
    /// Compare up to four characters by id
    Compare {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Print the attribute table instead of JSON
        #[arg(long)]
        table: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut guide = build_context(&args)?;

    match args.command {
        Command::Load => {
            let outcome = guide.load().await?;
            if let Some(reason) = &outcome.fallback_reason {
                warn!("Serving stale data: {}", reason);
            }
            let summary = serde_json::json!({
                "origin": outcome.origin,
                "characters": outcome.dataset.len(),
                "metadata": outcome.dataset.metadata,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&guide.cache_status())?);
        }
        Command::ClearCache => {
            guide.clear_data_cache();
            info!("Cache cleared");
        }
        Command::List {
            search,
            character_type,
            rarity,
        } => {
            guide.load().await?;
            let filter = CharacterFilter::default()
                .with_search(search.unwrap_or_default())
                .with_type(character_type)
                .with_rarity(rarity);
            print!("{}", render::character_list(&guide.filter_characters(&filter)));
        }
        Command::Compare { ids, table } => {
            guide.load().await?;
            let selection = guide
                .selection_mut()
                .context("Selection is unavailable before loading")?;

            select_in_order(selection, &ids);

            if table {
                match guide.comparison_table() {
                    Some(t) => print!("{}", render::comparison_table(&t)),
                    None => bail!("None of the given ids matched a character"),
                }
            } else {
                match guide.compare_selected() {
                    Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                    None => bail!("None of the given ids matched a character"),
                }
            }
        }
    }

    Ok(())
}

/// Click through `ids` like the character list would: each id toggles, and
/// ids beyond capacity are rejected.
fn select_in_order(selection: &mut SelectionModel, ids: &[String]) -> Vec<SelectOutcome> {
    ids.iter()
        .map(|id| {
            let outcome = selection.select(id);
            match outcome {
                SelectOutcome::Selected => {}
                SelectOutcome::Deselected => warn!("{} given twice, deselected again", id),
                SelectOutcome::CapacityReached => warn!(
                    "Only {} characters can be compared, skipping {}",
                    SelectionConfig::MAX_SELECTED,
                    id
                ),
                SelectOutcome::UnknownCharacter => warn!("Unknown character id: {}", id),
            }
            outcome
        })
        .collect()
}

/// Cache expiry for `--max-age-hours`.
fn max_age(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(60 * 60))
}

fn build_context(args: &Args) -> Result<GuideContext> {
    let cache_db = match &args.cache_db {
        Some(path) => path.clone(),
        None => CacheDefaults::default_db_path()
            .context("No platform data directory; pass --cache-db")?,
    };
    info!("Cache database: {}", cache_db.display());

    let config = LoaderConfig::new(&args.data_url)
        .with_max_age(max_age(args.max_age_hours));
    let store = SqliteStore::new(&cache_db)
        .with_context(|| format!("Failed to open cache at {}", cache_db.display()))?;

    Ok(GuideContext::builder(config).store(Arc::new(store)).build()?)
}
