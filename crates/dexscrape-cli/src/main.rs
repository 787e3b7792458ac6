use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dexscrape_acquire::{HttpFetcher, MoveSource, SiteConfig};
use dexscrape_export::dex::{self, ExportOptions};
use dexscrape_export::species::{self, MovesColumn};
use dexscrape_export::{tiers, writer};

#[derive(Parser)]
#[command(name = "dexscrape")]
#[command(about = "Pokémon species, move, and tier data scraper")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Base URL of the Pokémon database site
    #[arg(long, global = true, default_value = "https://veekun.com")]
    veekun_url: String,

    /// Base URL of the wiki
    #[arg(long, global = true, default_value = "https://bulbapedia.bulbagarden.net")]
    wiki_url: String,

    /// User-Agent header sent with every request
    #[arg(long, global = true, default_value = "dexscrape/0.1 (pokemon data tool)")]
    user_agent: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the moves of one species
    Moves {
        /// Species display name (e.g., "Deoxys-Attack")
        #[arg(short, long)]
        name: String,

        /// Site to scrape
        #[arg(short, long, value_enum, default_value = "veekun")]
        source: SourceArg,
    },

    /// Scrape the wiki's global move list
    MoveList {
        /// Output file path
        #[arg(short, long, default_value = "move-data.csv")]
        output: PathBuf,
    },

    /// Expand a species JSON export into one row per form
    Species {
        /// Input JSON export
        #[arg(short, long, default_value = "smogon-data.json")]
        input: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "pokemon-data.csv")]
        output: PathBuf,

        /// Moves column: none, names (database site), or detailed (wiki)
        #[arg(short, long, value_enum, default_value = "none")]
        moves: MovesArg,
    },

    /// Convert per-generation exports (gen{N}.json) into tier files (gen{N}.csv)
    Tiers {
        /// Directory holding gen{N}.json
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,

        /// Directory for gen{N}.csv
        #[arg(short = 'O', long, default_value = ".")]
        output_dir: PathBuf,

        /// First generation
        #[arg(long, default_value_t = 1)]
        first: u8,

        /// Last generation (inclusive)
        #[arg(long, default_value_t = 7)]
        last: u8,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SourceArg {
    /// veekun.com (move names only)
    Veekun,
    /// bulbapedia.bulbagarden.net (every pool, with attributes)
    Bulbapedia,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MovesArg {
    None,
    Names,
    Detailed,
}

impl From<SourceArg> for MoveSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Veekun => MoveSource::Veekun,
            SourceArg::Bulbapedia => MoveSource::Bulbapedia,
        }
    }
}

impl MovesArg {
    fn column(self) -> Option<MovesColumn> {
        match self {
            MovesArg::None => None,
            MovesArg::Names => Some(MovesColumn::Names),
            MovesArg::Detailed => Some(MovesColumn::Detailed),
        }
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let sites = SiteConfig {
        veekun_url: cli.veekun_url,
        wiki_url: cli.wiki_url,
        user_agent: cli.user_agent,
    };

    match cli.command {
        Commands::Moves { name, source } => {
            tracing::info!(species = %name, "Scraping moves");
            let fetcher = HttpFetcher::new(&sites.user_agent)?;
            let source = MoveSource::from(source);
            let moves = source.moves_for(&fetcher, &sites, &name).await;
            let rendered = match source {
                MoveSource::Veekun => MovesColumn::Names.render(&moves),
                MoveSource::Bulbapedia => MovesColumn::Detailed.render(&moves),
            };
            println!("{rendered}");
        }
        Commands::MoveList { output } => {
            let fetcher = HttpFetcher::new(&sites.user_agent)?;
            let listings = dexscrape_acquire::move_list::scrape_move_list(&fetcher, &sites).await?;
            let rows = writer::write_move_list(&listings, create_output(&output)?)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(rows, path = %output.display(), "Wrote move list");
        }
        Commands::Species { input, output, moves } => {
            tracing::info!(input = %input.display(), output = %output.display(), "Exporting species");
            let options = ExportOptions::default();
            let entries = dex::read_species(&input, &options.pointer)?;
            let out = create_output(&output)?;

            let rows = match moves.column() {
                Some(column) => {
                    let fetcher = HttpFetcher::new(&sites.user_agent)?;
                    species::write_species_with_moves(&entries, &options, column, &fetcher, &sites, out)
                        .await
                }
                None => species::write_species(&entries, &options, out),
            }
            .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(rows, path = %output.display(), "Wrote species");
        }
        Commands::Tiers {
            input_dir,
            output_dir,
            first,
            last,
        } => {
            anyhow::ensure!(first <= last, "--first ({first}) is after --last ({last})");
            tracing::info!(input = %input_dir.display(), output = %output_dir.display(), first, last, "Exporting tiers");
            let rows = tiers::export_generations(&input_dir, &output_dir, first..=last, &ExportOptions::generation())?;
            tracing::info!(rows, generations = last - first + 1, "Wrote tier files");
        }
    }

    Ok(())
}
