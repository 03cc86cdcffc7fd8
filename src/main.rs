//! CLI entry point for the app market profiler.
//!
//! Provides subcommands for exploring a raw catalog, profiling a single
//! market, and profiling the two markets side by side.

use anyhow::Result;
use app_market_profiler::analyzers::cleaning::ExclusionRule;
use app_market_profiler::analyzers::profiler::{MarketConfig, category_listing, profile_market};
use app_market_profiler::{
    fetch::{BasicClient, fetch_bytes},
    loader::{Dataset, parse_dataset},
    output::{log_table, print_report_json, write_clean_csv, write_report_json},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "app_market_profiler")]
#[command(about = "A tool to clean and profile mobile app catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Market {
    GooglePlay,
    AppStore,
}

impl Market {
    fn config(self) -> MarketConfig {
        match self {
            Market::GooglePlay => MarketConfig::google_play(),
            Market::AppStore => MarketConfig::app_store(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first rows and dimensions of a catalog
    Explore {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// First row to print (0-based, header excluded)
        #[arg(short, long, default_value_t = 0)]
        start: usize,

        /// One past the last row to print
        #[arg(short, long, default_value_t = 3)]
        end: usize,
    },
    /// Clean one market's catalog and report category statistics
    Analyze {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Column layout preset for the catalog
        #[arg(short, long, value_enum)]
        market: Market,

        /// Rows to drop before any processing (0-based, repeatable)
        #[arg(short = 'x', long = "exclude-row")]
        exclude_rows: Vec<usize>,

        /// Drop rows whose field count differs from the header's
        #[arg(long, default_value_t = false)]
        drop_ragged: bool,

        /// Show only the top N table entries
        #[arg(short, long)]
        top: Option<usize>,

        /// Drill into one category: list its apps and popularity values
        #[arg(short, long)]
        category: Option<String>,

        /// Optional: CSV file to write the cleaned records to
        #[arg(long)]
        clean_output: Option<String>,

        /// Optional: JSON file to write the market report to
        #[arg(long)]
        report: Option<String>,
    },
    /// Profile both market catalogs and print the reports side by side
    Compare {
        /// Google Play catalog: path to file or URL
        #[arg(long)]
        play_source: String,

        /// App Store catalog: path to file or URL
        #[arg(long)]
        store_source: String,

        /// Rows to drop from the Google Play catalog (repeatable)
        #[arg(long = "play-exclude-row")]
        play_exclude_rows: Vec<usize>,

        /// Rows to drop from the App Store catalog (repeatable)
        #[arg(long = "store-exclude-row")]
        store_exclude_rows: Vec<usize>,

        /// Show only the top N table entries per market
        #[arg(short, long)]
        top: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/app_market_profiler.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("app_market_profiler.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explore { source, start, end } => {
            let dataset = load_dataset(&source).await?;
            explore(&dataset, start, end);
        }
        Commands::Analyze {
            source,
            market,
            exclude_rows,
            drop_ragged,
            top,
            category,
            clean_output,
            report,
        } => {
            let dataset = load_dataset(&source).await?;

            let mut config = market.config();
            config
                .exclusions
                .extend(exclude_rows.into_iter().map(ExclusionRule::Row));
            if drop_ragged {
                config
                    .exclusions
                    .push(ExclusionRule::WidthNot(dataset.header.len()));
            }

            let (records, market_report) = profile_market(&config, dataset.records)?;

            log_table("category share (%)", &market_report.category_share, top);
            log_table("average popularity", &market_report.avg_popularity, top);

            if let Some(category) = category {
                let listing = category_listing(&records, &config.mapping, &category)?;
                info!(category = %category, apps = listing.len(), "Category listing");
                for (name, popularity) in &listing {
                    info!("{} : {}", name, popularity);
                }
            }

            if let Some(path) = clean_output {
                write_clean_csv(&path, &dataset.header, &records)?;
                info!(path, rows = records.len(), "Cleaned records written");
            }

            match report {
                Some(path) => {
                    write_report_json(&path, &market_report)?;
                    info!(path, "Report written");
                }
                None => print_report_json(&market_report)?,
            }
        }
        Commands::Compare {
            play_source,
            store_source,
            play_exclude_rows,
            store_exclude_rows,
            top,
        } => {
            let play = load_dataset(&play_source).await?;
            let store = load_dataset(&store_source).await?;

            let mut play_config = MarketConfig::google_play();
            play_config
                .exclusions
                .extend(play_exclude_rows.into_iter().map(ExclusionRule::Row));

            let mut store_config = MarketConfig::app_store();
            store_config
                .exclusions
                .extend(store_exclude_rows.into_iter().map(ExclusionRule::Row));

            // The two markets share no state; each runs independently.
            let (_, play_report) = profile_market(&play_config, play.records)?;
            let (_, store_report) = profile_market(&store_config, store.records)?;

            info!(market = %play_report.market, "Market report");
            log_table("category share (%)", &play_report.category_share, top);
            log_table("average popularity", &play_report.avg_popularity, top);

            info!(market = %store_report.market, "Market report");
            log_table("category share (%)", &store_report.category_share, top);
            log_table("average popularity", &store_report.avg_popularity, top);
        }
    }

    Ok(())
}

/// Loads a catalog from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn load_dataset(source: &String) -> Result<Dataset> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source)?
    };
    parse_dataset(&bytes)
}

/// Prints a slice of the dataset plus its dimensions.
fn explore(dataset: &Dataset, start: usize, end: usize) {
    info!("{:?}", dataset.header);

    for record in dataset.records.iter().take(end).skip(start) {
        info!("{:?}", record);
    }

    info!(
        rows = dataset.records.len(),
        columns = dataset.header.len(),
        "Dataset dimensions"
    );
}
