//! Per-market pipeline: exclusions, dedupe, filters, aggregates.

use chrono::Utc;
use tracing::{debug, info};

use crate::analyzers::cleaning::{ExclusionRule, apply_exclusions, filter_stable, is_mostly_ascii};
use crate::analyzers::dedupe::dedupe_by_best;
use crate::analyzers::frequency::{average_by_category, frequency_table};
use crate::analyzers::types::{ColumnMapping, MarketReport, Record, StageCounts, field};
use crate::analyzers::utility::normalize_magnitude;
use crate::error::ProfileError;

/// Everything needed to run the pipeline over one market's catalog.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub market: String,
    pub mapping: ColumnMapping,
    /// The literal string this market uses for a zero price.
    pub free_price: String,
    /// Whether popularity values carry `"1,000,000+"` style markers
    /// that must be normalized before parsing.
    pub normalize_popularity: bool,
    pub exclusions: Vec<ExclusionRule>,
}

impl MarketConfig {
    /// Column layout of the Google Play catalog export. Popularity is
    /// the install-count column, which uses `"1,000,000+"` markers.
    pub fn google_play() -> Self {
        MarketConfig {
            market: "google-play".to_string(),
            mapping: ColumnMapping {
                name: 0,
                category: 1,
                rank: 3,
                price: 7,
                popularity: 5,
            },
            free_price: "0".to_string(),
            normalize_popularity: true,
            exclusions: Vec::new(),
        }
    }

    /// Column layout of the App Store catalog export. Install counts
    /// are not published there, so the total rating count stands in as
    /// both the duplicate rank and the popularity proxy.
    pub fn app_store() -> Self {
        MarketConfig {
            market: "app-store".to_string(),
            mapping: ColumnMapping {
                name: 1,
                category: 11,
                rank: 5,
                price: 4,
                popularity: 5,
            },
            free_price: "0".to_string(),
            normalize_popularity: false,
            exclusions: Vec::new(),
        }
    }
}

/// Runs the full cleaning and aggregation pipeline over one market.
///
/// Stage order: caller-supplied exclusions, mapping validation, dedupe
/// by best rank, name heuristic, price filter, then the two aggregate
/// reports. Each stage consumes its input and returns a new record set.
///
/// Returns the cleaned records alongside the [`MarketReport`].
pub fn profile_market(
    config: &MarketConfig,
    records: Vec<Record>,
) -> Result<(Vec<Record>, MarketReport), ProfileError> {
    let raw = records.len();
    let mapping = config.mapping;

    let records = apply_exclusions(records, &config.exclusions);
    let after_exclusions = records.len();
    debug!(
        market = %config.market,
        raw,
        after_exclusions,
        "Applied exclusion rules"
    );

    mapping.validate(&records)?;

    let records = dedupe_by_best(records, mapping.name, mapping.rank)?;
    let after_dedupe = records.len();
    debug!(
        market = %config.market,
        dropped = after_exclusions - after_dedupe,
        "Removed duplicate entries"
    );

    let records = filter_stable(records, |record| {
        record
            .get(mapping.name)
            .is_some_and(|name| is_mostly_ascii(name))
    });
    let after_language = records.len();

    let records = filter_stable(records, |record| {
        record
            .get(mapping.price)
            .is_some_and(|price| *price == config.free_price)
    });
    let after_price = records.len();

    info!(
        market = %config.market,
        raw,
        after_exclusions,
        after_dedupe,
        after_language,
        after_price,
        "Catalog cleaned"
    );

    let category_share = frequency_table(&records, mapping.category)?;

    let normalize = config
        .normalize_popularity
        .then_some(normalize_magnitude as fn(&str) -> String);
    let avg_popularity =
        average_by_category(&records, mapping.category, mapping.popularity, normalize)?;

    let report = MarketReport {
        schema_version: 1,
        market: config.market.clone(),
        generated_at: Utc::now(),
        stages: StageCounts {
            raw,
            after_exclusions,
            after_dedupe,
            after_language,
            after_price,
        },
        category_share,
        avg_popularity,
    };

    Ok((records, report))
}

/// Lists `(name, popularity)` for every cleaned record in one category,
/// in record order. Used to drill into a category after profiling.
pub fn category_listing(
    records: &[Record],
    mapping: &ColumnMapping,
    category: &str,
) -> Result<Vec<(String, String)>, ProfileError> {
    let mut listing = Vec::new();

    for record in records {
        if field(record, mapping.category)? == category {
            listing.push((
                field(record, mapping.name)?.to_string(),
                field(record, mapping.popularity)?.to_string(),
            ));
        }
    }

    Ok(listing)
}
