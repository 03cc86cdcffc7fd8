use app_market_profiler::analyzers::cleaning::ExclusionRule;
use app_market_profiler::analyzers::profiler::{MarketConfig, profile_market};
use app_market_profiler::error::ProfileError;
use app_market_profiler::loader::parse_dataset;
use app_market_profiler::output::sorted_entries;

// The fixture mimics the Google Play export: one duplicated app, one
// mostly-non-ASCII name, one paid app, and one ragged row (index 5)
// that is missing its category field.
fn fixture() -> app_market_profiler::loader::Dataset {
    let bytes = include_bytes!("fixtures/sample_playstore.csv");
    parse_dataset(bytes).expect("Failed to parse fixture")
}

#[test]
fn test_full_pipeline() {
    let dataset = fixture();
    assert_eq!(dataset.records.len(), 8);

    let mut config = MarketConfig::google_play();
    config.exclusions.push(ExclusionRule::Row(5));

    let (records, report) = profile_market(&config, dataset.records).unwrap();

    assert_eq!(report.stages.raw, 8);
    assert_eq!(report.stages.after_exclusions, 7);
    assert_eq!(report.stages.after_dedupe, 6);
    assert_eq!(report.stages.after_language, 5);
    assert_eq!(report.stages.after_price, 4);
    assert_eq!(records.len(), 4);

    // The duplicate with the higher review count survives.
    let instagram: Vec<_> = records.iter().filter(|r| r[0] == "Instagram").collect();
    assert_eq!(instagram.len(), 1);
    assert_eq!(instagram[0][3], "66577446");

    // A name with a single emoji is still allowed.
    assert!(records.iter().any(|r| r[0] == "Instachat 😜"));

    let share_sum: f64 = report.category_share.values().sum();
    assert!((share_sum - 100.0).abs() < 1e-9);
    assert_eq!(report.category_share["SOCIAL"], 75.0);
    assert_eq!(report.category_share["GAME"], 25.0);

    // Install markers are normalized to their literal floor.
    assert_eq!(report.avg_popularity["GAME"], 10_000.0);
}

#[test]
fn test_ragged_row_fails_without_exclusion() {
    let dataset = fixture();
    let config = MarketConfig::google_play();

    // Row 5 has 7 fields, so the price column (index 7) is unmapped.
    let err = profile_market(&config, dataset.records).unwrap_err();
    assert!(matches!(err, ProfileError::UnmappedColumn { index: 7, .. }));
}

#[test]
fn test_width_rule_drops_the_ragged_row() {
    let dataset = fixture();

    let mut config = MarketConfig::google_play();
    config
        .exclusions
        .push(ExclusionRule::WidthNot(dataset.header.len()));

    let (_, report) = profile_market(&config, dataset.records).unwrap();
    assert_eq!(report.stages.after_exclusions, 7);
}

#[test]
fn test_display_order_of_category_share() {
    let dataset = fixture();

    let mut config = MarketConfig::google_play();
    config.exclusions.push(ExclusionRule::Row(5));

    let (_, report) = profile_market(&config, dataset.records).unwrap();
    let entries = sorted_entries(&report.category_share);

    assert_eq!(entries[0].0, "SOCIAL");
    assert_eq!(entries[1].0, "GAME");
}
