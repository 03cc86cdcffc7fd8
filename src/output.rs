//! Output formatting and persistence for market reports.
//!
//! Supports sorted table logging, JSON serialization, and writing the
//! cleaned dataset back out as CSV.

use anyhow::Result;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::info;

use crate::analyzers::types::{MarketReport, Record};
use csv::Writer;

/// Sorts table entries for display: percentage descending, ties broken
/// by key in descending lexical order.
pub fn sorted_entries(table: &HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = table
        .iter()
        .map(|(key, value)| (key.clone(), *value))
        .collect();

    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.0.cmp(&a.0))
    });

    entries
}

/// Logs a table in display order, optionally truncated to the top `n`
/// entries.
pub fn log_table(title: &str, table: &HashMap<String, f64>, top: Option<usize>) {
    let entries = sorted_entries(table);
    let shown = top.unwrap_or(entries.len());

    info!(title, total_entries = entries.len(), "Table");
    for (key, value) in entries.iter().take(shown) {
        info!("{} : {:.2}", key, value);
    }
}

/// Logs a market report as pretty-printed JSON.
pub fn print_report_json(report: &MarketReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a market report to a JSON file.
pub fn write_report_json(path: &str, report: &MarketReport) -> Result<()> {
    std::fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}

/// Writes the cleaned records to a CSV file, header first.
pub fn write_clean_csv(path: &str, header: &Record, records: &[Record]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;

    writer.write_record(header)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::Path;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_sorted_entries_by_value_descending() {
        let mut table = HashMap::new();
        table.insert("GAME".to_string(), 58.16);
        table.insert("ENTERTAINMENT".to_string(), 7.88);
        table.insert("PHOTO_AND_VIDEO".to_string(), 4.97);

        let entries = sorted_entries(&table);
        assert_eq!(entries[0].0, "GAME");
        assert_eq!(entries[1].0, "ENTERTAINMENT");
        assert_eq!(entries[2].0, "PHOTO_AND_VIDEO");
    }

    #[test]
    fn test_sorted_entries_ties_by_key_descending() {
        let mut table = HashMap::new();
        table.insert("ALPHA".to_string(), 25.0);
        table.insert("BETA".to_string(), 25.0);
        table.insert("GAMMA".to_string(), 50.0);

        let entries = sorted_entries(&table);
        assert_eq!(entries[0].0, "GAMMA");
        assert_eq!(entries[1].0, "BETA");
        assert_eq!(entries[2].0, "ALPHA");
    }

    #[test]
    fn test_log_table_does_not_panic() {
        let mut table = HashMap::new();
        table.insert("GAME".to_string(), 100.0);
        log_table("category share", &table, Some(5));
    }

    #[test]
    fn test_write_clean_csv_roundtrip() {
        let path = temp_path("app_market_profiler_test_clean.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let header: Record = vec!["App".to_string(), "Installs".to_string()];
        let records = vec![vec!["WhatsApp".to_string(), "1,000,000,000+".to_string()]];

        write_clean_csv(&path, &header, &records).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("App,Installs"));
        assert!(content.contains("WhatsApp"));

        fs::remove_file(&path).unwrap();
    }
}
