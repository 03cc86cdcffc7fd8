//! CSV parser for catalog exports.

use anyhow::{Result, bail};

use crate::analyzers::types::Record;

/// A parsed catalog: the header row plus the data rows.
///
/// The header is kept as metadata only; the pipeline interprets rows
/// through a column mapping, never through header names.
#[derive(Debug)]
pub struct Dataset {
    pub header: Record,
    pub records: Vec<Record>,
}

/// Parses CSV bytes into a [`Dataset`].
///
/// The reader is flexible about field counts, so ragged rows load
/// intact and the caller's exclusion rules decide what to do with them.
///
/// # Errors
///
/// Returns an error if the bytes are not valid CSV or contain no
/// header row.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = reader.records();

    let header: Record = match rows.next() {
        Some(row) => row?.iter().map(str::to_string).collect(),
        None => bail!("dataset contains no header row"),
    };

    let mut records = Vec::new();
    for row in rows {
        records.push(row?.iter().map(str::to_string).collect());
    }

    Ok(Dataset { header, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let csv = b"App,Category,Price\nInstagram,SOCIAL,0\nMinecraft,GAME,6.99\n";
        let dataset = parse_dataset(csv).unwrap();

        assert_eq!(dataset.header, vec!["App", "Category", "Price"]);
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0][0], "Instagram");
    }

    #[test]
    fn test_parse_quoted_fields() {
        let csv = b"App,Installs\nWhatsApp,\"1,000,000,000+\"\n";
        let dataset = parse_dataset(csv).unwrap();

        assert_eq!(dataset.records[0][1], "1,000,000,000+");
    }

    #[test]
    fn test_parse_keeps_ragged_rows() {
        let csv = b"a,b,c\n1,2,3\nshort,row\n4,5,6\n";
        let dataset = parse_dataset(csv).unwrap();

        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.records[1].len(), 2);
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(parse_dataset(b"").is_err());
    }
}
