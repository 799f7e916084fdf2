// ==========================================
// IWS BDE Plattform - CSV payload parsing
// ==========================================
// Turns an inbound CSV text payload into header-keyed raw records.
// Columns are matched by header name, not position.
// ==========================================

use crate::importer::error::ImportResult;
use csv::ReaderBuilder;
use std::collections::HashMap;

/// A raw record: column name -> trimmed cell text
pub type RawRecord = HashMap<String, String>;

pub struct CsvParser;

impl CsvParser {
    /// Parse CSV text into raw records.
    ///
    /// A leading UTF-8 byte-order marker is stripped, headers and cells are
    /// trimmed, rows whose cells are all empty are skipped.
    pub fn parse_str(&self, text: &str) -> ImportResult<Vec<RawRecord>> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged rows
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_payload() {
        let parser = CsvParser;
        let records = parser
            .parse_str("code,name,location\nM-01,Drehbank,Halle A\nM-02,Fräse,Halle B\n")
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("code"), Some(&"M-01".to_string()));
        assert_eq!(records[1].get("location"), Some(&"Halle B".to_string()));
    }

    #[test]
    fn test_parse_strips_bom_and_whitespace() {
        let parser = CsvParser;
        let records = parser
            .parse_str("\u{feff}code, name\n M-01 , Drehbank \n")
            .unwrap();

        assert_eq!(records[0].get("code"), Some(&"M-01".to_string()));
        assert_eq!(records[0].get("name"), Some(&"Drehbank".to_string()));
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let parser = CsvParser;
        let records = parser
            .parse_str("code,name\nM-01,Drehbank\n,\nM-02,Fräse\n")
            .unwrap();

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_headers_are_order_independent() {
        let parser = CsvParser;
        let records = parser.parse_str("name,code\nDrehbank,M-01\n").unwrap();

        assert_eq!(records[0].get("code"), Some(&"M-01".to_string()));
    }
}
