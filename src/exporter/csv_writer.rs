// ==========================================
// IWS BDE Plattform - CSV rendering helpers
// ==========================================
// Value formatting: absent -> empty field, booleans -> lowercase
// true/false, dates and timestamps -> ISO 8601, everything else its
// natural text form.
// ==========================================

use crate::exporter::ExportResult;
use chrono::{NaiveDate, NaiveDateTime};
use csv::WriterBuilder;

pub fn format_bool(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

pub fn format_opt_text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

pub fn format_opt_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn format_opt_float(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn format_opt_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

pub fn format_opt_datetime(value: Option<NaiveDateTime>) -> String {
    value.map(format_datetime).unwrap_or_default()
}

/// Render a header row plus data rows as one CSV document
pub fn write_csv(header: &[&str], rows: Vec<Vec<String>>) -> ExportResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::exporter::ExportError::CsvWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::exporter::ExportError::CsvWriteError(e.to_string()))
}
