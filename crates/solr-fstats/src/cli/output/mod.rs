//! Rendering of the coverage report.
//!
//! Every format writes the full report in one pass after it has been assembled, so a failed run
//! never leaves partial rows on stdout.

use std::io::{self, Write};

use comfy_table::{CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use fstats_config::OutputFormat;
use fstats_report::{COLUMNS, Report};
use serde::Serialize;

/// JSON output for a report.
#[derive(Serialize)]
struct JsonReport<'a> {
    /// Collection the report describes.
    collection: &'a str,
    /// Totals and per-field records.
    #[serde(flatten)]
    report: &'a Report,
}

/// Writes `report` to `out` in the selected format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    collection: &str,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(out, report),
        OutputFormat::Json => write_json(out, report, collection),
        OutputFormat::Table => write_table(out, report),
    }
}

/// Writes a header row and one row per record, every value double-quoted.
fn write_csv<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    write_csv_row(out, COLUMNS)?;
    for record in &report.records {
        write_csv_row(out, record.values())?;
    }
    out.flush()
}

/// Writes one fully quoted CSV row terminated by `\n`.
fn write_csv_row<W, I, S>(out: &mut W, values: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row = values
        .into_iter()
        .map(|value| quote(value.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{row}")
}

/// Wraps a value in double quotes, doubling any embedded quote.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Writes the report as a pretty-printed JSON document.
fn write_json<W: Write>(out: &mut W, report: &Report, collection: &str) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonReport { collection, report })?;
    writeln!(out)?;
    out.flush()
}

/// Writes the report as a terminal table.
fn write_table<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(COLUMNS.to_vec());
    for record in &report.records {
        table.add_row(record.values().to_vec());
    }
    for index in 1..COLUMNS.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    writeln!(out, "{table}")?;
    writeln!(out, "{} documents", report.records_total)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use fstats_report::CoverageRecord;

    use super::*;

    fn report() -> Report {
        Report {
            records_total: 10,
            records: vec![
                CoverageRecord::new("author", 0, 10, 10),
                CoverageRecord::new("id", 10, 0, 10),
                CoverageRecord::new("title", 10, 0, 10),
            ],
        }
    }

    fn render(report: &Report, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_report(&mut out, report, "books", format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn csv_quotes_every_value() {
        let csv = render(&report(), OutputFormat::Csv);

        assert_eq!(
            csv,
            "\"field_name\",\"existing\",\"existing_percentage\",\"notexisting\",\"notexisting_percentage\"\n\
             \"author\",\"0\",\"0.00\",\"10\",\"100.00\"\n\
             \"id\",\"10\",\"100.00\",\"0\",\"0.00\"\n\
             \"title\",\"10\",\"100.00\",\"0\",\"0.00\"\n"
        );
    }

    #[test]
    fn csv_of_empty_report_is_header_only() {
        let empty = Report {
            records_total: 0,
            records: Vec::new(),
        };

        let csv = render(&empty, OutputFormat::Csv);

        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("\"field_name\""));
    }

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_includes_collection_and_records() {
        let json = render(&report(), OutputFormat::Json);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["collection"], "books");
        assert_eq!(value["records_total"], 10);
        assert_eq!(value["fields"].as_array().unwrap().len(), 3);
        assert_eq!(value["fields"][0]["notexisting_percentage"], "100.00");
    }

    #[test]
    fn table_lists_every_field() {
        let table = render(&report(), OutputFormat::Table);

        for column in COLUMNS {
            assert!(table.contains(column), "missing column {column}");
        }
        assert!(table.contains("author"));
        assert!(table.contains("100.00"));
        assert!(table.trim_end().ends_with("10 documents"));
    }
}
