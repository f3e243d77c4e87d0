//! Output sinks for the collected records: JSON (default) or CSV.

use std::io::Write;

use clap::ValueEnum;
use revstat_core::ReviewRecord;

/// Columns in the order the output contract requires.
const CSV_HEADER: [&str; 3] = ["ASIN", "Number of reviews", "Average score"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Csv,
}

/// Writes the full record collection to `writer` in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails or the writer rejects a write.
pub(crate) fn write_records<W: Write>(
    records: &[ReviewRecord],
    format: OutputFormat,
    writer: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(records, writer),
        OutputFormat::Csv => write_csv(records, writer),
    }
}

/// One JSON array of record objects, terminated by a newline.
fn write_json<W: Write>(records: &[ReviewRecord], mut writer: W) -> anyhow::Result<()> {
    serde_json::to_writer(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// CSV with the fixed header row; absent fields become empty cells.
///
/// The header is written explicitly so an empty run still produces the
/// column row.
fn write_csv<W: Write>(records: &[ReviewRecord], writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
