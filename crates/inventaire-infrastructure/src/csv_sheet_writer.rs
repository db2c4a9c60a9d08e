//! CSV codec for the export sheet.
//!
//! The core only produces the tabular shape (columns + string rows); any
//! spreadsheet library can encode it. This is the in-tree codec, writing
//! the sheet as CSV to any `io::Write`.

use inventaire_core::export::ExportSheet;
use inventaire_core::{InventaireError, Result};
use std::io::Write;

/// Writes the sheet (header row first, then data rows) as CSV.
pub fn write_sheet<W: Write>(sheet: &ExportSheet, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(&sheet.columns)
        .map_err(csv_error)?;
    for row in &sheet.rows {
        csv_writer.write_record(row).map_err(csv_error)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn csv_error(err: csv::Error) -> InventaireError {
    InventaireError::Serialization {
        format: "CSV".to_string(),
        message: err.to_string(),
    }
}
