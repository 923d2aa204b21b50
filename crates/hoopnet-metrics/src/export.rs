//! CSV sinks for the derived tables.
//!
//! Both writers are generic over [`std::io::Write`]; the binary points them
//! at files, tests at byte buffers. The edge list itself is written by
//! [`hoopnet_core::csv_io::write_edges`].

use std::io::Write;

use hoopnet_core::Result;

use crate::graph::WeightMatrix;
use crate::table::{METRICS_HEADERS, MetricsTable};

/// Header of the row-label column in the matrix CSV.
pub const MATRIX_INDEX_HEADER: &str = "from_player";

/// Write the ranked metrics table.
///
/// # Errors
///
/// Returns [`hoopnet_core::Error::Csv`] if writing fails. Callers that own the sink attach its
/// path with `hoopnet_core::Error::on_write`.
pub fn write_metrics<W: Write>(w: W, table: &MetricsTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    if table.is_empty() {
        writer.write_record(METRICS_HEADERS)?;
    }
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the from × to matrix: one header row of receivers, then one row
/// per passer.
///
/// # Errors
///
/// Returns [`hoopnet_core::Error::Csv`] if writing fails. Callers that own the sink attach its
/// path with `hoopnet_core::Error::on_write`.
pub fn write_matrix<W: Write>(w: W, matrix: &WeightMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);

    let mut header = Vec::with_capacity(matrix.targets.len() + 1);
    header.push(MATRIX_INDEX_HEADER.to_string());
    header.extend(matrix.targets.iter().cloned());
    writer.write_record(&header)?;

    for (source, row) in matrix.sources.iter().zip(&matrix.cells) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(source.clone());
        record.extend(row.iter().map(u32::to_string));
        writer.write_record(&record)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
