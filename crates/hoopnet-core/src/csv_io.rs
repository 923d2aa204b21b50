//! CSV ingestion and export of assist edge lists.
//!
//! The wire format is a headed CSV:
//!
//! ```text
//! from_player,to_player,assists
//! Draymond Green,Kevin Durant,4
//! ```
//!
//! Fields are trimmed. Rows are numbered from 1 (the first data row) in
//! [`Error::InvalidEdge`].

use std::io::{Read, Write};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{AssistEdge, EdgeList};

/// Column headers of the edge CSV, in order.
pub const EDGE_HEADERS: [&str; 3] = ["from_player", "to_player", "assists"];

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from_player: String,
    to_player: String,
    // Kept as text so negative or fractional counts become InvalidEdge
    // instead of a generic deserialize failure.
    assists: String,
}

/// Read and validate an edge list from CSV.
///
/// # Errors
///
/// - [`Error::InvalidEdge`] for a row with a missing field, a blank name, or
///   an assist count that is not a positive integer.
/// - [`Error::Csv`] if the underlying reader fails.
pub fn read_edges<R: Read>(rdr: R) -> Result<EdgeList> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut edges = Vec::new();
    for (i, result) in reader.deserialize::<EdgeRecord>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| match e.kind() {
            csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. } => {
                Error::InvalidEdge {
                    row,
                    reason: e.to_string(),
                }
            }
            _ => Error::Csv(e),
        })?;
        let assists = parse_assists(row, &record.assists)?;
        edges.push(AssistEdge::new(record.from_player, record.to_player, assists));
    }

    EdgeList::new(edges)
}

fn parse_assists(row: usize, raw: &str) -> Result<u32> {
    let value: i64 = raw.parse().map_err(|_| Error::InvalidEdge {
        row,
        reason: format!("assists is not an integer: {raw:?}"),
    })?;
    if value <= 0 {
        return Err(Error::InvalidEdge {
            row,
            reason: format!("assists must be positive, got {value}"),
        });
    }
    u32::try_from(value).map_err(|_| Error::InvalidEdge {
        row,
        reason: format!("assists out of range: {value}"),
    })
}

/// Write `edges` as CSV with [`EDGE_HEADERS`], in list order.
///
/// # Errors
///
/// Returns [`Error::Csv`] if writing fails. Callers that own the sink attach its
/// path with [`Error::on_write`].
pub fn write_edges<W: Write>(w: W, edges: &EdgeList) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    for edge in edges {
        writer.serialize(edge)?;
    }
    if edges.is_empty() {
        writer.write_record(EDGE_HEADERS)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_trimmed_rows_in_order() {
        let data = "\
from_player, to_player, assists
A , B, 2
B,A,1
A,C, 1
";
        let list = read_edges(data.as_bytes()).expect("parse");
        assert_eq!(
            list.edges(),
            &[
                AssistEdge::new("A", "B", 2),
                AssistEdge::new("B", "A", 1),
                AssistEdge::new("A", "C", 1),
            ]
        );
    }

    #[test]
    fn negative_count_is_invalid_edge() {
        let data = "from_player,to_player,assists\nA,B,2\nB,A,-1\n";
        match read_edges(data.as_bytes()) {
            Err(Error::InvalidEdge { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("positive"), "{reason}");
            }
            other => panic!("expected InvalidEdge, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_count_is_invalid_edge() {
        let data = "from_player,to_player,assists\nA,B,1.5\n";
        assert!(matches!(
            read_edges(data.as_bytes()),
            Err(Error::InvalidEdge { row: 1, .. })
        ));
    }

    #[test]
    fn short_row_is_invalid_edge() {
        let data = "from_player,to_player,assists\nA,B\n";
        assert!(matches!(
            read_edges(data.as_bytes()),
            Err(Error::InvalidEdge { row: 1, .. })
        ));
    }

    #[test]
    fn zero_count_rejected_by_validation() {
        let data = "from_player,to_player,assists\nA,B,0\n";
        assert!(matches!(
            read_edges(data.as_bytes()),
            Err(Error::InvalidEdge { row: 1, .. })
        ));
    }

    #[test]
    fn writes_header_and_rows() {
        let list = EdgeList::from_triples(&[("A", "B", 2), ("B", "A", 1)]).expect("valid");
        let mut buf = Vec::new();
        write_edges(&mut buf, &list).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "from_player,to_player,assists\nA,B,2\nB,A,1\n");
    }

    #[test]
    fn empty_list_still_writes_header() {
        let mut buf = Vec::new();
        write_edges(&mut buf, &EdgeList::default()).expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "from_player,to_player,assists\n"
        );
    }

    #[test]
    fn names_with_commas_survive_export_and_import() {
        let list = EdgeList::from_triples(&[("Green, D.", "Durant, K.", 4)]).expect("valid");
        let mut buf = Vec::new();
        write_edges(&mut buf, &list).expect("write");
        let back = read_edges(buf.as_slice()).expect("read");
        assert_eq!(back, list);
    }
}
