//! Ingestion properties: whatever validates must survive a CSV round trip,
//! and anything with a non-positive count must be rejected.

use proptest::prelude::*;

use hoopnet_core::csv_io::{read_edges, write_edges};
use hoopnet_core::{AssistEdge, EdgeList, Error};

fn player_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Draymond Green",
        "Kevin Durant",
        "Klay Thompson",
        "Stephen Curry",
        "O'Neal, Shaquille",
        "Nick \"Swaggy P\" Young",
    ])
    .prop_map(str::to_string)
}

fn edge() -> impl Strategy<Value = AssistEdge> {
    (player_name(), player_name(), 1u32..50).prop_map(|(a, b, n)| AssistEdge::new(a, b, n))
}

proptest! {
    #[test]
    fn valid_lists_round_trip_through_csv(edges in prop::collection::vec(edge(), 0..30)) {
        let list = EdgeList::new(edges).expect("generated edges are valid");
        let mut buf = Vec::new();
        write_edges(&mut buf, &list).expect("write");
        let back = read_edges(buf.as_slice()).expect("read");
        prop_assert_eq!(back, list);
    }

    #[test]
    fn non_positive_counts_are_rejected(
        prefix in prop::collection::vec(edge(), 0..5),
        bad in -20i64..=0,
    ) {
        let mut text = String::from("from_player,to_player,assists\n");
        for e in &prefix {
            text.push_str(&format!("A,B,{}\n", e.assists));
        }
        text.push_str(&format!("A,B,{bad}\n"));

        let err = read_edges(text.as_bytes()).unwrap_err();
        match err {
            Error::InvalidEdge { row, .. } => prop_assert_eq!(row, prefix.len() + 1),
            other => prop_assert!(false, "unexpected error {other}"),
        }
    }
}

#[test]
fn total_assists_matches_sum_of_rows() {
    let data = "from_player,to_player,assists\nA,B,2\nB,A,1\nA,C,1\n";
    let list = read_edges(data.as_bytes()).expect("parse");
    assert_eq!(list.total_assists(), 4);
    assert_eq!(list.players(), vec!["A", "B", "C"]);
}
