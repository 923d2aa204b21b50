#![no_main]

use hoopnet_core::EdgeList;
use hoopnet_metrics::{PageRankConfig, analyze};
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

// Each 3-byte chunk is one (from, to, assists) triple over a small roster.
fuzz_target!(|data: &[u8]| {
    let triples: Vec<(&str, &str, u32)> = data
        .chunks_exact(3)
        .map(|c| {
            (
                NAMES[usize::from(c[0]) % NAMES.len()],
                NAMES[usize::from(c[1]) % NAMES.len()],
                u32::from(c[2]) + 1,
            )
        })
        .collect();
    let Ok(edges) = EdgeList::from_triples(&triples) else {
        return;
    };
    let Ok(analysis) = analyze(&edges, &PageRankConfig::default()) else {
        return;
    };

    let total: f64 = analysis.table.rows().iter().map(|r| r.pagerank).sum();
    assert!(analysis.table.is_empty() || (total - 1.0).abs() < 1e-6);
    for row in analysis.table.rows() {
        assert!((0.0..=1.0 + 1e-9).contains(&row.betweenness));
    }
});
