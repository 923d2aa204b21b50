#![no_main]

use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must either parse into a valid edge list or fail with a
// typed error. Accepted lists never contain a zero count or a blank name.
fuzz_target!(|data: &[u8]| {
    if let Ok(edges) = hoopnet_core::csv_io::read_edges(data) {
        for edge in edges.edges() {
            assert!(edge.assists > 0);
            assert!(!edge.from_player.trim().is_empty());
            assert!(!edge.to_player.trim().is_empty());
        }
    }
});
