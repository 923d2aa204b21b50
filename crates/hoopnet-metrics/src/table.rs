//! Ranked per-player metrics table.
//!
//! Rows start in alphabetical order and are then stably sorted by
//! out-strength descending, then in-strength descending. Players tied on
//! both stay alphabetical.

use std::collections::HashMap;

use serde::Serialize;

use crate::metrics::strength::Strengths;

/// All four scores for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMetrics {
    pub player: String,
    #[serde(rename = "out_strength_ast")]
    pub out_strength: u64,
    #[serde(rename = "in_strength_ast")]
    pub in_strength: u64,
    #[serde(rename = "pagerank_ast")]
    pub pagerank: f64,
    #[serde(rename = "betweenness_ast")]
    pub betweenness: f64,
}

/// Column headers used for CSV export and text output.
pub const METRICS_HEADERS: [&str; 5] = [
    "player",
    "out_strength_ast",
    "in_strength_ast",
    "pagerank_ast",
    "betweenness_ast",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsTable {
    rows: Vec<PlayerMetrics>,
}

impl MetricsTable {
    /// Join the per-metric maps into one ranked row per player.
    ///
    /// Players missing from a map get 0 for that metric.
    #[must_use]
    pub fn assemble(
        players: &[String],
        strengths: &Strengths,
        pagerank: &HashMap<String, f64>,
        betweenness: &HashMap<String, f64>,
    ) -> Self {
        let mut sorted: Vec<&String> = players.iter().collect();
        sorted.sort();
        sorted.dedup();

        let rows = sorted
            .into_iter()
            .map(|p| PlayerMetrics {
                player: p.clone(),
                out_strength: strengths.out_of(p),
                in_strength: strengths.in_of(p),
                pagerank: pagerank.get(p).copied().unwrap_or(0.0),
                betweenness: betweenness.get(p).copied().unwrap_or(0.0),
            })
            .collect();

        let mut table = Self { rows };
        table.rank();
        table
    }

    fn rank(&mut self) {
        self.rows.sort_by(|a, b| {
            b.out_strength
                .cmp(&a.out_strength)
                .then_with(|| b.in_strength.cmp(&a.in_strength))
        });
    }

    #[must_use]
    pub fn rows(&self) -> &[PlayerMetrics] {
        &self.rows
    }

    /// Row for `player`, if present.
    #[must_use]
    pub fn get(&self, player: &str) -> Option<&PlayerMetrics> {
        self.rows.iter().find(|r| r.player == player)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether rows are non-increasing by out-strength, then in-strength.
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.rows.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            a.out_strength > b.out_strength
                || (a.out_strength == b.out_strength && a.in_strength >= b.in_strength)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strengths(rows: &[(&str, u64, u64)]) -> Strengths {
        Strengths {
            out_strength: rows.iter().map(|(p, o, _)| ((*p).to_string(), *o)).collect(),
            in_strength: rows.iter().map(|(p, _, i)| ((*p).to_string(), *i)).collect(),
        }
    }

    fn names(table: &MetricsTable) -> Vec<&str> {
        table.rows().iter().map(|r| r.player.as_str()).collect()
    }

    #[test]
    fn sorted_by_out_then_in() {
        let s = strengths(&[("A", 3, 1), ("B", 1, 2), ("C", 0, 1), ("D", 1, 5)]);
        let players: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();
        let table = MetricsTable::assemble(&players, &s, &HashMap::new(), &HashMap::new());
        assert_eq!(names(&table), vec!["A", "D", "B", "C"]);
        assert!(table.is_ranked());
    }

    #[test]
    fn full_ties_stay_alphabetical() {
        let s = strengths(&[("Zed", 1, 1), ("Amy", 1, 1), ("Bo", 1, 1)]);
        let players: Vec<String> = ["Zed", "Amy", "Bo"].map(String::from).to_vec();
        let table = MetricsTable::assemble(&players, &s, &HashMap::new(), &HashMap::new());
        assert_eq!(names(&table), vec!["Amy", "Bo", "Zed"]);
    }

    #[test]
    fn missing_scores_default_to_zero() {
        let s = strengths(&[("A", 1, 0)]);
        let players = vec!["A".to_string(), "B".to_string()];
        let pr: HashMap<String, f64> = [("A".to_string(), 0.7)].into_iter().collect();
        let table = MetricsTable::assemble(&players, &s, &pr, &HashMap::new());

        let b = table.get("B").expect("B row");
        assert_eq!(b.out_strength, 0);
        assert_eq!(b.in_strength, 0);
        assert!(b.pagerank.abs() < f64::EPSILON);
        assert!(b.betweenness.abs() < f64::EPSILON);
        assert!((table.get("A").expect("A row").pagerank - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn duplicate_player_names_collapse() {
        let s = strengths(&[("A", 1, 0)]);
        let players = vec!["A".to_string(), "A".to_string()];
        let table = MetricsTable::assemble(&players, &s, &HashMap::new(), &HashMap::new());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn serializes_with_export_column_names() {
        let s = strengths(&[("A", 2, 1)]);
        let table =
            MetricsTable::assemble(&["A".to_string()], &s, &HashMap::new(), &HashMap::new());
        let row = &table.rows()[0];
        let mut w = csv::Writer::from_writer(Vec::new());
        w.serialize(row).expect("serialize");
        let text = String::from_utf8(w.into_inner().expect("flush")).expect("utf8");
        let header = text.lines().next().unwrap_or_default();
        assert_eq!(header, METRICS_HEADERS.join(","));
    }
}
