//! Assist edges and the validated edge list.
//!
//! An [`AssistEdge`] `A → B` with `assists = w` records that player A
//! assisted player B on `w` made baskets. An [`EdgeList`] is the ordered,
//! validated input to the metrics pipeline: every name is non-blank and
//! every count is positive. Validation happens once, here, so downstream
//! code never re-checks.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One aggregated passer → receiver assist count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssistEdge {
    pub from_player: String,
    pub to_player: String,
    pub assists: u32,
}

impl AssistEdge {
    pub fn new(from_player: impl Into<String>, to_player: impl Into<String>, assists: u32) -> Self {
        Self {
            from_player: from_player.into(),
            to_player: to_player.into(),
            assists,
        }
    }
}

/// Ordered list of validated assist edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EdgeList {
    edges: Vec<AssistEdge>,
}

impl EdgeList {
    /// Validate and wrap `edges`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdge`] (1-based row) for a blank player name
    /// or a zero assist count.
    pub fn new(edges: Vec<AssistEdge>) -> Result<Self> {
        for (i, edge) in edges.iter().enumerate() {
            validate_edge(i + 1, edge)?;
        }
        Ok(Self { edges })
    }

    /// Convenience constructor from `(from, to, assists)` triples.
    ///
    /// # Errors
    ///
    /// Same as [`EdgeList::new`].
    pub fn from_triples(triples: &[(&str, &str, u32)]) -> Result<Self> {
        Self::new(
            triples
                .iter()
                .map(|(from, to, n)| AssistEdge::new(*from, *to, *n))
                .collect(),
        )
    }

    #[must_use]
    pub fn edges(&self) -> &[AssistEdge] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssistEdge> {
        self.edges.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Union of all endpoint names, sorted.
    #[must_use]
    pub fn players(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .edges
            .iter()
            .flat_map(|e| [e.from_player.as_str(), e.to_player.as_str()])
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Sum of all assist counts.
    #[must_use]
    pub fn total_assists(&self) -> u64 {
        self.edges.iter().map(|e| u64::from(e.assists)).sum()
    }

    /// Ordered pairs that appear more than once, in first-repeat order.
    #[must_use]
    pub fn duplicate_pairs(&self) -> Vec<(String, String)> {
        let mut seen: HashMap<(&str, &str), usize> = HashMap::new();
        let mut dups = Vec::new();
        for e in &self.edges {
            let count = seen
                .entry((e.from_player.as_str(), e.to_player.as_str()))
                .or_insert(0);
            *count += 1;
            if *count == 2 {
                dups.push((e.from_player.clone(), e.to_player.clone()));
            }
        }
        dups
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a AssistEdge;
    type IntoIter = std::slice::Iter<'a, AssistEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

fn validate_edge(row: usize, edge: &AssistEdge) -> Result<()> {
    if edge.from_player.trim().is_empty() {
        return Err(Error::InvalidEdge {
            row,
            reason: "from_player is empty".to_string(),
        });
    }
    if edge.to_player.trim().is_empty() {
        return Err(Error::InvalidEdge {
            row,
            reason: "to_player is empty".to_string(),
        });
    }
    if edge.assists == 0 {
        return Err(Error::InvalidEdge {
            row,
            reason: format!(
                "assists must be positive ({} -> {})",
                edge.from_player, edge.to_player
            ),
        });
    }
    Ok(())
}
