//! Input datasets: the built-in game and CSV files on disk.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::csv_io::read_edges;
use crate::error::{Error, Result};
use crate::model::EdgeList;

/// Metadata for the game an edge list was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    /// ESPN game identifier.
    pub game_id: u64,
    pub date: NaiveDate,
    /// Abbreviation of the team whose assists were extracted.
    pub team: String,
    pub opponent: String,
}

impl GameInfo {
    /// Artifact label, e.g. `2017-10-17_GSW`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}_{}", self.date.format("%Y-%m-%d"), self.team)
    }

    /// Human title, e.g. `GSW vs HOU (2017-10-17)`.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "{} vs {} ({})",
            self.team,
            self.opponent,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// A validated edge list plus the label used for its artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub label: String,
    pub game: Option<GameInfo>,
    pub edges: EdgeList,
}

impl Dataset {
    /// Load a dataset from a `from_player,to_player,assists` CSV file.
    ///
    /// The label is the file stem.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be opened, otherwise any error from
    /// [`read_edges`].
    #[instrument]
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let edges = read_edges(file)?;
        let label = path
            .file_stem()
            .map_or_else(|| "assists".to_string(), |s| s.to_string_lossy().into_owned());
        debug!(edges = edges.len(), %label, "loaded edge list");
        Ok(Self {
            label,
            game: None,
            edges,
        })
    }
}

/// Assists extracted from the ESPN play-by-play of Houston Rockets at
/// Golden State Warriors, 2017-10-17 (game 400974438). Only passes that
/// became assists are counted.
const WARRIORS_ROCKETS_2017: [(&str, &str, u32); 24] = [
    ("Draymond Green", "Klay Thompson", 2),
    ("Kevin Durant", "Klay Thompson", 2),
    ("Kevin Durant", "Stephen Curry", 1),
    ("Draymond Green", "Zaza Pachulia", 1),
    ("Draymond Green", "Patrick McCaw", 1),
    ("Patrick McCaw", "Jordan Bell", 1),
    ("Draymond Green", "Nick Young", 2),
    ("Jordan Bell", "Nick Young", 1),
    ("Shaun Livingston", "Nick Young", 2),
    ("Shaun Livingston", "Kevin Durant", 1),
    ("Stephen Curry", "Kevin Durant", 1),
    ("Draymond Green", "Kevin Durant", 4),
    ("Klay Thompson", "Draymond Green", 1),
    ("Kevin Durant", "Draymond Green", 1),
    ("Draymond Green", "Shaun Livingston", 1),
    ("Draymond Green", "Stephen Curry", 1),
    ("Stephen Curry", "Zaza Pachulia", 1),
    ("Stephen Curry", "Nick Young", 1),
    ("Shaun Livingston", "David West", 1),
    ("Stephen Curry", "Klay Thompson", 1),
    ("Klay Thompson", "Stephen Curry", 2),
    ("Kevin Durant", "Jordan Bell", 2),
    ("Kevin Durant", "Patrick McCaw", 1),
    ("Draymond Green", "Jordan Bell", 1),
];

/// The built-in dataset: Warriors assists vs the Rockets, 2017-10-17.
///
/// # Errors
///
/// Never fails in practice; the literal edges are validated like any input.
pub fn warriors_rockets_2017() -> Result<Dataset> {
    let game = GameInfo {
        game_id: 400_974_438,
        date: NaiveDate::from_ymd_opt(2017, 10, 17).unwrap_or_default(),
        team: "GSW".to_string(),
        opponent: "HOU".to_string(),
    };
    Ok(Dataset {
        label: game.label(),
        game: Some(game),
        edges: EdgeList::from_triples(&WARRIORS_ROCKETS_2017)?,
    })
}
