//! Command handlers and the state they share.

pub mod completions;
pub mod edges;
pub mod export;
pub mod matrix;
pub mod metrics;

use std::path::Path;

use anyhow::Context as _;
use hoopnet_core::config::HoopnetConfig;
use hoopnet_core::dataset::{Dataset, warriors_rockets_2017};
use hoopnet_core::timing::StageTimer;
use hoopnet_metrics::{Analysis, PageRankConfig, analyze};
use serde::Serialize;
use tracing::info;

/// Resolved input and configuration for one invocation.
#[derive(Debug)]
pub struct RunContext {
    pub dataset: Dataset,
    pub config: HoopnetConfig,
}

impl RunContext {
    /// Load the CSV at `input`, or the built-in game when `None`.
    pub fn load(
        input: Option<&Path>,
        config: HoopnetConfig,
        timer: &mut StageTimer,
    ) -> anyhow::Result<Self> {
        let dataset = timer.time("load", || match input {
            Some(path) => Dataset::from_csv_path(path)
                .with_context(|| format!("failed to load edge list from {}", path.display())),
            None => warriors_rockets_2017().context("failed to load the built-in dataset"),
        })?;
        info!(label = %dataset.label, edges = dataset.edges.len(), "dataset loaded");
        Ok(Self { dataset, config })
    }

    /// Run the metrics pipeline, folding its stage timings into `timer`.
    pub fn analyze(&self, timer: &mut StageTimer) -> anyhow::Result<Analysis> {
        let pagerank = PageRankConfig::from(&self.config.pagerank);
        let analysis = analyze(&self.dataset.edges, &pagerank)
            .with_context(|| format!("failed to analyze {}", self.dataset.label))?;
        timer.extend(&analysis.timings);
        Ok(analysis)
    }

    /// Human title for headings and images.
    pub fn title(&self) -> String {
        self.dataset
            .game
            .as_ref()
            .map_or_else(|| self.dataset.label.clone(), hoopnet_core::GameInfo::title)
    }
}

/// Dataset identity included in every JSON payload.
#[derive(Debug, Serialize)]
pub struct Source<'a> {
    pub label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<&'a hoopnet_core::GameInfo>,
}

impl<'a> From<&'a Dataset> for Source<'a> {
    fn from(ds: &'a Dataset) -> Self {
        Self {
            label: &ds.label,
            game: ds.game.as_ref(),
        }
    }
}

/// Width of the widest of `names`, at least `min`.
pub fn column_width<'a>(names: impl IntoIterator<Item = &'a str>, min: usize) -> usize {
    names
        .into_iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_context_has_game_title() {
        let mut timer = StageTimer::new();
        let ctx = RunContext::load(None, HoopnetConfig::default(), &mut timer).expect("load");
        assert_eq!(ctx.title(), "GSW vs HOU (2017-10-17)");
        assert_eq!(timer.stages()[0].name, "load");
    }

    #[test]
    fn analyze_folds_pipeline_stages_into_timer() {
        let mut timer = StageTimer::new();
        let ctx = RunContext::load(None, HoopnetConfig::default(), &mut timer).expect("load");
        let analysis = ctx.analyze(&mut timer).expect("analyze");
        assert_eq!(analysis.table.len(), 10);
        let names: Vec<&str> = timer.stages().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"load"));
        assert_eq!(names.last(), Some(&"matrix"));
    }

    #[test]
    fn missing_input_has_path_in_message() {
        let mut timer = StageTimer::new();
        let err = RunContext::load(
            Some(Path::new("/definitely/not/here.csv")),
            HoopnetConfig::default(),
            &mut timer,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.csv"));
    }

    #[test]
    fn column_width_respects_minimum() {
        assert_eq!(column_width(["ab", "abcd"], 2), 4);
        assert_eq!(column_width(["ab"], 6), 6);
        assert_eq!(column_width([], 3), 3);
    }
}
