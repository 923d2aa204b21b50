//! `hoopnet edges`: the validated edge list.

use std::io::{self, Write};

use clap::Args;
use hoopnet_core::AssistEdge;
use serde::Serialize;
use tracing::warn;

use super::{RunContext, Source, column_width};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `hoopnet edges`.
#[derive(Args, Debug, Default)]
pub struct EdgesArgs {}

#[derive(Debug, Serialize)]
pub struct EdgesReport<'a> {
    #[serde(flatten)]
    pub source: Source<'a>,
    pub edges: &'a [AssistEdge],
    pub players: usize,
    pub total_assists: u64,
    #[serde(skip)]
    pub title: String,
}

/// Execute `hoopnet edges`.
pub fn run_edges(_args: &EdgesArgs, ctx: &RunContext, output: OutputMode) -> anyhow::Result<()> {
    let edges = &ctx.dataset.edges;
    for (from, to) in edges.duplicate_pairs() {
        warn!(%from, %to, "pair appears more than once; analysis keeps the last row");
    }

    let report = EdgesReport {
        source: Source::from(&ctx.dataset),
        edges: edges.edges(),
        players: edges.players().len(),
        total_assists: edges.total_assists(),
        title: ctx.title(),
    };
    render_mode(output, &report, render_edges_text, render_edges_pretty)
}

fn render_edges_text(report: &EdgesReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "from_player\tto_player\tassists")?;
    for e in report.edges {
        writeln!(w, "{}\t{}\t{}", e.from_player, e.to_player, e.assists)?;
    }
    Ok(())
}

fn render_edges_pretty(report: &EdgesReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Assist edges: {}", report.title))?;
    let from_w = column_width(report.edges.iter().map(|e| e.from_player.as_str()), 4);
    let to_w = column_width(report.edges.iter().map(|e| e.to_player.as_str()), 2);
    for e in report.edges {
        writeln!(
            w,
            "{:<from_w$} -> {:<to_w$}  {:>3}",
            e.from_player, e.to_player, e.assists
        )?;
    }
    writeln!(w)?;
    pretty_kv(w, "pairs", report.edges.len().to_string())?;
    pretty_kv(w, "players", report.players.to_string())?;
    pretty_kv(w, "assists", report.total_assists.to_string())
}
