//! `hoopnet metrics`: ranked per-player influence table.

use std::io::{self, Write};

use clap::Args;
use hoopnet_core::timing::StageTimer;
use hoopnet_metrics::PlayerMetrics;
use serde::Serialize;

use super::{RunContext, Source, column_width};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `hoopnet metrics`.
#[derive(Args, Debug, Default)]
pub struct MetricsArgs {
    /// Show only the first N rows.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Report payload for `hoopnet metrics`.
#[derive(Debug, Serialize)]
pub struct MetricsReport<'a> {
    #[serde(flatten)]
    pub source: Source<'a>,
    pub players: &'a [PlayerMetrics],
    pub pagerank_iterations: usize,
    pub content_hash: &'a str,
    #[serde(skip)]
    pub title: String,
}

/// Execute `hoopnet metrics`.
pub fn run_metrics(
    args: &MetricsArgs,
    ctx: &RunContext,
    output: OutputMode,
    timer: &mut StageTimer,
) -> anyhow::Result<()> {
    let analysis = ctx.analyze(timer)?;
    let rows = analysis.table.rows();
    let shown = args.top.map_or(rows, |n| &rows[..n.min(rows.len())]);

    let report = MetricsReport {
        source: Source::from(&ctx.dataset),
        players: shown,
        pagerank_iterations: analysis.pagerank_iterations,
        content_hash: &analysis.graph.content_hash,
        title: ctx.title(),
    };

    render_mode(output, &report, render_metrics_text, render_metrics_pretty)
}

fn render_metrics_text(report: &MetricsReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "player\tout_strength_ast\tin_strength_ast\tpagerank_ast\tbetweenness_ast"
    )?;
    for row in report.players {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            row.player,
            row.out_strength,
            row.in_strength,
            fmt_score(row.pagerank),
            fmt_score(row.betweenness)
        )?;
    }
    Ok(())
}

fn render_metrics_pretty(report: &MetricsReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Assist metrics: {}", report.title))?;
    if report.players.is_empty() {
        writeln!(w, "no players")?;
        return Ok(());
    }

    let name_w = column_width(report.players.iter().map(|r| r.player.as_str()), 6);
    writeln!(
        w,
        "{:>3}  {:<name_w$}  {:>4}  {:>4}  {:>9}  {:>11}",
        "#", "player", "out", "in", "pagerank", "betweenness"
    )?;
    for (i, row) in report.players.iter().enumerate() {
        writeln!(
            w,
            "{:>3}  {:<name_w$}  {:>4}  {:>4}  {:>9.4}  {:>11.4}",
            i + 1,
            row.player,
            row.out_strength,
            row.in_strength,
            row.pagerank,
            row.betweenness
        )?;
    }
    writeln!(w)?;
    pretty_kv(w, "pagerank", format!("converged in {} iterations", report.pagerank_iterations))?;
    pretty_kv(w, "input", report.content_hash)
}
