//! `hoopnet matrix`: from × to assist counts.

use std::io::{self, Write};

use clap::Args;
use hoopnet_core::timing::StageTimer;
use hoopnet_metrics::WeightMatrix;
use serde::Serialize;

use super::{RunContext, Source, column_width};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `hoopnet matrix`.
#[derive(Args, Debug, Default)]
pub struct MatrixArgs {}

#[derive(Debug, Serialize)]
pub struct MatrixReport<'a> {
    #[serde(flatten)]
    pub source: Source<'a>,
    #[serde(flatten)]
    pub matrix: &'a WeightMatrix,
    #[serde(skip)]
    pub title: String,
}

/// Execute `hoopnet matrix`.
pub fn run_matrix(
    _args: &MatrixArgs,
    ctx: &RunContext,
    output: OutputMode,
    timer: &mut StageTimer,
) -> anyhow::Result<()> {
    let analysis = ctx.analyze(timer)?;
    let report = MatrixReport {
        source: Source::from(&ctx.dataset),
        matrix: &analysis.matrix,
        title: ctx.title(),
    };
    render_mode(output, &report, render_matrix_text, render_matrix_pretty)
}

fn render_matrix_text(report: &MatrixReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let m = report.matrix;
    write!(w, "from_player")?;
    for target in &m.targets {
        write!(w, "\t{target}")?;
    }
    writeln!(w)?;
    for (source, row) in m.sources.iter().zip(&m.cells) {
        write!(w, "{source}")?;
        for v in row {
            write!(w, "\t{v}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Column headers are the receivers' initials, with a legend underneath.
fn render_matrix_pretty(report: &MatrixReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let m = report.matrix;
    pretty_section(w, &format!("Assist matrix A->B: {}", report.title))?;
    if m.is_empty() {
        writeln!(w, "no assists")?;
        return Ok(());
    }

    let keys: Vec<String> = m.targets.iter().map(|t| initials(t)).collect();
    let name_w = column_width(m.sources.iter().map(String::as_str), 4);
    let cell_w = column_width(keys.iter().map(String::as_str), 3);

    write!(w, "{:<name_w$}", "")?;
    for key in &keys {
        write!(w, " {key:>cell_w$}")?;
    }
    writeln!(w)?;

    for (source, row) in m.sources.iter().zip(&m.cells) {
        write!(w, "{source:<name_w$}")?;
        for v in row {
            if *v == 0 {
                write!(w, " {:>cell_w$}", ".")?;
            } else {
                write!(w, " {v:>cell_w$}")?;
            }
        }
        writeln!(w)?;
    }

    writeln!(w)?;
    for (key, target) in keys.iter().zip(&m.targets) {
        writeln!(w, "{key:>cell_w$} = {target}")?;
    }
    Ok(())
}

/// `Stephen Curry` -> `SC`; single names keep their first two letters.
fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect(),
        many => many.iter().filter_map(|w| w.chars().next()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopnet_core::EdgeList;
    use hoopnet_metrics::AssistGraph;

    fn matrix(triples: &[(&str, &str, u32)]) -> WeightMatrix {
        let edges = EdgeList::from_triples(triples).expect("valid");
        WeightMatrix::from_graph(&AssistGraph::from_edges(&edges))
    }

    fn render(m: &WeightMatrix, pretty: bool) -> String {
        let ds = hoopnet_core::Dataset {
            label: "t".into(),
            game: None,
            edges: EdgeList::default(),
        };
        let report = MatrixReport {
            source: Source::from(&ds),
            matrix: m,
            title: "t".into(),
        };
        let mut buf = Vec::new();
        if pretty {
            render_matrix_pretty(&report, &mut buf).expect("render");
        } else {
            render_matrix_text(&report, &mut buf).expect("render");
        }
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn text_layout_matches_csv_shape() {
        let m = matrix(&[("A", "B", 2), ("B", "A", 1), ("A", "C", 1)]);
        assert_eq!(render(&m, false), "from_player\tA\tB\tC\nA\t0\t2\t1\nB\t1\t0\t0\n");
    }

    #[test]
    fn pretty_uses_initials_and_legend() {
        let m = matrix(&[("Stephen Curry", "Kevin Durant", 1)]);
        let text = render(&m, true);
        assert!(text.contains("KD = Kevin Durant"), "{text}");
        assert!(text.contains("Stephen Curry"));
    }

    #[test]
    fn initials_rules() {
        assert_eq!(initials("Stephen Curry"), "SC");
        assert_eq!(initials("Nene"), "Ne");
        assert_eq!(initials("Luc Mbah a Moute"), "LMaM");
        assert_eq!(initials(""), "");
    }
}
