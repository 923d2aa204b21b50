//! `hoopnet export`: write every artifact for one run.
//!
//! Files land in `<out-dir>/` with the run label in their names:
//!
//! ```text
//! assists_<label>.csv   edge list
//! metrics_<label>.csv   ranked metrics table
//! matrix_<label>.csv    from × to matrix
//! heatmap_<label>.png   matrix heatmap
//! graph_<label>.png     node-link drawing
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use hoopnet_core::config::validate_label;
use hoopnet_core::csv_io::write_edges;
use hoopnet_core::timing::StageTimer;
use hoopnet_core::{Error, Result};
use hoopnet_metrics::export::{write_matrix, write_metrics};
use serde::Serialize;
use tracing::{debug, info};

use super::{RunContext, column_width};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::render::heatmap::render_heatmap;
use crate::render::network::{NetworkStyle, render_network};
use crate::render::save_png;

/// Arguments for `hoopnet export`.
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Directory to write artifacts into (default from config, then `out`).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Label used in artifact file names.
    #[arg(long)]
    pub label: Option<String>,

    /// Skip the PNG renderings.
    #[arg(long)]
    pub no_images: bool,
}

/// One written file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Artifact {
    pub name: &'static str,
    pub description: &'static str,
    pub path: PathBuf,
}

/// Report payload for `hoopnet export`.
#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub label: String,
    pub out_dir: PathBuf,
    pub artifacts: Vec<Artifact>,
}

/// Execute `hoopnet export`.
pub fn run_export(
    args: &ExportArgs,
    ctx: &RunContext,
    output: OutputMode,
    timer: &mut StageTimer,
) -> anyhow::Result<()> {
    let label = args
        .label
        .clone()
        .or_else(|| ctx.config.output.label.clone())
        .unwrap_or_else(|| ctx.dataset.label.clone());
    validate_label(&label).context("refusing to build artifact file names")?;
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| ctx.config.output.dir.clone());

    let analysis = ctx.analyze(timer)?;

    fs::create_dir_all(&out_dir)
        .map_err(|e| Error::io(&out_dir, e))
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let mut artifacts = Vec::new();
    let mut emit = |name: &'static str, description: &'static str, file: String| {
        let path = out_dir.join(file);
        artifacts.push(Artifact {
            name,
            description,
            path: path.clone(),
        });
        path
    };

    let edges_path = emit("assists", "Edge list CSV", format!("assists_{label}.csv"));
    let metrics_path = emit("metrics", "Metrics table CSV", format!("metrics_{label}.csv"));
    let matrix_path = emit("matrix", "Assist matrix A->B CSV", format!("matrix_{label}.csv"));
    let images = (!args.no_images).then(|| {
        (
            emit("heatmap", "Assist heatmap PNG", format!("heatmap_{label}.png")),
            emit("graph", "Assist graph PNG", format!("graph_{label}.png")),
        )
    });

    timer
        .time("write.csv", || -> Result<()> {
            write_csv(&edges_path, |w| write_edges(w, &ctx.dataset.edges))?;
            write_csv(&metrics_path, |w| write_metrics(w, &analysis.table))?;
            write_csv(&matrix_path, |w| write_matrix(w, &analysis.matrix))
        })
        .context("failed to write CSV artifacts")?;

    if let Some((heatmap_path, graph_path)) = images {
        let render = &ctx.config.render;

        timer
            .time("render.heatmap", || {
                let img = render_heatmap(
                    &analysis.matrix,
                    &format!("Assist heatmap A->B - {label}"),
                    render.heatmap_width,
                    render.heatmap_height,
                )?;
                save_png(&img, &heatmap_path)
            })
            .context("failed to render heatmap")?;

        timer
            .time("render.graph", || {
                let style = NetworkStyle {
                    width: render.graph_width,
                    height: render.graph_height,
                    seed: render.layout_seed,
                    iterations: render.layout_iterations,
                };
                let img = render_network(&analysis.graph, &format!("Assist graph - {label}"), style)?;
                save_png(&img, &graph_path)
            })
            .context("failed to render assist graph")?;
    }

    info!(%label, dir = %out_dir.display(), files = artifacts.len(), "export complete");

    let manifest = ExportManifest {
        label,
        out_dir,
        artifacts,
    };
    render_mode(output, &manifest, render_manifest_text, render_manifest_pretty)
}

/// Create `path` and hand a buffered writer to `write`.
fn write_csv(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_csv_to(path, BufWriter::new(file), write)
}

/// Sink failures surface as [`Error::Io`] on `path`, not as malformed CSV.
fn write_csv_to<W: Write>(
    path: &Path,
    mut writer: W,
    write: impl FnOnce(&mut W) -> Result<()>,
) -> Result<()> {
    write(&mut writer).map_err(|e| e.on_write(path))?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "wrote csv");
    Ok(())
}

fn render_manifest_text(manifest: &ExportManifest, w: &mut dyn Write) -> io::Result<()> {
    for a in &manifest.artifacts {
        writeln!(w, "{}\t{}", a.name, a.path.display())?;
    }
    Ok(())
}

fn render_manifest_pretty(manifest: &ExportManifest, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Generated files: {}", manifest.label))?;
    let desc_w = column_width(manifest.artifacts.iter().map(|a| a.description), 4);
    for a in &manifest.artifacts {
        writeln!(w, "{:<desc_w$}  {}", a.description, a.path.display())?;
    }
    writeln!(w)?;
    pretty_kv(w, "directory", manifest.out_dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopnet_core::config::HoopnetConfig;

    fn context(config: HoopnetConfig) -> RunContext {
        let mut timer = StageTimer::new();
        RunContext::load(None, config, &mut timer).expect("load")
    }

    fn small_render(mut config: HoopnetConfig) -> HoopnetConfig {
        config.render.heatmap_width = 240;
        config.render.heatmap_height = 200;
        config.render.graph_width = 240;
        config.render.graph_height = 200;
        config.render.layout_iterations = 10;
        config
    }

    #[test]
    fn writes_csvs_and_images() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context(small_render(HoopnetConfig::default()));
        let args = ExportArgs {
            out_dir: Some(dir.path().to_path_buf()),
            ..ExportArgs::default()
        };
        let mut timer = StageTimer::new();
        run_export(&args, &ctx, OutputMode::Json, &mut timer).expect("export");

        for file in [
            "assists_2017-10-17_GSW.csv",
            "metrics_2017-10-17_GSW.csv",
            "matrix_2017-10-17_GSW.csv",
            "heatmap_2017-10-17_GSW.png",
            "graph_2017-10-17_GSW.png",
        ] {
            assert!(dir.path().join(file).is_file(), "{file} missing");
        }
        let stages: Vec<&str> = timer.stages().iter().map(|s| s.name.as_str()).collect();
        assert!(stages.contains(&"write.csv"));
        assert!(stages.contains(&"render.graph"));
    }

    #[test]
    fn label_flag_beats_config_label() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = HoopnetConfig::default();
        config.output.label = Some("from-config".into());
        let ctx = context(config);
        let args = ExportArgs {
            out_dir: Some(dir.path().to_path_buf()),
            label: Some("from-flag".into()),
            no_images: true,
        };
        run_export(&args, &ctx, OutputMode::Json, &mut StageTimer::new()).expect("export");
        assert!(dir.path().join("metrics_from-flag.csv").is_file());
        assert!(!dir.path().join("metrics_from-config.csv").exists());
        assert!(!dir.path().join("heatmap_from-flag.png").exists());
    }

    #[test]
    fn config_label_and_dir_apply_without_flags() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = HoopnetConfig::default();
        config.output.label = Some("cfg".into());
        config.output.dir = dir.path().join("nested");
        let ctx = context(config);
        let args = ExportArgs {
            no_images: true,
            ..ExportArgs::default()
        };
        run_export(&args, &ctx, OutputMode::Json, &mut StageTimer::new()).expect("export");
        assert!(dir.path().join("nested").join("assists_cfg.csv").is_file());
    }

    #[test]
    fn unwritable_dir_reports_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").expect("write");
        let ctx = context(HoopnetConfig::default());
        let args = ExportArgs {
            out_dir: Some(blocker.join("sub")),
            no_images: true,
            ..ExportArgs::default()
        };
        let err = run_export(&args, &ctx, OutputMode::Json, &mut StageTimer::new()).unwrap_err();
        let core = err
            .chain()
            .find_map(|c| c.downcast_ref::<Error>())
            .expect("core error in chain");
        assert!(matches!(core, Error::Io { .. }));
    }

    #[test]
    fn manifest_text_is_name_tab_path() {
        let manifest = ExportManifest {
            label: "x".into(),
            out_dir: PathBuf::from("out"),
            artifacts: vec![Artifact {
                name: "metrics",
                description: "Metrics table CSV",
                path: PathBuf::from("out/metrics_x.csv"),
            }],
        };
        let mut buf = Vec::new();
        render_manifest_text(&manifest, &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "metrics\tout/metrics_x.csv\n");
    }

    /// Accepts nothing: every write reports a full disk.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn full_disk_during_csv_write_is_artifact_write_failure() {
        let mut timer = StageTimer::new();
        let ctx = context(HoopnetConfig::default());
        let analysis = ctx.analyze(&mut timer).expect("analyze");
        let path = Path::new("out/metrics_x.csv");

        let err = write_csv_to(path, FullDisk, |w| write_metrics(w, &analysis.table)).unwrap_err();
        assert_eq!(err.code(), hoopnet_core::ErrorCode::ArtifactWriteFailed);
        assert!(matches!(&err, Error::Io { path: p, .. } if p == path), "{err}");

        let err = write_csv_to(path, FullDisk, |w| write_matrix(w, &analysis.matrix)).unwrap_err();
        assert_eq!(err.code(), hoopnet_core::ErrorCode::ArtifactWriteFailed);

        let err = write_csv_to(path, FullDisk, |w| write_edges(w, &ctx.dataset.edges)).unwrap_err();
        assert_eq!(err.code(), hoopnet_core::ErrorCode::ArtifactWriteFailed);
    }

    #[test]
    fn label_with_separator_is_rejected_before_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("out");
        let ctx = context(HoopnetConfig::default());
        let args = ExportArgs {
            out_dir: Some(out.clone()),
            label: Some("../escaped".into()),
            no_images: true,
        };
        let err = run_export(&args, &ctx, OutputMode::Json, &mut StageTimer::new()).unwrap_err();
        let core = err
            .chain()
            .find_map(|c| c.downcast_ref::<Error>())
            .expect("core error in chain");
        assert_eq!(core.code(), hoopnet_core::ErrorCode::InvalidLabel);
        assert!(!out.exists());
        assert!(!dir.path().join("metrics_escaped.csv").exists());
    }
}
