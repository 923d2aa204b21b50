use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "hoopnet.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoopnetConfig {
    #[serde(default)]
    pub pagerank: PageRankSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub render: RenderSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Overrides the dataset label in artifact file names.
    #[serde(default)]
    pub label: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "default_width")]
    pub heatmap_width: u32,
    #[serde(default = "default_height")]
    pub heatmap_height: u32,
    #[serde(default = "default_width")]
    pub graph_width: u32,
    #[serde(default = "default_height")]
    pub graph_height: u32,
    #[serde(default = "default_layout_seed")]
    pub layout_seed: u64,
    #[serde(default = "default_layout_iterations")]
    pub layout_iterations: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            heatmap_width: default_width(),
            heatmap_height: default_height(),
            graph_width: default_width(),
            graph_height: default_height(),
            layout_seed: default_layout_seed(),
            layout_iterations: default_layout_iterations(),
        }
    }
}

/// Resolve the effective config.
///
/// The first file found wins: `explicit`, then `<root>/hoopnet.toml`, then
/// `<config_dir>/hoopnet/config.toml`. With none present, defaults apply.
///
/// # Errors
///
/// [`Error::Io`] if `explicit` cannot be read, [`Error::Config`] if the
/// chosen file does not parse.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<HoopnetConfig> {
    if let Some(path) = explicit {
        return parse_config_file(path);
    }

    let project = project_root.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        return parse_config_file(&project);
    }

    if let Some(user) = user_config_path() {
        if user.exists() {
            return parse_config_file(&user);
        }
    }

    debug!("no config file found, using defaults");
    Ok(HoopnetConfig::default())
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hoopnet/config.toml"))
}

fn parse_config_file(path: &Path) -> Result<HoopnetConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "loading config");
    parse_config_str(&content).map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config_str(content: &str) -> std::result::Result<HoopnetConfig, String> {
    let config = toml::from_str::<HoopnetConfig>(content).map_err(|e| e.to_string())?;
    if let Some(label) = &config.output.label {
        validate_label(label).map_err(|e| format!("[output] {e}"))?;
    }
    Ok(config)
}

/// Check that `label` can sit inside an artifact file name.
///
/// Labels are spliced into `<kind>_<label>.<ext>` under the output
/// directory, so they must stay a single path component.
///
/// # Errors
///
/// [`Error::InvalidLabel`] for an empty label, a path separator, a NUL byte
/// or a `..` sequence.
pub fn validate_label(label: &str) -> Result<()> {
    let reason = if label.trim().is_empty() {
        "label is empty"
    } else if label.contains(['/', '\\']) {
        "label contains a path separator"
    } else if label.contains('\0') {
        "label contains a NUL byte"
    } else if label.contains("..") {
        "label contains `..`"
    } else {
        return Ok(());
    };
    Err(Error::InvalidLabel {
        label: label.to_string(),
        reason: reason.to_string(),
    })
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

const fn default_width() -> u32 {
    1440
}

const fn default_height() -> u32 {
    1120
}

const fn default_layout_seed() -> u64 {
    17
}

const fn default_layout_iterations() -> usize {
    50
}
