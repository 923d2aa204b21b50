use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripting around `hoopnet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidLabel,
    InvalidEdge,
    MalformedCsv,
    NumericalFailure,
    ArtifactWriteFailed,
    ImageEncodeFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::InvalidLabel => "E1003",
            Self::InvalidEdge => "E2001",
            Self::MalformedCsv => "E2002",
            Self::NumericalFailure => "E3001",
            Self::ArtifactWriteFailed => "E5001",
            Self::ImageEncodeFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidLabel => "Invalid artifact label",
            Self::InvalidEdge => "Invalid assist edge",
            Self::MalformedCsv => "Malformed CSV input",
            Self::NumericalFailure => "Numerical computation failed",
            Self::ArtifactWriteFailed => "Artifact write failed",
            Self::ImageEncodeFailed => "Image encoding failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint for the terminal.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in hoopnet.toml and retry."),
            Self::InvalidLabel => {
                Some("Pick a label without path separators or `..`, e.g. `2017-10-17_GSW`.")
            }
            Self::InvalidEdge => {
                Some("Every row needs two non-empty player names and a positive assist count.")
            }
            Self::MalformedCsv => Some("Use the header `from_player,to_player,assists`."),
            Self::NumericalFailure => {
                Some("Raise pagerank.max_iter or relax pagerank.tolerance in hoopnet.toml.")
            }
            Self::ArtifactWriteFailed => Some("Check disk space and write permissions."),
            Self::ImageEncodeFailed => Some("Check the render dimensions in hoopnet.toml."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors produced while ingesting, analysing or exporting an assist network.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row was rejected at ingestion. `row` is 1-based.
    #[error("invalid edge at row {row}: {reason}")]
    InvalidEdge { row: usize, reason: String },

    /// An iterative computation failed to converge or got bad parameters.
    #[error("numerical error: {0}")]
    Numerical(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to encode image: {0}")]
    Render(String),

    /// The artifact label cannot be used inside a file name.
    #[error("invalid label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: String },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attribute a failed write to `path`.
    ///
    /// CSV writers only see a sink, so an I/O failure underneath them comes
    /// back as [`Error::Csv`]. Here it becomes [`Error::Io`]; anything else
    /// passes through unchanged.
    #[must_use]
    pub fn on_write(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Csv(e) if e.is_io_error() => Self::io(path, std::io::Error::from(e)),
            other => other,
        }
    }

    /// The stable machine code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidEdge { .. } => ErrorCode::InvalidEdge,
            Self::Numerical(_) => ErrorCode::NumericalFailure,
            Self::Io { .. } => ErrorCode::ArtifactWriteFailed,
            Self::Csv(_) => ErrorCode::MalformedCsv,
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::Render(_) => ErrorCode::ImageEncodeFailed,
            Self::InvalidLabel { .. } => ErrorCode::InvalidLabel,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
