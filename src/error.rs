use std::path::PathBuf;

/// Failure to persist a rendered report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report name is empty")]
    EmptyName,
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Report name must be a plain file name: {0:?}")]
    InvalidName(String),
}

/// Failure to read a report back into a tally.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseReportError {
    #[error("Malformed report line {line}: {content:?}")]
    Malformed { line: usize, content: String },
    #[error("Count for {id} overflows on report line {line}")]
    CountOverflow { line: usize, id: String },
}

/// Error type for census commands.
///
/// The `Missing*` variants are precondition failures: nothing has been
/// scanned or written when they are returned.
#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    #[error("Please set a start point first.")]
    MissingStart,
    #[error("Please set an end point first.")]
    MissingEnd,
    #[error("Please provide a filename")]
    MissingFilename,
    #[error("Region holds {volume} blocks, more than the limit of {limit}")]
    VolumeTooLarge { volume: u64, limit: u64 },
    #[error("Failed exporting: {0}")]
    Report(#[from] ReportError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("World error: {0}")]
    World(String),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CensusError {
    /// True for the errors raised before any scan work starts.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CensusError::MissingStart | CensusError::MissingEnd | CensusError::MissingFilename
        )
    }
}

pub type Result<T> = std::result::Result<T, CensusError>;
