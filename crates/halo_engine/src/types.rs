use std::fmt;
use std::path::PathBuf;

use halo_core::{DatasetStatus, ReleaseInfo, RunSummary};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct PortalError {
    pub kind: FailureKind,
    pub message: String,
}

impl PortalError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn io(context: &str, err: std::io::Error) -> Self {
        Self::new(FailureKind::Io, format!("{context}: {err}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Authentication,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidUrl,
    FeedParse,
    MalformedFeedEntry,
    MissingReleaseTable,
    NoReleaseAvailable,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Authentication => write!(f, "authentication failed"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::FeedParse => write!(f, "unreadable feed"),
            FailureKind::MalformedFeedEntry => write!(f, "malformed feed entry"),
            FailureKind::MissingReleaseTable => write!(f, "releases table missing"),
            FailureKind::NoReleaseAvailable => write!(f, "no release available"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    Skipped { path: PathBuf },
    /// Dry run: the file is missing locally and would be fetched.
    Pending { path: PathBuf, file_url: String },
    Failed(PortalError),
}

impl DatasetOutcome {
    pub fn status(&self) -> DatasetStatus {
        match self {
            DatasetOutcome::Downloaded { .. } => DatasetStatus::Downloaded,
            DatasetOutcome::Skipped { .. } => DatasetStatus::Skipped,
            DatasetOutcome::Pending { .. } => DatasetStatus::Pending,
            DatasetOutcome::Failed(_) => DatasetStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetReport {
    pub dataset_id: String,
    pub filename: String,
    /// Unknown when resolution itself failed.
    pub release: Option<String>,
    pub outcome: DatasetOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mission_id: String,
    /// One entry per feed entry, in feed order.
    pub datasets: Vec<DatasetReport>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        self.datasets
            .iter()
            .map(|report| report.outcome.status())
            .collect()
    }

    pub fn dataset(&self, dataset_id: &str) -> Option<&DatasetReport> {
        self.datasets
            .iter()
            .find(|report| report.dataset_id == dataset_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DatasetResolved(ReleaseInfo),
    DownloadStarted { dataset_id: String, path: PathBuf },
    DownloadProgress { dataset_id: String, bytes: u64 },
    DatasetCompleted(DatasetReport),
}
