//! HALO-DB engine: portal session, feed and release resolution, downloads.
mod download;
mod feed;
mod harvester;
mod release;
mod session;
mod settings;
mod types;

pub use download::{download_file, ensure_output_dir, persist_stream};
pub use feed::{list_datasets, parse_feed, DatasetFeed, FeedEntry};
pub use harvester::{Harvester, NullProgressSink, ProgressSink};
pub use release::{extract_release_rows, resolve, RELEASES_CONTAINER_ID};
pub use session::{Credentials, PortalClient, Session};
pub use settings::{PortalSettings, DEFAULT_BASE_URL};
pub use types::{
    DatasetOutcome, DatasetReport, EngineEvent, FailureKind, PortalError, RunReport,
};

pub use halo_core::{DatasetStatus, DatasetStub, ReleaseInfo, ReleaseRow, RunSummary};
