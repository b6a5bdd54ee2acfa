//! HALO-DB core: pure dataset, release and filename logic.
mod dataset;
mod feed_title;
mod filename;
mod release;
mod summary;

pub use dataset::{DatasetStub, ReleaseInfo, ReleaseRow};
pub use feed_title::{parse_entry_title, EntryTitle};
pub use filename::{canonical_filename, partial_filename, CANONICAL_PREFIX, PARTIAL_SUFFIX};
pub use release::{join_portal_url, select_release, SelectedRelease};
pub use summary::{DatasetStatus, RunSummary};
