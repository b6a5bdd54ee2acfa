use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://halo-db.pa.op.dlr.de";

#[derive(Debug, Clone)]
pub struct PortalSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Deadline for login, feed and detail-page requests; idle read limit for file transfers.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub chunk_size: usize,
    /// Characters stripped from the front of a release download link.
    pub link_prefix_len: usize,
    /// Datasets processed at once; 1 keeps the run strictly sequential.
    pub concurrency: usize,
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            redirect_limit: 5,
            chunk_size: 1024 * 1024,
            link_prefix_len: 3,
            concurrency: 1,
            output_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

impl PortalSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.base())
    }

    pub fn feed_url(&self, mission_id: &str) -> String {
        format!("{}/mission/{mission_id}?format=rss", self.base())
    }

    pub fn dataset_url(&self, dataset_id: &str) -> String {
        format!("{}/dataset/{dataset_id}", self.base())
    }
}
