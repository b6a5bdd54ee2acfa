use url::Url;

use crate::ReleaseRow;

/// The release chosen from a releases table and its portal-relative file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRelease {
    pub release: String,
    pub path: String,
}

/// Pick the newest release that has a downloadable file.
///
/// Rows are expected newest first. A row without a link (pending or embargoed
/// release) is passed over, so the first row that yields a download path wins.
pub fn select_release(rows: &[ReleaseRow], prefix_len: usize) -> Option<SelectedRelease> {
    rows.iter().find_map(|row| {
        row.download_path(prefix_len).map(|path| SelectedRelease {
            release: row.label.clone(),
            path: path.to_string(),
        })
    })
}

/// Join a portal-relative path onto the portal base URL.
pub fn join_portal_url(base_url: &str, path: &str) -> Result<Url, url::ParseError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
}
