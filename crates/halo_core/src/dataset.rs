/// Minimal reference to a dataset as advertised by a mission feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStub {
    pub dataset_id: String,
    pub title: String,
    pub filename: String,
    pub detail_url: String,
}

/// A dataset resolved to the release that actually carries a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub dataset_id: String,
    pub filename: String,
    pub file_url: String,
    pub release: String,
    pub detail_url: String,
}

/// One body row of a dataset's releases table.
///
/// `href` is the raw link target found in the download column, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRow {
    pub label: String,
    pub href: Option<String>,
}

impl ReleaseRow {
    pub fn new(label: impl Into<String>, href: Option<&str>) -> Self {
        Self {
            label: label.into(),
            href: href.map(ToOwned::to_owned),
        }
    }

    /// Link target with the portal's fixed prefix removed.
    ///
    /// Returns `None` when the row has no link or nothing remains after the
    /// prefix is stripped.
    pub fn download_path(&self, prefix_len: usize) -> Option<&str> {
        let href = self.href.as_deref()?.trim();
        let path = href.get(prefix_len..)?;
        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }
}
