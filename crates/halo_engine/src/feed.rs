use engine_logging::{engine_debug, engine_info};
use halo_core::{parse_entry_title, DatasetStub};

use crate::{FailureKind, PortalClient, PortalError, Session};

/// Title and link of one syndication feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: Option<String>,
}

/// Dataset stubs of one mission feed, parsed one entry at a time.
///
/// Finite and owned: a new call to [`list_datasets`] fetches the feed again
/// and yields a fresh sequence.
#[derive(Debug)]
pub struct DatasetFeed {
    entries: std::vec::IntoIter<FeedEntry>,
}

impl DatasetFeed {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl Iterator for DatasetFeed {
    type Item = Result<DatasetStub, PortalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(stub_from_entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for DatasetFeed {}

/// Fetch the mission feed and return its datasets in feed order.
pub async fn list_datasets(
    client: &PortalClient,
    session: &Session,
    mission_id: &str,
) -> Result<DatasetFeed, PortalError> {
    let url = client.settings().feed_url(mission_id);
    let body = client.get_text(session, &url).await?;
    let entries = parse_feed(&body)?;
    engine_info!("Mission {} lists {} datasets", mission_id, entries.len());
    Ok(DatasetFeed::new(entries))
}

/// Parse an RSS 2.0 document, falling back to Atom.
pub fn parse_feed(content: &str) -> Result<Vec<FeedEntry>, PortalError> {
    match parse_as_rss(content) {
        Ok(entries) => Ok(entries),
        Err(rss_err) => {
            engine_debug!("Feed is not RSS ({}), trying Atom", rss_err);
            parse_as_atom(content).map_err(|atom_err| {
                PortalError::new(
                    FailureKind::FeedParse,
                    format!("neither RSS ({rss_err}) nor Atom ({atom_err})"),
                )
            })
        }
    }
}

fn parse_as_rss(content: &str) -> Result<Vec<FeedEntry>, rss::Error> {
    let channel = content.parse::<rss::Channel>()?;
    Ok(channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().map(ToOwned::to_owned),
        })
        .collect())
}

fn parse_as_atom(content: &str) -> Result<Vec<FeedEntry>, atom_syndication::Error> {
    let feed = atom_syndication::Feed::read_from(content.as_bytes())?;
    Ok(feed
        .entries()
        .iter()
        .map(|entry| FeedEntry {
            title: entry.title().as_str().to_string(),
            link: entry.links().first().map(|link| link.href().to_string()),
        })
        .collect())
}

fn stub_from_entry(entry: FeedEntry) -> Result<DatasetStub, PortalError> {
    let parsed = parse_entry_title(&entry.title).ok_or_else(|| {
        PortalError::new(
            FailureKind::MalformedFeedEntry,
            format!("title {:?} is not '#<id> | <filename>'", entry.title),
        )
    })?;
    let detail_url = entry
        .link
        .filter(|link| !link.trim().is_empty())
        .ok_or_else(|| {
            PortalError::new(
                FailureKind::MalformedFeedEntry,
                format!("entry {:?} has no link", entry.title),
            )
        })?;

    Ok(DatasetStub {
        dataset_id: parsed.dataset_id,
        title: entry.title,
        filename: parsed.filename,
        detail_url,
    })
}
