use engine_logging::{engine_debug, engine_info};
use halo_core::{join_portal_url, select_release, DatasetStub, ReleaseInfo, ReleaseRow};
use scraper::{ElementRef, Html, Selector};

use crate::{FailureKind, PortalClient, PortalError, Session};

/// `id` of the element wrapping the releases table on a dataset page.
pub const RELEASES_CONTAINER_ID: &str = "releases";

/// Column of a release row holding the download link.
const LINK_COLUMN: usize = 3;

/// Resolve a dataset to its newest release that has a downloadable file.
pub async fn resolve(
    client: &PortalClient,
    session: &Session,
    stub: &DatasetStub,
) -> Result<ReleaseInfo, PortalError> {
    let settings = client.settings();
    let url = settings.dataset_url(&stub.dataset_id);
    let html = client.get_text(session, &url).await?;

    let rows = extract_release_rows(&html).ok_or_else(|| {
        PortalError::new(
            FailureKind::MissingReleaseTable,
            format!("dataset {} page has no releases table", stub.dataset_id),
        )
    })?;
    engine_debug!("Dataset {} lists {} releases", stub.dataset_id, rows.len());

    let selected = select_release(&rows, settings.link_prefix_len).ok_or_else(|| {
        PortalError::new(
            FailureKind::NoReleaseAvailable,
            format!(
                "dataset {} has no release with a downloadable file",
                stub.dataset_id
            ),
        )
    })?;
    let file_url = join_portal_url(settings.base(), &selected.path).map_err(|err| {
        PortalError::new(
            FailureKind::InvalidUrl,
            format!("download link {:?}: {err}", selected.path),
        )
    })?;

    engine_info!(
        "Dataset {} resolved to release {}",
        stub.dataset_id,
        selected.release
    );
    Ok(ReleaseInfo {
        dataset_id: stub.dataset_id.clone(),
        filename: stub.filename.clone(),
        file_url: file_url.to_string(),
        release: selected.release,
        detail_url: stub.detail_url.clone(),
    })
}

/// Body rows of the releases table, in page order.
///
/// Returns `None` if the page has no releases container or it holds no table.
/// Rows without cells are ignored; a row with fewer than four cells has no link.
pub fn extract_release_rows(html: &str) -> Option<Vec<ReleaseRow>> {
    let doc = Html::parse_document(html);
    let container_sel = Selector::parse(&format!("#{RELEASES_CONTAINER_ID}")).ok()?;
    let table_sel = Selector::parse("table").ok()?;
    let row_sel = Selector::parse("tr").ok()?;
    let cell_sel = Selector::parse("td, th").ok()?;
    let anchor_sel = Selector::parse("a").ok()?;

    let container = doc.select(&container_sel).next()?;
    let table = container.select(&table_sel).next()?;

    let rows = table
        .select(&row_sel)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
            let label = cells.first()?.text().collect::<String>().trim().to_string();
            let href = cells
                .get(LINK_COLUMN)
                .and_then(|cell| cell.select(&anchor_sel).next())
                .and_then(|anchor| anchor.value().attr("href"));
            Some(ReleaseRow::new(label, href))
        })
        .collect();

    Some(rows)
}
