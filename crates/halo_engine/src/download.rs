use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_warn};
use futures_util::{Stream, StreamExt};
use halo_core::partial_filename;
use tempfile::NamedTempFile;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::session::map_reqwest_error;
use crate::{FailureKind, PortalClient, PortalError, Session};

/// Create the download directory if needed and check that files can be created in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PortalError> {
    let context = format!("download directory {}", dir.display());
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => {
            return Err(PortalError::new(
                FailureKind::Io,
                format!("{context} is not a directory"),
            ));
        }
        Ok(_) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PortalError::io(&context, e))?;
        }
        Err(err) => return Err(PortalError::io(&context, err)),
    }
    // Downloads create their .partial files here.
    NamedTempFile::new_in(dir).map_err(|e| PortalError::io(&context, e))?;
    Ok(())
}

/// Stream `url` into `target` through a `.partial` sibling.
///
/// `target` only appears once the whole body is on disk.
pub async fn download_file(
    client: &PortalClient,
    session: &Session,
    url: &str,
    target: &Path,
    on_progress: impl FnMut(u64),
) -> Result<u64, PortalError> {
    let response = client.get(session, url).await?;
    let stream = response.bytes_stream().map(|chunk| chunk.map_err(map_reqwest_error));
    persist_stream(stream, target, client.settings().chunk_size, on_progress).await
}

/// Write a byte stream to `{target}.partial`, then rename it to `target`.
///
/// `chunk_size` is the write buffer size. On any failure the partial file is
/// removed and `target` is left untouched.
pub async fn persist_stream<S, B>(
    stream: S,
    target: &Path,
    chunk_size: usize,
    on_progress: impl FnMut(u64),
) -> Result<u64, PortalError>
where
    S: Stream<Item = Result<B, PortalError>>,
    B: AsRef<[u8]>,
{
    let partial = partial_path(target)?;
    match write_partial(stream, &partial, chunk_size, on_progress).await {
        Ok(bytes) => {
            tokio::fs::rename(&partial, target)
                .await
                .map_err(|e| PortalError::io("finalizing download", e))?;
            engine_debug!("Wrote {} bytes to {}", bytes, target.display());
            Ok(bytes)
        }
        Err(err) => {
            if let Err(remove_err) = tokio::fs::remove_file(&partial).await {
                if remove_err.kind() != std::io::ErrorKind::NotFound {
                    engine_warn!(
                        "Could not remove {}: {}",
                        partial.display(),
                        remove_err
                    );
                }
            }
            Err(err)
        }
    }
}

async fn write_partial<S, B>(
    stream: S,
    partial: &Path,
    chunk_size: usize,
    mut on_progress: impl FnMut(u64),
) -> Result<u64, PortalError>
where
    S: Stream<Item = Result<B, PortalError>>,
    B: AsRef<[u8]>,
{
    let file = tokio::fs::File::create(partial)
        .await
        .map_err(|e| PortalError::io("creating partial file", e))?;
    let mut writer = BufWriter::with_capacity(chunk_size.max(1), file);

    let mut written = 0u64;
    let mut stream = std::pin::pin!(stream);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        writer
            .write_all(bytes)
            .await
            .map_err(|e| PortalError::io("writing partial file", e))?;
        written += bytes.len() as u64;
        on_progress(written);
    }

    writer
        .flush()
        .await
        .map_err(|e| PortalError::io("writing partial file", e))?;
    writer
        .into_inner()
        .sync_all()
        .await
        .map_err(|e| PortalError::io("syncing partial file", e))?;
    Ok(written)
}

fn partial_path(target: &Path) -> Result<PathBuf, PortalError> {
    let name = target
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            PortalError::new(
                FailureKind::Io,
                format!("{} has no usable file name", target.display()),
            )
        })?;
    Ok(target.with_file_name(partial_filename(name)))
}
