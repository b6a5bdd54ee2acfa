use futures_util::{stream, StreamExt};

use engine_logging::{engine_info, engine_warn};
use halo_core::{canonical_filename, DatasetStub, ReleaseInfo};

use crate::download::{download_file, ensure_output_dir};
use crate::feed::list_datasets;
use crate::release::resolve;
use crate::{
    Credentials, DatasetOutcome, DatasetReport, EngineEvent, PortalClient, PortalError,
    PortalSettings, RunReport, Session,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: EngineEvent) {}
}

/// Drives a mission run: login, feed, per-dataset resolve and download.
#[derive(Debug, Clone)]
pub struct Harvester {
    client: PortalClient,
}

impl Harvester {
    pub fn new(settings: PortalSettings) -> Result<Self, PortalError> {
        Ok(Self {
            client: PortalClient::new(settings)?,
        })
    }

    fn settings(&self) -> &PortalSettings {
        self.client.settings()
    }

    /// Log in once, then fetch every dataset of `mission_id`.
    ///
    /// Errors from login, the feed or the output directory end the run.
    /// Failures of a single dataset are recorded in the report instead.
    pub async fn run(
        &self,
        credentials: Credentials,
        mission_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<RunReport, PortalError> {
        let session = self.client.authenticate(credentials).await?;
        self.run_with_session(&session, mission_id, sink).await
    }

    pub async fn run_with_session(
        &self,
        session: &Session,
        mission_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<RunReport, PortalError> {
        if !self.settings().dry_run {
            ensure_output_dir(&self.settings().output_dir)?;
        }
        // A malformed entry aborts the run before any dataset is touched.
        let stubs = list_datasets(&self.client, session, mission_id)
            .await?
            .collect::<Result<Vec<_>, _>>()?;
        let concurrency = self.settings().concurrency.max(1);

        let datasets = stream::iter(stubs)
            .map(|stub| self.process(session, stub, sink))
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await;

        let report = RunReport {
            mission_id: mission_id.to_string(),
            datasets,
        };
        let summary = report.summary();
        engine_info!(
            "Mission {}: {} downloaded, {} skipped, {} pending, {} failed",
            mission_id,
            summary.downloaded,
            summary.skipped,
            summary.pending,
            summary.failed
        );
        Ok(report)
    }

    async fn process(
        &self,
        session: &Session,
        stub: DatasetStub,
        sink: &dyn ProgressSink,
    ) -> DatasetReport {
        let (release, outcome) = match resolve(&self.client, session, &stub).await {
            Ok(info) => {
                sink.emit(EngineEvent::DatasetResolved(info.clone()));
                let outcome = self
                    .retrieve(session, &info, sink)
                    .await
                    .unwrap_or_else(DatasetOutcome::Failed);
                (Some(info.release), outcome)
            }
            Err(err) => (None, DatasetOutcome::Failed(err)),
        };

        if let DatasetOutcome::Failed(err) = &outcome {
            engine_warn!("Dataset {} failed: {}", stub.dataset_id, err);
        }

        let report = DatasetReport {
            dataset_id: stub.dataset_id,
            filename: stub.filename,
            release,
            outcome,
        };
        sink.emit(EngineEvent::DatasetCompleted(report.clone()));
        report
    }

    async fn retrieve(
        &self,
        session: &Session,
        info: &ReleaseInfo,
        sink: &dyn ProgressSink,
    ) -> Result<DatasetOutcome, PortalError> {
        let name = canonical_filename(&info.dataset_id, &info.release, &info.filename);
        let path = self.settings().output_dir.join(&name);

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| PortalError::io("checking local file", e))?;
        if exists {
            engine_info!("Skip {}", name);
            return Ok(DatasetOutcome::Skipped { path });
        }
        if self.settings().dry_run {
            engine_info!("Would download {}", name);
            return Ok(DatasetOutcome::Pending {
                path,
                file_url: info.file_url.clone(),
            });
        }

        engine_info!("Download {}", name);
        sink.emit(EngineEvent::DownloadStarted {
            dataset_id: info.dataset_id.clone(),
            path: path.clone(),
        });
        let bytes = download_file(&self.client, session, &info.file_url, &path, |bytes| {
            sink.emit(EngineEvent::DownloadProgress {
                dataset_id: info.dataset_id.clone(),
                bytes,
            })
        })
        .await?;
        engine_info!("Downloaded {} ({} bytes)", name, bytes);

        Ok(DatasetOutcome::Downloaded { path, bytes })
    }
}
