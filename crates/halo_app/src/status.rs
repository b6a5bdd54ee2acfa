use std::path::Path;
use std::process::ExitCode;

use halo_engine::{DatasetOutcome, EngineEvent, ProgressSink, RunSummary};

/// Prints one line per dataset as the run progresses.
pub struct StatusPrinter;

impl ProgressSink for StatusPrinter {
    fn emit(&self, event: EngineEvent) {
        if let Some(line) = status_line(&event) {
            println!("{line}");
        }
    }
}

fn status_line(event: &EngineEvent) -> Option<String> {
    match event {
        EngineEvent::DownloadStarted { path, .. } => Some(format!("Download {}", display_name(path))),
        EngineEvent::DatasetCompleted(report) => match &report.outcome {
            DatasetOutcome::Skipped { path } => Some(format!("Skip {}", display_name(path))),
            DatasetOutcome::Pending { path, .. } => {
                Some(format!("Would download {}", display_name(path)))
            }
            DatasetOutcome::Failed(err) => {
                Some(format!("Failed dataset {}: {}", report.dataset_id, err))
            }
            DatasetOutcome::Downloaded { .. } => None,
        },
        EngineEvent::DatasetResolved(_) | EngineEvent::DownloadProgress { .. } => None,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// 0 when every dataset is fetched or skipped, 2 when some dataset failed.
pub fn exit_code(summary: &RunSummary) -> ExitCode {
    if summary.has_failures() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
