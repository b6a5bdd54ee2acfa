/// Outcome class of a single dataset in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetStatus {
    Downloaded,
    Skipped,
    /// Would be downloaded, but the run transferred nothing.
    Pending,
    Failed,
}

/// Tally of dataset outcomes for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub pending: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: DatasetStatus) {
        match status {
            DatasetStatus::Downloaded => self.downloaded += 1,
            DatasetStatus::Skipped => self.skipped += 1,
            DatasetStatus::Pending => self.pending += 1,
            DatasetStatus::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.pending + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl FromIterator<DatasetStatus> for RunSummary {
    fn from_iter<I: IntoIterator<Item = DatasetStatus>>(iter: I) -> Self {
        let mut summary = Self::new();
        for status in iter {
            summary.record(status);
        }
        summary
    }
}
