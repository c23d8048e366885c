use std::path::{Path, PathBuf};

use crate::{
    contributions::{self, CSV_FILE_NAME, DETAILED_FILE_NAME},
    types::ContributionReport,
};

/// Writes the CSV summary and the detailed listing of a contribution report.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CSV_FILE_NAME)
    }

    pub fn detailed_path(&self) -> PathBuf {
        self.output_dir.join(DETAILED_FILE_NAME)
    }

    /// Returns the paths written, CSV first.
    pub async fn write(&self, report: &ContributionReport) -> Result<[PathBuf; 2], String> {
        async_fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| format!("{}: {}", self.output_dir.display(), e))?;

        let csv_path = self.csv_path();
        write_file(&csv_path, contributions::render_csv(report)).await?;

        let detailed_path = self.detailed_path();
        write_file(&detailed_path, contributions::render_detailed(report)).await?;

        Ok([csv_path, detailed_path])
    }
}

async fn write_file(path: &Path, content: String) -> Result<(), String> {
    async_fs::write(path, content)
        .await
        .map_err(|e| format!("{}: {}", path.display(), e))
}
