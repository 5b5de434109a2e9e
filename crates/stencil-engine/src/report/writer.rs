use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use stencil_core::{Error, Result};
use tokio::fs;
use tracing::info;

use super::{Report, render_markdown};

/// Where the two report formats were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Structured report
    pub json: PathBuf,
    /// Narrative report
    pub markdown: PathBuf,
}

impl ReportPaths {
    /// Paths for a run on `date`: `<dir>/<stem>-YYYY-MM-DD.{json,md}`.
    pub fn for_date(output_dir: &Path, file_stem: &str, date: NaiveDate) -> Self {
        let base = format!("{file_stem}-{}", date.format("%Y-%m-%d"));
        Self {
            json: output_dir.join(format!("{base}.json")),
            markdown: output_dir.join(format!("{base}.md")),
        }
    }
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    fs::write(path, contents)
        .await
        .map_err(|source| Error::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Persists the structured and narrative reports, creating `output_dir` if needed.
///
/// # Errors
/// Returns [`Error::ReportWrite`] if the directory or either file cannot be written.
pub async fn write_reports(
    report: &Report,
    output_dir: &Path,
    file_stem: &str,
    date: NaiveDate,
) -> Result<ReportPaths> {
    fs::create_dir_all(output_dir)
        .await
        .map_err(|source| Error::ReportWrite {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let paths = ReportPaths::for_date(output_dir, file_stem, date);
    let json = serde_json::to_string_pretty(report)?;

    write_file(&paths.json, json).await?;
    write_file(&paths.markdown, render_markdown(report)).await?;

    info!(
        "Reports written to {} and {}",
        paths.json.display(),
        paths.markdown.display()
    );
    Ok(paths)
}
