//! Corpus enumeration and batched reads.

use std::path::{Path, PathBuf};

use futures::future::join_all;
use glob::Pattern;
use stencil_core::{Error, Result, StencilConfig, display_path};
use tokio::fs;
use tokio::task::spawn_blocking;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files found under the configured roots, plus roots that could not be walked.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Matching files in traversal order
    pub files: Vec<PathBuf>,
    /// One entry per root that failed
    pub failures: Vec<Error>,
}

/// Walks every configured search path.
///
/// A missing root is recorded in [`Discovery::failures`] and the remaining
/// roots are still walked. Files under the report output directory are never
/// discovered.
///
/// # Errors
/// Returns an error if an exclude pattern is not a valid glob.
pub fn discover(config: &StencilConfig) -> Result<Discovery> {
    let excludes = config.discovery.compiled_excludes()?;
    let extensions = &config.discovery.extensions;
    let output_dir = config.resolved_output_dir();
    let mut discovery = Discovery::default();

    for root in config.resolved_search_paths() {
        if !root.exists() {
            warn!("Search path {} does not exist", root.display());
            discovery.failures.push(Error::SearchPathMissing(root));
            continue;
        }

        let before = discovery.files.len();
        for entry in WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    warn!("Skipping unreadable entry under {}: {error}", root.display());
                    None
                }
            })
        {
            let path = entry.path();
            if entry.file_type().is_file()
                && has_extension(path, extensions)
                && !path.starts_with(&output_dir)
                && !is_excluded(path, &root, &excludes)
                && !discovery.files.iter().any(|seen| seen == path)
            {
                discovery.files.push(path.to_path_buf());
            }
        }

        debug!(
            "Discovered {} file(s) under {}",
            discovery.files.len() - before,
            root.display()
        );
    }

    Ok(discovery)
}

/// Runs [`discover`] on the blocking pool so the walk never stalls the runtime.
///
/// # Errors
/// Returns an error if an exclude pattern is invalid or the walk task fails.
pub async fn discover_blocking(config: &StencilConfig) -> Result<Discovery> {
    let config = config.clone();
    spawn_blocking(move || discover(&config))
        .await
        .map_err(|join_error| Error::Task(join_error.to_string()))?
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// Excludes are matched against the path relative to its root and the full path.
pub(crate) fn is_excluded(path: &Path, root: &Path, excludes: &[Pattern]) -> bool {
    let relative = display_path(path.strip_prefix(root).unwrap_or(path));
    let full = display_path(path);
    excludes
        .iter()
        .any(|pattern| pattern.matches(&relative) || pattern.matches(&full))
}

/// Reads every path concurrently; results keep the order of `paths`.
pub async fn read_batch(paths: &[PathBuf]) -> Vec<Result<String>> {
    join_all(paths.iter().map(|path| async move {
        fs::read_to_string(path).await.map_err(Error::from)
    }))
    .await
}
