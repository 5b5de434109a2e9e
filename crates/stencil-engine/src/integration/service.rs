use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use stencil_core::{
    Error, IntegrationConfig, IntegrationKind, IntegrationStatus, IntegrationTestResult, Result,
};
use tokio::task::spawn_blocking;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::{ProbeContext, ProbeFamily};
use crate::discovery::read_batch;
use crate::markdown::compile;

/// Dependency and build directories never hold launchers worth probing.
const SKIPPED_DIRS: [&str; 6] = ["node_modules", ".git", "target", "dist", "build", "__pycache__"];

/// A structural marker every launcher should carry.
struct Marker {
    name: &'static str,
    pattern: LazyLock<Regex>,
}

static MARKERS: [Marker; 5] = [
    Marker {
        name: "transport",
        pattern: LazyLock::new(|| {
            compile(
                r"StdioServerTransport|SSEServerTransport|StreamableHTTPServerTransport|\bstdio_server\b|transport\s*=",
            )
        }),
    },
    Marker {
        name: "server-import",
        pattern: LazyLock::new(|| {
            compile(
                r"@modelcontextprotocol/sdk|\bfrom\s+mcp(?:\.[\w.]+)?\s+import\b|(?m)^\s*import\s+mcp\b",
            )
        }),
    },
    Marker {
        name: "request-handler",
        pattern: LazyLock::new(|| {
            compile(
                r"\bsetRequestHandler\s*\(|\bregisterTool\s*\(|\.tool\s*\(|@\w+\.(?:tool|list_tools|call_tool)\b",
            )
        }),
    },
    Marker {
        name: "run-method",
        pattern: LazyLock::new(|| {
            compile(
                r"\basync\s+run\s*\(|\.run\s*\(|\.connect\s*\(|\basync\s+function\s+main\s*\(|\bdef\s+main\s*\(",
            )
        }),
    },
    Marker {
        name: "error-handling",
        pattern: LazyLock::new(|| compile(r"(?s)\btry\s*\{.*?\bcatch\b|\btry\s*:.*?\bexcept\b")),
    },
];

/// Launcher scripts inside service directories, in traversal order.
///
/// A launcher is a file named in `entry_points` with a directory component
/// containing `service_dir_marker`, compared case-insensitively. Roots that do
/// not exist are skipped.
pub fn find_service_launchers(roots: &[PathBuf], config: &IntegrationConfig) -> Vec<PathBuf> {
    let mut launchers: Vec<PathBuf> = Vec::new();

    for root in roots.iter().filter(|root| root.is_dir()) {
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry))
            .flatten()
        {
            let path = entry.path();
            if entry.file_type().is_file()
                && is_entry_point(path, config)
                && in_service_dir(path, root, &config.service_dir_marker)
                && !launchers.iter().any(|seen| seen == path)
            {
                launchers.push(path.to_path_buf());
            }
        }
    }

    launchers
}

/// Runs [`find_service_launchers`] on the blocking pool.
///
/// # Errors
/// Returns an error if the walk task panics or is cancelled.
pub async fn locate_service_launchers(
    roots: Vec<PathBuf>,
    config: IntegrationConfig,
) -> Result<Vec<PathBuf>> {
    spawn_blocking(move || find_service_launchers(&roots, &config))
        .await
        .map_err(|join_error| Error::Task(join_error.to_string()))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_entry_point(path: &Path, config: &IntegrationConfig) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| config.entry_points.iter().any(|entry| entry == name))
}

fn in_service_dir(path: &Path, root: &Path, marker: &str) -> bool {
    let marker = marker.to_lowercase();
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| name.to_lowercase().contains(&marker))
        })
}

/// Names of the markers missing from `source`.
pub fn missing_markers(source: &str) -> Vec<String> {
    MARKERS
        .iter()
        .filter(|marker| !marker.pattern.is_match(source))
        .map(|marker| marker.name.to_owned())
        .collect()
}

/// Checks each service launcher for the five structural markers.
pub struct ServiceProbe;

#[async_trait]
impl ProbeFamily for ServiceProbe {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::McpServer
    }

    fn name(&self) -> &'static str {
        "service-artifact"
    }

    fn enabled(&self, config: &IntegrationConfig) -> bool {
        config.service_artifacts
    }

    async fn run(&self, context: Arc<ProbeContext>) -> Result<Vec<IntegrationTestResult>> {
        let launchers = &context.launchers;
        debug!("Probing {} service launcher(s)", launchers.len());

        let sources = read_batch(launchers).await;
        let results = launchers
            .iter()
            .zip(sources)
            .map(|(path, source)| {
                let name = context.name_of(path);
                match source {
                    Err(error) => IntegrationTestResult::error(
                        self.kind(),
                        name,
                        format!("Failed to read launcher: {error}"),
                    ),
                    Ok(source) => {
                        let missing = missing_markers(&source);
                        if missing.is_empty() {
                            IntegrationTestResult::new(
                                self.kind(),
                                name,
                                IntegrationStatus::Passed,
                                "All service markers present",
                            )
                        } else {
                            IntegrationTestResult::new(
                                self.kind(),
                                name,
                                IntegrationStatus::Failed,
                                format!(
                                    "Missing {} of {} service markers",
                                    missing.len(),
                                    MARKERS.len()
                                ),
                            )
                            .with_failed_checks(missing)
                        }
                    }
                }
            })
            .collect();

        Ok(results)
    }
}
