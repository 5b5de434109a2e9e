//! Integration probes against collaborator artifacts.
//!
//! Each probe family is independent. A target that cannot be read becomes an
//! `error` result for that target only; a family that fails as a whole
//! becomes a single `error` result for the family. Neither stops the others.

/// Chat-mode artifact conformance.
pub mod chat_mode;
/// Service launcher conformance.
pub mod service;
/// Wait-for-all probe combinator.
pub mod settle;
/// Template instantiation.
pub mod template;
/// End-to-end workflow checks.
pub mod workflow;

pub use chat_mode::ChatModeProbe;
pub use service::ServiceProbe;
pub use settle::{BoxedProbe, settle_all};
pub use template::TemplateProbe;
pub use workflow::WorkflowProbe;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use stencil_core::{
    Document, DocumentType, IntegrationConfig, IntegrationKind, IntegrationTestResult, Result,
    relative_display,
};
use tracing::{debug, info, warn};

/// Everything a probe may inspect. Shared read-only across probes.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    /// Base for rendering target names
    pub project_root: PathBuf,
    /// Resolved search roots
    pub search_paths: Vec<PathBuf>,
    /// Resolved registry declaration files
    pub registry_files: Vec<PathBuf>,
    /// Service launchers, located once per run
    pub launchers: Vec<PathBuf>,
    /// Classified documents in discovery order
    pub documents: Vec<Document>,
    /// Probe settings
    pub config: IntegrationConfig,
}

impl ProbeContext {
    /// Documents of one type, in discovery order.
    pub fn documents_of(&self, doc_type: DocumentType) -> impl Iterator<Item = &Document> {
        self.documents
            .iter()
            .filter(move |document| document.doc_type == doc_type)
    }

    /// Target name relative to the project root.
    pub fn name_of(&self, path: &Path) -> String {
        relative_display(path, &self.project_root)
    }
}

/// One family of conformance probes.
#[async_trait]
pub trait ProbeFamily: Send + Sync {
    /// Kind recorded on every result this family produces.
    fn kind(&self) -> IntegrationKind;

    /// Name used in logs and family-level error results.
    fn name(&self) -> &'static str;

    /// Whether the configuration enables this family.
    fn enabled(&self, config: &IntegrationConfig) -> bool;

    /// Probes every target. Per-target failures are returned as `error` results.
    ///
    /// # Errors
    /// Returns an error only when the family cannot run at all.
    async fn run(&self, context: Arc<ProbeContext>) -> Result<Vec<IntegrationTestResult>>;
}

/// Runs the probe families in order and gathers their results.
pub struct IntegrationOrchestrator {
    families: Vec<Arc<dyn ProbeFamily>>,
}

impl IntegrationOrchestrator {
    /// Orchestrator over the given families.
    pub fn new(families: Vec<Arc<dyn ProbeFamily>>) -> Self {
        Self { families }
    }

    /// Orchestrator with the four built-in families.
    #[must_use]
    pub fn with_default_families() -> Self {
        Self::new(vec![
            Arc::new(ServiceProbe),
            Arc::new(ChatModeProbe),
            Arc::new(TemplateProbe),
            Arc::new(WorkflowProbe),
        ])
    }

    /// Runs every enabled family against `context`.
    pub async fn run(&self, context: Arc<ProbeContext>) -> Vec<IntegrationTestResult> {
        let mut results = Vec::new();

        for family in &self.families {
            if !family.enabled(&context.config) {
                info!("Skipping {} probes (disabled)", family.name());
                continue;
            }

            match family.run(Arc::clone(&context)).await {
                Ok(family_results) => {
                    debug!(
                        "{} probes produced {} result(s)",
                        family.name(),
                        family_results.len()
                    );
                    results.extend(family_results);
                }
                Err(error) => {
                    warn!("{} probes failed: {error}", family.name());
                    results.push(IntegrationTestResult::error(
                        family.kind(),
                        family.name(),
                        error.to_string(),
                    ));
                }
            }
        }

        results
    }
}

impl Default for IntegrationOrchestrator {
    fn default() -> Self {
        Self::with_default_families()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{Error, IntegrationStatus};

    struct FailingFamily;

    #[async_trait]
    impl ProbeFamily for FailingFamily {
        fn kind(&self) -> IntegrationKind {
            IntegrationKind::TemplateGeneration
        }

        fn name(&self) -> &'static str {
            "failing"
        }

        fn enabled(&self, _config: &IntegrationConfig) -> bool {
            true
        }

        async fn run(&self, _context: Arc<ProbeContext>) -> Result<Vec<IntegrationTestResult>> {
            Err(Error::Probe("walk failed".to_owned()))
        }
    }

    struct FixedFamily;

    #[async_trait]
    impl ProbeFamily for FixedFamily {
        fn kind(&self) -> IntegrationKind {
            IntegrationKind::EndToEnd
        }

        fn name(&self) -> &'static str {
            "fixed"
        }

        fn enabled(&self, config: &IntegrationConfig) -> bool {
            config.workflows
        }

        async fn run(&self, _context: Arc<ProbeContext>) -> Result<Vec<IntegrationTestResult>> {
            Ok(vec![IntegrationTestResult::new(
                IntegrationKind::EndToEnd,
                "fixed",
                IntegrationStatus::Passed,
                "ok",
            )])
        }
    }

    fn context(config: IntegrationConfig) -> Arc<ProbeContext> {
        Arc::new(ProbeContext {
            project_root: PathBuf::from("."),
            search_paths: Vec::new(),
            registry_files: Vec::new(),
            launchers: Vec::new(),
            documents: Vec::new(),
            config,
        })
    }

    #[tokio::test]
    async fn test_family_failure_does_not_stop_siblings() {
        let orchestrator =
            IntegrationOrchestrator::new(vec![Arc::new(FailingFamily), Arc::new(FixedFamily)]);

        let results = orchestrator.run(context(IntegrationConfig::default())).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, IntegrationStatus::Error);
        assert_eq!(results[0].name, "failing");
        assert_eq!(results[1].status, IntegrationStatus::Passed);
    }

    #[tokio::test]
    async fn test_disabled_family_is_skipped() {
        let orchestrator = IntegrationOrchestrator::new(vec![Arc::new(FixedFamily)]);
        let config = IntegrationConfig {
            workflows: false,
            ..IntegrationConfig::default()
        };

        assert!(orchestrator.run(context(config)).await.is_empty());
    }
}
