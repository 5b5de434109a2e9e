use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt as _;
use stencil_core::{
    DocumentType, IntegrationConfig, IntegrationKind, IntegrationStatus, IntegrationTestResult,
    Result,
};
use tokio::fs;
use tracing::debug;

use super::{BoxedProbe, ProbeContext, ProbeFamily, settle_all};

/// Declared end-to-end workflows, in report order.
const WORKFLOWS: [&str; 3] = ["chat-mode-discovery", "prompt-discovery", "service-registry"];

fn has_document(context: Arc<ProbeContext>, doc_type: DocumentType) -> BoxedProbe<bool> {
    async move { Ok(context.documents_of(doc_type).next().is_some()) }.boxed()
}

async fn has_registered_service(context: Arc<ProbeContext>) -> Result<bool> {
    if context.launchers.is_empty() {
        return Ok(false);
    }

    for registry in &context.registry_files {
        if fs::try_exists(registry).await? {
            debug!("Service registry declared at {}", registry.display());
            return Ok(true);
        }
    }
    Ok(false)
}

/// Three independent discoverability checks run concurrently.
pub struct WorkflowProbe;

#[async_trait]
impl ProbeFamily for WorkflowProbe {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::EndToEnd
    }

    fn name(&self) -> &'static str {
        "end-to-end"
    }

    fn enabled(&self, config: &IntegrationConfig) -> bool {
        config.workflows
    }

    async fn run(&self, context: Arc<ProbeContext>) -> Result<Vec<IntegrationTestResult>> {
        let probes: Vec<BoxedProbe<bool>> = vec![
            has_document(Arc::clone(&context), DocumentType::ChatMode),
            has_document(Arc::clone(&context), DocumentType::Prompt),
            has_registered_service(Arc::clone(&context)).boxed(),
        ];

        let outcomes = settle_all(probes).await;

        Ok(WORKFLOWS
            .iter()
            .zip(outcomes)
            .map(|(workflow, outcome)| match outcome {
                Ok(true) => IntegrationTestResult::new(
                    self.kind(),
                    *workflow,
                    IntegrationStatus::Passed,
                    "Workflow artifacts discoverable",
                ),
                Ok(false) => IntegrationTestResult::new(
                    self.kind(),
                    *workflow,
                    IntegrationStatus::Failed,
                    "Workflow artifacts not found",
                ),
                Err(error) => IntegrationTestResult::error(
                    self.kind(),
                    *workflow,
                    format!("Workflow check failed: {error}"),
                ),
            })
            .collect())
    }
}
