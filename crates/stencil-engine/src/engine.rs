//! Phase pipeline for a single validation run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use stencil_core::{
    Document, Metrics, Result, StencilConfig, ValidationKind, ValidationResult, ValidationStatus,
    relative_display,
};
use tracing::{debug, info, warn};

use crate::discovery::{discover_blocking, read_batch};
use crate::integration::service::locate_service_launchers;
use crate::integration::{IntegrationOrchestrator, ProbeContext};
use crate::metrics::{ComplianceStatus, PerformanceMetrics, QualityMetrics};
use crate::report::{Report, write_reports};
use crate::run::ValidationRun;
use crate::schema::{SchemaRegistry, classify};
use crate::standards::ContentStandards;
use crate::structural;

/// Issues quoted in a content-standards warning message.
const WARNING_ISSUE_PREVIEW: usize = 3;
/// Issues quoted in a content-standards error message.
const ERROR_ISSUE_PREVIEW: usize = 5;

/// What a finished run hands back to its caller.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// No errors, and no warnings under strict mode
    pub success: bool,
    /// Final counters
    pub metrics: Metrics,
    /// The persisted report
    pub report: Report,
    /// Structured report location
    pub json_path: PathBuf,
    /// Narrative report location
    pub markdown_path: PathBuf,
}

/// Validates a template corpus and writes the reports.
pub struct ValidationEngine {
    config: StencilConfig,
    registry: SchemaRegistry,
    standards: ContentStandards,
    orchestrator: IntegrationOrchestrator,
}

impl ValidationEngine {
    /// Engine with the built-in schemas, scorers and probes.
    pub fn new(config: StencilConfig) -> Self {
        Self {
            config,
            registry: SchemaRegistry::builtin(),
            standards: ContentStandards::new(),
            orchestrator: IntegrationOrchestrator::with_default_families(),
        }
    }

    /// Replaces the schema registry.
    #[must_use]
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the integration probe families.
    #[must_use]
    pub fn with_orchestrator(mut self, orchestrator: IntegrationOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    /// Active configuration.
    pub const fn config(&self) -> &StencilConfig {
        &self.config
    }

    /// Runs every phase in order and persists the reports.
    ///
    /// Per-document, per-probe and phase-level failures are recorded in the
    /// report and never abort the run.
    ///
    /// # Errors
    /// Returns an error only if the reports cannot be written.
    pub async fn run(&self) -> Result<RunOutcome> {
        let mut run = ValidationRun::new();
        info!(
            "Starting validation run over {} search path(s)",
            self.config.discovery.search_paths.len()
        );

        let files = self.discovery_phase(&mut run).await;
        run.set_files_processed(files.len());

        let documents = self.classification_phase(&files, &mut run).await;
        self.structural_phase(&documents, &mut run).await;
        self.content_phase(&documents, &mut run).await;
        self.integration_phase(documents, &mut run).await;

        let quality = QualityMetrics::from_run(&run, &self.config.standards);
        let performance = PerformanceMetrics::from_run(&run, &self.config.performance);
        let compliance = ComplianceStatus::evaluate(&run, &performance);
        info!(
            "Compliance score {:.2} ({})",
            compliance.score,
            if compliance.is_compliant {
                "compliant"
            } else {
                "not compliant"
            }
        );

        let generated_at = Utc::now();
        let report = Report::build(
            &run,
            generated_at,
            quality,
            performance,
            compliance,
            &self.config.performance,
        );
        let paths = write_reports(
            &report,
            &self.config.resolved_output_dir(),
            &self.config.report.file_stem,
            generated_at.date_naive(),
        )
        .await?;

        let metrics = *run.metrics();
        let success = metrics.is_success(self.config.strict);
        info!(
            "Validation run finished: {} error(s), {} warning(s), success={success}",
            metrics.errors(),
            metrics.warnings()
        );

        Ok(RunOutcome {
            success,
            metrics,
            report,
            json_path: paths.json,
            markdown_path: paths.markdown,
        })
    }

    fn name_of(&self, document: &Document) -> String {
        document.display_relative(&self.config.project_root)
    }

    async fn discovery_phase(&self, run: &mut ValidationRun) -> Vec<PathBuf> {
        match discover_blocking(&self.config).await {
            Ok(discovery) => {
                for failure in discovery.failures {
                    run.record_phase_failure("discovery", failure.to_string());
                }
                info!("Discovered {} file(s)", discovery.files.len());
                discovery.files
            }
            Err(error) => {
                warn!("Discovery failed: {error}");
                run.record_phase_failure("discovery", error.to_string());
                Vec::new()
            }
        }
    }

    async fn classification_phase(
        &self,
        files: &[PathBuf],
        run: &mut ValidationRun,
    ) -> Vec<Document> {
        let contents = read_batch(files).await;
        let mut documents = Vec::with_capacity(files.len());

        for (path, content) in files.iter().zip(contents) {
            match content {
                Ok(content) => {
                    let doc_type = classify(path, &content);
                    debug!("Classified {} as {doc_type}", path.display());
                    documents.push(Document::new(path.clone(), doc_type));
                }
                Err(error) => {
                    warn!("Cannot read {}: {error}", path.display());
                    run.record_validation(ValidationResult::new(
                        ValidationKind::TemplateStructure,
                        relative_display(path, &self.config.project_root),
                        ValidationStatus::Error,
                        format!("Failed to read file: {error}"),
                    ));
                }
            }
        }

        documents
    }

    async fn structural_phase(&self, documents: &[Document], run: &mut ValidationRun) {
        info!("Validating structure of {} document(s)", documents.len());
        let paths: Vec<_> = documents.iter().map(|document| document.path.clone()).collect();
        let contents = read_batch(&paths).await;

        for (document, content) in documents.iter().zip(contents) {
            let name = self.name_of(document);
            let started = Instant::now();

            let result = match content {
                Err(error) => ValidationResult::new(
                    ValidationKind::TemplateStructure,
                    name.clone(),
                    ValidationStatus::Error,
                    format!("Failed to read file: {error}"),
                ),
                Ok(content) => match self.registry.get_schema(document.doc_type) {
                    None => ValidationResult::new(
                        ValidationKind::TemplateStructure,
                        name.clone(),
                        ValidationStatus::Warning,
                        format!("Unrecognized document type: {}", document.doc_type),
                    ),
                    Some(schema) => {
                        run.record_schema_validated();
                        let checked = structural::validate(&content, schema);
                        let (status, message) = if checked.is_valid {
                            (
                                ValidationStatus::Passed,
                                format!("Valid {} structure", document.doc_type),
                            )
                        } else {
                            (
                                ValidationStatus::Error,
                                format!(
                                    "Invalid {} structure: {} error(s)",
                                    document.doc_type,
                                    checked.errors.len()
                                ),
                            )
                        };

                        let issues = checked
                            .errors
                            .into_iter()
                            .chain(checked.warnings)
                            .collect();
                        let result = ValidationResult::new(
                            ValidationKind::TemplateStructure,
                            name.clone(),
                            status,
                            message,
                        )
                        .with_issues(issues)
                        .with_optional_sections(checked.optional_found);
                        match checked.coverage {
                            Some(coverage) => result.with_score(coverage),
                            None => result,
                        }
                    }
                },
            };

            debug!("{name}: structure {}", result.status.as_str());
            run.record_file_time(&name, started.elapsed());
            run.record_validation(result);
        }
    }

    async fn content_phase(&self, documents: &[Document], run: &mut ValidationRun) {
        let scored: Vec<&Document> = documents
            .iter()
            .filter(|document| {
                document.is_markdown() && self.registry.scorers_applicable(document.doc_type)
            })
            .collect();
        info!("Scoring content standards for {} document(s)", scored.len());

        let paths: Vec<_> = scored.iter().map(|document| document.path.clone()).collect();
        let contents = read_batch(&paths).await;

        for (document, content) in scored.into_iter().zip(contents) {
            let name = self.name_of(document);
            let started = Instant::now();

            let content = match content {
                Ok(content) => content,
                Err(error) => {
                    run.record_validation(ValidationResult::new(
                        ValidationKind::ContentStandards,
                        name,
                        ValidationStatus::Error,
                        format!("Failed to read file: {error}"),
                    ));
                    continue;
                }
            };

            let evaluation = self.standards.evaluate(&content);
            let status = evaluation.status();
            let issues = evaluation.issues();
            let message = match status {
                ValidationStatus::Passed => format!(
                    "Content standards met (score {:.2})",
                    evaluation.overall_score
                ),
                ValidationStatus::Warning => format!(
                    "Content standards need improvement (score {:.2}): {}",
                    evaluation.overall_score,
                    preview(&issues, WARNING_ISSUE_PREVIEW)
                ),
                ValidationStatus::Error => format!(
                    "Content standards not met (score {:.2}): {}",
                    evaluation.overall_score,
                    preview(&issues, ERROR_ISSUE_PREVIEW)
                ),
            };

            let below_floor = evaluation.below_floor(&self.config.standards);
            if !below_floor.is_empty() {
                debug!(
                    "{name}: below floor in {}",
                    below_floor
                        .iter()
                        .map(|dimension| dimension.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            let result = ValidationResult::new(
                ValidationKind::ContentStandards,
                name.clone(),
                status,
                message,
            )
            .with_issues(issues)
            .with_score(evaluation.overall_score);

            run.record_file_time(&name, started.elapsed());
            run.record_content_scores(evaluation);
            run.record_validation(result);
        }
    }

    async fn integration_phase(&self, documents: Vec<Document>, run: &mut ValidationRun) {
        info!("Running integration probes");
        let search_paths = self.config.resolved_search_paths();
        let integration = &self.config.integration;
        let launchers = if integration.service_artifacts || integration.workflows {
            locate_service_launchers(search_paths.clone(), integration.clone())
                .await
                .unwrap_or_else(|error| {
                    warn!("Launcher search failed: {error}");
                    run.record_phase_failure("integration", error.to_string());
                    Vec::new()
                })
        } else {
            Vec::new()
        };
        debug!("Located {} service launcher(s)", launchers.len());

        let context = Arc::new(ProbeContext {
            project_root: self.config.project_root.clone(),
            search_paths,
            registry_files: self.config.resolved_registry_files(),
            launchers,
            documents,
            config: integration.clone(),
        });

        let results = self.orchestrator.run(context).await;
        info!("Integration probes produced {} result(s)", results.len());
        for result in results {
            run.record_integration(result);
        }
    }
}

fn preview(issues: &[String], limit: usize) -> String {
    issues
        .iter()
        .take(limit)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ")
}
