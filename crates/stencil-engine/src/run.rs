//! State owned by a single validation run.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use stencil_core::{
    IntegrationStatus, IntegrationTestResult, Metrics, ValidationKind, ValidationResult,
    ValidationStatus,
};

use crate::standards::ContentStandardsReport;

/// Results and counters for one run.
///
/// Created fresh by every [`crate::ValidationEngine::run`] call and threaded
/// through each phase; nothing here outlives the run.
#[derive(Debug)]
pub struct ValidationRun {
    metrics: Metrics,
    validation_results: Vec<ValidationResult>,
    integration_tests: Vec<IntegrationTestResult>,
    content_scores: Vec<ContentStandardsReport>,
    phase_failures: Vec<String>,
    file_times: HashMap<String, Duration>,
    files_processed: usize,
    started: Instant,
}

impl ValidationRun {
    /// Starts a run with zeroed counters.
    pub fn new() -> Self {
        Self {
            metrics: Metrics::new(),
            validation_results: Vec::new(),
            integration_tests: Vec::new(),
            content_scores: Vec::new(),
            phase_failures: Vec::new(),
            file_times: HashMap::new(),
            files_processed: 0,
            started: Instant::now(),
        }
    }

    /// Appends a validation result and updates the counters for its status.
    pub fn record_validation(&mut self, result: ValidationResult) {
        match (result.kind, result.status) {
            (ValidationKind::TemplateStructure, ValidationStatus::Passed) => {
                self.metrics.record_template_validated();
            }
            (ValidationKind::ContentStandards, ValidationStatus::Passed) => {
                self.metrics.record_compliance_passed();
            }
            (_, ValidationStatus::Warning) => self.metrics.record_warning(),
            (_, ValidationStatus::Error) => self.metrics.record_error(),
        }
        self.validation_results.push(result);
    }

    /// Appends an integration result; anything but `passed` counts as an error.
    pub fn record_integration(&mut self, result: IntegrationTestResult) {
        match result.status {
            IntegrationStatus::Passed => self.metrics.record_integration_passed(),
            IntegrationStatus::Failed | IntegrationStatus::Error => self.metrics.record_error(),
        }
        self.integration_tests.push(result);
    }

    /// Records that a document was checked against a registered schema.
    pub fn record_schema_validated(&mut self) {
        self.metrics.record_schema_validated();
    }

    /// Keeps per-dimension scores for the quality summary.
    pub fn record_content_scores(&mut self, report: ContentStandardsReport) {
        self.content_scores.push(report);
    }

    /// Records a phase that failed as a whole.
    pub fn record_phase_failure(&mut self, phase: &str, message: impl Into<String>) {
        self.metrics.record_error();
        self.phase_failures.push(format!("{phase}: {}", message.into()));
    }

    /// Adds processing time for one file; repeated calls accumulate.
    pub fn record_file_time(&mut self, file: &str, elapsed: Duration) {
        *self.file_times.entry(file.to_owned()).or_default() += elapsed;
    }

    /// Sets the number of files taken through the document phases.
    pub fn set_files_processed(&mut self, count: usize) {
        self.files_processed = count;
    }

    /// Counters so far.
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Validation results in insertion order.
    pub fn validation_results(&self) -> &[ValidationResult] {
        &self.validation_results
    }

    /// Integration results in insertion order.
    pub fn integration_tests(&self) -> &[IntegrationTestResult] {
        &self.integration_tests
    }

    /// Content-standards breakdowns in insertion order.
    pub fn content_scores(&self) -> &[ContentStandardsReport] {
        &self.content_scores
    }

    /// Phase failures in the order they occurred.
    pub fn phase_failures(&self) -> &[String] {
        &self.phase_failures
    }

    /// Files taken through the document phases.
    pub const fn files_processed(&self) -> usize {
        self.files_processed
    }

    /// Sum of per-file processing time.
    pub fn total_file_time(&self) -> Duration {
        self.file_times.values().sum()
    }

    /// Wall time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for ValidationRun {
    fn default() -> Self {
        Self::new()
    }
}
