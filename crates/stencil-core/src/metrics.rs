//! Run-scoped counters.
//!
//! Counters only ever grow within a run. A fresh [`Metrics`] is created for
//! every run; nothing is shared between runs.

use serde::{Deserialize, Serialize};

/// Counters incremented by each phase as results are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    templates_validated: usize,
    schemas_validated: usize,
    integration_tests_passed: usize,
    compliance_checks_passed: usize,
    warnings: usize,
    errors: usize,
}

impl Metrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents that passed structural validation.
    pub const fn templates_validated(&self) -> usize {
        self.templates_validated
    }

    /// Documents checked against a registered schema.
    pub const fn schemas_validated(&self) -> usize {
        self.schemas_validated
    }

    /// Integration probes that passed.
    pub const fn integration_tests_passed(&self) -> usize {
        self.integration_tests_passed
    }

    /// Documents that passed the content-standards gate.
    pub const fn compliance_checks_passed(&self) -> usize {
        self.compliance_checks_passed
    }

    /// Warnings recorded so far.
    pub const fn warnings(&self) -> usize {
        self.warnings
    }

    /// Errors recorded so far.
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// Records a structurally valid document.
    pub fn record_template_validated(&mut self) {
        self.templates_validated += 1;
    }

    /// Records a schema check.
    pub fn record_schema_validated(&mut self) {
        self.schemas_validated += 1;
    }

    /// Records a passing integration probe.
    pub fn record_integration_passed(&mut self) {
        self.integration_tests_passed += 1;
    }

    /// Records a document that passed the content-standards gate.
    pub fn record_compliance_passed(&mut self) {
        self.compliance_checks_passed += 1;
    }

    /// Records a warning.
    pub fn record_warning(&mut self) {
        self.warnings += 1;
    }

    /// Records an error.
    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Whether the run is free of errors, and of warnings under strict mode.
    pub const fn is_success(&self, strict: bool) -> bool {
        self.errors == 0 && (!strict || self.warnings == 0)
    }
}
