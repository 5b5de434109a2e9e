//! Final pass/fail gate over four aggregate checks.

use serde::{Deserialize, Serialize};
use stencil_core::{IntegrationStatus, ValidationKind, ValidationStatus};

use super::PerformanceMetrics;
use crate::run::ValidationRun;

/// Score at or above which the corpus is compliant.
pub const COMPLIANCE_THRESHOLD: f64 = 0.75;

/// The four gate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceChecks {
    /// At least one structural result passed
    pub structural_compliance: bool,
    /// At least one content-standards result passed
    pub content_standards_compliance: bool,
    /// At least one integration probe passed
    pub integration_compliance: bool,
    /// Average per-file time is under the threshold
    pub performance_compliance: bool,
}

impl ComplianceChecks {
    fn passed(&self) -> usize {
        [
            self.structural_compliance,
            self.content_standards_compliance,
            self.integration_compliance,
            self.performance_compliance,
        ]
        .iter()
        .filter(|&&check| check)
        .count()
    }
}

/// Verdict of the compliance gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    /// Fraction of checks that hold
    pub score: f64,
    /// Individual checks
    pub checks: ComplianceChecks,
    /// Whether the score reaches [`COMPLIANCE_THRESHOLD`]
    pub is_compliant: bool,
}

impl ComplianceStatus {
    /// Evaluates the gate once all phases have finished.
    pub fn evaluate(run: &ValidationRun, performance: &PerformanceMetrics) -> Self {
        let any_passed = |kind: ValidationKind| {
            run.validation_results()
                .iter()
                .any(|result| result.kind == kind && result.status == ValidationStatus::Passed)
        };

        let checks = ComplianceChecks {
            structural_compliance: any_passed(ValidationKind::TemplateStructure),
            content_standards_compliance: any_passed(ValidationKind::ContentStandards),
            integration_compliance: run
                .integration_tests()
                .iter()
                .any(|result| result.status == IntegrationStatus::Passed),
            performance_compliance: performance.meets_file_threshold,
        };

        let score = checks.passed() as f64 / 4.0;
        Self {
            score,
            checks,
            is_compliant: score >= COMPLIANCE_THRESHOLD,
        }
    }
}
