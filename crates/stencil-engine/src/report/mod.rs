//! Structured and narrative reports for a finished run.

/// Human-readable markdown rendering.
pub mod narrative;
/// Recommendation derivation.
pub mod recommendations;
/// Report persistence.
pub mod writer;

pub use narrative::render_markdown;
pub use recommendations::{Category, Priority, Recommendation, recommend};
pub use writer::{ReportPaths, write_reports};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use stencil_core::{IntegrationTestResult, Metrics, PerformanceConfig, ValidationResult};

use crate::metrics::{ComplianceStatus, PerformanceMetrics, QualityMetrics};
use crate::run::ValidationRun;

/// Everything a run produced. Written once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// RFC 3339 generation time
    pub timestamp: String,
    /// Counter snapshot
    pub summary: Metrics,
    /// Derived rates
    pub quality_metrics: QualityMetrics,
    /// Timing figures
    pub performance_metrics: PerformanceMetrics,
    /// Gate verdict
    pub compliance_status: ComplianceStatus,
    /// Every validation result, in insertion order
    pub validation_results: Vec<ValidationResult>,
    /// Every integration result, in insertion order
    pub integration_tests: Vec<IntegrationTestResult>,
    /// Follow-ups, at most one per category
    pub recommendations: Vec<Recommendation>,
    /// Phases that failed as a whole
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phase_failures: Vec<String>,
}

impl Report {
    /// Assembles the report from a finished run.
    pub fn build(
        run: &ValidationRun,
        generated_at: DateTime<Utc>,
        quality_metrics: QualityMetrics,
        performance_metrics: PerformanceMetrics,
        compliance_status: ComplianceStatus,
        thresholds: &PerformanceConfig,
    ) -> Self {
        let recommendations = recommend(
            run.validation_results(),
            run.integration_tests(),
            &performance_metrics,
            thresholds,
        );

        Self {
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            summary: *run.metrics(),
            quality_metrics,
            performance_metrics,
            compliance_status,
            validation_results: run.validation_results().to_vec(),
            integration_tests: run.integration_tests().to_vec(),
            recommendations,
            phase_failures: run.phase_failures().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;
    use serde_json::{Value, to_value};
    use stencil_core::{StandardsConfig, ValidationKind, ValidationStatus};

    #[test]
    fn test_report_serializes_camel_case_fields() {
        let mut run = ValidationRun::new();
        run.record_validation(ValidationResult::new(
            ValidationKind::TemplateStructure,
            "a.md",
            ValidationStatus::Error,
            "Missing required section: Role",
        ));

        let thresholds = PerformanceConfig::default();
        let performance = PerformanceMetrics::from_run(&run, &thresholds);
        let compliance = ComplianceStatus::evaluate(&run, &performance);
        let quality = QualityMetrics::from_run(&run, &StandardsConfig::default());
        let generated_at = Utc
            .with_ymd_and_hms(2026, 3, 4, 5, 6, 7)
            .single()
            .expect("valid time");

        let report = Report::build(
            &run,
            generated_at,
            quality,
            performance,
            compliance,
            &thresholds,
        );
        let value = to_value(&report).expect("serialize");

        assert_eq!(value["timestamp"], Value::from("2026-03-04T05:06:07.000Z"));
        assert_eq!(value["summary"]["errors"], Value::from(1));
        assert!(value["qualityMetrics"]["validationCoverage"].is_number());
        assert!(value["performanceMetrics"]["averageFileMs"].is_number());
        assert_eq!(value["complianceStatus"]["isCompliant"], Value::from(false));
        assert_eq!(value["validationResults"][0]["type"], Value::from("template-structure"));
        assert_eq!(value["recommendations"][0]["category"], Value::from("structure"));
        assert!(value.get("phaseFailures").is_none());
    }
}
