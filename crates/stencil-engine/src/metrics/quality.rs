//! Derived quality and performance figures.

use serde::{Deserialize, Serialize};
use stencil_core::{IntegrationStatus, PerformanceConfig, StandardsConfig, ValidationStatus};

use crate::run::ValidationRun;
use crate::standards::Dimension;

/// Average score and floor misses for one content dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSummary {
    /// Dimension
    pub dimension: Dimension,
    /// Mean score across scored documents; 1.0 when none were scored
    pub average_score: f64,
    /// Documents scoring below the configured floor
    pub below_floor: usize,
}

/// Rates derived from the run counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// Passed results over all validation and integration results
    pub overall_score: f64,
    /// Templates validated over templates validated plus errors
    pub validation_coverage: f64,
    /// Compliance passes over compliance passes plus warnings
    pub compliance_rate: f64,
    /// Integration passes over integration passes plus errors
    pub integration_success: f64,
    /// Per-dimension content summary, in report order
    pub dimensions: Vec<DimensionSummary>,
}

impl QualityMetrics {
    /// Folds the run into rates.
    pub fn from_run(run: &ValidationRun, standards: &StandardsConfig) -> Self {
        let metrics = run.metrics();

        let total = run.validation_results().len() + run.integration_tests().len();
        let passed = run
            .validation_results()
            .iter()
            .filter(|result| result.status == ValidationStatus::Passed)
            .count()
            + run
                .integration_tests()
                .iter()
                .filter(|result| result.status == IntegrationStatus::Passed)
                .count();

        Self {
            overall_score: ratio(passed, total),
            validation_coverage: ratio(
                metrics.templates_validated(),
                (metrics.templates_validated() + metrics.errors()).max(1),
            ),
            compliance_rate: ratio(
                metrics.compliance_checks_passed(),
                (metrics.compliance_checks_passed() + metrics.warnings()).max(1),
            ),
            integration_success: ratio(
                metrics.integration_tests_passed(),
                (metrics.integration_tests_passed() + metrics.errors()).max(1),
            ),
            dimensions: dimension_summaries(run, standards),
        }
    }
}

fn dimension_summaries(run: &ValidationRun, standards: &StandardsConfig) -> Vec<DimensionSummary> {
    let scored = run.content_scores();

    Dimension::ALL
        .iter()
        .map(|&dimension| {
            let scores: Vec<f64> = scored
                .iter()
                .filter_map(|report| report.score_for(dimension))
                .collect();
            let average_score = if scores.is_empty() {
                1.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            };
            let floor = dimension.floor(standards);

            DimensionSummary {
                dimension,
                average_score,
                below_floor: scores.iter().filter(|&&score| score < floor).count(),
            }
        })
        .collect()
}

/// Timing figures for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Wall time of the whole run
    pub total_duration_ms: f64,
    /// Files taken through the document phases
    pub files_processed: usize,
    /// Mean per-file processing time
    pub average_file_ms: f64,
    /// Files per second of wall time
    pub throughput_files_per_sec: f64,
    /// Whether the average is under the configured maximum
    pub meets_file_threshold: bool,
    /// Whether throughput reaches the configured minimum
    pub meets_throughput: bool,
}

impl PerformanceMetrics {
    /// Computes timing figures from the run.
    pub fn from_run(run: &ValidationRun, thresholds: &PerformanceConfig) -> Self {
        let total_duration_ms = run.elapsed().as_secs_f64() * 1000.0;
        let files_processed = run.files_processed();

        let average_file_ms = if files_processed == 0 {
            0.0
        } else {
            run.total_file_time().as_secs_f64() * 1000.0 / files_processed as f64
        };
        let throughput_files_per_sec = if files_processed == 0 || total_duration_ms <= 0.0 {
            0.0
        } else {
            files_processed as f64 / (total_duration_ms / 1000.0)
        };

        Self {
            total_duration_ms,
            files_processed,
            average_file_ms,
            throughput_files_per_sec,
            meets_file_threshold: average_file_ms < thresholds.max_file_ms,
            meets_throughput: files_processed == 0
                || throughput_files_per_sec >= thresholds.min_throughput,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::ContentStandards;
    use std::time::Duration;
    use stencil_core::{
        IntegrationKind, IntegrationTestResult, ValidationKind, ValidationResult,
    };

    #[test]
    fn test_empty_run() {
        let run = ValidationRun::new();
        let quality = QualityMetrics::from_run(&run, &StandardsConfig::default());

        assert!(quality.overall_score.abs() < f64::EPSILON);
        assert!(quality.validation_coverage.abs() < f64::EPSILON);
        assert_eq!(quality.dimensions.len(), 4);
        assert!(
            quality
                .dimensions
                .iter()
                .all(|summary| summary.below_floor == 0)
        );
    }

    #[test]
    fn test_rates() {
        let mut run = ValidationRun::new();
        run.record_validation(ValidationResult::new(
            ValidationKind::TemplateStructure,
            "a.md",
            ValidationStatus::Passed,
            "ok",
        ));
        run.record_validation(ValidationResult::new(
            ValidationKind::TemplateStructure,
            "b.md",
            ValidationStatus::Error,
            "missing",
        ));
        run.record_validation(ValidationResult::new(
            ValidationKind::ContentStandards,
            "a.md",
            ValidationStatus::Warning,
            "meh",
        ));
        run.record_integration(IntegrationTestResult::new(
            IntegrationKind::EndToEnd,
            "prompt-discovery",
            IntegrationStatus::Passed,
            "ok",
        ));

        let quality = QualityMetrics::from_run(&run, &StandardsConfig::default());

        assert!((quality.overall_score - 0.5).abs() < 1e-9);
        assert!((quality.validation_coverage - 0.5).abs() < 1e-9);
        assert!(quality.compliance_rate.abs() < 1e-9);
        assert!((quality.integration_success - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_averages_and_floor_counts() {
        let standards = ContentStandards::new();
        let mut run = ValidationRun::new();
        run.record_content_scores(standards.evaluate("# Title\n\nClean text.\n"));
        run.record_content_scores(
            standards.evaluate("# Title\n\n```\nx\n```\n\n```\ny\n```\n\n```\nz\n```\n"),
        );

        let quality = QualityMetrics::from_run(&run, &StandardsConfig::default());
        let formatting = quality
            .dimensions
            .iter()
            .find(|summary| summary.dimension == Dimension::Formatting)
            .expect("formatting");

        assert!((formatting.average_score - 0.85).abs() < 1e-9);
        assert_eq!(formatting.below_floor, 1);
    }

    #[test]
    fn test_performance_figures() {
        let mut run = ValidationRun::new();
        run.set_files_processed(2);
        run.record_file_time("a.md", Duration::from_millis(4));
        run.record_file_time("b.md", Duration::from_millis(6));

        let performance = PerformanceMetrics::from_run(&run, &PerformanceConfig::default());

        assert_eq!(performance.files_processed, 2);
        assert!((performance.average_file_ms - 5.0).abs() < 1e-6);
        assert!(performance.meets_file_threshold);
        assert!(performance.total_duration_ms >= 0.0);
    }

    #[test]
    fn test_slow_files_miss_threshold() {
        let mut run = ValidationRun::new();
        run.set_files_processed(1);
        run.record_file_time("slow.md", Duration::from_millis(250));

        let performance = PerformanceMetrics::from_run(&run, &PerformanceConfig::default());
        assert!(!performance.meets_file_threshold);
    }
}
