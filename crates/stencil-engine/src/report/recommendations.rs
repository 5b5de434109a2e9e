//! Recommendations derived from accumulated results.

use core::fmt;

use serde::{Deserialize, Serialize};
use stencil_core::{
    IntegrationStatus, IntegrationTestResult, PerformanceConfig, ValidationKind,
    ValidationResult, ValidationStatus,
};

use crate::metrics::PerformanceMetrics;

/// Area a recommendation addresses. At most one recommendation per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Schema and section structure
    Structure,
    /// Content-standards scores
    ContentQuality,
    /// Integration probes
    Integration,
    /// Processing time
    Performance,
}

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Blocks compliance
    High,
    /// Degrades quality
    Medium,
    /// Worth a look
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        })
    }
}

/// One actionable follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Area addressed
    pub category: Category,
    /// Urgency
    pub priority: Priority,
    /// Short title
    pub title: String,
    /// What to do
    pub description: String,
    /// Number of results behind the recommendation
    pub count: usize,
}

/// Builds at most one recommendation per category, in category order.
pub fn recommend(
    validation_results: &[ValidationResult],
    integration_tests: &[IntegrationTestResult],
    performance: &PerformanceMetrics,
    thresholds: &PerformanceConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let structural_errors = validation_results
        .iter()
        .filter(|result| {
            result.kind == ValidationKind::TemplateStructure
                && result.status == ValidationStatus::Error
        })
        .count();
    if structural_errors > 0 {
        recommendations.push(Recommendation {
            category: Category::Structure,
            priority: Priority::High,
            title: "Review template schemas".to_owned(),
            description: format!(
                "{structural_errors} document(s) failed structural validation. Add the missing required sections or fix the invalid JSON."
            ),
            count: structural_errors,
        });
    }

    let content_issues = validation_results
        .iter()
        .filter(|result| {
            result.kind == ValidationKind::ContentStandards
                && result.status != ValidationStatus::Passed
        })
        .count();
    if content_issues > 0 {
        recommendations.push(Recommendation {
            category: Category::ContentQuality,
            priority: Priority::Medium,
            title: "Improve content clarity and accessibility".to_owned(),
            description: format!(
                "{content_issues} document(s) scored below the content-standards pass mark. Address the listed accessibility, formatting, style and localization issues."
            ),
            count: content_issues,
        });
    }

    let integration_failures = integration_tests
        .iter()
        .filter(|result| result.status != IntegrationStatus::Passed)
        .count();
    if integration_failures > 0 {
        recommendations.push(Recommendation {
            category: Category::Integration,
            priority: Priority::High,
            title: "Fix integration issues".to_owned(),
            description: format!(
                "{integration_failures} integration probe(s) failed or could not run. Check the failed checks on each probe."
            ),
            count: integration_failures,
        });
    }

    if performance.average_file_ms > thresholds.max_file_ms {
        recommendations.push(Recommendation {
            category: Category::Performance,
            priority: Priority::Low,
            title: "Reduce per-file processing time".to_owned(),
            description: format!(
                "Average processing time was {:.1}ms per file, above the {:.0}ms threshold.",
                performance.average_file_ms, thresholds.max_file_ms
            ),
            count: performance.files_processed,
        });
    }

    recommendations
}
