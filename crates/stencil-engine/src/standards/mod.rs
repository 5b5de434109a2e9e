//! Content-standards scoring for markdown documents.
//!
//! Four independent heuristics each start from a perfect score and subtract
//! fixed penalties per finding. They share no state, so they can run in any
//! order.

/// Heading, image and link accessibility checks.
pub mod accessibility;
/// Code fence, list spacing and table checks.
pub mod formatting;
/// Date, currency and unit checks.
pub mod i18n;
/// Sentence length, passive voice and terminology checks.
pub mod style;

pub use accessibility::AccessibilityScorer;
pub use formatting::FormattingScorer;
pub use i18n::InternationalizationScorer;
pub use style::StyleScorer;

use serde::{Deserialize, Serialize};
use stencil_core::{StandardsConfig, ValidationStatus};

/// Aggregate score at or above which a document passes.
pub const PASS_THRESHOLD: f64 = 0.8;
/// Aggregate score at or above which a failing document is only a warning.
pub const WARNING_THRESHOLD: f64 = 0.6;

/// One content-quality dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Accessibility of headings, images and links
    Accessibility,
    /// Markdown formatting hygiene
    Formatting,
    /// Prose style
    Style,
    /// Locale neutrality
    Internationalization,
}

impl Dimension {
    /// Every dimension, in report order.
    pub const ALL: [Self; 4] = [
        Self::Accessibility,
        Self::Formatting,
        Self::Style,
        Self::Internationalization,
    ];

    /// Display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accessibility => "accessibility",
            Self::Formatting => "formatting",
            Self::Style => "style",
            Self::Internationalization => "internationalization",
        }
    }

    /// Configured floor for the dimension.
    pub const fn floor(self, config: &StandardsConfig) -> f64 {
        match self {
            Self::Accessibility => config.min_accessibility,
            Self::Formatting => config.min_formatting,
            Self::Style => config.min_style,
            Self::Internationalization => config.min_internationalization,
        }
    }
}

/// Score and findings for one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Findings, in detection order
    pub issues: Vec<String>,
}

/// Accumulates penalties; the final score never drops below zero.
#[derive(Debug, Clone)]
pub(crate) struct ScoreCard {
    score: f64,
    issues: Vec<String>,
}

impl ScoreCard {
    pub(crate) const fn new() -> Self {
        Self {
            score: 1.0,
            issues: Vec::new(),
        }
    }

    pub(crate) fn penalize(&mut self, amount: f64, issue: impl Into<String>) {
        self.score -= amount;
        self.issues.push(issue.into());
    }

    pub(crate) fn finish(self) -> DimensionScore {
        DimensionScore {
            score: self.score.max(0.0),
            issues: self.issues,
        }
    }
}

/// A pure `(text) -> score` heuristic.
pub trait StandardsScorer: Send + Sync {
    /// Dimension this scorer measures.
    fn dimension(&self) -> Dimension;

    /// Scores raw markdown text.
    fn score(&self, text: &str) -> DimensionScore;
}

/// Scores for all four dimensions of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStandardsReport {
    /// Per-dimension scores, in [`Dimension::ALL`] order
    pub dimensions: Vec<(Dimension, DimensionScore)>,
    /// Mean of the four dimension scores
    pub overall_score: f64,
}

impl ContentStandardsReport {
    /// All findings, concatenated in dimension order.
    pub fn issues(&self) -> Vec<String> {
        self.dimensions
            .iter()
            .flat_map(|(_, dimension)| dimension.issues.iter().cloned())
            .collect()
    }

    /// Score for one dimension.
    pub fn score_for(&self, dimension: Dimension) -> Option<f64> {
        self.dimensions
            .iter()
            .find(|(candidate, _)| *candidate == dimension)
            .map(|(_, scored)| scored.score)
    }

    /// Gate status for the aggregate score.
    pub fn status(&self) -> ValidationStatus {
        if self.overall_score >= PASS_THRESHOLD {
            ValidationStatus::Passed
        } else if self.overall_score >= WARNING_THRESHOLD {
            ValidationStatus::Warning
        } else {
            ValidationStatus::Error
        }
    }

    /// Dimensions scoring below their configured floor.
    pub fn below_floor(&self, config: &StandardsConfig) -> Vec<Dimension> {
        self.dimensions
            .iter()
            .filter(|(dimension, scored)| scored.score < dimension.floor(config))
            .map(|(dimension, _)| *dimension)
            .collect()
    }
}

/// The four built-in scorers.
pub struct ContentStandards {
    scorers: Vec<Box<dyn StandardsScorer>>,
}

impl ContentStandards {
    /// Creates the evaluator with every built-in scorer.
    pub fn new() -> Self {
        Self {
            scorers: vec![
                Box::new(AccessibilityScorer),
                Box::new(FormattingScorer),
                Box::new(StyleScorer),
                Box::new(InternationalizationScorer),
            ],
        }
    }

    /// Runs every scorer over `text`.
    pub fn evaluate(&self, text: &str) -> ContentStandardsReport {
        let dimensions: Vec<_> = self
            .scorers
            .iter()
            .map(|scorer| (scorer.dimension(), scorer.score(text)))
            .collect();

        let overall_score = if dimensions.is_empty() {
            1.0
        } else {
            dimensions.iter().map(|(_, scored)| scored.score).sum::<f64>()
                / dimensions.len() as f64
        };

        ContentStandardsReport {
            dimensions,
            overall_score,
        }
    }
}

impl Default for ContentStandards {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_document_passes() {
        let text = "# Guide\n\n## Setup\n\nInstall the tool.\n\n## Usage\n\nRun it daily.\n";
        let report = ContentStandards::new().evaluate(text);

        assert!((report.overall_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.status(), ValidationStatus::Passed);
        assert!(report.issues().is_empty());
    }

    #[test]
    fn test_empty_alt_and_untagged_fence_scenario() {
        let text = "# Guide\n\n## Screens\n\n![](shot.png)\n\n```\nrun\n```\n";
        let report = ContentStandards::new().evaluate(text);

        let accessibility = report.score_for(Dimension::Accessibility).expect("score");
        let formatting = report.score_for(Dimension::Formatting).expect("score");
        assert!((accessibility - 0.9).abs() < 1e-9);
        assert!((formatting - 0.9).abs() < 1e-9);
        assert!((report.score_for(Dimension::Style).expect("score") - 1.0).abs() < 1e-9);
        assert!(
            (report
                .score_for(Dimension::Internationalization)
                .expect("score")
                - 1.0)
                .abs()
                < 1e-9
        );
        assert!((report.overall_score - 0.95).abs() < 1e-9);
        assert_eq!(report.status(), ValidationStatus::Passed);
        assert_eq!(report.issues().len(), 2);
    }

    #[test]
    fn test_status_thresholds() {
        let make = |overall_score| ContentStandardsReport {
            dimensions: Vec::new(),
            overall_score,
        };
        assert_eq!(make(0.8).status(), ValidationStatus::Passed);
        assert_eq!(make(0.79).status(), ValidationStatus::Warning);
        assert_eq!(make(0.6).status(), ValidationStatus::Warning);
        assert_eq!(make(0.59).status(), ValidationStatus::Error);
    }

    #[test]
    fn test_score_card_floors_at_zero() {
        let mut card = ScoreCard::new();
        for index in 0..30 {
            card.penalize(0.1, format!("issue {index}"));
        }
        let scored = card.finish();
        assert!(scored.score.abs() < f64::EPSILON);
        assert_eq!(scored.issues.len(), 30);
    }

    #[test]
    fn test_below_floor() {
        let text = "# Guide\n\n## Screens\n\n![](a.png)\n![](b.png)\n![](c.png)\n";
        let report = ContentStandards::new().evaluate(text);
        let config = StandardsConfig::default();

        assert_eq!(report.below_floor(&config), vec![Dimension::Accessibility]);
    }
}
