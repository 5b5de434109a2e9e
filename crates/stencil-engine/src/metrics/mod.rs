//! Metrics aggregation and the compliance gate.

/// Compliance gate.
pub mod compliance;
/// Quality and performance figures.
pub mod quality;

pub use compliance::{COMPLIANCE_THRESHOLD, ComplianceChecks, ComplianceStatus};
pub use quality::{DimensionSummary, PerformanceMetrics, QualityMetrics};
