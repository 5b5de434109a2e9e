//! Template compliance validation engine.
//!
//! A run discovers documents under the configured search paths, classifies
//! them, validates their structure against per-type schemas, scores markdown
//! content, probes collaborator artifacts, aggregates metrics, applies the
//! compliance gate and persists a structured and a narrative report.
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

/// Corpus enumeration.
pub mod discovery;
/// Phase pipeline.
pub mod engine;
/// Integration probes.
pub mod integration;
/// Markdown line helpers.
pub mod markdown;
/// Metrics aggregation and compliance gate.
pub mod metrics;
/// Report generation and persistence.
pub mod report;
/// Run-scoped state.
pub mod run;
/// Schemas and classification.
pub mod schema;
/// Content-standards scorers.
pub mod standards;
/// Structural validation.
pub mod structural;

pub use engine::{RunOutcome, ValidationEngine};
pub use integration::{IntegrationOrchestrator, ProbeContext, ProbeFamily, settle_all};
pub use metrics::{ComplianceStatus, PerformanceMetrics, QualityMetrics};
pub use report::{Recommendation, Report};
pub use run::ValidationRun;
pub use schema::{RegistryEntry, Schema, SchemaRegistry, Section, classify};
pub use standards::{ContentStandards, ContentStandardsReport, Dimension, StandardsScorer};
pub use structural::StructuralReport;
