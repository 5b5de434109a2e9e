//! Core types for the stencil template compliance engine.
//!
//! This crate provides the shared data model, error handling, configuration
//! and run-scoped counters used by the validation engine and its CLI.
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

/// Engine configuration.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Run-scoped counters.
pub mod metrics;
/// Documents and result records.
pub mod types;

pub use config::{
    CONFIG_FILE_NAME, DiscoveryConfig, IntegrationConfig, PerformanceConfig, ReportConfig,
    StandardsConfig, StencilConfig,
};
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use types::{
    Document, DocumentType, IntegrationKind, IntegrationStatus, IntegrationTestResult,
    ValidationKind, ValidationResult, ValidationStatus, display_path, relative_display,
};
