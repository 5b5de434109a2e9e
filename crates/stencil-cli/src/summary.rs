//! Console summary printed after a run.

use std::fmt::Write as _;

use stencil_engine::RunOutcome;

/// Renders the end-of-run summary shown on stdout.
pub fn render_summary(outcome: &RunOutcome) -> String {
    let metrics = &outcome.metrics;
    let compliance = &outcome.report.compliance_status;
    let performance = &outcome.report.performance_metrics;

    let mut summary = String::new();
    _ = writeln!(
        summary,
        "Template compliance: {:.1}% ({})",
        compliance.score * 100.0,
        if compliance.is_compliant {
            "compliant"
        } else {
            "not compliant"
        }
    );
    _ = writeln!(
        summary,
        "Files processed: {} in {:.1}ms",
        performance.files_processed, performance.total_duration_ms
    );
    _ = writeln!(
        summary,
        "Templates validated: {}, schemas validated: {}",
        metrics.templates_validated(),
        metrics.schemas_validated()
    );
    _ = writeln!(
        summary,
        "Integration tests passed: {}/{}",
        metrics.integration_tests_passed(),
        outcome.report.integration_tests.len()
    );
    _ = writeln!(
        summary,
        "Warnings: {}, errors: {}",
        metrics.warnings(),
        metrics.errors()
    );
    for failure in &outcome.report.phase_failures {
        _ = writeln!(summary, "Phase failure: {failure}");
    }
    _ = writeln!(summary, "JSON report: {}", outcome.json_path.display());
    _ = writeln!(summary, "Markdown report: {}", outcome.markdown_path.display());
    _ = writeln!(
        summary,
        "Result: {}",
        if outcome.success { "PASSED" } else { "FAILED" }
    );

    summary
}
