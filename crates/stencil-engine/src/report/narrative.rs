use std::fmt::Write as _;

use stencil_core::ValidationStatus;

use super::Report;

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

const fn mark(passed: bool) -> &'static str {
    if passed { "PASS" } else { "FAIL" }
}

fn summary_section(report: &Report) -> String {
    let summary = &report.summary;
    let compliance = &report.compliance_status;

    let mut section = String::from("## Executive Summary\n\n");
    _ = writeln!(
        section,
        "**Compliance**: {} ({})\n",
        percent(compliance.score),
        if compliance.is_compliant {
            "compliant"
        } else {
            "not compliant"
        }
    );
    section.push_str("| Metric | Value |\n");
    section.push_str("|--------|-------|\n");
    _ = writeln!(section, "| Templates validated | {} |", summary.templates_validated());
    _ = writeln!(section, "| Schemas validated | {} |", summary.schemas_validated());
    _ = writeln!(
        section,
        "| Integration tests passed | {} |",
        summary.integration_tests_passed()
    );
    _ = writeln!(
        section,
        "| Compliance checks passed | {} |",
        summary.compliance_checks_passed()
    );
    _ = writeln!(section, "| Warnings | {} |", summary.warnings());
    _ = writeln!(section, "| Errors | {} |\n", summary.errors());

    section
}

fn quality_section(report: &Report) -> String {
    let quality = &report.quality_metrics;

    let mut section = String::from("## Quality Metrics\n\n");
    section.push_str("| Metric | Value |\n");
    section.push_str("|--------|-------|\n");
    _ = writeln!(section, "| Overall score | {} |", percent(quality.overall_score));
    _ = writeln!(
        section,
        "| Validation coverage | {} |",
        percent(quality.validation_coverage)
    );
    _ = writeln!(section, "| Compliance rate | {} |", percent(quality.compliance_rate));
    _ = writeln!(
        section,
        "| Integration success | {} |\n",
        percent(quality.integration_success)
    );

    section.push_str("| Dimension | Average | Below floor |\n");
    section.push_str("|-----------|---------|-------------|\n");
    for summary in &quality.dimensions {
        _ = writeln!(
            section,
            "| {} | {} | {} |",
            summary.dimension.as_str(),
            percent(summary.average_score),
            summary.below_floor
        );
    }
    section.push('\n');

    section
}

fn performance_section(report: &Report) -> String {
    let performance = &report.performance_metrics;
    let checks = &report.compliance_status.checks;

    let mut section = String::from("## Performance\n\n");
    section.push_str("| Metric | Value |\n");
    section.push_str("|--------|-------|\n");
    _ = writeln!(section, "| Files processed | {} |", performance.files_processed);
    _ = writeln!(section, "| Total duration | {:.1}ms |", performance.total_duration_ms);
    _ = writeln!(section, "| Average per file | {:.2}ms |", performance.average_file_ms);
    _ = writeln!(
        section,
        "| Throughput | {:.1} files/s |\n",
        performance.throughput_files_per_sec
    );

    section.push_str("## Compliance Checks\n\n");
    section.push_str("| Check | Result |\n");
    section.push_str("|-------|--------|\n");
    _ = writeln!(section, "| Structural | {} |", mark(checks.structural_compliance));
    _ = writeln!(
        section,
        "| Content standards | {} |",
        mark(checks.content_standards_compliance)
    );
    _ = writeln!(section, "| Integration | {} |", mark(checks.integration_compliance));
    _ = writeln!(section, "| Performance | {} |\n", mark(checks.performance_compliance));

    section
}

fn recommendations_section(report: &Report) -> String {
    let mut section = String::from("## Recommendations\n\n");
    if report.recommendations.is_empty() {
        section.push_str("No recommendations.\n\n");
        return section;
    }

    for recommendation in &report.recommendations {
        _ = writeln!(
            section,
            "- **[{}] {}** ({}): {}",
            recommendation.priority,
            recommendation.title,
            recommendation.count,
            recommendation.description
        );
    }
    section.push('\n');

    section
}

fn findings_section(report: &Report) -> String {
    let mut section = String::new();

    if !report.phase_failures.is_empty() {
        section.push_str("## Phase Failures\n\n");
        for failure in &report.phase_failures {
            _ = writeln!(section, "- {failure}");
        }
        section.push('\n');
    }

    let flagged: Vec<_> = report
        .validation_results
        .iter()
        .filter(|result| result.status != ValidationStatus::Passed)
        .collect();
    if !flagged.is_empty() {
        section.push_str("## Validation Findings\n\n");
        for result in flagged {
            _ = writeln!(section, "### `{}` ({})\n", result.file, result.status.as_str());
            _ = writeln!(section, "{}\n", result.message);
            for issue in &result.issues {
                _ = writeln!(section, "- {issue}");
            }
            if !result.issues.is_empty() {
                section.push('\n');
            }
        }
    }

    if !report.integration_tests.is_empty() {
        section.push_str("## Integration Tests\n\n");
        section.push_str("| Probe | Target | Status | Failed checks |\n");
        section.push_str("|-------|--------|--------|---------------|\n");
        for test in &report.integration_tests {
            _ = writeln!(
                section,
                "| {} | `{}` | {} | {} |",
                test.kind.as_str(),
                test.name,
                test.status.as_str(),
                test.failed_checks.join(", ")
            );
        }
        section.push('\n');
    }

    section
}

/// Renders the narrative report.
pub fn render_markdown(report: &Report) -> String {
    let mut markdown = String::from("# Template Compliance Report\n\n");
    _ = writeln!(markdown, "_Generated {}_\n", report.timestamp);

    markdown.push_str(&summary_section(report));
    markdown.push_str(&quality_section(report));
    markdown.push_str(&performance_section(report));
    markdown.push_str(&recommendations_section(report));
    markdown.push_str(&findings_section(report));

    markdown
}
