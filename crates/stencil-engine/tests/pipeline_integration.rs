//! End-to-end runs of the validation engine over small on-disk corpora.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::tests_outside_test_module,
        clippy::too_many_lines,
        reason = "Test allows"
    )
)]

use std::fs;
use std::path::{Path, PathBuf};

use stencil_core::{
    IntegrationKind, IntegrationStatus, StencilConfig, ValidationKind, ValidationStatus,
};
use stencil_engine::ValidationEngine;
use tempfile::TempDir;

const CHAT_MODE: &str = "# Reviewer\n\n\
## Role\n\nYou review pull requests for the team.\n\n\
## Response Style\n\nKeep your answers short and concrete.\n\n\
## Examples\n\n```text\nLooks good, but rename the helper.\n```\n\n\
## Constraints\n\nNever approve changes you have not read.\n";

const PROMPT: &str = "# Summarize\n\n\
## Description\n\nSummarizes a document in a few sentences.\n\n\
## Parameters\n\n- `text`: the document to summarize\n\n\
## Examples\n\n```text\nSummarize the release notes.\n```\n";

const BROKEN_PROMPT: &str = "# Broken\n\n## Description\n\nHas no parameters section.\n";

const SERVICE_README: &str = "# Weather MCP Server\n\n\
Serves forecasts over MCP.\n\n\
## Installation\n\n```bash\nnpm install\n```\n\n\
## API\n\n- `forecast`: returns the forecast for a city\n";

const SERVICE_LAUNCHER: &str = r#"import { Server } from "@modelcontextprotocol/sdk/server/index.js";
import { StdioServerTransport } from "@modelcontextprotocol/sdk/server/stdio.js";

const server = new Server({ name: "weather" });
server.setRequestHandler(ListToolsRequestSchema, async () => ({ tools: [] }));

async function main() {
  try {
    await server.connect(new StdioServerTransport());
  } catch (error) {
    process.exit(1);
  }
}

main();
"#;

const TEMPLATE: &str = "# {{ name }}\n\n## Overview\n\n[TODO: describe the project]\n";

fn write(root: &Path, relative: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write fixture");
}

/// A corpus where every probe family has something to check.
fn full_corpus() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    write(root, ".github/chatmodes/reviewer.chatmode.md", CHAT_MODE);
    write(root, "prompts/summarize.prompt.md", PROMPT);
    write(root, "prompts/broken.prompt.md", BROKEN_PROMPT);
    write(root, "mcp-servers/weather/README.md", SERVICE_README);
    write(root, "mcp-servers/weather/index.js", SERVICE_LAUNCHER);
    write(root, "templates/project-template.md", TEMPLATE);
    write(root, "data/settings.json", "{\"a\": 1,}");
    write(root, "mcp.json", "{\"servers\": {\"weather\": {}}}");
    dir
}

fn config_for(root: &Path) -> StencilConfig {
    StencilConfig {
        project_root: root.to_path_buf(),
        ..StencilConfig::default()
    }
}

fn structural_status(
    outcome: &stencil_engine::RunOutcome,
    file: &str,
) -> Option<ValidationStatus> {
    outcome
        .report
        .validation_results
        .iter()
        .find(|result| result.kind == ValidationKind::TemplateStructure && result.file == file)
        .map(|result| result.status)
}

fn integration_status(
    outcome: &stencil_engine::RunOutcome,
    kind: IntegrationKind,
    name: &str,
) -> Option<IntegrationStatus> {
    outcome
        .report
        .integration_tests
        .iter()
        .find(|test| test.kind == kind && test.name == name)
        .map(|test| test.status)
}

#[tokio::test]
async fn test_full_corpus_run() {
    let corpus = full_corpus();
    let outcome = ValidationEngine::new(config_for(corpus.path()))
        .run()
        .await
        .expect("run");

    assert_eq!(outcome.report.performance_metrics.files_processed, 7);
    assert_eq!(
        structural_status(&outcome, "prompts/summarize.prompt.md"),
        Some(ValidationStatus::Passed)
    );
    assert_eq!(
        structural_status(&outcome, "prompts/broken.prompt.md"),
        Some(ValidationStatus::Error)
    );
    assert_eq!(
        structural_status(&outcome, ".github/chatmodes/reviewer.chatmode.md"),
        Some(ValidationStatus::Passed)
    );
    assert_eq!(
        structural_status(&outcome, "mcp-servers/weather/README.md"),
        Some(ValidationStatus::Passed)
    );

    let settings = outcome
        .report
        .validation_results
        .iter()
        .find(|result| result.file == "data/settings.json")
        .expect("json result");
    assert_eq!(settings.status, ValidationStatus::Error);
    assert!(settings.issues.iter().any(|issue| issue.starts_with("Invalid JSON")));

    assert_eq!(
        integration_status(&outcome, IntegrationKind::McpServer, "mcp-servers/weather/index.js"),
        Some(IntegrationStatus::Passed)
    );
    assert_eq!(
        integration_status(
            &outcome,
            IntegrationKind::ChatMode,
            ".github/chatmodes/reviewer.chatmode.md"
        ),
        Some(IntegrationStatus::Passed)
    );
    assert_eq!(
        integration_status(
            &outcome,
            IntegrationKind::TemplateGeneration,
            "templates/project-template.md"
        ),
        Some(IntegrationStatus::Passed)
    );
    for workflow in ["chat-mode-discovery", "prompt-discovery", "service-registry"] {
        assert_eq!(
            integration_status(&outcome, IntegrationKind::EndToEnd, workflow),
            Some(IntegrationStatus::Passed),
            "{workflow}"
        );
    }

    assert!(!outcome.success);
    assert!(outcome.metrics.errors() >= 2);
    assert!(outcome.report.phase_failures.is_empty());
}

#[tokio::test]
async fn test_reports_are_written() {
    let corpus = full_corpus();
    let outcome = ValidationEngine::new(config_for(corpus.path()))
        .run()
        .await
        .expect("run");

    let reports = corpus.path().join("reports");
    assert!(outcome.json_path.starts_with(&reports));
    assert!(outcome.markdown_path.starts_with(&reports));

    let json = fs::read_to_string(&outcome.json_path).expect("json report");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(
        value["summary"]["errors"],
        serde_json::Value::from(outcome.metrics.errors())
    );
    assert!(value["complianceStatus"]["checks"].is_object());

    let markdown = fs::read_to_string(&outcome.markdown_path).expect("markdown report");
    assert!(markdown.starts_with("# Template Compliance Report"));
    assert!(markdown.contains("`prompts/broken.prompt.md`"));
}

#[tokio::test]
async fn test_runs_are_idempotent() {
    let corpus = full_corpus();
    let engine = ValidationEngine::new(config_for(corpus.path()));

    let first = engine.run().await.expect("first run");
    let second = engine.run().await.expect("second run");

    assert_eq!(first.report.validation_results, second.report.validation_results);
    assert_eq!(first.report.integration_tests, second.report.integration_tests);
    assert_eq!(first.metrics, second.metrics);
}

#[tokio::test]
async fn test_no_launchers_means_no_service_results() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "prompts/summarize.prompt.md", PROMPT);
    write(dir.path(), "mcp.json", "{}");

    let outcome = ValidationEngine::new(config_for(dir.path()))
        .run()
        .await
        .expect("run");

    let service_results = outcome
        .report
        .integration_tests
        .iter()
        .filter(|test| test.kind == IntegrationKind::McpServer)
        .count();
    assert_eq!(service_results, 0);
    assert_eq!(
        integration_status(&outcome, IntegrationKind::EndToEnd, "service-registry"),
        Some(IntegrationStatus::Failed)
    );
}

#[tokio::test]
async fn test_empty_prompt_directory_fails_only_prompt_workflow() {
    let corpus = full_corpus();
    fs::remove_file(corpus.path().join("prompts/summarize.prompt.md")).expect("remove");
    fs::remove_file(corpus.path().join("prompts/broken.prompt.md")).expect("remove");

    let outcome = ValidationEngine::new(config_for(corpus.path()))
        .run()
        .await
        .expect("run");

    assert_eq!(
        integration_status(&outcome, IntegrationKind::EndToEnd, "prompt-discovery"),
        Some(IntegrationStatus::Failed)
    );
    assert_eq!(
        integration_status(&outcome, IntegrationKind::EndToEnd, "chat-mode-discovery"),
        Some(IntegrationStatus::Passed)
    );
    assert_eq!(
        integration_status(&outcome, IntegrationKind::EndToEnd, "service-registry"),
        Some(IntegrationStatus::Passed)
    );
}

#[tokio::test]
async fn test_unreadable_launcher_is_isolated() {
    let corpus = full_corpus();
    write(corpus.path(), "mcp-servers/broken/server.py", [0xff_u8, 0xfe, 0xfd]);

    let outcome = ValidationEngine::new(config_for(corpus.path()))
        .run()
        .await
        .expect("run");

    assert_eq!(
        integration_status(&outcome, IntegrationKind::McpServer, "mcp-servers/broken/server.py"),
        Some(IntegrationStatus::Error)
    );
    assert_eq!(
        integration_status(&outcome, IntegrationKind::McpServer, "mcp-servers/weather/index.js"),
        Some(IntegrationStatus::Passed)
    );
    assert_eq!(
        integration_status(
            &outcome,
            IntegrationKind::ChatMode,
            ".github/chatmodes/reviewer.chatmode.md"
        ),
        Some(IntegrationStatus::Passed)
    );
}

#[tokio::test]
async fn test_missing_search_path_is_a_phase_failure() {
    let corpus = full_corpus();
    let mut config = config_for(corpus.path());
    config.discovery.search_paths = vec![PathBuf::from("gone"), PathBuf::from("prompts")];

    let outcome = ValidationEngine::new(config).run().await.expect("run");

    assert_eq!(outcome.report.phase_failures.len(), 1);
    assert!(outcome.report.phase_failures[0].starts_with("discovery: "));
    assert_eq!(outcome.report.performance_metrics.files_processed, 2);
    assert_eq!(
        structural_status(&outcome, "prompts/summarize.prompt.md"),
        Some(ValidationStatus::Passed)
    );
}

#[tokio::test]
async fn test_unwritable_output_aborts_run() {
    let corpus = full_corpus();
    write(corpus.path(), "blocker", "not a directory");
    let mut config = config_for(corpus.path());
    config.report.output_dir = PathBuf::from("blocker/reports");

    let error = ValidationEngine::new(config)
        .run()
        .await
        .expect_err("report write should fail");

    assert!(error.is_fatal());
}
