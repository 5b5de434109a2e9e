//! Data model shared by every validation phase.

use core::fmt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Classification assigned to a discovered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// Chat-mode persona definition
    ChatMode,
    /// Reusable prompt definition
    Prompt,
    /// Service (MCP server) documentation
    McpServer,
    /// Generic documentation
    Documentation,
    /// Structured configuration (config, validation or quality JSON)
    ConfigFile,
    /// Package manifest
    PackageFile,
    /// Any other JSON document
    JsonFile,
}

impl DocumentType {
    /// Every known type, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::ChatMode,
        Self::Prompt,
        Self::McpServer,
        Self::Documentation,
        Self::ConfigFile,
        Self::PackageFile,
        Self::JsonFile,
    ];

    /// Stable identifier used in reports and messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChatMode => "chat-mode",
            Self::Prompt => "prompt",
            Self::McpServer => "mcp-server",
            Self::Documentation => "documentation",
            Self::ConfigFile => "config-file",
            Self::PackageFile => "package-file",
            Self::JsonFile => "json-file",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// An immutable view of one discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Location on disk
    pub path: PathBuf,
    /// Type assigned during classification
    pub doc_type: DocumentType,
}

impl Document {
    /// Creates a document view.
    pub fn new(path: PathBuf, doc_type: DocumentType) -> Self {
        Self { path, doc_type }
    }

    /// Path rendered for reports, relative to `root`.
    pub fn display_relative(&self, root: &Path) -> String {
        relative_display(&self.path, root)
    }

    /// Whether the file is markdown.
    pub fn is_markdown(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    }
}

/// Renders a path with forward slashes so reports are platform independent.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Renders `path` relative to `root` when it lies beneath it.
pub fn relative_display(path: &Path, root: &Path) -> String {
    display_path(path.strip_prefix(root).unwrap_or(path))
}

/// Phase that produced a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationKind {
    /// Schema-based structural validation
    TemplateStructure,
    /// Content-quality scoring
    ContentStandards,
}

/// Outcome of a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// Document satisfied the check
    Passed,
    /// Non-blocking deficiency
    Warning,
    /// Blocking deficiency
    Error,
}

impl ValidationStatus {
    /// Serialized name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// One result per (document, phase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Phase that produced the result
    #[serde(rename = "type")]
    pub kind: ValidationKind,
    /// Document path
    pub file: String,
    /// Outcome
    pub status: ValidationStatus,
    /// Human-readable summary
    pub message: String,
    /// Individual findings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    /// Score in `[0, 1]` when the phase produces one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Optional schema sections the document provides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_sections: Vec<String>,
}

impl ValidationResult {
    /// Creates a result without issues or score.
    pub fn new(
        kind: ValidationKind,
        file: impl Into<String>,
        status: ValidationStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            file: file.into(),
            status,
            message: message.into(),
            issues: Vec::new(),
            score: None,
            optional_sections: Vec::new(),
        }
    }

    /// Attaches findings.
    #[must_use]
    pub fn with_issues(mut self, issues: Vec<String>) -> Self {
        self.issues = issues;
        self
    }

    /// Attaches a score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Records the optional sections found.
    #[must_use]
    pub fn with_optional_sections(mut self, sections: Vec<String>) -> Self {
        self.optional_sections = sections;
        self
    }
}

/// Probe family that produced an integration result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationKind {
    /// Service launcher conformance
    McpServer,
    /// Chat-mode artifact conformance
    ChatMode,
    /// Template instantiation
    TemplateGeneration,
    /// Declared end-to-end workflow
    EndToEnd,
}

impl IntegrationKind {
    /// Serialized name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::McpServer => "mcp-server",
            Self::ChatMode => "chat-mode",
            Self::TemplateGeneration => "template-generation",
            Self::EndToEnd => "end-to-end",
        }
    }
}

/// Outcome of an integration probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    /// All required checks held
    Passed,
    /// The probe ran and checks did not hold
    Failed,
    /// The probe could not run against its target
    Error,
}

impl IntegrationStatus {
    /// Serialized name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

/// One result per (probe family, target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationTestResult {
    /// Probe family
    #[serde(rename = "type")]
    pub kind: IntegrationKind,
    /// Target file or workflow name
    pub name: String,
    /// Outcome
    pub status: IntegrationStatus,
    /// Human-readable summary
    pub message: String,
    /// Checks that did not hold
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_checks: Vec<String>,
}

impl IntegrationTestResult {
    /// Creates a result without failed checks.
    pub fn new(
        kind: IntegrationKind,
        name: impl Into<String>,
        status: IntegrationStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            status,
            message: message.into(),
            failed_checks: Vec::new(),
        }
    }

    /// Creates an `error` result for a target the probe could not process.
    pub fn error(
        kind: IntegrationKind,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(kind, name, IntegrationStatus::Error, message)
    }

    /// Attaches the checks that did not hold.
    #[must_use]
    pub fn with_failed_checks(mut self, failed_checks: Vec<String>) -> Self {
        self.failed_checks = failed_checks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, json, to_value};

    #[test]
    fn test_document_type_round_trips_as_kebab_case() {
        let value = to_value(DocumentType::McpServer).expect("serialize");
        assert_eq!(value, json!("mcp-server"));

        let parsed: DocumentType = from_str("\"chat-mode\"").expect("deserialize");
        assert_eq!(parsed, DocumentType::ChatMode);
        assert_eq!(DocumentType::ConfigFile.to_string(), "config-file");
    }

    #[test]
    fn test_validation_result_serializes_type_field() {
        let result = ValidationResult::new(
            ValidationKind::TemplateStructure,
            "chatmodes/a.chatmode.md",
            ValidationStatus::Passed,
            "ok",
        )
        .with_score(1.0);

        let value = to_value(&result).expect("serialize");
        assert_eq!(value["type"], json!("template-structure"));
        assert_eq!(value["status"], json!("passed"));
        assert_eq!(value["score"], json!(1.0));
        assert!(value.get("issues").is_none());
        assert!(value.get("optionalSections").is_none());

        let with_optional = result.with_optional_sections(vec!["Examples".to_owned()]);
        let value = to_value(&with_optional).expect("serialize");
        assert_eq!(value["optionalSections"], json!(["Examples"]));
    }

    #[test]
    fn test_integration_result_failed_checks() {
        let result = IntegrationTestResult::new(
            IntegrationKind::McpServer,
            "mcp-servers/weather/index.js",
            IntegrationStatus::Failed,
            "2 markers missing",
        )
        .with_failed_checks(vec!["transport".to_owned(), "run-method".to_owned()]);

        let value = to_value(&result).expect("serialize");
        assert_eq!(value["type"], json!("mcp-server"));
        assert_eq!(value["failedChecks"], json!(["transport", "run-method"]));
    }

    #[test]
    fn test_as_str_matches_serialized_names() {
        for kind in [
            IntegrationKind::McpServer,
            IntegrationKind::ChatMode,
            IntegrationKind::TemplateGeneration,
            IntegrationKind::EndToEnd,
        ] {
            assert_eq!(to_value(kind).expect("serialize"), json!(kind.as_str()));
        }
        for status in [
            IntegrationStatus::Passed,
            IntegrationStatus::Failed,
            IntegrationStatus::Error,
        ] {
            assert_eq!(to_value(status).expect("serialize"), json!(status.as_str()));
        }
        for status in [
            ValidationStatus::Passed,
            ValidationStatus::Warning,
            ValidationStatus::Error,
        ] {
            assert_eq!(to_value(status).expect("serialize"), json!(status.as_str()));
        }
    }

    #[test]
    fn test_relative_display() {
        let doc = Document::new(
            PathBuf::from("/corpus/prompts/a.prompt.md"),
            DocumentType::Prompt,
        );
        assert_eq!(doc.display_relative(Path::new("/corpus")), "prompts/a.prompt.md");
        assert_eq!(
            doc.display_relative(Path::new("/elsewhere")),
            "/corpus/prompts/a.prompt.md"
        );
    }

    #[test]
    fn test_markdown_detection() {
        let doc = Document::new(PathBuf::from("docs/README.MD"), DocumentType::Documentation);
        assert!(doc.is_markdown());

        let json_doc = Document::new(PathBuf::from("package.json"), DocumentType::PackageFile);
        assert!(!json_doc.is_markdown());
    }
}
