//! Ordered-fallback document classification.
//!
//! File organisation is a convention, not a contract, so the classifier
//! falls back from file name to directory to content markers. The first
//! matching rule wins:
//!
//! 1. JSON extension: `config`/`validation`/`quality` in the name, then
//!    `package.json`, then any other JSON file.
//! 2. `*.chatmode.md` / `*.prompt.md` suffixes or a `chatmodes`/`prompts`
//!    parent directory.
//! 3. A service directory in the path together with a protocol mention in
//!    the content.
//! 4. Heading markers in the content.
//! 5. Documentation.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use stencil_core::DocumentType;

use crate::markdown::compile;

static ROLE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^#{1,6}[ \t]+(?:Role|Character)(?:\W|$)"));

static PARAMETERS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^#{1,6}[ \t]+(?:Parameters|Arguments)(?:\W|$)"));

static INSTALLATION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^#{1,6}[ \t]+Installation(?:\W|$)"));

static API_HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^#{1,6}[ \t]+API(?:\W|$)"));

static PROTOCOL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\bMCP\b|model context protocol"));

const CHAT_MODE_DIRS: &[&str] = &["chatmodes", "chat-modes", "chat_modes"];
const PROMPT_DIRS: &[&str] = &["prompts"];
const SERVICE_PATH_MARKER: &str = "mcp-server";

/// Assigns a document type from a path and its content. Pure and deterministic.
pub fn classify(path: &Path, content: &str) -> DocumentType {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if let Some(structured) = classify_structured(path, &file_name) {
        return structured;
    }

    if let Some(by_location) = classify_by_location(path, &file_name) {
        return by_location;
    }

    let lowered_path = path.to_string_lossy().to_lowercase().replace('\\', "/");
    if lowered_path.contains(SERVICE_PATH_MARKER) && PROTOCOL_MENTION.is_match(content) {
        return DocumentType::McpServer;
    }

    classify_by_content(content)
}

fn classify_structured(path: &Path, file_name: &str) -> Option<DocumentType> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return None;
    }

    let doc_type = if ["config", "validation", "quality"]
        .iter()
        .any(|marker| file_name.contains(marker))
    {
        DocumentType::ConfigFile
    } else if file_name == "package.json" {
        DocumentType::PackageFile
    } else {
        DocumentType::JsonFile
    };
    Some(doc_type)
}

fn classify_by_location(path: &Path, file_name: &str) -> Option<DocumentType> {
    if file_name.ends_with(".chatmode.md") {
        return Some(DocumentType::ChatMode);
    }
    if file_name.ends_with(".prompt.md") {
        return Some(DocumentType::Prompt);
    }

    let parent = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().to_lowercase())?;

    if CHAT_MODE_DIRS.contains(&parent.as_str()) {
        Some(DocumentType::ChatMode)
    } else if PROMPT_DIRS.contains(&parent.as_str()) {
        Some(DocumentType::Prompt)
    } else {
        None
    }
}

fn classify_by_content(content: &str) -> DocumentType {
    if ROLE_HEADING.is_match(content) {
        DocumentType::ChatMode
    } else if PARAMETERS_HEADING.is_match(content) {
        DocumentType::Prompt
    } else if INSTALLATION_HEADING.is_match(content) && API_HEADING.is_match(content) {
        DocumentType::McpServer
    } else {
        DocumentType::Documentation
    }
}
