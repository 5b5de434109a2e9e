use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::{Captures, Regex};
use stencil_core::{
    Document, IntegrationConfig, IntegrationKind, IntegrationStatus, IntegrationTestResult, Result,
};

use super::{ProbeContext, ProbeFamily};
use crate::discovery::read_batch;
use crate::markdown::compile;

static MUSTACHE: LazyLock<Regex> = LazyLock::new(|| compile(r"\{\{\s*([\w.-]+)\s*\}\}"));

static BRACKET_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\[(?:TODO|REPLACE)[^\]]*\]"));

static TOP_HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^# \S"));

static SECOND_HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^## \S"));

/// A template with every placeholder substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instantiation {
    /// Rendered text
    pub text: String,
    /// Number of placeholders replaced
    pub replaced: usize,
}

/// Replaces `{{name}}` tokens and `[TODO ...]`/`[REPLACE ...]` markers with sample values.
pub fn instantiate(template: &str) -> Instantiation {
    let mut replaced = 0_usize;

    let text = MUSTACHE.replace_all(template, |captures: &Captures<'_>| {
        replaced += 1;
        let key = captures.get(1).map_or("value", |key| key.as_str());
        format!("Sample {}", key.replace(['.', '-', '_'], " "))
    });
    let text = BRACKET_PLACEHOLDER
        .replace_all(&text, |_: &Captures<'_>| {
            replaced += 1;
            "Sample content"
        })
        .into_owned();

    Instantiation { text, replaced }
}

/// Headings the instantiated text is missing.
pub fn missing_headings(text: &str) -> Vec<String> {
    let mut missing = Vec::new();
    if !TOP_HEADING.is_match(text) {
        missing.push("top-level-heading".to_owned());
    }
    if !SECOND_HEADING.is_match(text) {
        missing.push("second-level-heading".to_owned());
    }
    missing
}

fn is_template(document: &Document, context: &ProbeContext) -> bool {
    let name = context.name_of(&document.path).to_lowercase();
    document.is_markdown()
        && context
            .config
            .template_markers
            .iter()
            .any(|marker| name.contains(&marker.to_lowercase()))
}

/// Instantiates template files and checks the result keeps its heading structure.
pub struct TemplateProbe;

#[async_trait]
impl ProbeFamily for TemplateProbe {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::TemplateGeneration
    }

    fn name(&self) -> &'static str {
        "template-generation"
    }

    fn enabled(&self, config: &IntegrationConfig) -> bool {
        config.templates
    }

    async fn run(&self, context: Arc<ProbeContext>) -> Result<Vec<IntegrationTestResult>> {
        let paths: Vec<_> = context
            .documents
            .iter()
            .filter(|document| is_template(document, &context))
            .map(|document| document.path.clone())
            .collect();
        let contents = read_batch(&paths).await;

        Ok(paths
            .iter()
            .zip(contents)
            .map(|(path, content)| {
                let name = context.name_of(path);
                match content {
                    Err(error) => IntegrationTestResult::error(
                        self.kind(),
                        name,
                        format!("Failed to read template: {error}"),
                    ),
                    Ok(content) => {
                        let instantiation = instantiate(&content);
                        let missing = missing_headings(&instantiation.text);
                        let status = if missing.is_empty() {
                            IntegrationStatus::Passed
                        } else {
                            IntegrationStatus::Failed
                        };
                        IntegrationTestResult::new(
                            self.kind(),
                            name,
                            status,
                            format!(
                                "Instantiated with {} placeholder(s) replaced",
                                instantiation.replaced
                            ),
                        )
                        .with_failed_checks(missing)
                    }
                }
            })
            .collect())
    }
}
