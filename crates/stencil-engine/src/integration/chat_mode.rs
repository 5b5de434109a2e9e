use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use stencil_core::{
    DocumentType, IntegrationConfig, IntegrationKind, IntegrationStatus, IntegrationTestResult,
    Result,
};

use super::{ProbeContext, ProbeFamily};
use crate::discovery::read_batch;
use crate::markdown::compile;

/// Checks that must hold for a chat mode to pass; one miss is tolerated.
const REQUIRED_CHECKS: usize = 4;

static SECTION_MARKERS: LazyLock<[(&'static str, Regex); 4]> = LazyLock::new(|| {
    [
        ("role", compile(r"(?mi)^#{1,6}[ \t]+(?:Role|Character)\b")),
        (
            "response-style",
            compile(r"(?mi)^#{1,6}[ \t]+(?:Response Style|Communication)\b"),
        ),
        ("examples", compile(r"(?mi)^#{1,6}[ \t]+(?:Examples?|Sample)\b")),
        (
            "constraints",
            compile(r"(?mi)^#{1,6}[ \t]+(?:Constraints|Limitations)\b"),
        ),
    ]
});

static H2_SPLIT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^## "));

static FIRST_PERSON: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bI\b|(?i:\b(?:me|my|mine|myself)\b)"));

static SECOND_PERSON: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:you|your|yours|yourself|yourselves)\b"));

/// First- and second-person pronoun counts summed over the H2 sections.
pub fn pronoun_counts(content: &str) -> (usize, usize) {
    H2_SPLIT
        .split(content)
        .map(|section| {
            (
                FIRST_PERSON.find_iter(section).count(),
                SECOND_PERSON.find_iter(section).count(),
            )
        })
        .fold((0, 0), |(first, second), (section_first, section_second)| {
            (first + section_first, second + section_second)
        })
}

/// One voice clearly dominates: the difference exceeds the smaller count.
pub fn persona_consistent(content: &str) -> bool {
    let (first, second) = pronoun_counts(content);
    first.abs_diff(second) > first.min(second)
}

/// Names of the chat-mode checks that do not hold.
pub fn failed_checks(content: &str) -> Vec<String> {
    let mut failed: Vec<String> = SECTION_MARKERS
        .iter()
        .filter(|(_, pattern)| !pattern.is_match(content))
        .map(|(name, _)| (*name).to_owned())
        .collect();

    if !persona_consistent(content) {
        failed.push("persona-consistency".to_owned());
    }

    failed
}

/// Checks chat-mode files for section markers and a consistent persona.
pub struct ChatModeProbe;

#[async_trait]
impl ProbeFamily for ChatModeProbe {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::ChatMode
    }

    fn name(&self) -> &'static str {
        "chat-mode"
    }

    fn enabled(&self, config: &IntegrationConfig) -> bool {
        config.chat_modes
    }

    async fn run(&self, context: Arc<ProbeContext>) -> Result<Vec<IntegrationTestResult>> {
        let paths: Vec<_> = context
            .documents_of(DocumentType::ChatMode)
            .map(|document| document.path.clone())
            .collect();
        let contents = read_batch(&paths).await;
        let total_checks = SECTION_MARKERS.len() + 1;

        Ok(paths
            .iter()
            .zip(contents)
            .map(|(path, content)| {
                let name = context.name_of(path);
                let content = match content {
                    Ok(content) => content,
                    Err(error) => {
                        return IntegrationTestResult::error(
                            self.kind(),
                            name,
                            format!("Failed to read chat mode: {error}"),
                        );
                    }
                };

                let failed = failed_checks(&content);
                let passed = total_checks - failed.len();
                let status = if passed >= REQUIRED_CHECKS {
                    IntegrationStatus::Passed
                } else {
                    IntegrationStatus::Failed
                };

                IntegrationTestResult::new(
                    self.kind(),
                    name,
                    status,
                    format!("{passed}/{total_checks} chat mode checks passed"),
                )
                .with_failed_checks(failed)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use stencil_core::Document;
    use tempfile::TempDir;

    const COMPLETE: &str = "# Reviewer\n\n## Role\nYou are a careful reviewer. You read every line.\n\n## Response Style\nYou answer briefly and cite your sources.\n\n## Examples\nAsk you to review a diff.\n\n## Constraints\nYou never approve your own changes.\n";

    fn context(root: &Path, documents: Vec<Document>) -> Arc<ProbeContext> {
        Arc::new(ProbeContext {
            project_root: root.to_path_buf(),
            search_paths: vec![root.to_path_buf()],
            registry_files: Vec::new(),
            launchers: Vec::new(),
            documents,
            config: IntegrationConfig::default(),
        })
    }

    #[test]
    fn test_pronoun_counts_across_sections() {
        let content = "Intro I wrote.\n## One\nI help my team.\n## Two\nYou decide.\n";
        assert_eq!(pronoun_counts(content), (3, 1));
    }

    #[test]
    fn test_persona_rule() {
        assert!(persona_consistent("You and your team. You again."));
        assert!(!persona_consistent("I help you. My notes, your notes."));
        assert!(!persona_consistent("No pronouns here."));
        assert!(!persona_consistent("Ignite the mines in Iowa."));
    }

    #[test]
    fn test_complete_chat_mode_has_no_failures() {
        assert!(failed_checks(COMPLETE).is_empty());
    }

    #[test]
    fn test_missing_sections_are_named() {
        let content = "## Role\nYou review code.\n";
        assert_eq!(
            failed_checks(content),
            vec!["response-style", "examples", "constraints"]
        );
    }

    #[tokio::test]
    async fn test_one_failed_check_still_passes() {
        let dir = TempDir::new().expect("tempdir");
        let tolerant = dir.path().join("tolerant.chatmode.md");
        let weak = dir.path().join("weak.chatmode.md");
        fs::write(&tolerant, COMPLETE.replace("## Constraints", "## Notes")).expect("write");
        fs::write(&weak, "## Role\nI help you.\n").expect("write");

        let documents = vec![
            Document::new(tolerant, DocumentType::ChatMode),
            Document::new(weak, DocumentType::ChatMode),
            Document::new(PathBuf::from("ignored.prompt.md"), DocumentType::Prompt),
        ];
        let results = ChatModeProbe
            .run(context(dir.path(), documents))
            .await
            .expect("run");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, IntegrationStatus::Passed);
        assert_eq!(results[0].failed_checks, vec!["constraints"]);
        assert_eq!(results[0].message, "4/5 chat mode checks passed");
        assert_eq!(results[1].status, IntegrationStatus::Failed);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error_result() {
        let dir = TempDir::new().expect("tempdir");
        let present = dir.path().join("present.chatmode.md");
        fs::write(&present, COMPLETE).expect("write");

        let documents = vec![
            Document::new(dir.path().join("gone.chatmode.md"), DocumentType::ChatMode),
            Document::new(present, DocumentType::ChatMode),
        ];
        let results = ChatModeProbe
            .run(context(dir.path(), documents))
            .await
            .expect("run");

        assert_eq!(results[0].status, IntegrationStatus::Error);
        assert_eq!(results[0].name, "gone.chatmode.md");
        assert_eq!(results[1].status, IntegrationStatus::Passed);
    }
}
