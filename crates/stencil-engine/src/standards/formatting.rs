use std::sync::LazyLock;

use regex::Regex;

use super::{Dimension, DimensionScore, ScoreCard, StandardsScorer};
use crate::markdown::{FenceTracker, LineKind, ProseLine, compile, prose_lines};

const FENCE_LANGUAGE_PENALTY: f64 = 0.1;
const LIST_SPACING_PENALTY: f64 = 0.05;
const TABLE_PENALTY: f64 = 0.1;

/// Header, separator and at least one data row.
const MIN_TABLE_LINES: usize = 3;

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*(?:[-*+]|\d+[.)])\s+"));

/// Code fence language tags, list spacing and table completeness.
pub struct FormattingScorer;

impl StandardsScorer for FormattingScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Formatting
    }

    fn score(&self, text: &str) -> DimensionScore {
        let mut card = ScoreCard::new();

        check_fence_languages(text, &mut card);

        let prose = prose_lines(text);
        check_list_spacing(&prose, &mut card);
        check_tables(&prose, &mut card);

        card.finish()
    }
}

fn check_fence_languages(text: &str, card: &mut ScoreCard) {
    let mut fences = FenceTracker::default();

    for (index, line) in text.lines().enumerate() {
        if matches!(fences.classify(line), LineKind::FenceOpen(info) if info.is_empty()) {
            card.penalize(
                FENCE_LANGUAGE_PENALTY,
                format!("Code block at line {} has no language tag", index + 1),
            );
        }
    }
}

fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line)
}

/// Indented lines directly under a list item continue that item.
fn is_list_continuation(line: &str) -> bool {
    line.starts_with("  ") || line.starts_with('\t')
}

/// A list block must be separated from adjacent non-list content by blank lines.
fn check_list_spacing(prose: &[ProseLine<'_>], card: &mut ScoreCard) {
    let mut index = 0;

    while index < prose.len() {
        if !is_list_item(prose[index].text) {
            index += 1;
            continue;
        }

        let start = index;
        while index + 1 < prose.len() {
            let next = prose[index + 1].text;
            if is_list_item(next) || (!next.trim().is_empty() && is_list_continuation(next)) {
                index += 1;
            } else {
                break;
            }
        }
        let end = index;

        if let Some(before) = start.checked_sub(1).map(|prev| &prose[prev])
            && !before.text.trim().is_empty()
            && before.number + 1 == prose[start].number
        {
            card.penalize(
                LIST_SPACING_PENALTY,
                format!(
                    "List at line {} should be preceded by a blank line",
                    prose[start].number
                ),
            );
        }

        if let Some(after) = prose.get(end + 1)
            && !after.text.trim().is_empty()
            && after.number == prose[end].number + 1
        {
            card.penalize(
                LIST_SPACING_PENALTY,
                format!(
                    "List ending at line {} should be followed by a blank line",
                    prose[end].number
                ),
            );
        }

        index = end + 1;
    }
}

/// Consecutive lines containing `|` form a table block.
fn check_tables(prose: &[ProseLine<'_>], card: &mut ScoreCard) {
    let mut index = 0;

    while index < prose.len() {
        if !prose[index].text.contains('|') {
            index += 1;
            continue;
        }

        let start = index;
        while index + 1 < prose.len()
            && prose[index + 1].text.contains('|')
            && prose[index + 1].number == prose[index].number + 1
        {
            index += 1;
        }

        let length = index - start + 1;
        if length < MIN_TABLE_LINES {
            card.penalize(
                TABLE_PENALTY,
                format!(
                    "Table at line {} is incomplete ({length} line(s), expected header, separator and rows)",
                    prose[start].number
                ),
            );
        }

        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> DimensionScore {
        FormattingScorer.score(text)
    }

    #[test]
    fn test_clean_document() {
        let text = "# Title\n\nIntro.\n\n- one\n- two\n\n```rust\nfn main() {}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        let scored = score(text);
        assert!(scored.issues.is_empty(), "{:?}", scored.issues);
        assert!((scored.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_each_untagged_fence_penalized() {
        let text = "```\na\n```\n\n```python\nb\n```\n\n```\nc\n```\n";
        let scored = score(text);
        assert!((scored.score - 0.8).abs() < 1e-9);
        assert_eq!(scored.issues.len(), 2);
    }

    #[test]
    fn test_tilde_fences_need_language_tags() {
        let text = "~~~\na\n~~~\n\n~~~toml\nb = 1\n~~~\n";
        let scored = score(text);
        assert_eq!(scored.issues, vec!["Code block at line 1 has no language tag"]);
    }

    #[test]
    fn test_inner_fence_does_not_reopen_outer_block() {
        let text = "````markdown\n```\nuntagged inside\n```\n````\n\n```\nafter\n```\n";
        let scored = score(text);
        assert_eq!(scored.issues, vec!["Code block at line 7 has no language tag"]);
    }

    #[test]
    fn test_list_adjacent_to_text() {
        let text = "Intro line\n- one\n- two\nOutro line\n";
        let scored = score(text);
        assert_eq!(scored.issues.len(), 2);
        assert!((scored.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_list_continuation_lines_stay_in_block() {
        let text = "Intro.\n\n1. first\n   more detail\n2. second\n\nDone.\n";
        let scored = score(text);
        assert!(scored.issues.is_empty(), "{:?}", scored.issues);
    }

    #[test]
    fn test_list_inside_code_is_ignored() {
        let text = "Run:\n```bash\n- not a list\n```\n";
        let scored = score(text);
        assert!(scored.issues.is_empty(), "{:?}", scored.issues);
    }

    #[test]
    fn test_incomplete_table() {
        let text = "| a | b |\n|---|---|\n\nText.\n";
        let scored = score(text);
        assert_eq!(scored.issues.len(), 1);
        assert!(scored.issues[0].contains("Table at line 1"));
        assert!((scored.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_pipes_in_code_are_not_tables() {
        let text = "```bash\nls | grep x\n```\n";
        assert!(score(text).issues.is_empty());
    }
}
