use std::sync::LazyLock;

use regex::Regex;

use super::{Dimension, DimensionScore, ScoreCard, StandardsScorer};
use crate::markdown::{compile, strip_fenced_code};

const LONG_SENTENCE_WORDS: usize = 25;
const LONG_SENTENCE_WEIGHT: f64 = 0.1;
const PASSIVE_RATIO_LIMIT: f64 = 0.3;
const PASSIVE_PENALTY: f64 = 0.2;
const TERMINOLOGY_PENALTY: f64 = 0.1;

static PASSIVE_VOICE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:is|are|was|were|been|being)\s+\w+ed\b"));

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"`[^`]*`"));

static URL: LazyLock<Regex> = LazyLock::new(|| compile(r"\]\([^)]*\)|https?://\S+"));

/// Canonical spelling and the misspellings that break consistency.
struct Term {
    canonical: &'static str,
    variants: LazyLock<Regex>,
}

static TERMS: [Term; 3] = [
    Term {
        canonical: "GitHub",
        variants: LazyLock::new(|| compile(r"\b(?:Github|GITHUB)\b")),
    },
    Term {
        canonical: "JavaScript",
        variants: LazyLock::new(|| compile(r"\b(?:Javascript|javascript|JAVASCRIPT)\b")),
    },
    Term {
        canonical: "TypeScript",
        variants: LazyLock::new(|| compile(r"\b(?:Typescript|typescript|TYPESCRIPT)\b")),
    },
];

/// Sentence length, passive voice and terminology consistency.
pub struct StyleScorer;

impl StandardsScorer for StyleScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Style
    }

    fn score(&self, text: &str) -> DimensionScore {
        let mut card = ScoreCard::new();
        let prose = strip_fenced_code(text);

        let sentences: Vec<&str> = prose
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .collect();

        if !sentences.is_empty() {
            let total = sentences.len() as f64;

            let long = sentences
                .iter()
                .filter(|sentence| sentence.split_whitespace().count() > LONG_SENTENCE_WORDS)
                .count();
            if long > 0 {
                card.penalize(
                    LONG_SENTENCE_WEIGHT * (long as f64 / total),
                    format!("{long} sentence(s) exceed {LONG_SENTENCE_WORDS} words"),
                );
            }

            let passive = PASSIVE_VOICE.find_iter(&prose).count();
            let ratio = passive as f64 / total;
            if ratio > PASSIVE_RATIO_LIMIT {
                card.penalize(
                    PASSIVE_PENALTY,
                    format!("High passive voice usage ({:.0}% of sentences)", ratio * 100.0),
                );
            }
        }

        let plain = URL.replace_all(&INLINE_CODE.replace_all(&prose, ""), "").into_owned();
        let inconsistent: Vec<String> = TERMS
            .iter()
            .filter_map(|term| {
                term.variants.find(&plain).map(|found| {
                    format!("\"{}\" should be written \"{}\"", found.as_str(), term.canonical)
                })
            })
            .collect();
        if !inconsistent.is_empty() {
            card.penalize(
                TERMINOLOGY_PENALTY,
                format!("Inconsistent terminology: {}", inconsistent.join(", ")),
            );
        }

        card.finish()
    }
}
