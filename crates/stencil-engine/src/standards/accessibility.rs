use std::sync::LazyLock;

use regex::Regex;

use super::{Dimension, DimensionScore, ScoreCard, StandardsScorer};
use crate::markdown::{compile, heading_level, prose_lines, strip_fenced_code};

const HEADING_SKIP_PENALTY: f64 = 0.2;
const ALT_TEXT_PENALTY: f64 = 0.1;
const LINK_TEXT_PENALTY: f64 = 0.1;

/// Matches images and links; group 1 is `!` for images.
static LINK_OR_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(!?)\[([^\]]*)\]\(([^)]*)\)"));

/// Alt text that says nothing about the image.
const GENERIC_ALT: &[&str] = &["image", "img", "picture", "photo", "screenshot"];

/// Link text that says nothing about the destination.
const GENERIC_LINK_TEXT: &[&str] = &[
    "click here",
    "here",
    "read more",
    "more",
    "link",
    "this link",
];

/// Heading hierarchy, image alt text and link text.
pub struct AccessibilityScorer;

impl StandardsScorer for AccessibilityScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Accessibility
    }

    fn score(&self, text: &str) -> DimensionScore {
        let mut card = ScoreCard::new();

        check_heading_hierarchy(text, &mut card);

        let prose = strip_fenced_code(text);
        for captures in LINK_OR_IMAGE.captures_iter(&prose) {
            let is_image = captures.get(1).is_some_and(|bang| !bang.as_str().is_empty());
            let label = captures.get(2).map_or("", |label| label.as_str()).trim();
            let target = captures.get(3).map_or("", |target| target.as_str());

            if is_image {
                if label.is_empty() {
                    card.penalize(ALT_TEXT_PENALTY, format!("Image missing alt text: {target}"));
                } else if GENERIC_ALT.contains(&label.to_lowercase().as_str()) {
                    card.penalize(
                        ALT_TEXT_PENALTY,
                        format!("Image alt text is not descriptive: \"{label}\""),
                    );
                }
            } else if GENERIC_LINK_TEXT.contains(&label.to_lowercase().as_str()) {
                card.penalize(
                    LINK_TEXT_PENALTY,
                    format!("Link text is not descriptive: \"{label}\""),
                );
            }
        }

        card.finish()
    }
}

/// Penalizes the first heading that skips a level; later skips are not counted.
fn check_heading_hierarchy(text: &str, card: &mut ScoreCard) {
    let mut previous: Option<usize> = None;

    for line in prose_lines(text) {
        let Some(level) = heading_level(line.text) else {
            continue;
        };
        if let Some(prev_level) = previous
            && level > prev_level + 1
        {
            card.penalize(
                HEADING_SKIP_PENALTY,
                format!(
                    "Heading hierarchy skips from H{prev_level} to H{level} at line {}",
                    line.number
                ),
            );
            return;
        }
        previous = Some(level);
    }
}
