use std::sync::LazyLock;

use regex::Regex;

use super::{Dimension, DimensionScore, ScoreCard, StandardsScorer};
use crate::markdown::{compile, prose_lines};

const DATE_PENALTY: f64 = 0.1;
const CURRENCY_PENALTY: f64 = 0.1;
const IMPERIAL_PENALTY: f64 = 0.1;

/// `MM/DD/YYYY`, `MM-DD-YYYY` and `Month DD, YYYY`.
static HARDCODED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"\b\d{1,2}/\d{1,2}/\d{4}\b|\b\d{1,2}-\d{1,2}-\d{4}\b|\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}\b",
    )
});

/// Currency symbols; `$` only when it prefixes an amount, so shell variables are not flagged.
static CURRENCY: LazyLock<Regex> = LazyLock::new(|| compile(r"[€£¥₹]|\$\s?\d"));

static IMPERIAL_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)\b\d+(?:\.\d+)?\s?(?:miles?|mi|feet|foot|ft|inch(?:es)?|yards?|yd|pounds?|lbs?|ounces?|oz|gallons?|gal|°F|fahrenheit)\b",
    )
});

static METRIC_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)\b\d+(?:\.\d+)?\s?(?:km|kilometers?|kilometres?|m|meters?|metres?|cm|centimeters?|mm|kg|kilograms?|g|grams?|l|liters?|litres?|ml|°C|celsius)\b",
    )
});

/// Hardcoded dates, currency symbols and imperial units.
pub struct InternationalizationScorer;

impl StandardsScorer for InternationalizationScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Internationalization
    }

    fn score(&self, text: &str) -> DimensionScore {
        let mut card = ScoreCard::new();

        if let Some(date) = HARDCODED_DATE.find(text) {
            card.penalize(
                DATE_PENALTY,
                format!("Hardcoded date format \"{}\"; use ISO 8601", date.as_str()),
            );
        }

        let prose = prose_lines(text);

        if let Some(line) = prose.iter().find(|line| CURRENCY.is_match(line.text)) {
            card.penalize(
                CURRENCY_PENALTY,
                format!("Currency symbol at line {}; specify the currency code", line.number),
            );
        }

        let imperial = prose.iter().find_map(|line| {
            IMPERIAL_UNIT
                .find(line.text)
                .filter(|_| !METRIC_UNIT.is_match(line.text))
                .map(|unit| (line.number, unit.as_str()))
        });
        if let Some((number, unit)) = imperial {
            card.penalize(
                IMPERIAL_PENALTY,
                format!("Imperial unit \"{unit}\" at line {number} has no metric equivalent"),
            );
        }

        card.finish()
    }
}
