//! Schema-based structural validation.

use serde_json::Value as JsonValue;

use crate::markdown::count_h2;
use crate::schema::Schema;

/// Minimum number of second-level headings expected in a sectioned document.
const MIN_SECTIONS: usize = 2;

/// Outcome of checking one document against its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralReport {
    /// Whether every blocking check held
    pub is_valid: bool,
    /// Blocking findings
    pub errors: Vec<String>,
    /// Non-blocking findings
    pub warnings: Vec<String>,
    /// Fraction of required sections found; `None` when no section check ran
    pub coverage: Option<f64>,
    /// Optional sections detected
    pub optional_found: Vec<String>,
}

/// Validates `content` against `schema`.
pub fn validate(content: &str, schema: &Schema) -> StructuralReport {
    match schema {
        Schema::ValidJson => validate_json(content),
        Schema::Sections { required, optional } => {
            let mut errors = Vec::new();
            let mut found = 0_usize;

            for section in required {
                if section.is_present(content) {
                    found += 1;
                } else {
                    errors.push(format!("Missing required section: {}", section.name));
                }
            }

            let coverage = if required.is_empty() {
                1.0
            } else {
                found as f64 / required.len().max(1) as f64
            };

            let mut warnings = Vec::new();
            if !required.is_empty() && count_h2(content) < MIN_SECTIONS {
                warnings.push(format!(
                    "Document should have at least {MIN_SECTIONS} sections"
                ));
            }

            let optional_found = optional
                .iter()
                .filter(|section| section.is_present(content))
                .map(|section| section.name.clone())
                .collect();

            StructuralReport {
                is_valid: errors.is_empty(),
                errors,
                warnings,
                coverage: Some(coverage),
                optional_found,
            }
        }
    }
}

fn validate_json(content: &str) -> StructuralReport {
    match serde_json::from_str::<JsonValue>(content) {
        Ok(_) => StructuralReport {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            coverage: Some(1.0),
            optional_found: Vec::new(),
        },
        Err(error) => StructuralReport {
            is_valid: false,
            errors: vec![format!("Invalid JSON: {error}")],
            warnings: Vec::new(),
            coverage: None,
            optional_found: Vec::new(),
        },
    }
}
