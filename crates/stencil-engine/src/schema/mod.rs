//! Per-type schemas and document classification.

/// Document type assignment.
pub mod classifier;
/// Static schema registry.
pub mod registry;

pub use classifier::classify;
pub use registry::{RegistryEntry, SchemaRegistry};

use regex::Regex;
use stencil_core::{Error, Result};

use crate::markdown::compile;

fn heading_pattern(titles: &[&str]) -> String {
    let alternatives = titles
        .iter()
        .map(|title| regex::escape(title))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"(?m)^#{{1,3}}[ \t]+(?:{alternatives})(?:\W|$)")
}

/// A named section and the pattern that detects it.
#[derive(Debug, Clone)]
pub struct Section {
    /// Section name used in error messages
    pub name: String,
    /// Detection pattern, matched against raw content
    pub pattern: Regex,
}

impl Section {
    /// Creates a section detected by `pattern`.
    ///
    /// # Errors
    /// Returns [`Error::SectionPattern`] if `pattern` is not a valid regex.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|err| Error::SectionPattern {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self { name, pattern })
    }

    /// Creates a section matched by an H1-H3 heading starting with one of `titles`.
    ///
    /// # Errors
    /// Returns [`Error::SectionPattern`] if the combined pattern is rejected,
    /// for example when it exceeds the regex size limit.
    pub fn heading(name: impl Into<String>, titles: &[&str]) -> Result<Self> {
        Self::new(name, &heading_pattern(titles))
    }

    /// Heading section for the built-in schemas, whose titles are literals.
    pub(crate) fn builtin_heading(name: &str, titles: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            pattern: compile(&heading_pattern(titles)),
        }
    }

    /// Whether the section is present in `content`.
    pub fn is_present(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

/// Validation rules for one document type.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Section-based markdown schema
    Sections {
        /// Sections that must be present
        required: Vec<Section>,
        /// Sections reported when present
        optional: Vec<Section>,
    },
    /// Structured data that only has to parse
    ValidJson,
}

impl Schema {
    /// Builds a section schema.
    pub fn sections(required: Vec<Section>, optional: Vec<Section>) -> Self {
        Self::Sections { required, optional }
    }

    /// Number of required sections; structured-data schemas have none.
    pub fn required_count(&self) -> usize {
        match self {
            Self::Sections { required, .. } => required.len(),
            Self::ValidJson => 0,
        }
    }
}
