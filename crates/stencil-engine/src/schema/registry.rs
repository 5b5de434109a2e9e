//! Static schema registry keyed by document type.

use std::collections::HashMap;

use stencil_core::DocumentType;

use super::{Schema, Section};

/// What the engine knows about one document type.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Structural rules
    pub schema: Schema,
    /// Whether content-standards scoring applies to the type
    pub scorers_applicable: bool,
}

impl RegistryEntry {
    /// Entry for a markdown type scored for content standards.
    pub fn markdown(schema: Schema) -> Self {
        Self {
            schema,
            scorers_applicable: true,
        }
    }

    /// Entry for a structured-data type.
    pub fn structured() -> Self {
        Self {
            schema: Schema::ValidJson,
            scorers_applicable: false,
        }
    }
}

/// Schemas loaded once at engine construction and shared read-only.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    entries: HashMap<DocumentType, RegistryEntry>,
}

impl SchemaRegistry {
    /// Registry without any schemas.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry with the built-in schema for every document type.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        registry.register(
            DocumentType::ChatMode,
            RegistryEntry::markdown(Schema::sections(
                vec![
                    Section::builtin_heading("Role", &["Role", "Character"]),
                    Section::builtin_heading(
                        "Response Style",
                        &["Response Style", "Communication"],
                    ),
                ],
                vec![
                    Section::builtin_heading("Examples", &["Examples", "Example", "Sample"]),
                    Section::builtin_heading("Constraints", &["Constraints", "Limitations"]),
                ],
            )),
        );

        registry.register(
            DocumentType::Prompt,
            RegistryEntry::markdown(Schema::sections(
                vec![
                    Section::builtin_heading("Description", &["Description", "Purpose"]),
                    Section::builtin_heading("Parameters", &["Parameters", "Arguments"]),
                ],
                vec![
                    Section::builtin_heading("Examples", &["Examples", "Example", "Usage"]),
                    Section::builtin_heading("Output", &["Output", "Expected Output"]),
                ],
            )),
        );

        registry.register(
            DocumentType::McpServer,
            RegistryEntry::markdown(Schema::sections(
                vec![
                    Section::builtin_heading("Installation", &["Installation", "Setup"]),
                    Section::builtin_heading("API", &["API", "Tools"]),
                ],
                vec![
                    Section::builtin_heading("Configuration", &["Configuration"]),
                    Section::builtin_heading("Usage", &["Usage"]),
                    Section::builtin_heading("Troubleshooting", &["Troubleshooting"]),
                ],
            )),
        );

        registry.register(
            DocumentType::Documentation,
            RegistryEntry::markdown(Schema::sections(
                Vec::new(),
                vec![
                    Section::builtin_heading("Overview", &["Overview", "Introduction"]),
                    Section::builtin_heading("Usage", &["Usage", "Getting Started"]),
                ],
            )),
        );

        for structured in [
            DocumentType::ConfigFile,
            DocumentType::PackageFile,
            DocumentType::JsonFile,
        ] {
            registry.register(structured, RegistryEntry::structured());
        }

        registry
    }

    /// Adds or replaces the entry for `doc_type`.
    pub fn register(&mut self, doc_type: DocumentType, entry: RegistryEntry) {
        self.entries.insert(doc_type, entry);
    }

    /// Removes the entry for `doc_type`, returning it if present.
    pub fn remove(&mut self, doc_type: DocumentType) -> Option<RegistryEntry> {
        self.entries.remove(&doc_type)
    }

    /// Entry for `doc_type`, if one is registered.
    pub fn get(&self, doc_type: DocumentType) -> Option<&RegistryEntry> {
        self.entries.get(&doc_type)
    }

    /// Schema for `doc_type`, if one is registered.
    pub fn get_schema(&self, doc_type: DocumentType) -> Option<&Schema> {
        self.get(doc_type).map(|entry| &entry.schema)
    }

    /// Whether content-standards scoring applies. Unregistered types are scored.
    pub fn scorers_applicable(&self, doc_type: DocumentType) -> bool {
        self.get(doc_type)
            .is_none_or(|entry| entry.scorers_applicable)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
