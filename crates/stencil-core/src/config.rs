//! Configuration for discovery, scoring thresholds, probes and report output.

use crate::{Error, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "stencil.toml";

/// Complete engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilConfig {
    /// Base directory for relative search paths and registry declarations
    pub project_root: PathBuf,
    /// Promote warnings to failures when computing run success
    pub strict: bool,
    /// Corpus discovery settings
    pub discovery: DiscoveryConfig,
    /// Content-standards floors
    pub standards: StandardsConfig,
    /// Integration probe settings
    pub integration: IntegrationConfig,
    /// Performance thresholds
    pub performance: PerformanceConfig,
    /// Report output settings
    pub report: ReportConfig,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            strict: false,
            discovery: DiscoveryConfig::default(),
            standards: StandardsConfig::default(),
            integration: IntegrationConfig::default(),
            performance: PerformanceConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Corpus discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Root directories searched recursively
    pub search_paths: Vec<PathBuf>,
    /// File extensions included, without the leading dot
    pub extensions: Vec<String>,
    /// Glob patterns excluded from discovery
    pub exclude_patterns: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from(".")],
            extensions: vec!["md".to_owned(), "json".to_owned()],
            exclude_patterns: vec![
                "**/node_modules/**".to_owned(),
                "**/target/**".to_owned(),
                "**/.git/**".to_owned(),
            ],
        }
    }
}

impl DiscoveryConfig {
    /// Compiles the exclude globs.
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid glob.
    pub fn compiled_excludes(&self) -> Result<Vec<Pattern>> {
        self.exclude_patterns
            .iter()
            .map(|pattern| Pattern::new(pattern).map_err(Error::from))
            .collect()
    }
}

/// Minimum score per content-standards dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardsConfig {
    /// Accessibility floor
    pub min_accessibility: f64,
    /// Formatting floor
    pub min_formatting: f64,
    /// Style floor
    pub min_style: f64,
    /// Internationalization floor
    pub min_internationalization: f64,
}

impl Default for StandardsConfig {
    fn default() -> Self {
        Self {
            min_accessibility: 0.8,
            min_formatting: 0.8,
            min_style: 0.8,
            min_internationalization: 0.8,
        }
    }
}

/// Integration probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(
    clippy::struct_excessive_bools,
    reason = "One enable flag per probe family"
)]
pub struct IntegrationConfig {
    /// Run service launcher conformance probes
    pub service_artifacts: bool,
    /// Run chat-mode conformance probes
    pub chat_modes: bool,
    /// Run template instantiation probes
    pub templates: bool,
    /// Run end-to-end workflow probes
    pub workflows: bool,
    /// Path component identifying service directories
    pub service_dir_marker: String,
    /// File names recognised as service entry points
    pub entry_points: Vec<String>,
    /// Service registry declaration files, relative to the project root
    pub registry_files: Vec<PathBuf>,
    /// Path fragments marking a markdown file as an instantiable template
    pub template_markers: Vec<String>,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            service_artifacts: true,
            chat_modes: true,
            templates: true,
            workflows: true,
            service_dir_marker: "mcp-server".to_owned(),
            entry_points: vec![
                "index.js".to_owned(),
                "index.ts".to_owned(),
                "server.js".to_owned(),
                "server.ts".to_owned(),
                "main.py".to_owned(),
                "server.py".to_owned(),
            ],
            registry_files: vec![
                PathBuf::from("mcp.json"),
                PathBuf::from(".vscode/mcp.json"),
                PathBuf::from("mcp-servers.json"),
            ],
            template_markers: vec!["template".to_owned()],
        }
    }
}

/// Performance thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Maximum average processing time per file, in milliseconds
    pub max_file_ms: f64,
    /// Minimum files processed per second
    pub min_throughput: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_file_ms: 100.0,
            min_throughput: 10.0,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory receiving the reports
    pub output_dir: PathBuf,
    /// File name prefix; the run date and extension are appended
    pub file_stem: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            file_stem: "validation-report".to_owned(),
        }
    }
}

impl StencilConfig {
    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("Failed to read {}: {error}", path.display())))?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;

        debug!(
            "Loaded config from {}: {} search path(s), strict={}",
            path.display(),
            config.discovery.search_paths.len(),
            config.strict
        );

        Ok(config)
    }

    /// Load config from `path` if it exists, otherwise fall back to defaults
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let header = "# Stencil Configuration File\n\
                      # Controls template discovery, scoring floors and report output\n\n";

        fs::write(path, format!("{header}{contents}"))?;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns a configuration error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.discovery.search_paths.is_empty() {
            return Err(Error::Config("at least one search path is required".to_owned()));
        }
        if self.discovery.extensions.is_empty() {
            return Err(Error::Config("at least one file extension is required".to_owned()));
        }

        let floors = [
            ("min_accessibility", self.standards.min_accessibility),
            ("min_formatting", self.standards.min_formatting),
            ("min_style", self.standards.min_style),
            ("min_internationalization", self.standards.min_internationalization),
        ];
        for (name, value) in floors {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("{name} must be within [0, 1], got {value}")));
            }
        }

        if self.performance.max_file_ms <= 0.0 {
            return Err(Error::Config("max_file_ms must be positive".to_owned()));
        }

        self.discovery.compiled_excludes()?;
        Ok(())
    }

    /// Search paths resolved against the project root.
    pub fn resolved_search_paths(&self) -> Vec<PathBuf> {
        self.discovery
            .search_paths
            .iter()
            .map(|path| self.resolve(path))
            .collect()
    }

    /// Registry declaration files resolved against the project root.
    pub fn resolved_registry_files(&self) -> Vec<PathBuf> {
        self.integration
            .registry_files
            .iter()
            .map(|path| self.resolve(path))
            .collect()
    }

    /// Report directory resolved against the project root.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.resolve(&self.report.output_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}
