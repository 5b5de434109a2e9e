//! Command-line arguments and their mapping onto [`StencilConfig`].

use std::path::{Path, PathBuf};

use clap::Parser;
use stencil_core::{CONFIG_FILE_NAME, Result, StencilConfig};

/// Command-line arguments for the `stencil` binary
#[derive(Debug, Parser)]
#[command(name = "stencil")]
#[command(version, about = "Validate a template corpus against its schemas and content standards")]
pub struct Cli {
    /// Project root that relative paths are resolved against
    #[arg(short, long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Configuration file [default: <project>/stencil.toml]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,

    /// Directory receiving the reports
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Search path to validate; repeat to add more. Replaces the configured paths
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Loads the configuration file and applies flag overrides.
    ///
    /// An explicit `--config` must exist; the default file is optional.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or the merged
    /// configuration is invalid.
    pub fn resolve_config(&self) -> Result<StencilConfig> {
        let mut config = match &self.config {
            Some(path) => StencilConfig::load_from_file(path)?,
            None => StencilConfig::load_or_default(&self.default_config_path())?,
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn default_config_path(&self) -> PathBuf {
        self.project
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    fn apply_overrides(&self, config: &mut StencilConfig) {
        if let Some(project) = &self.project {
            config.project_root.clone_from(project);
        }
        if self.strict {
            config.strict = true;
        }
        if let Some(output) = &self.output {
            config.report.output_dir.clone_from(output);
        }
        if !self.paths.is_empty() {
            config.discovery.search_paths.clone_from(&self.paths);
        }
    }
}
