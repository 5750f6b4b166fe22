use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::constants::{self, DEFAULT_ROOT};
use crate::discovery::discover;
use crate::error::Result;
use crate::normalizer::WriteMode;

#[derive(Parser, Debug)]
#[command(name = "fix-imports")]
#[command(about = "Strip version suffixes from package import specifiers")]
#[command(version)]
pub struct Cli {
    /// Files to process. When omitted, the root directory is scanned
    pub files: Vec<PathBuf>,

    /// Directory to scan for source files
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// File extension to scan (repeatable). Defaults to ts and tsx
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Only scan the root directory itself, not its subdirectories
    #[arg(long)]
    pub flat: bool,

    /// Rewrite every scanned file, even when nothing changed
    #[arg(long, conflicts_with = "dry_run")]
    pub always_write: bool,

    /// Report files that would change without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a TOML config file (defaults to ./fix-imports.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write JSON logs to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Where and what to scan once flags and config are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub recursive: bool,
}

impl Cli {
    /// Flags win over config values, which win over the built-in defaults.
    pub fn scan_settings(&self, config: &Config) -> ScanSettings {
        let root = self
            .root
            .clone()
            .or_else(|| config.root.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
        let extensions = if !self.extensions.is_empty() {
            self.extensions.clone()
        } else {
            config
                .extensions
                .clone()
                .unwrap_or_else(constants::default_extensions)
        };
        let recursive = !self.flat && config.recursive.unwrap_or(true);

        ScanSettings {
            root,
            extensions,
            recursive,
        }
    }

    /// `--dry-run` beats any write setting.
    pub fn write_mode(&self, config: &Config) -> WriteMode {
        if self.dry_run {
            WriteMode::DryRun
        } else if self.always_write || config.always_write.unwrap_or(false) {
            WriteMode::Always
        } else {
            WriteMode::OnChange
        }
    }

    /// Explicit files as given, otherwise the discovered scan set.
    pub fn file_set(&self, config: &Config) -> Result<Vec<PathBuf>> {
        if !self.files.is_empty() {
            return Ok(self.files.clone());
        }
        let scan = self.scan_settings(config);
        discover(&scan.root, &scan.extensions, scan.recursive)
    }

    /// Log directory from the flag, else from a successfully loaded config.
    pub fn log_dir(&self, config: Option<&Config>) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| config.and_then(|c| c.log_dir.clone()))
    }
}
