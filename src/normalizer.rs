use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{FixerError, Result};
use crate::rules::RuleSet;

/// When a processed file is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write only files whose content changed
    #[default]
    OnChange,
    /// Rewrite every processed file, even when the content is identical
    Always,
    /// Never write; only report what would change
    DryRun,
}

/// Result of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub written: bool,
    pub replacements: usize,
}

/// Totals for one run over a file set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fixed: Vec<PathBuf>,
    pub total: usize,
    pub replacements: usize,
    /// Nothing was written; `fixed` lists the files that would change
    pub dry_run: bool,
}

impl RunSummary {
    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Would fix" } else { "Fixed" };
        write!(
            f,
            "{} imports in {} out of {} files",
            verb,
            self.fixed_count(),
            self.total
        )
    }
}

/// Rewrites versioned import specifiers in files using an ordered rule set.
pub struct ImportNormalizer {
    rules: RuleSet,
    mode: WriteMode,
}

impl ImportNormalizer {
    pub fn new(rules: RuleSet, mode: WriteMode) -> Self {
        Self { rules, mode }
    }

    /// Apply the rules to in-memory text.
    pub fn fix_text(&self, text: &str) -> (String, usize) {
        self.rules.apply(text)
    }

    /// Read `path`, rewrite its imports and persist according to the write mode.
    pub fn fix_file(&self, path: &Path) -> Result<FileOutcome> {
        let bytes = fs::read(path).map_err(|source| FixerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let original = String::from_utf8(bytes).map_err(|_| FixerError::Decode {
            path: path.to_path_buf(),
        })?;

        let (content, replacements) = self.fix_text(&original);
        let changed = content != original;

        let written = match self.mode {
            WriteMode::OnChange if changed => true,
            WriteMode::Always => true,
            _ => false,
        };
        if written {
            fs::write(path, &content).map_err(|source| FixerError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        debug!(
            path = %path.display(),
            changed,
            written,
            replacements,
            "Processed file"
        );

        Ok(FileOutcome {
            path: path.to_path_buf(),
            changed,
            written,
            replacements,
        })
    }

    /// Process `files` in order, emitting a status line to `out` for each
    /// changed file. Stops at the first error; files already rewritten
    /// stay rewritten.
    pub fn run<W: Write>(&self, files: &[PathBuf], out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary {
            dry_run: self.mode == WriteMode::DryRun,
            ..RunSummary::default()
        };

        for path in files {
            let outcome = self.fix_file(path)?;
            summary.total += 1;
            if outcome.changed {
                let verb = if summary.dry_run { "Would fix" } else { "Fixed" };
                writeln!(out, "{} imports in {}", verb, path.display())?;
                summary.replacements += outcome.replacements;
                summary.fixed.push(outcome.path);
            }
        }

        info!(
            fixed = summary.fixed_count(),
            total = summary.total,
            replacements = summary.replacements,
            "Run finished"
        );
        Ok(summary)
    }
}
