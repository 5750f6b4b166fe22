//! Strips pinned version suffixes (`zod@3.22.4` -> `zod`) from package
//! import specifiers across a tree of source files.

pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod rules;

pub use config::Config;
pub use error::{FixerError, Result};
pub use normalizer::{FileOutcome, ImportNormalizer, RunSummary, WriteMode};
pub use rules::{PatternRule, RuleSet};
