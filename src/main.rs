use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tracing::{error, info};

use import_fixer::cli::Cli;
use import_fixer::logging;
use import_fixer::{Config, ImportNormalizer};

fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let rules = config.rule_set().context("Failed to build rule set")?;
    let mode = cli.write_mode(config);

    if cli.files.is_empty() {
        let scan = cli.scan_settings(config);
        info!(
            root = %scan.root.display(),
            extensions = ?scan.extensions,
            recursive = scan.recursive,
            "Scanning for source files"
        );
    }
    let files = cli.file_set(config).context("Failed to collect files")?;

    info!(files = files.len(), rules = rules.len(), ?mode, "Starting import fix");
    let normalizer = ImportNormalizer::new(rules, mode);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = normalizer.run(&files, &mut out)?;
    writeln!(out, "{}", summary)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    let _guard = logging::init_logging(cli.log_dir(config.as_ref().ok()).as_deref());

    let result = config
        .context("Failed to load configuration")
        .and_then(|config| run(&cli, &config));

    if let Err(e) = result {
        error!("Import fix aborted: {:#}", e);
        return Err(e);
    }
    Ok(())
}
