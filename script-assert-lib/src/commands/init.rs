use super::Host;
use crate::Result;
use crate::rules::{DEFAULT_RULES_FILE, RuleSet};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output rule file path (default is `script-assert.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,
}

/// Writes the default rule file
///
/// # Errors
///
/// Returns an error if the output file exists and `--force` was not given, or if it cannot be written
pub fn init_rules<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_RULES_FILE));

    if output.exists() && !args.force {
        ohno::bail!("'{output}' already exists; use --force to overwrite it");
    }

    RuleSet::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default rule file: {output}");
    Ok(())
}
