//! Command dispatch logic for script-assert

use super::{CheckArgs, InitArgs, ValidateArgs, check_candidates, init_rules, list_languages, validate_rules};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "script-assert", version, author, long_about = None)]
#[command(about = "Check documents against declarative cross-field rules")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check candidate documents against a rule file
    Check(Box<CheckArgs>),
    /// Validate a rule file without checking any candidates
    Validate(ValidateArgs),
    /// Generate a default rule file
    Init(InitArgs),
    /// List the registered expression languages
    Languages,
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        Command::Check(check_args) => check_candidates(host, check_args).await,
        Command::Validate(validate_args) => validate_rules(host, validate_args),
        Command::Init(init_args) => init_rules(host, init_args),
        Command::Languages => list_languages(host),
    }
}
