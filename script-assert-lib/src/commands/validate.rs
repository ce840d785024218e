use super::Host;
use super::common::{RulesArgs, init_logging};
use crate::Result;
use crate::backends::BackendRegistry;
use crate::rules::RuleSet;
use camino::Utf8Path;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub rules: RulesArgs,
}

/// Loads a rule file and checks that every rule names a registered language
fn validate_rules_inner(path: &Utf8Path, registry: &BackendRegistry) -> Result<RuleSet> {
    let rule_set = RuleSet::load(path)?;

    let unresolved: Vec<_> = rule_set
        .unresolved(registry)
        .map(|rule| format!("rule '{}' uses unknown language '{}'", rule.name(), rule.configuration().language()))
        .collect();

    if !unresolved.is_empty() {
        return Err(ohno::app_err!("{}", unresolved.join("; ")));
    }

    Ok(rule_set)
}

/// Validates a rule file without evaluating anything
///
/// # Errors
///
/// Returns an error if the rule file cannot be loaded or parsed, or if a rule names a language
/// with no registered backend
pub fn validate_rules<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    init_logging(args.rules.log_level);
    let path = args.rules.rules_path();

    match validate_rules_inner(&path, &BackendRegistry::shared()) {
        Ok(rule_set) => {
            let _ = writeln!(host.output(), "Rule file is valid");
            let _ = writeln!(host.output(), "Rule file: {path}");
            let _ = writeln!(host.output(), "Rules: {}", rule_set.rules.len());
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Rule file validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
