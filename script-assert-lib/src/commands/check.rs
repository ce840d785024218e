use super::Host;
use super::common::{ColorMode, OutputFormat, RulesArgs, init_logging, use_colors};
use crate::Result;
use crate::backends::BackendRegistry;
use crate::expr::{DeclarationError, ExpressionConstraint};
use crate::reports::{Outcome, Verdict, generate_console, generate_json};
use crate::rules::{DocumentFormat, Rule, RuleSet};
use crate::value::Value;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const LOG_TARGET: &str = "     check";

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Candidate documents to check (JSON, YAML, or TOML, chosen by file extension)
    #[arg(value_name = "FILE", required = true)]
    pub candidates: Vec<Utf8PathBuf>,

    #[command(flatten)]
    pub rules: RulesArgs,

    /// Abandon an evaluation that runs longer than this (e.g. `500ms`, `2s`); overrides the rule file
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Format of the verdict report
    #[arg(long, value_name = "FORMAT", default_value = "console")]
    pub format: OutputFormat,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

type Evaluation = JoinHandle<Result<bool, DeclarationError>>;

/// Checks every candidate against every rule and reports the verdicts
///
/// # Errors
///
/// Returns an error if the rule file or a candidate cannot be loaded, or if any rule failed or
/// could not be evaluated
pub async fn check_candidates<H: Host>(host: &mut H, args: &CheckArgs) -> Result<()> {
    init_logging(args.rules.log_level);

    let rule_set = RuleSet::load(&args.rules.rules_path())?;
    let timeout = args.timeout.or(rule_set.timeout);
    let constraints: Vec<(Rule, Arc<ExpressionConstraint>)> = rule_set
        .constraints(&BackendRegistry::shared())
        .into_iter()
        .map(|(rule, constraint)| (rule, Arc::new(constraint)))
        .collect();

    log::info!(
        target: LOG_TARGET,
        "Checking {} candidate(s) against {} rule(s)",
        args.candidates.len(),
        constraints.len()
    );

    let mut verdicts = Vec::with_capacity(args.candidates.len() * constraints.len());
    for path in &args.candidates {
        let candidate = Arc::new(load_candidate(path)?);

        let evaluations: Vec<(Evaluation, Option<Instant>)> = constraints
            .iter()
            .map(|(_, constraint)| {
                let constraint = Arc::clone(constraint);
                let candidate = Arc::clone(&candidate);
                let deadline = timeout.map(|t| Instant::now() + t);
                (tokio::task::spawn_blocking(move || constraint.evaluate_value(&candidate)), deadline)
            })
            .collect();

        for ((rule, _), (evaluation, deadline)) in constraints.iter().zip(evaluations) {
            let outcome = await_outcome(rule, evaluation, deadline).await;
            verdicts.push(Verdict::new(path.to_string(), rule.name().to_string(), outcome));
        }
    }

    let mut report = String::new();
    match args.format {
        OutputFormat::Console => generate_console(&verdicts, use_colors(args.color), &mut report)?,
        OutputFormat::Json => generate_json(&verdicts, &mut report)?,
    }
    let _ = write!(host.output(), "{report}");

    let problems = verdicts.iter().filter(|v| v.outcome.is_problem()).count();
    if problems > 0 {
        let _ = writeln!(host.error(), "❌ {problems} check(s) did not pass");
        host.exit(1);
        return Err(ohno::app_err!("{problems} check(s) did not pass"));
    }

    Ok(())
}

fn load_candidate(path: &Utf8Path) -> Result<Value> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading candidate '{path}'"))?;
    let json: serde_json::Value = DocumentFormat::from_path(path)
        .parse(&text)
        .into_app_err_with(|| format!("parsing candidate '{path}'"))?;
    Ok(Value::from(json))
}

/// Waits for one evaluation, giving up once `deadline` passes.
///
/// An abandoned evaluation keeps running on the blocking pool; expressions cannot be interrupted.
async fn await_outcome(rule: &Rule, evaluation: Evaluation, deadline: Option<Instant>) -> Outcome {
    let joined = match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, evaluation).await {
            Ok(joined) => joined,
            Err(_) => {
                log::warn!(target: LOG_TARGET, "Rule '{}' timed out", rule.name());
                return Outcome::TimedOut;
            }
        },
        None => evaluation.await,
    };

    match joined {
        Ok(Ok(true)) => Outcome::Passed,
        Ok(Ok(false)) => Outcome::Failed { message: rule.message() },
        Ok(Err(e)) => Outcome::Error {
            message: format!("{e}{}", source_suffix(&e)),
        },
        Err(e) => Outcome::Error {
            message: format!("evaluation did not complete: {e}"),
        },
    }
}

fn source_suffix(err: &DeclarationError) -> String {
    match err {
        DeclarationError::ExpressionExecutionFailure { source, .. } => format!(" ({source})"),
        DeclarationError::UnresolvedBackend { .. } | DeclarationError::NonBooleanResult { .. } => String::new(),
    }
}
