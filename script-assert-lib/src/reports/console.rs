use super::{Outcome, Verdict};
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(verdicts: &[Verdict], use_colors: bool, writer: &mut W) -> Result<()> {
    let mut previous_candidate: Option<&str> = None;

    for verdict in verdicts {
        if previous_candidate != Some(verdict.candidate.as_str()) {
            if previous_candidate.is_some() {
                writeln!(writer)?;
            }

            if use_colors {
                writeln!(writer, "{}", verdict.candidate.bold())?;
            } else {
                writeln!(writer, "{}", verdict.candidate)?;
            }
            previous_candidate = Some(&verdict.candidate);
        }

        let status = status_label(&verdict.outcome);
        let status = if use_colors {
            match verdict.outcome {
                Outcome::Passed => status.green().bold().to_string(),
                Outcome::Failed { .. } => status.red().bold().to_string(),
                Outcome::Error { .. } | Outcome::TimedOut => status.yellow().bold().to_string(),
            }
        } else {
            status.to_string()
        };

        match &verdict.outcome {
            Outcome::Passed | Outcome::TimedOut => writeln!(writer, "  {status} {}", verdict.rule)?,
            Outcome::Failed { message } | Outcome::Error { message } => writeln!(writer, "  {status} {}: {message}", verdict.rule)?,
        }
    }

    let problems = verdicts.iter().filter(|v| v.outcome.is_problem()).count();
    if !verdicts.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{} check(s), {problems} problem(s)", verdicts.len())?;
    }

    Ok(())
}

const fn status_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Passed => "PASS   ",
        Outcome::Failed { .. } => "FAIL   ",
        Outcome::Error { .. } => "ERROR  ",
        Outcome::TimedOut => "TIMEOUT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(candidate: &str, rule: &str, outcome: Outcome) -> Verdict {
        Verdict::new(candidate.to_string(), rule.to_string(), outcome)
    }

    #[test]
    fn test_groups_by_candidate() {
        let verdicts = vec![
            verdict("a.json", "ordered", Outcome::Passed),
            verdict("a.json", "positive", Outcome::Failed { message: "must be positive".to_string() }),
            verdict("b.json", "ordered", Outcome::TimedOut),
        ];

        let mut output = String::new();
        generate(&verdicts, false, &mut output).unwrap();

        insta::assert_snapshot!(output.trim_end(), @r"
        a.json
          PASS    ordered
          FAIL    positive: must be positive

        b.json
          TIMEOUT ordered

        3 check(s), 2 problem(s)
        ");
    }

    #[test]
    fn test_empty_report() {
        let mut output = String::new();
        generate(&[], false, &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_colors_add_escape_codes() {
        let verdicts = vec![verdict("a.json", "ordered", Outcome::Passed)];

        let mut output = String::new();
        generate(&verdicts, true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
    }
}
