use super::Verdict;
use crate::Result;
use core::fmt::Write;
use ohno::IntoAppError;

pub fn generate<W: Write>(verdicts: &[Verdict], writer: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(verdicts).into_app_err("serializing verdicts")?;
    writeln!(writer, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::Outcome;

    #[test]
    fn test_outcomes_are_tagged() {
        let verdicts = vec![
            Verdict::new("a.json".to_string(), "ordered".to_string(), Outcome::Passed),
            Verdict::new(
                "a.json".to_string(),
                "broken".to_string(),
                Outcome::Error {
                    message: "no expression backend is registered for language 'js'".to_string(),
                },
            ),
        ];

        let mut output = String::new();
        generate(&verdicts, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["candidate"], "a.json");
        assert_eq!(parsed[0]["rule"], "ordered");
        assert_eq!(parsed[0]["outcome"], "passed");
        assert_eq!(parsed[1]["outcome"], "error");
        assert_eq!(parsed[1]["message"], "no expression backend is registered for language 'js'");
    }
}
