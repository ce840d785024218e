use super::Rule;
use crate::Result;
use crate::backends::BackendRegistry;
use crate::expr::ExpressionConstraint;
use camino::Utf8Path;
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

/// The rule file looked for when none is given
pub const DEFAULT_RULES_FILE: &str = "script-assert.toml";

/// The rule file written by `init`, embedded from `default_rules.toml`
pub const DEFAULT_RULES_TOML: &str = include_str!("../../default_rules.toml");

/// The serialization format of a rule file or candidate document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Picks a format from a file extension, falling back to TOML
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("yml" | "yaml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    /// Deserializes `text` in this format
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid in this format or does not match `T`
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T> {
        match self {
            Self::Toml => toml::from_str(text).into_app_err("parsing TOML"),
            Self::Yaml => serde_yaml::from_str(text).into_app_err("parsing YAML"),
            Self::Json => serde_json::from_str(text).into_app_err("parsing JSON"),
        }
    }
}

/// The contents of a rule file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    /// How long `check` lets a single evaluation run before giving up on it
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,

    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Loads a rule file, choosing the format from its extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it declares the same rule
    /// name twice
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading rule file '{path}'"))?;
        Self::parse(&text, DocumentFormat::from_path(path)).into_app_err_with(|| format!("loading rule file '{path}'"))
    }

    /// Parses rule file contents
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or declares the same rule name twice
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        let rule_set: Self = format.parse(text)?;
        rule_set.validate()?;
        Ok(rule_set)
    }

    /// Writes the default rule file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_RULES_TOML).into_app_err_with(|| format!("writing default rules to {output_path}"))?;
        Ok(())
    }

    /// Initializes one constraint per rule, in declaration order
    #[must_use]
    pub fn constraints(&self, registry: &Arc<BackendRegistry>) -> Vec<(Rule, ExpressionConstraint)> {
        self.rules
            .iter()
            .map(|rule| {
                let constraint = ExpressionConstraint::with_registry(rule.configuration().clone(), Arc::clone(registry));
                (rule.clone(), constraint)
            })
            .collect()
    }

    /// Rules whose language has no backend in `registry`
    pub fn unresolved<'a>(&'a self, registry: &'a BackendRegistry) -> impl Iterator<Item = &'a Rule> {
        self.rules
            .iter()
            .filter(|rule| !registry.contains(rule.configuration().language()))
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name()) {
                bail!("rule '{}' is declared more than once", rule.name());
            }
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(app_err!("timeout must be greater than zero"));
        }

        Ok(())
    }
}
