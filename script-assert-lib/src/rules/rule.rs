use crate::expr::RuleConfiguration;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The language used by rules that do not name one.
pub const DEFAULT_LANGUAGE: &str = "cel";

/// A named rule from a rule file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    message: Option<String>,
    configuration: RuleConfiguration,
}

impl Rule {
    #[must_use]
    pub const fn new(name: String, message: Option<String>, configuration: RuleConfiguration) -> Self {
        Self {
            name,
            message,
            configuration,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The message reported when a candidate fails this rule
    #[must_use]
    pub fn message(&self) -> String {
        self.message.clone().unwrap_or_else(|| {
            format!("expression \"{}\" didn't evaluate to true", self.configuration.expression())
        })
    }

    #[must_use]
    pub const fn configuration(&self) -> &RuleConfiguration {
        &self.configuration
    }
}

impl Serialize for Rule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Rule", 5)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("language", self.configuration.language())?;
        state.serialize_field("expression", self.configuration.expression())?;
        state.serialize_field("alias", self.configuration.alias())?;
        if let Some(ref message) = self.message {
            state.serialize_field("message", message)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct RuleData {
            name: String,
            #[serde(default = "default_language")]
            language: String,
            expression: String,
            alias: Option<String>,
            message: Option<String>,
        }

        fn default_language() -> String {
            DEFAULT_LANGUAGE.to_string()
        }

        let data = RuleData::deserialize(deserializer)?;
        if data.name.is_empty() {
            return Err(D::Error::custom("the name of a rule must not be empty"));
        }

        let configuration = RuleConfiguration::new(data.language, data.expression, data.alias)
            .map_err(|e| D::Error::custom(format!("rule '{}': {e}", data.name)))?;

        Ok(Self::new(data.name, data.message, configuration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::DEFAULT_ALIAS;

    #[test]
    fn test_deserialize_minimal_rule() {
        let rule: Rule = serde_json::from_str(r#"{"name": "positive", "expression": "_this.count > 0"}"#).unwrap();

        assert_eq!(rule.name(), "positive");
        assert_eq!(rule.configuration().language(), DEFAULT_LANGUAGE);
        assert_eq!(rule.configuration().alias(), DEFAULT_ALIAS);
        assert_eq!(rule.message(), "expression \"_this.count > 0\" didn't evaluate to true");
    }

    #[test]
    fn test_deserialize_full_rule() {
        let rule: Rule = serde_json::from_str(
            r#"{"name": "ordered", "language": "CEL", "expression": "e.a < e.b", "alias": "e", "message": "out of order"}"#,
        )
        .unwrap();

        assert_eq!(rule.configuration().language(), "CEL");
        assert_eq!(rule.configuration().alias(), "e");
        assert_eq!(rule.message(), "out of order");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let result: Result<Rule, _> = serde_json::from_str(r#"{"name": "", "expression": "true"}"#);
        assert!(result.unwrap_err().to_string().contains("name of a rule must not be empty"));
    }

    #[test]
    fn test_invalid_configuration_names_the_rule() {
        let result: Result<Rule, _> = serde_json::from_str(r#"{"name": "broken", "expression": ""}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("rule 'broken'"), "{message}");
        assert!(message.contains("expression of a rule must not be empty"), "{message}");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Rule, _> = serde_json::from_str(r#"{"name": "x", "expression": "true", "mesage": "typo"}"#);
        assert!(result.is_err(), "misspelled field should be rejected");
    }

    #[test]
    fn test_serialize_omits_missing_message() {
        let rule: Rule = serde_json::from_str(r#"{"name": "x", "expression": "true"}"#).unwrap();
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["alias"], "_this");
        assert!(!json.as_object().unwrap().contains_key("message"));
    }
}
