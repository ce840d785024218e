use super::{InvalidConfiguration, RuleField};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The alias a candidate is bound under when a rule does not name one.
pub const DEFAULT_ALIAS: &str = "_this";

/// The immutable description of an expression rule: which language to use, what to evaluate,
/// and under which name the candidate is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfiguration {
    language: String,
    expression: String,
    alias: String,
}

impl RuleConfiguration {
    /// Validates and builds a rule configuration
    ///
    /// An omitted alias falls back to [`DEFAULT_ALIAS`]; an alias that is supplied must not be
    /// empty. Fields are checked in the order language, expression, alias.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration`] naming the first empty field
    pub fn new(
        language: impl Into<String>,
        expression: impl Into<String>,
        alias: Option<String>,
    ) -> Result<Self, InvalidConfiguration> {
        let language = language.into();
        if language.is_empty() {
            return Err(InvalidConfiguration { field: RuleField::Language });
        }

        let expression = expression.into();
        if expression.is_empty() {
            return Err(InvalidConfiguration {
                field: RuleField::Expression,
            });
        }

        let alias = match alias {
            Some(alias) if alias.is_empty() => return Err(InvalidConfiguration { field: RuleField::Alias }),
            Some(alias) => alias,
            None => DEFAULT_ALIAS.to_string(),
        };

        Ok(Self {
            language,
            expression,
            alias,
        })
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl Serialize for RuleConfiguration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("RuleConfiguration", 3)?;
        state.serialize_field("language", &self.language)?;
        state.serialize_field("expression", &self.expression)?;
        state.serialize_field("alias", &self.alias)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for RuleConfiguration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct RuleConfigurationData {
            language: String,
            expression: String,
            alias: Option<String>,
        }

        let data = RuleConfigurationData::deserialize(deserializer)?;

        Self::new(data.language, data.expression, data.alias).map_err(D::Error::custom)
    }
}
