//! Per-call search configuration.
//!
//! Configuration is plain data and can be loaded from YAML or JSON:
//!
//! ```yaml
//! case_sensitive: false
//! fields:
//!   address.city:
//!     case_sensitive: true
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::path::names_match;
use crate::schema::Attribute;
use crate::strategy::ParsingStrategy;

/// Overrides applied to one field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Case sensitivity for text comparisons on this field.
    pub case_sensitive: Option<bool>,
}

/// Configuration for compiling criteria.
///
/// Case sensitivity for a text field is decided by, in order: the
/// field's entry in `fields`, the attribute's own declaration, then the
/// top-level `case_sensitive` default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default case sensitivity for text comparisons.
    pub case_sensitive: bool,
    /// Per-path overrides, keyed by dotted field path.
    pub fields: BTreeMap<String, FieldConfig>,
    #[serde(skip)]
    strategy: Option<Arc<dyn ParsingStrategy>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            case_sensitive: true,
            fields: BTreeMap::new(),
            strategy: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        SearchConfig::default()
    }

    /// Makes text comparisons case-insensitive by default.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Adds an override for a dotted field path.
    pub fn with_field(mut self, path: impl Into<String>, field: FieldConfig) -> Self {
        self.fields.insert(path.into(), field);
        self
    }

    /// Forces a custom strategy for every criterion compiled with this config.
    pub fn with_strategy(mut self, strategy: Arc<dyn ParsingStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn strategy(&self) -> Option<&Arc<dyn ParsingStrategy>> {
        self.strategy.as_ref()
    }

    /// Loads a configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SiftError::Config(e.to_string()))
    }

    /// Loads a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SiftError::Config(e.to_string()))
    }

    /// Resolves case sensitivity for the field at `path`.
    pub fn case_sensitivity_for(&self, path: &str, attribute: Option<&Attribute>) -> bool {
        self.fields
            .iter()
            .find(|(key, _)| names_match(key, path))
            .and_then(|(_, field)| field.case_sensitive)
            .or_else(|| attribute.and_then(Attribute::case_sensitive))
            .unwrap_or(self.case_sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueType;

    #[test]
    fn defaults_to_case_sensitive() {
        let config = SearchConfig::default();
        assert!(config.case_sensitive);
        assert!(config.case_sensitivity_for("name", None));
        assert!(config.strategy().is_none());
    }

    #[test]
    fn precedence_field_then_attribute_then_default() {
        let attribute = Attribute::new("city", ValueType::text()).with_case_sensitive(true);
        let config = SearchConfig::new().case_insensitive();

        assert!(!config.case_sensitivity_for("name", None));
        assert!(config.case_sensitivity_for("address.city", Some(&attribute)));

        let config = config.with_field(
            "Address.City",
            FieldConfig {
                case_sensitive: Some(false),
            },
        );
        assert!(!config.case_sensitivity_for("address.city", Some(&attribute)));
    }

    #[test]
    fn loads_from_yaml() {
        let yaml = "case_sensitive: false\nfields:\n  address.city:\n    case_sensitive: true\n";
        let config = SearchConfig::from_yaml_str(yaml).unwrap();
        assert!(!config.case_sensitive);
        assert_eq!(
            config.fields.get("address.city"),
            Some(&FieldConfig {
                case_sensitive: Some(true)
            })
        );
    }

    #[test]
    fn loads_from_json_with_defaults() {
        let config = SearchConfig::from_json_str("{}").unwrap();
        assert!(config.case_sensitive);
        assert!(config.fields.is_empty());

        let err = SearchConfig::from_json_str("{\"case_sensitive\": \"nope\"}").unwrap_err();
        assert!(matches!(err, SiftError::Config(_)));
    }
}
