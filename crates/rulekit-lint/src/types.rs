//! Rule configuration types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Normalized rule severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule disabled (`"off"` / `0`).
    Off,
    /// Rule reports warnings (`"warn"` / `1`).
    Warn,
    /// Rule reports errors (`"error"` / `2`).
    Error,
}

impl Severity {
    /// Parse a severity token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "off" => Some(Self::Off),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Parse a numeric severity level.
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Warn),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::from_token(s),
            Value::Number(n) => n.as_i64().and_then(Self::from_level),
            _ => None,
        }
    }
}

/// A single rule's configuration, kept exactly as written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// Numeric severity, e.g. `2`.
    Level(i64),
    /// Severity token, e.g. `"error"`.
    Token(String),
    /// Severity followed by rule options, e.g. `["error", "always"]`.
    WithOptions(Vec<Value>),
}

impl RuleValue {
    /// Interpret a raw JSON value as a rule value.
    ///
    /// Returns `None` for shapes that are not a token, a number, or a
    /// non-empty array headed by a token or number.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Level),
            Value::String(s) => Some(Self::Token(s.clone())),
            Value::Array(items) => match items.first() {
                Some(Value::String(_) | Value::Number(_)) => Some(Self::WithOptions(items.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    /// Normalized severity, when recognizable.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::Level(level) => Severity::from_level(*level),
            Self::Token(token) => Severity::from_token(token),
            Self::WithOptions(items) => items.first().and_then(Severity::from_value),
        }
    }

    /// Rule options following the severity (empty unless [`RuleValue::WithOptions`]).
    pub fn options(&self) -> &[Value] {
        match self {
            Self::WithOptions(items) => items.get(1..).unwrap_or_default(),
            _ => &[],
        }
    }
}

/// Mapping from rule identifier to its configuration.
///
/// Ordered by rule id so serialized output is stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleConfig(BTreeMap<String, RuleValue>);

impl RuleConfig {
    /// Extract the `rules` mapping from a parsed configuration object.
    ///
    /// Missing or non-object `rules` yields an empty config. Entries with an
    /// unrecognized value shape are dropped.
    pub fn from_config_object(config: &Value) -> Self {
        let Some(rules) = config.get("rules").and_then(Value::as_object) else {
            return Self::default();
        };

        let mut map = BTreeMap::new();
        for (rule, raw) in rules {
            match RuleValue::from_value(raw) {
                Some(value) => {
                    let _ = map.insert(rule.clone(), value);
                }
                None => debug!(rule, "dropping rule with unrecognized value"),
            }
        }
        Self(map)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no rules.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up one rule.
    pub fn get(&self, rule: &str) -> Option<&RuleValue> {
        self.0.get(rule)
    }

    /// Iterate rules in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rules whose severity is not `off`.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &RuleValue)> {
        self.iter()
            .filter(|(_, v)| v.severity() != Some(Severity::Off))
    }
}

impl FromIterator<(String, RuleValue)> for RuleConfig {
    fn from_iter<I: IntoIterator<Item = (String, RuleValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
