//! Front-matter values

use serde::Serialize;

use super::frontmatter::FrontMatterError;
use crate::helpers::looks_like_date;

/// A single decoded front-matter value.
///
/// Front matter is deliberately flat: every key maps to a scalar or to a
/// list of strings. Nested mappings are rejected when decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Key present without a value (`tags:`)
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// A calendar date or timestamp, kept as written. Always parseable.
    Date(String),
    String(String),
    List(Vec<String>),
}

impl Value {
    /// Classify a plain string, promoting date-shaped text to `Value::Date`
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if looks_like_date(&text) {
            Value::Date(text)
        } else {
            Value::String(text)
        }
    }

    /// Human-readable type name, used in validation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Date(_) => "date",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a string or date value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Date(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Read the value as a list of strings.
    ///
    /// A lone string counts as a one-element list and null as an empty list,
    /// so `tags: rust` and `tags: [rust]` mean the same thing.
    pub fn to_string_list(&self) -> Option<Vec<String>> {
        match self {
            Value::List(items) => Some(items.clone()),
            Value::String(s) | Value::Date(s) => Some(vec![s.clone()]),
            Value::Null => Some(Vec::new()),
            _ => None,
        }
    }

    pub(crate) fn from_yaml(key: &str, value: serde_yaml::Value) -> Result<Self, FrontMatterError> {
        use serde_yaml::Value as Yaml;

        match value {
            Yaml::Null => Ok(Value::Null),
            Yaml::Bool(b) => Ok(Value::Bool(b)),
            Yaml::Number(n) => yaml_number(key, &n),
            Yaml::String(s) => Ok(Value::from_text(s)),
            Yaml::Sequence(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Yaml::Null => {}
                        Yaml::String(s) => list.push(s),
                        Yaml::Bool(b) => list.push(b.to_string()),
                        Yaml::Number(n) => list.push(n.to_string()),
                        _ => return Err(unsupported(key)),
                    }
                }
                Ok(Value::List(list))
            }
            Yaml::Mapping(_) | Yaml::Tagged(_) => Err(unsupported(key)),
        }
    }

    pub(crate) fn to_yaml(&self) -> serde_yaml::Value {
        use serde_yaml::Value as Yaml;

        match self {
            Value::Null => Yaml::Null,
            Value::Bool(b) => Yaml::Bool(*b),
            Value::Integer(i) => Yaml::Number((*i).into()),
            Value::Float(f) => Yaml::Number((*f).into()),
            Value::Date(s) | Value::String(s) => Yaml::String(s.clone()),
            Value::List(items) => Yaml::Sequence(items.iter().cloned().map(Yaml::String).collect()),
        }
    }

    pub(crate) fn from_toml(key: &str, value: toml::Value) -> Result<Self, FrontMatterError> {
        use toml::Value as Toml;

        match value {
            Toml::Boolean(b) => Ok(Value::Bool(b)),
            Toml::Integer(i) => Ok(Value::Integer(i)),
            Toml::Float(f) if f.is_nan() => Err(unsupported(key)),
            Toml::Float(f) => Ok(Value::Float(f)),
            Toml::String(s) => Ok(Value::from_text(s)),
            Toml::Datetime(dt) => Ok(Value::from_text(dt.to_string())),
            Toml::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Toml::String(s) => list.push(s),
                        Toml::Boolean(b) => list.push(b.to_string()),
                        Toml::Integer(i) => list.push(i.to_string()),
                        Toml::Float(f) => list.push(f.to_string()),
                        Toml::Datetime(dt) => list.push(dt.to_string()),
                        _ => return Err(unsupported(key)),
                    }
                }
                Ok(Value::List(list))
            }
            Toml::Table(_) => Err(unsupported(key)),
        }
    }

    /// TOML has no null, so `Value::Null` has no TOML form
    pub(crate) fn to_toml(&self) -> Option<toml::Value> {
        use toml::Value as Toml;

        Some(match self {
            Value::Null => return None,
            Value::Bool(b) => Toml::Boolean(*b),
            Value::Integer(i) => Toml::Integer(*i),
            Value::Float(f) => Toml::Float(*f),
            Value::Date(s) => match s.parse::<toml::value::Datetime>() {
                Ok(dt) => Toml::Datetime(dt),
                Err(_) => Toml::String(s.clone()),
            },
            Value::String(s) => Toml::String(s.clone()),
            Value::List(items) => Toml::Array(items.iter().cloned().map(Toml::String).collect()),
        })
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// NaN is refused: it never compares equal, so it cannot survive a round trip
fn yaml_number(key: &str, n: &serde_yaml::Number) -> Result<Value, FrontMatterError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Integer(i));
    }
    match n.as_f64() {
        Some(f) if !f.is_nan() => Ok(Value::Float(f)),
        _ => Err(unsupported(key)),
    }
}

fn unsupported(key: &str) -> FrontMatterError {
    FrontMatterError::UnsupportedValue {
        key: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_detects_dates() {
        assert_eq!(Value::from_text("2020-01-01"), Value::Date("2020-01-01".into()));
        assert_eq!(
            Value::from_text("2016-09-11 19:30:00 +0800"),
            Value::Date("2016-09-11 19:30:00 +0800".into())
        );
        assert_eq!(Value::from_text("Example"), Value::String("Example".into()));
        assert_eq!(Value::from_text("2020 recap"), Value::String("2020 recap".into()));
    }

    #[test]
    fn test_string_list_coercion() {
        assert_eq!(
            Value::from("Notes").to_string_list(),
            Some(vec!["Notes".to_string()])
        );
        assert_eq!(Value::Null.to_string_list(), Some(Vec::new()));
        assert_eq!(Value::Bool(true).to_string_list(), None);
    }

    #[test]
    fn test_yaml_sequence_of_scalars() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("[a, 1, true]").unwrap();
        let value = Value::from_yaml("tags", yaml).unwrap();
        assert_eq!(
            value,
            Value::List(vec!["a".into(), "1".into(), "true".into()])
        );
    }

    #[test]
    fn test_yaml_nested_mapping_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("{a: 1}").unwrap();
        let err = Value::from_yaml("social", yaml).unwrap_err();
        assert!(err.to_string().contains("social"));
    }

    #[test]
    fn test_nan_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(".nan").unwrap();
        let err = Value::from_yaml("score", yaml).unwrap_err();
        assert!(matches!(err, FrontMatterError::UnsupportedValue { ref key } if key == "score"));

        let table: toml::Table = toml::from_str("score = nan").unwrap();
        assert!(Value::from_toml("score", table["score"].clone()).is_err());

        let yaml: serde_yaml::Value = serde_yaml::from_str(".inf").unwrap();
        assert_eq!(
            Value::from_yaml("score", yaml).unwrap(),
            Value::Float(f64::INFINITY)
        );
    }

    #[test]
    fn test_toml_datetime_becomes_date() {
        let table: toml::Table = toml::from_str("date = 2020-01-01").unwrap();
        let value = Value::from_toml("date", table["date"].clone()).unwrap();
        assert_eq!(value, Value::Date("2020-01-01".into()));
        assert!(matches!(value.to_toml(), Some(toml::Value::Datetime(_))));
    }
}
