//! Label sets and metric/label name validation.

use std::fmt;

use crate::error::{LumenError, Result};

/// Label values identifying one series within a family.
///
/// Pairs are kept in the family's declared schema order, so two sets built
/// from the same schema compare equal iff every value matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub(crate) fn from_schema(names: &[String], values: &[String]) -> Self {
        Self::new(names.iter().cloned().zip(values.iter().cloned()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Renders `{k="v",...}`, or nothing for an empty set.
impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pairs.is_empty() {
            return Ok(());
        }
        f.write_str("{")?;
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}=\"{}\"", k, escape_label_value(v))?;
        }
        f.write_str("}")
    }
}

/// Helper to escape label values.
pub(crate) fn escape_label_value(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub(crate) fn validate_metric_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if !ok {
        return Err(LumenError::InvalidName(format!("metric name {name:?}")));
    }
    Ok(())
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, no reserved `__` prefix, no duplicates.
pub(crate) fn validate_label_names(names: &[&str]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        let mut chars = name.chars();
        let ok = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if !ok || name.starts_with("__") {
            return Err(LumenError::InvalidName(format!("label name {name:?}")));
        }
        if names[..i].contains(name) {
            return Err(LumenError::InvalidName(format!("duplicate label name {name:?}")));
        }
    }
    Ok(())
}
