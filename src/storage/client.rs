//! Store client capability
//!
//! A store client runs the two commands the admin service needs: an `INFO` query and a
//! global flush. `RedisPool` is the production implementation.

use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Client able to query server statistics and flush the whole keyspace
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Run `INFO` and return its fields
    async fn info(&self) -> Result<InfoReply>;

    /// Run `FLUSHALL`; `Ok(false)` means the server answered but did not accept it
    async fn flush_all(&self) -> Result<bool>;
}

/// Single `INFO` field value
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl InfoValue {
    /// Value as a non-negative integer, if it is one
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            InfoValue::Integer(value) => u64::try_from(*value).ok(),
            InfoValue::Float(value) if value.is_finite() && *value >= 0.0 => Some(*value as u64),
            InfoValue::Float(_) => None,
            InfoValue::Text(text) => {
                let text = text.trim();
                text.parse::<u64>().ok().or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite() && *v >= 0.0)
                        .map(|v| v as u64)
                })
            }
        }
    }

    /// Value rendered as text
    pub fn as_text(&self) -> String {
        match self {
            InfoValue::Text(text) => text.clone(),
            InfoValue::Integer(value) => value.to_string(),
            InfoValue::Float(value) => value.to_string(),
        }
    }
}

impl From<&str> for InfoValue {
    fn from(value: &str) -> Self {
        InfoValue::Text(value.to_string())
    }
}

impl From<String> for InfoValue {
    fn from(value: String) -> Self {
        InfoValue::Text(value)
    }
}

impl From<i64> for InfoValue {
    fn from(value: i64) -> Self {
        InfoValue::Integer(value)
    }
}

impl From<f64> for InfoValue {
    fn from(value: f64) -> Self {
        InfoValue::Float(value)
    }
}

/// Parsed `INFO` reply: field name to value, sections flattened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoReply {
    fields: HashMap<String, InfoValue>,
}

impl InfoReply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the Redis `INFO` text format.
    ///
    /// `# Section` headers and blank lines are skipped, CRLF endings are accepted and
    /// lines without a `:` are ignored.
    pub fn from_text(text: &str) -> Self {
        let fields = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), InfoValue::from(value.trim())))
            .collect();

        Self { fields }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InfoValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.fields.get(key)
    }

    /// Non-negative integer field; absent or unparseable fields are `None`
    pub fn unsigned(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(InfoValue::as_u64)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(InfoValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<InfoValue>> FromIterator<(K, V)> for InfoReply {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
