//! Structured fields forwarded to a backend
use crate::value::{Value, fmt_entries};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// One unit of the normalized argument sequence.
///
/// This is a closed set: a labeled scalar, a mapping kept as one indivisible field, or a
/// sequence kept as one indivisible field.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredArgument {
    KeyValue { key: String, value: Value },
    Entries(Vec<(String, Value)>),
    /// `value` is always a [`Value::Seq`].
    Array { key: String, value: Value },
}

impl StructuredArgument {
    pub fn kv(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn entries(entries: Vec<(String, Value)>) -> Self {
        Self::Entries(entries)
    }

    pub fn array(key: impl Into<String>, items: Vec<Value>) -> Self {
        Self::Array {
            key: key.into(),
            value: Value::Seq(items),
        }
    }

    /// Label of the field; mappings carry no label of their own.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyValue { key, .. } | Self::Array { key, .. } => Some(key),
            Self::Entries(_) => None,
        }
    }

    /// Flattened view of the key/value pairs carried by this field.
    pub fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        match self {
            Self::KeyValue { key, value } | Self::Array { key, value } => {
                Box::new(std::iter::once((key.as_str(), value)))
            }
            Self::Entries(entries) => Box::new(entries.iter().map(|(k, v)| (k.as_str(), v))),
        }
    }

    /// Looks up a value by label, searching inside mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Number of key/value pairs carried by this field.
    pub fn len(&self) -> usize {
        match self {
            Self::Entries(entries) => entries.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts the field into a value, mappings becoming [`Value::Map`].
    /// Used when a field is nested inside another field's payload.
    pub fn into_value(self) -> Value {
        match self {
            Self::KeyValue { key, value } | Self::Array { key, value } => {
                Value::Map(vec![(key, value)])
            }
            Self::Entries(entries) => Value::Map(entries),
        }
    }
}

impl fmt::Display for StructuredArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyValue { key, value } | Self::Array { key, value } => {
                write!(f, "{key}={value}")
            }
            Self::Entries(entries) => fmt_entries(f, entries),
        }
    }
}

impl Serialize for StructuredArgument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.pairs() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
