//! Records of training metrics.
use crate::error::FledgeError;
use chrono::prelude::{DateTime, Local};
use std::{
    collections::{
        hash_map::{IntoIter, Iter, Keys},
        HashMap,
    },
    convert::Into,
};

/// Represents possible types of values in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// A single floating-point value, typically a metric like a loss.
    Scalar(f32),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A text value.
    String(String),
}

/// A container of named values.
#[derive(Debug, Clone)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns a consuming iterator over the key-value pairs.
    pub fn into_iter_in_record(self) -> IntoIter<String, RecordValue> {
        self.0.into_iter()
    }

    /// Gets the value of the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges records, the rhs preceding the lhs on key collisions.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Returns `true` if the record has no entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a scalar value of the given key.
    pub fn get_scalar(&self, k: &str) -> Result<f32, FledgeError> {
        if let Some(v) = self.0.get(k) {
            match v {
                RecordValue::Scalar(v) => Ok(*v),
                _ => Err(FledgeError::RecordValueTypeError("Scalar".into())),
            }
        } else {
            Err(FledgeError::RecordKeyError(k.into()))
        }
    }

    /// Gets a string value of the given key.
    pub fn get_string(&self, k: &str) -> Result<String, FledgeError> {
        if let Some(v) = self.0.get(k) {
            match v {
                RecordValue::String(s) => Ok(s.clone()),
                _ => Err(FledgeError::RecordValueTypeError("String".into())),
            }
        } else {
            Err(FledgeError::RecordKeyError(k.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};

    #[test]
    fn merge_prefers_rhs_on_collision() {
        let a = Record::from_slice(&[
            ("loss", RecordValue::Scalar(1.0)),
            ("eps", RecordValue::Scalar(0.1)),
        ]);
        let b = Record::from_scalar("loss", 2.0);
        let merged = a.merge(b);
        assert_eq!(merged.get_scalar("loss").unwrap(), 2.0);
        assert_eq!(merged.get_scalar("eps").unwrap(), 0.1);
    }

    #[test]
    fn get_scalar_rejects_wrong_type() {
        let mut record = Record::empty();
        record.insert("name", RecordValue::String("corridor".into()));
        assert!(record.get_scalar("name").is_err());
        assert!(record.get_scalar("missing").is_err());
    }
}
