//! Core domain types for postmortem stores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PostmortemError;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A postmortem entry collected during the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Postmortem URL, trimmed.
    pub url: String,
    /// Source domain derived from `url`.
    pub domain: String,
    /// Keywords in the order they were entered.
    pub keywords: Vec<String>,
    /// Incident date as `YYYY-MM-DD`.
    pub date: String,
}

// ---------------------------------------------------------------------------
// StoredRecord
// ---------------------------------------------------------------------------

/// A record as it exists in the store file.
///
/// The underlying JSON object is kept as-is so that every field (including
/// ones this tool does not know about) survives a load/write round trip in
/// its original key order. Deserialization only requires a string `url` and
/// a string array `keywords`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct StoredRecord(Map<String, Value>);

impl StoredRecord {
    /// The record's URL.
    pub fn url(&self) -> &str {
        self.0.get("url").and_then(Value::as_str).unwrap_or_default()
    }

    /// The record's keywords, in stored order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.0
            .get("keywords")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }
}

impl TryFrom<Map<String, Value>> for StoredRecord {
    type Error = PostmortemError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        if !map.get("url").is_some_and(Value::is_string) {
            return Err(PostmortemError::parse("record is missing a string `url`"));
        }

        let keywords_ok = map
            .get("keywords")
            .and_then(Value::as_array)
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !keywords_ok {
            return Err(PostmortemError::parse(
                "record is missing a string array `keywords`",
            ));
        }

        Ok(Self(map))
    }
}

impl From<StoredRecord> for Map<String, Value> {
    fn from(record: StoredRecord) -> Self {
        record.0
    }
}

impl From<Record> for StoredRecord {
    fn from(record: Record) -> Self {
        let mut map = Map::new();
        map.insert("url".into(), Value::String(record.url));
        map.insert("domain".into(), Value::String(record.domain));
        map.insert(
            "keywords".into(),
            Value::Array(record.keywords.into_iter().map(Value::String).collect()),
        );
        map.insert("date".into(), Value::String(record.date));
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The ordered sequence of records persisted in a store file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store(Vec<StoredRecord>);

impl Store {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in file order.
    pub fn records(&self) -> &[StoredRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append new session records after the existing ones.
    pub fn append(&mut self, records: impl IntoIterator<Item = Record>) {
        self.0.extend(records.into_iter().map(StoredRecord::from));
    }
}

impl From<Vec<StoredRecord>> for Store {
    fn from(records: Vec<StoredRecord>) -> Self {
        Self(records)
    }
}
