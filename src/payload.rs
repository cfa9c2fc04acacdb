//! Record payload handed to the format writers.
//!
//! A [`Record`] is an ordered mapping from field name to value; key order is
//! insertion order (serde_json is built with `preserve_order`), which is
//! what the tabular writers use for their header.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single record: field name to scalar value, in insertion order.
pub type Record = serde_json::Map<String, Value>;

/// An ordered sequence of records.
///
/// A single mapping converts into a one-element payload.
///
/// # Example
///
/// ```rust
/// use exportpack::payload::{Payload, Record};
/// use serde_json::json;
///
/// let mut record = Record::new();
/// record.insert("id".into(), json!(1));
/// record.insert("name".into(), json!("x"));
///
/// let payload = Payload::from(record);
/// assert_eq!(payload.len(), 1);
/// assert_eq!(payload.columns(), Some(vec!["id", "name"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    records: Vec<Record>,
}

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload from records.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Builds a payload from a JSON value.
    ///
    /// Arrays must contain only objects; a lone object becomes a
    /// one-element payload. Anything else yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(record) => Some(Self::from(record)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => Some(record),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(Self::from_records),
            _ => None,
        }
    }

    /// Builder-style method to append a record.
    #[must_use]
    pub fn with_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Column names taken from the first record's keys.
    pub fn columns(&self) -> Option<Vec<&str>> {
        self.records
            .first()
            .map(|first| first.keys().map(String::as_str).collect())
    }

    /// Returns the records matching `predicate`, in payload order.
    pub fn find<P>(&self, predicate: P) -> Vec<&Record>
    where
        P: Fn(&Record) -> bool,
    {
        self.records.iter().filter(|record| predicate(record)).collect()
    }
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Self {
            records: vec![record],
        }
    }
}

impl From<Vec<Record>> for Payload {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

impl FromIterator<Record> for Payload {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Returns the records of `payload` for which `predicate` holds.
pub fn find_records<P>(payload: &Payload, predicate: P) -> Vec<&Record>
where
    P: Fn(&Record) -> bool,
{
    payload.find(predicate)
}

/// Renders a value as a single text cell.
///
/// Strings are written bare, `null` as an empty cell, nested values as
/// compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_single_record_is_one_element() {
        let payload = Payload::from(record(&[("id", json!(1))]));
        assert_eq!(payload.len(), 1);
        assert!(!payload.is_empty());
    }

    #[test]
    fn test_columns_follow_insertion_order() {
        let payload = Payload::from(record(&[
            ("zeta", json!(1)),
            ("alpha", json!(2)),
            ("mid", json!(3)),
        ]));
        assert_eq!(payload.columns(), Some(vec!["zeta", "alpha", "mid"]));
    }

    #[test]
    fn test_columns_empty_payload() {
        assert_eq!(Payload::new().columns(), None);
    }

    #[test]
    fn test_from_value() {
        let single = Payload::from_value(json!({"a": 1})).unwrap();
        assert_eq!(single.len(), 1);

        let many = Payload::from_value(json!([{"a": 1}, {"a": 2}])).unwrap();
        assert_eq!(many.len(), 2);

        assert!(Payload::from_value(json!([1, 2])).is_none());
        assert!(Payload::from_value(json!("text")).is_none());
    }

    #[test]
    fn test_find_records() {
        let payload = Payload::from_records(vec![
            record(&[("state", json!("NY")), ("id", json!(1))]),
            record(&[("state", json!("OH")), ("id", json!(2))]),
            record(&[("state", json!("NY")), ("id", json!(3))]),
        ]);

        let ny = find_records(&payload, |r| r.get("state") == Some(&json!("NY")));
        assert_eq!(ny.len(), 2);
        assert_eq!(ny[1].get("id"), Some(&json!(3)));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("a,b")), "a,b");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&json!(1.5)), "1.5");
        assert_eq!(cell_text(&json!({"k": [1]})), r#"{"k":[1]}"#);
    }
}
