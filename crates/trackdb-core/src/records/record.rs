//! Normalized records and the record-like inputs they are built from.

use crate::records::value::{Datum, NormalizedValue};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// One normalized cell together with the name it was first seen under.
#[derive(Debug, Clone)]
pub struct Field {
    key: String,
    label: String,
    value: NormalizedValue,
}

impl Field {
    /// Lower-cased field name used for comparison.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name, with the casing of the first occurrence.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &NormalizedValue {
        &self.value
    }
}

/// A normalized row.
///
/// Fields keep insertion order for display, but equality ignores order: two
/// records are equal when they carry the same keys with the same values.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. A name that collides with an existing one after
    /// lower-casing overwrites its value but keeps its position and label.
    pub fn insert(&mut self, name: &str, value: NormalizedValue) {
        let key = name.to_lowercase();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(existing) => existing.value = value,
            None => self.fields.push(Field {
                key,
                label: name.to_string(),
                value,
            }),
        }
    }

    /// Builder-style [`Record::insert`].
    pub fn with(mut self, name: &str, value: NormalizedValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a value by field name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&NormalizedValue> {
        let key = name.to_lowercase();
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Lower-cased keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keep only the fields whose key satisfies `keep`.
    pub fn retain_keys<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.fields.retain(|f| keep(&f.key));
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|f| other.get(&f.key) == Some(&f.value))
    }
}

impl Eq for Record {}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.key, &field.value)?;
        }
        map.end()
    }
}

/// An ordered sequence of normalized records. Row order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<Record> {
        self.records
    }

    /// Lower-cased keys of the first record; the column vocabulary of the set.
    pub fn column_keys(&self) -> Vec<String> {
        self.first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl std::ops::Index<usize> for RecordSet {
    type Output = Record;

    fn index(&self, row: usize) -> &Record {
        &self.records[row]
    }
}

/// Anything that can be viewed as a row of named cells.
///
/// `entries` returns `None` for values that are not record-shaped; the
/// normalizer turns those into empty records rather than failing.
pub trait RecordLike {
    fn entries(&self) -> Option<Vec<(String, Datum)>>;
}

impl<T: RecordLike + ?Sized> RecordLike for &T {
    fn entries(&self) -> Option<Vec<(String, Datum)>> {
        (**self).entries()
    }
}

impl RecordLike for Record {
    fn entries(&self) -> Option<Vec<(String, Datum)>> {
        Some(
            self.fields
                .iter()
                .map(|f| (f.label.clone(), Datum::from(&f.value)))
                .collect(),
        )
    }
}

impl RecordLike for serde_json::Value {
    fn entries(&self) -> Option<Vec<(String, Datum)>> {
        self.as_object().and_then(RecordLike::entries)
    }
}

impl RecordLike for serde_json::Map<String, serde_json::Value> {
    fn entries(&self) -> Option<Vec<(String, Datum)>> {
        Some(
            self.iter()
                .map(|(k, v)| (k.clone(), Datum::from(v)))
                .collect(),
        )
    }
}

impl<K, V> RecordLike for Vec<(K, V)>
where
    K: AsRef<str>,
    V: Clone + Into<Datum>,
{
    fn entries(&self) -> Option<Vec<(String, Datum)>> {
        Some(
            self.iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.clone().into()))
                .collect(),
        )
    }
}

impl<K, V> RecordLike for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Clone + Into<Datum>,
{
    fn entries(&self) -> Option<Vec<(String, Datum)>> {
        Some(
            self.iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.clone().into()))
                .collect(),
        )
    }
}

impl<T: RecordLike> RecordLike for Option<T> {
    fn entries(&self) -> Option<Vec<(String, Datum)>> {
        self.as_ref().and_then(RecordLike::entries)
    }
}
