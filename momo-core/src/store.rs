//! RecordStore: owned, single-writer, in-memory storage for parsed records.
//!
//! Replaces the ambient global list the legacy CRUD layer mutated. Callers
//! own the store; there is no shared state. Records are keyed by transaction
//! id, and `list` returns them in insertion order so a store filled from one
//! backup pass lists in document order.

use crate::records::ParsedRecord;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: HashMap<String, ParsedRecord>,
    // insertion order of ids; replacement keeps the original slot
    order: Vec<String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an ordered sequence, e.g. one backup's output.
    pub fn from_records(records: impl IntoIterator<Item = ParsedRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.put(record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ParsedRecord> {
        self.records.get(id)
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<&ParsedRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Insert or replace by transaction id, returning the replaced record.
    pub fn put(&mut self, record: ParsedRecord) -> Option<ParsedRecord> {
        let id = record.transaction_id().to_string();
        let prior = self.records.insert(id.clone(), record);
        if prior.is_none() {
            self.order.push(id);
        }
        prior
    }

    /// Remove by transaction id, returning the record if it was present.
    pub fn delete(&mut self, id: &str) -> Option<ParsedRecord> {
        let removed = self.records.remove(id);
        if removed.is_some() {
            self.order.retain(|known| known != id);
        }
        removed
    }
}
