//! MappingTable - Index structure shared by the store implementations
//!
//! Keeps mappings in insertion order with two secondary indexes (id and
//! natural key). Holds no lock; callers wrap it.

use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;

use aligner_domain::{MappingId, MappingKey, NewMapping, RepositoryError, VocabularyMapping};

#[derive(Debug, Clone, Default)]
pub(crate) struct MappingTable {
    rows: BTreeMap<u64, VocabularyMapping>,
    by_id: HashMap<MappingId, u64>,
    by_key: HashMap<MappingKey, u64>,
    next_seq: u64,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from previously persisted mappings, oldest first
    pub fn from_mappings(mappings: Vec<VocabularyMapping>) -> Result<Self, RepositoryError> {
        let mut table = Self::new();
        for mapping in mappings {
            if table.by_key.contains_key(mapping.key()) {
                return Err(RepositoryError::PersistenceError {
                    message: format!("duplicate natural key in stored data: {}", mapping.key()),
                });
            }
            if table.by_id.contains_key(mapping.id()) {
                return Err(RepositoryError::PersistenceError {
                    message: format!("duplicate id in stored data: {}", mapping.id()),
                });
            }
            table.push(mapping);
        }
        Ok(table)
    }

    pub fn find_by_key(&self, key: &MappingKey) -> Option<VocabularyMapping> {
        self.by_key
            .get(key)
            .and_then(|seq| self.rows.get(seq))
            .cloned()
    }

    pub fn find_by_id(&self, id: &MappingId) -> Option<VocabularyMapping> {
        self.by_id.get(id).and_then(|seq| self.rows.get(seq)).cloned()
    }

    /// Mappings of a pair, most used first, oldest first among equals
    pub fn find_all_by_vocabs(&self, source_vocab: &str, target_vocab: &str) -> Vec<VocabularyMapping> {
        let mut found: Vec<VocabularyMapping> = self
            .rows
            .values()
            .filter(|m| m.key().is_pair(source_vocab, target_vocab))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.usage_count().cmp(&a.usage_count()));
        found
    }

    /// Newest first
    pub fn list_recent(&self, limit: usize) -> Vec<VocabularyMapping> {
        self.rows.values().rev().take(limit).cloned().collect()
    }

    pub fn insert(&mut self, input: NewMapping, now: SystemTime) -> Result<VocabularyMapping, RepositoryError> {
        if self.by_key.contains_key(&input.key) {
            return Err(RepositoryError::AlreadyExists {
                key: input.key.to_string(),
            });
        }

        let id = MappingId::new(uuid::Uuid::new_v4().to_string());
        let mapping = VocabularyMapping::create(id, input, now);
        self.push(mapping.clone());
        Ok(mapping)
    }

    pub fn increment_usage(&mut self, id: &MappingId, now: SystemTime) -> Result<VocabularyMapping, RepositoryError> {
        let mapping = self
            .by_id
            .get(id)
            .and_then(|seq| self.rows.get_mut(seq))
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;
        mapping.record_use(now);
        Ok(mapping.clone())
    }

    pub fn remove(&mut self, id: &MappingId) -> Result<VocabularyMapping, RepositoryError> {
        let seq = self
            .by_id
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;
        let mapping = self
            .rows
            .remove(&seq)
            .ok_or_else(|| RepositoryError::PersistenceError {
                message: format!("index out of sync for mapping {}", id),
            })?;
        self.by_key.remove(mapping.key());
        Ok(mapping)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// All mappings, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &VocabularyMapping> {
        self.rows.values()
    }

    fn push(&mut self, mapping: VocabularyMapping) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_id.insert(mapping.id().clone(), seq);
        self.by_key.insert(mapping.key().clone(), seq);
        self.rows.insert(seq, mapping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aligner_domain::Confidence;

    fn new_mapping(term: &str) -> NewMapping {
        NewMapping::new(MappingKey::new("a", "b", term), format!("{}!", term), Confidence::FULL)
    }

    #[test]
    fn test_indexes_stay_in_sync() {
        let mut table = MappingTable::new();
        let first = table.insert(new_mapping("one"), SystemTime::now()).unwrap();
        let second = table.insert(new_mapping("two"), SystemTime::now()).unwrap();

        table.remove(first.id()).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.find_by_key(first.key()).is_none());
        assert_eq!(table.find_by_key(second.key()).unwrap().id(), second.id());

        // The natural key is free again once removed
        assert!(table.insert(new_mapping("one"), SystemTime::now()).is_ok());
    }

    #[test]
    fn test_from_mappings_rejects_duplicate_keys() {
        let now = SystemTime::now();
        let a = VocabularyMapping::create(MappingId::new("1"), new_mapping("one"), now);
        let b = VocabularyMapping::create(MappingId::new("2"), new_mapping("one"), now);

        assert!(matches!(
            MappingTable::from_mappings(vec![a, b]),
            Err(RepositoryError::PersistenceError { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let mut table = MappingTable::new();
        let one = table.insert(new_mapping("one"), SystemTime::now()).unwrap();
        let two = table.insert(new_mapping("two"), SystemTime::now()).unwrap();
        let three = table.insert(new_mapping("three"), SystemTime::now()).unwrap();
        table.increment_usage(two.id(), SystemTime::now()).unwrap();

        let by_usage: Vec<_> = table
            .find_all_by_vocabs("a", "b")
            .iter()
            .map(|m| m.source_term().to_string())
            .collect();
        assert_eq!(by_usage, vec!["two", "one", "three"]);

        let recent: Vec<_> = table.list_recent(2).iter().map(|m| m.id().clone()).collect();
        assert_eq!(recent, vec![three.id().clone(), two.id().clone()]);
        assert!(table.find_by_id(one.id()).is_some());
    }
}
