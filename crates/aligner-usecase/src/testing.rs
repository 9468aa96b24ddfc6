//! Port doubles shared by the use case tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use aligner_domain::{
    Confidence, MappingId, MappingKey, MappingRepository, NewMapping, OracleError,
    RepositoryError, TermOracle, TermTranslation, VocabularyMapping,
};

/// Where a [`MemoryStore`] should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Find,
    Create,
    Increment,
}

#[derive(Debug, Default)]
struct StoreState {
    mappings: Vec<VocabularyMapping>,
    next_id: usize,
    stale_reads: usize,
    fail_on: Option<FailPoint>,
    creates: usize,
}

/// In-memory store double. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, source: &str, target: &str, term: &str, target_term: &str, confidence: f64) -> MappingId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = MappingId::new(format!("seed-{}", state.next_id));
        state.mappings.push(VocabularyMapping::create(
            id.clone(),
            NewMapping::new(
                MappingKey::new(source, target, term),
                target_term,
                Confidence::new(confidence).unwrap(),
            ),
            SystemTime::now(),
        ));
        id
    }

    pub fn get(&self, source: &str, target: &str, term: &str) -> Option<VocabularyMapping> {
        let key = MappingKey::new(source, target, term);
        self.state
            .lock()
            .unwrap()
            .mappings
            .iter()
            .find(|m| m.key() == &key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().mappings.len()
    }

    pub fn creates(&self) -> usize {
        self.state.lock().unwrap().creates
    }

    /// The next `n` key lookups report a miss even if the mapping exists
    pub fn stale_reads(&self, n: usize) {
        self.state.lock().unwrap().stale_reads = n;
    }

    pub fn fail_on(&self, point: FailPoint) {
        self.state.lock().unwrap().fail_on = Some(point);
    }

    fn check(state: &StoreState, point: FailPoint) -> Result<(), RepositoryError> {
        if state.fail_on == Some(point) {
            Err(RepositoryError::PersistenceError {
                message: "database is unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl MappingRepository for MemoryStore {
    async fn find_by_key(&self, key: &MappingKey) -> Result<Option<VocabularyMapping>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, FailPoint::Find)?;
        if state.stale_reads > 0 {
            state.stale_reads -= 1;
            return Ok(None);
        }
        Ok(state.mappings.iter().find(|m| m.key() == key).cloned())
    }

    async fn find_by_id(&self, id: &MappingId) -> Result<Option<VocabularyMapping>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.mappings.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_all_by_vocabs(
        &self,
        source_vocab: &str,
        target_vocab: &str,
    ) -> Result<Vec<VocabularyMapping>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut found: Vec<_> = state
            .mappings
            .iter()
            .filter(|m| m.key().is_pair(source_vocab, target_vocab))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.usage_count().cmp(&a.usage_count()));
        Ok(found)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<VocabularyMapping>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.mappings.iter().rev().take(limit).cloned().collect())
    }

    async fn create(&self, input: NewMapping) -> Result<VocabularyMapping, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, FailPoint::Create)?;
        if state.mappings.iter().any(|m| m.key() == &input.key) {
            return Err(RepositoryError::AlreadyExists {
                key: input.key.to_string(),
            });
        }
        state.next_id += 1;
        state.creates += 1;
        let mapping = VocabularyMapping::create(
            MappingId::new(format!("m-{}", state.next_id)),
            input,
            SystemTime::now(),
        );
        state.mappings.push(mapping.clone());
        Ok(mapping)
    }

    async fn increment_usage(&self, id: &MappingId) -> Result<VocabularyMapping, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, FailPoint::Increment)?;
        let mapping = state
            .mappings
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| RepositoryError::NotFound {
                id: id.to_string(),
            })?;
        mapping.record_use(SystemTime::now());
        Ok(mapping.clone())
    }

    async fn delete(&self, id: &MappingId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.mappings.len();
        state.mappings.retain(|m| m.id() != id);
        if state.mappings.len() == before {
            return Err(RepositoryError::NotFound {
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.state.lock().unwrap().mappings.len())
    }
}

/// Oracle double with a fixed extraction and a translation table
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    terms: Vec<String>,
    translations: HashMap<String, (String, f64)>,
    extract_error: Option<OracleError>,
    translate_calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedOracle {
    pub fn extracting(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn translates(mut self, term: &str, translated: &str, confidence: f64) -> Self {
        self.translations
            .insert(term.to_string(), (translated.to_string(), confidence));
        self
    }

    pub fn failing_extraction(mut self, error: OracleError) -> Self {
        self.extract_error = Some(error);
        self
    }

    pub fn translate_calls(&self) -> Vec<String> {
        self.translate_calls.lock().unwrap().clone()
    }
}

impl TermOracle for ScriptedOracle {
    async fn extract_terms(&self, _message: &str, _vocabulary: &str) -> Result<Vec<String>, OracleError> {
        match &self.extract_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.terms.clone()),
        }
    }

    async fn translate_term(
        &self,
        term: &str,
        _source_vocab: &str,
        _target_vocab: &str,
        _context: Option<&str>,
    ) -> Result<TermTranslation, OracleError> {
        self.translate_calls.lock().unwrap().push(term.to_string());
        self.translations
            .get(term)
            .map(|(translated, confidence)| TermTranslation::new(translated.clone(), *confidence))
            .ok_or_else(|| OracleError::UnknownTerm {
                term: term.to_string(),
            })
    }
}
