//! JSON File Repository Implementation
//!
//! Durable mapping store backed by a single JSON file holding an array of
//! [`MappingRecord`]s. Several handles, in one process or many, may share
//! the file. Every operation takes an advisory lock on a sidecar
//! `<file>.lock` (shared for reads, exclusive for writes) and works on the
//! table as it is on disk at that moment, so natural-key uniqueness holds
//! across processes and no handle overwrites another's changes.
//!
//! Writes go to a temp file in the same directory which is then renamed
//! over the original. A failed write leaves the file as it was.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use aligner_domain::{MappingId, MappingKey, MappingRepository, NewMapping, RepositoryError, VocabularyMapping};
use fd_lock::RwLock as FileLock;
use shared::AlignerError;
use tempfile::NamedTempFile;
use tracing::{debug, error};

use super::record::MappingRecord;
use super::table::MappingTable;

/// File-backed Mapping Repository. Holds no state besides the paths.
#[derive(Debug, Clone)]
pub struct JsonFileMappingRepository {
    path: Arc<PathBuf>,
    lock_path: Arc<PathBuf>,
}

impl JsonFileMappingRepository {
    /// Open a store, checking any existing file loads cleanly
    pub fn open(path: impl Into<PathBuf>) -> shared::Result<Self> {
        let path = path.into();
        let lock_path = lock_path_for(&path);

        let file_lock = FileLock::new(open_lock_file(&lock_path)?);
        let count = {
            let _shared = file_lock.read()?;
            load(&path)?.len()
        };
        debug!(path = %path.display(), count, "mapping store opened");

        Ok(Self {
            path: Arc::new(path),
            lock_path: Arc::new(lock_path),
        })
    }

    /// Run a query against the current file contents under a shared lock
    fn read<T>(&self, query: impl FnOnce(&MappingTable) -> T) -> Result<T, RepositoryError> {
        let file_lock = FileLock::new(open_lock_file(&self.lock_path).map_err(persistence)?);
        let _shared = file_lock.read().map_err(persistence)?;

        let table = load(&self.path).map_err(persistence)?;
        Ok(query(&table))
    }

    /// Reload, apply a change and persist it under an exclusive lock.
    /// Nothing is written if the change or the write fails.
    fn mutate<T>(&self, change: impl FnOnce(&mut MappingTable) -> Result<T, RepositoryError>) -> Result<T, RepositoryError> {
        let mut file_lock = FileLock::new(open_lock_file(&self.lock_path).map_err(persistence)?);
        let _exclusive = file_lock.write().map_err(persistence)?;

        let mut table = load(&self.path).map_err(persistence)?;
        let value = change(&mut table)?;

        save(&self.path, &table).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to persist mappings");
            e
        })?;
        Ok(value)
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("mappings"));
    name.push(".lock");
    path.with_file_name(name)
}

fn open_lock_file(lock_path: &Path) -> io::Result<File> {
    if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
}

/// The table as stored at `path`; empty if the file does not exist yet
fn load(path: &Path) -> shared::Result<MappingTable> {
    if !path.exists() {
        return Ok(MappingTable::new());
    }

    let file = File::open(path)?;
    let records: Vec<MappingRecord> = serde_json::from_reader(BufReader::new(file))?;
    records
        .into_iter()
        .map(VocabularyMapping::try_from)
        .collect::<Result<Vec<_>, _>>()
        .and_then(MappingTable::from_mappings)
        .map_err(|e| AlignerError::Storage(format!("{}: {}", path.display(), e)))
}

fn save(path: &Path, table: &MappingTable) -> Result<(), RepositoryError> {
    let records: Vec<MappingRecord> = table.iter().map(MappingRecord::from).collect();

    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(persistence)?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(persistence)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer_pretty(&mut writer, &records).map_err(persistence)?;
        writer.flush().map_err(persistence)?;
    }
    temp_file.persist(path).map_err(|e| persistence(e.error))?;
    Ok(())
}

fn persistence(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::PersistenceError {
        message: e.to_string(),
    }
}

impl MappingRepository for JsonFileMappingRepository {
    async fn find_by_key(&self, key: &MappingKey) -> Result<Option<VocabularyMapping>, RepositoryError> {
        self.read(|table| table.find_by_key(key))
    }

    async fn find_by_id(&self, id: &MappingId) -> Result<Option<VocabularyMapping>, RepositoryError> {
        self.read(|table| table.find_by_id(id))
    }

    async fn find_all_by_vocabs(
        &self,
        source_vocab: &str,
        target_vocab: &str,
    ) -> Result<Vec<VocabularyMapping>, RepositoryError> {
        self.read(|table| table.find_all_by_vocabs(source_vocab, target_vocab))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<VocabularyMapping>, RepositoryError> {
        self.read(|table| table.list_recent(limit))
    }

    async fn create(&self, input: NewMapping) -> Result<VocabularyMapping, RepositoryError> {
        self.mutate(|table| table.insert(input, SystemTime::now()))
    }

    async fn increment_usage(&self, id: &MappingId) -> Result<VocabularyMapping, RepositoryError> {
        self.mutate(|table| table.increment_usage(id, SystemTime::now()))
    }

    async fn delete(&self, id: &MappingId) -> Result<(), RepositoryError> {
        self.mutate(|table| table.remove(id).map(|_| ()))
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.read(MappingTable::len)
    }
}
