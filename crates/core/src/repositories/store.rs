//! Persistence seam for the patient record set.
//!
//! The whole record set is the unit of durability: [`PatientStore::load`]
//! returns every record and [`PatientStore::save`] replaces every record.
//! Implementations do no locking, so concurrent writers race and the last
//! full write wins.

use crate::patient::StoredPatient;
use crate::{CoreError, CoreResult};
use indexmap::IndexMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// All patients keyed by id, in the order they appear in the backing
/// document. New patients are appended.
pub type PatientRecords = IndexMap<String, StoredPatient>;

pub trait PatientStore: Send + Sync {
    fn load(&self) -> CoreResult<PatientRecords>;

    fn save(&self, records: &PatientRecords) -> CoreResult<()>;
}

/// Stores every patient in a single pretty-printed JSON object on disk.
///
/// A missing file reads as an empty record set; the file is created on the
/// first save. The parent directory must already exist.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatientStore for JsonFileStore {
    fn load(&self) -> CoreResult<PatientRecords> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("patient file {} absent, starting empty", self.path.display());
                return Ok(PatientRecords::new());
            }
            Err(e) => return Err(CoreError::FileRead(e)),
        };

        serde_json::from_str(&contents).map_err(CoreError::Deserialization)
    }

    fn save(&self, records: &PatientRecords) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(records).map_err(CoreError::Serialization)?;
        fs::write(&self.path, json).map_err(CoreError::FileWrite)
    }
}

/// Keeps the record set in memory. Intended for tests and tooling.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<PatientRecords>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: PatientRecords) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl PatientStore for InMemoryStore {
    fn load(&self) -> CoreResult<PatientRecords> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|_| CoreError::InvalidInput("in-memory store lock poisoned".into()))
    }

    fn save(&self, records: &PatientRecords) -> CoreResult<()> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| CoreError::InvalidInput("in-memory store lock poisoned".into()))?;
        *guard = records.clone();
        Ok(())
    }
}
