use std::fs;
use std::io;
use std::path::PathBuf;

use monitor_core::{sort_ids_numeric, PersistedState};
use monitor_logging::{monitor_debug, monitor_info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persist::{write_atomic, PersistError};

#[derive(Debug, Error)]
pub enum StateError {
    /// A record exists but does not parse into the schema. Fatal: resetting
    /// silently would re-alert on every listing currently visible.
    #[error("state record unreadable: {0}")]
    Corrupt(String),
    #[error("failed to encode state record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub trait StateStore: Send + Sync {
    /// Returns the default uninitialized state if no record exists yet.
    fn load(&self) -> Result<PersistedState, StateError>;
    /// Durably overwrites the single record.
    fn save(&self, state: &PersistedState) -> Result<(), StateError>;
}

/// On-disk serde mirror of [`PersistedState`], kept separate so the core
/// type stays free of serialization concerns.
#[derive(Debug, Serialize, Deserialize)]
struct StateRecord {
    initialized: bool,
    ids: Vec<String>,
    count: Option<u64>,
    last_checked_epoch: i64,
}

/// Single-record JSON store with atomic overwrite semantics.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<PersistedState, StateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                monitor_info!("No state record at {:?}, starting uninitialized", self.path);
                return Ok(PersistedState::uninitialized());
            }
            Err(err) => return Err(StateError::Io(err)),
        };

        let record: StateRecord =
            serde_json::from_str(&content).map_err(|err| StateError::Corrupt(err.to_string()))?;

        Ok(PersistedState {
            initialized: record.initialized,
            ids: record.ids.into_iter().collect(),
            count: record.count,
            last_checked_epoch: record.last_checked_epoch,
        })
    }

    fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        // Ids go to disk sorted so repeated saves of the same state produce
        // byte-identical records.
        let record = StateRecord {
            initialized: state.initialized,
            ids: sort_ids_numeric(state.ids.iter().cloned()),
            count: state.count,
            last_checked_epoch: state.last_checked_epoch,
        };

        let content = serde_json::to_string_pretty(&record)?;
        write_atomic(&self.path, &content)?;
        monitor_debug!("Saved state record to {:?}", self.path);
        Ok(())
    }
}
