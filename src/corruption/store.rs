use anyhow::{anyhow, Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::types::{CorruptionCase, InstitutionTrust};

const STATE_VERSION: u32 = 1;

/// Mutable half of the corruption catalog: institution trust and the case log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorruptionState {
    pub version: u32,
    #[serde(default)]
    pub institutions: Vec<InstitutionTrust>,
    #[serde(default)]
    pub cases: Vec<CorruptionCase>,
    /// Sequence number for the next case id.
    pub next_case: u32,
}

impl CorruptionState {
    pub fn new(institutions: Vec<InstitutionTrust>, cases: Vec<CorruptionCase>) -> Self {
        let next_case = cases.len() as u32 + 1;
        Self {
            version: STATE_VERSION,
            institutions,
            cases,
            next_case,
        }
    }

    /// Hand out the next `case-NNN` id.
    pub fn allocate_case_id(&mut self) -> String {
        let id = format!("case-{:03}", self.next_case);
        self.next_case += 1;
        id
    }
}

/// Storage for `CorruptionState`.
///
/// `update` runs the closure under the store's writer lock, so read-modify-write
/// sequences never interleave. `snapshot` returns a copy.
pub trait CorruptionStore: Send + Sync {
    fn snapshot(&self) -> Result<CorruptionState>;
    fn update(&self, apply: &mut dyn FnMut(&mut CorruptionState)) -> Result<()>;
}

/// In-process store.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<CorruptionState>,
}

impl MemoryStore {
    pub fn new(state: CorruptionState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl CorruptionStore for MemoryStore {
    fn snapshot(&self) -> Result<CorruptionState> {
        let guard = self
            .state
            .lock()
            .map_err(|_| anyhow!("corruption state lock poisoned"))?;
        Ok(guard.clone())
    }

    fn update(&self, apply: &mut dyn FnMut(&mut CorruptionState)) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| anyhow!("corruption state lock poisoned"))?;
        apply(&mut guard);
        Ok(())
    }
}

/// Store persisted as a JSON file.
///
/// A missing file reads as the seed state. Every update rewrites the file
/// atomically while holding the writer lock.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    seed: CorruptionState,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf, seed: CorruptionState) -> Self {
        Self {
            path,
            seed,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<CorruptionState> {
        if !self.path.exists() {
            return Ok(self.seed.clone());
        }
        load_state(&self.path)
    }
}

impl CorruptionStore for JsonFileStore {
    fn snapshot(&self) -> Result<CorruptionState> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("corruption state lock poisoned"))?;
        self.load()
    }

    fn update(&self, apply: &mut dyn FnMut(&mut CorruptionState)) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("corruption state lock poisoned"))?;
        let mut state = self.load()?;
        apply(&mut state);
        save_state(&self.path, &state)
    }
}

/// Load corruption state from a JSON file, rejecting unknown versions.
pub fn load_state(path: &Path) -> Result<CorruptionState> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open corruption state file at {}", path.display()))?;

    let state: CorruptionState =
        serde_json::from_reader(file).context("Failed to load corruption state")?;

    if state.version != STATE_VERSION {
        anyhow::bail!("Unsupported corruption state version: {}", state.version);
    }

    Ok(state)
}

/// Save corruption state atomically, creating the parent directory if needed.
pub fn save_state(path: &Path, state: &CorruptionState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state)
        .context("Failed to serialize corruption state")?;

    file.commit().context("Failed to save corruption state")?;

    tracing::debug!(path = %path.display(), cases = state.cases.len(), "saved corruption state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corruption::catalog::{default_cases, default_institutions};

    fn seed() -> CorruptionState {
        CorruptionState::new(default_institutions(), default_cases())
    }

    #[test]
    fn test_case_ids_continue_after_seed() {
        let mut state = seed();
        assert_eq!(state.allocate_case_id(), "case-004");
        assert_eq!(state.allocate_case_id(), "case-005");
    }

    #[test]
    fn test_memory_store_update() {
        let store = MemoryStore::new(seed());
        store
            .update(&mut |state| state.institutions[0].recent_cases += 1)
            .unwrap();
        assert_eq!(store.snapshot().unwrap().institutions[0].recent_cases, 46);
    }

    #[test]
    fn test_file_store_missing_file_reads_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"), seed());
        assert_eq!(store.snapshot().unwrap(), seed());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persists_updates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = JsonFileStore::new(path.clone(), seed());
        store
            .update(&mut |state| state.institutions[1].trust_level = 10.0)
            .unwrap();

        let reopened = JsonFileStore::new(path, seed());
        assert_eq!(reopened.snapshot().unwrap().institutions[1].trust_level, 10.0);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut state = seed();
        state.version = 9;
        save_state(&path, &state).unwrap();
        let err = load_state(&path).unwrap_err();
        assert!(err.to_string().contains("version"));
    }
}
