use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::FinanceError;
use crate::ledger::store::{PersistedSnapshot, SNAPSHOT_SCHEMA_VERSION};

use super::{Result, StorageBackend};

const DEFAULT_DIR_NAME: &str = ".finance_core";
const SNAPSHOT_FILE: &str = "snapshot.json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to
/// `~/.finance_core` with a `FINANCE_CORE_HOME` override.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINANCE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// JSON-file persistence for ledger snapshots.
///
/// Writes stage through a temporary sibling file and rename so a failed
/// save never corrupts the previous snapshot.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    snapshot_path: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self {
            snapshot_path: root.join(SNAPSHOT_FILE),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, snapshot: &PersistedSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = tmp_path(&self.snapshot_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.snapshot_path)?;
        tracing::debug!(path = %self.snapshot_path.display(), "snapshot saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedSnapshot>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.snapshot_path)?;
        let snapshot: PersistedSnapshot = serde_json::from_str(&data)?;
        if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(FinanceError::Storage(format!(
                "snapshot `{}` is from a newer schema version ({})",
                self.snapshot_path.display(),
                snapshot.schema_version
            )));
        }
        Ok(Some(snapshot))
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerStore, TransactionDraft, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut store = LedgerStore::new();
        store.add_transaction(TransactionDraft::new(
            TransactionKind::Income,
            5000.0,
            "Salary",
            "Monthly salary",
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        ));
        store.set_budget(3000.0).unwrap();

        storage.save(&store.persisted_state()).expect("save");
        let loaded = storage.load().expect("load").expect("snapshot present");
        assert_eq!(loaded.budget, 3000.0);
        assert_eq!(loaded.transactions, store.transactions());
    }

    #[test]
    fn missing_snapshot_is_not_an_error() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn newer_schema_version_refuses_to_load() {
        let (storage, _guard) = storage_with_temp_dir();
        let newer = format!(
            "{{\"schema_version\": {}, \"transactions\": [], \"budget\": 0.0}}",
            SNAPSHOT_SCHEMA_VERSION + 1
        );
        fs::write(storage.snapshot_path(), newer).unwrap();
        let err = storage.load().expect_err("newer version must fail");
        assert!(matches!(err, FinanceError::Storage(_)));
    }
}
