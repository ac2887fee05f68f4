pub mod json_backend;

use crate::errors::FinanceError;
use crate::ledger::store::PersistedSnapshot;
use crate::ledger::Transaction;

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Abstraction over persistence backends capable of storing ledger
/// snapshots.
///
/// `load` returns `Ok(None)` when nothing has been stored yet; that is
/// not an error. Write failures are surfaced to the caller, which treats
/// them as non-fatal (the store keeps operating in memory).
pub trait StorageBackend: Send + Sync {
    fn save(&self, snapshot: &PersistedSnapshot) -> Result<()>;
    fn load(&self) -> Result<Option<PersistedSnapshot>>;
}

/// Startup policy: any load failure degrades to an empty ledger with no
/// budget, logged as a warning, so the session always starts.
pub fn load_or_default(backend: &dyn StorageBackend) -> (Vec<Transaction>, f64) {
    match backend.load() {
        Ok(Some(snapshot)) => (snapshot.transactions, snapshot.budget),
        Ok(None) => (Vec::new(), 0.0),
        Err(error) => {
            tracing::warn!(%error, "failed to load persisted snapshot, starting empty");
            (Vec::new(), 0.0)
        }
    }
}

/// Fire-and-forget write-back: failures are logged and swallowed so a
/// persistence outage never interrupts in-memory operation.
pub fn save_or_warn(backend: &dyn StorageBackend, snapshot: &PersistedSnapshot) {
    if let Err(error) = backend.save(snapshot) {
        tracing::warn!(%error, "failed to persist snapshot, changes may not survive a reload");
    }
}

pub use json_backend::JsonStorage;
