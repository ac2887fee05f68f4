//! Ledger domain models, the in-memory store, and filter types.

pub mod category;
pub mod filter;
pub mod store;
pub mod transaction;

pub use category::CategorySet;
pub use filter::{DateRange, Filter, FilterPatch, ViewPeriod};
pub use store::{LedgerStore, PersistedSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use transaction::{Transaction, TransactionDraft, TransactionKind};
