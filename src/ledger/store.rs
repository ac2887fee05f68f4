use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FinanceError;

use super::{
    category::CategorySet,
    filter::{Filter, FilterPatch, ViewPeriod},
    transaction::{Transaction, TransactionDraft},
};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Single source of truth for transactions, budget, view period, and
/// filter criteria.
///
/// Each store is an explicitly constructed, owned instance; commands are
/// applied strictly in call order and every committed mutation bumps
/// [`revision`](Self::revision) so persistence adapters can observe
/// changes by polling it.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    budget: f64,
    view_period: ViewPeriod,
    filter: Filter,
    categories: CategorySet,
    revision: u64,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            budget: 0.0,
            view_period: ViewPeriod::default(),
            filter: Filter::default(),
            categories: CategorySet::default(),
            revision: 0,
        }
    }

    /// Finalizes `draft` with a fresh identifier and creation timestamp,
    /// appends it, and returns the stored record.
    ///
    /// Input validation (positive amount, known category, non-empty
    /// description) is the caller's responsibility.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Transaction {
        let transaction = Transaction::from_draft(draft);
        tracing::debug!(id = %transaction.id, kind = %transaction.kind, "transaction added");
        self.transactions.push(transaction.clone());
        self.touch();
        transaction
    }

    /// Replaces the stored transaction with the same identifier wholesale.
    pub fn update_transaction(&mut self, transaction: Transaction) -> Result<(), FinanceError> {
        match self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == transaction.id)
        {
            Some(existing) => {
                *existing = transaction;
                self.touch();
                Ok(())
            }
            None => Err(FinanceError::TransactionNotFound(transaction.id)),
        }
    }

    /// Removes the transaction with `id` if present. Returns whether a
    /// record was removed; deleting an absent id is a no-op.
    pub fn delete_transaction(&mut self, id: Uuid) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            tracing::debug!(%id, "transaction deleted");
            self.touch();
        }
        removed
    }

    /// Overwrites the budget. Zero means "unset".
    pub fn set_budget(&mut self, value: f64) -> Result<(), FinanceError> {
        if !value.is_finite() || value < 0.0 {
            return Err(FinanceError::InvalidArgument(format!(
                "budget must be a non-negative amount, got {value}"
            )));
        }
        self.budget = value;
        self.touch();
        Ok(())
    }

    pub fn set_view_period(&mut self, period: ViewPeriod) {
        self.view_period = period;
        self.touch();
    }

    /// Shallow-merges `patch` into the active filter.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filter.apply_patch(patch);
        self.touch();
    }

    /// Replaces transactions and budget wholesale; used once at startup
    /// from the persistence adapter. View period and filter are
    /// session-transient and untouched.
    pub fn load_snapshot(&mut self, transactions: Vec<Transaction>, budget: f64) {
        self.transactions = transactions;
        self.budget = budget.max(0.0);
        self.touch();
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn view_period(&self) -> ViewPeriod {
        self.view_period
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategorySet {
        self.touch();
        &mut self.categories
    }

    /// Monotonically increasing counter bumped by every committed
    /// mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The durable subset of the snapshot: transactions and budget only.
    pub fn persisted_state(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            transactions: self.transactions.clone(),
            budget: self.budget,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The on-disk shape of a ledger snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    #[serde(default = "PersistedSnapshot::schema_version_default")]
    pub schema_version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budget: f64,
}

impl PersistedSnapshot {
    pub fn schema_version_default() -> u32 {
        SNAPSHOT_SCHEMA_VERSION
    }
}
