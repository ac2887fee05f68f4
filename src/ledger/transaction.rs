use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded income or expense event.
///
/// `id` and `created_at` are assigned by [`LedgerStore::add_transaction`]
/// and stay stable for the record's lifetime; everything else may be
/// replaced wholesale by an update.
///
/// [`LedgerStore::add_transaction`]: crate::ledger::LedgerStore::add_transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date: draft.date,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with income counted positive and expenses negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// The transaction fields supplied by the caller; identifier and creation
/// timestamp are assigned at insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }
}

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}
