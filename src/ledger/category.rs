use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

static DEFAULT_INCOME: Lazy<Vec<String>> = Lazy::new(|| {
    ["Salary", "Freelance", "Investment", "Gift", "Other Income"]
        .into_iter()
        .map(String::from)
        .collect()
});

static DEFAULT_EXPENSE: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Food",
        "Transportation",
        "Housing",
        "Utilities",
        "Entertainment",
        "Healthcare",
        "Shopping",
        "Education",
        "Other Expense",
    ]
    .into_iter()
    .map(String::from)
    .collect()
});

/// Ordered category labels allowed per transaction kind.
///
/// Membership is checked at creation time only; removing a label later
/// does not invalidate transactions already recorded under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySet {
    pub income: Vec<String>,
    pub expense: Vec<String>,
}

impl CategorySet {
    pub fn labels(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    pub fn contains(&self, kind: TransactionKind, label: &str) -> bool {
        self.labels(kind).iter().any(|known| known == label)
    }

    /// Appends a custom label for `kind` unless it is already present.
    pub fn add_label(&mut self, kind: TransactionKind, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.contains(kind, &label) {
            return false;
        }
        match kind {
            TransactionKind::Income => self.income.push(label),
            TransactionKind::Expense => self.expense.push(label),
        }
        true
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME.clone(),
            expense: DEFAULT_EXPENSE.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_kinds() {
        let set = CategorySet::default();
        assert!(set.contains(TransactionKind::Income, "Salary"));
        assert!(set.contains(TransactionKind::Expense, "Housing"));
        assert!(!set.contains(TransactionKind::Income, "Housing"));
    }

    #[test]
    fn add_label_rejects_duplicates() {
        let mut set = CategorySet::default();
        assert!(set.add_label(TransactionKind::Expense, "Pets"));
        assert!(!set.add_label(TransactionKind::Expense, "Pets"));
        assert!(set.contains(TransactionKind::Expense, "Pets"));
    }
}
