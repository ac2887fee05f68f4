//! Pure derived-metrics computations over ledger snapshots.
//!
//! Every function here is total and recomputed per call from the
//! transactions it is handed; nothing is cached across mutations.
//! Degenerate inputs (no income, no budget, empty ledger) yield safe
//! defaults instead of errors.

pub mod insights;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::{Filter, Transaction, TransactionKind, ViewPeriod};

pub use insights::{
    budget_status, financial_health, recency_filter, recent_transactions, BudgetStatus,
    FinancialHealth, RecencyWindow,
};

/// Income and expense sums over a transaction set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    /// Income minus expenses; negative when spending exceeds earnings.
    pub fn net_balance(&self) -> f64 {
        self.income - self.expenses
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut acc = Totals::default();
    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => acc.income += transaction.amount,
            TransactionKind::Expense => acc.expenses += transaction.amount,
        }
    }
    acc
}

/// Budget minus total expenses; negative signals over-budget.
pub fn remaining_budget(budget: f64, transactions: &[Transaction]) -> f64 {
    budget - totals(transactions).expenses
}

/// Percentage of the budget consumed by expenses, or `None` when no
/// budget is set. Never divides by zero.
pub fn budget_utilization(budget: f64, transactions: &[Transaction]) -> Option<f64> {
    if budget > 0.0 {
        Some(totals(transactions).expenses / budget * 100.0)
    } else {
        None
    }
}

/// Net balance as a percentage of income; exactly 0 when there is no
/// income, regardless of expenses.
pub fn savings_rate(transactions: &[Transaction]) -> f64 {
    let totals = totals(transactions);
    if totals.income > 0.0 {
        totals.net_balance() / totals.income * 100.0
    } else {
        0.0
    }
}

/// Summed amount recorded under one category label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Per-category sums for transactions of `kind`, ordered by amount
/// descending with ties broken by category name so repeated calls over
/// identical input always agree.
pub fn category_breakdown(transactions: &[Transaction], kind: TransactionKind) -> Vec<CategoryTotal> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for transaction in transactions.iter().filter(|t| t.kind == kind) {
        *sums.entry(transaction.category.as_str()).or_default() += transaction.amount;
    }
    let mut breakdown: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    breakdown
}

/// The dominant category for `kind`, with its share of that kind's total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopCategory {
    pub category: String,
    pub total: f64,
    /// Percentage of the kind-wide total this category accounts for.
    pub share: f64,
}

pub fn top_category(transactions: &[Transaction], kind: TransactionKind) -> Option<TopCategory> {
    let breakdown = category_breakdown(transactions, kind);
    let kind_total: f64 = breakdown.iter().map(|entry| entry.total).sum();
    breakdown.into_iter().next().map(|leader| TopCategory {
        share: if kind_total > 0.0 {
            leader.total / kind_total * 100.0
        } else {
            0.0
        },
        category: leader.category,
        total: leader.total,
    })
}

/// Transactions whose date falls inside the week or calendar month
/// containing `reference`, both boundaries inclusive.
pub fn period_filter(
    transactions: &[Transaction],
    period: ViewPeriod,
    reference: NaiveDate,
) -> Vec<Transaction> {
    let window = period.window_containing(reference);
    transactions
        .iter()
        .filter(|transaction| window.contains(transaction.date))
        .cloned()
        .collect()
}

/// Applies `filter` as an AND of its set criteria. An all-empty filter
/// returns the input unchanged.
pub fn apply_filter(transactions: &[Transaction], filter: &Filter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect()
}

/// Income and expense flow through one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyFlow {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyFlow {
    /// Short display label, e.g. `"Jul 2025"`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|date| date.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

/// Per-calendar-month income/expense sums in chronological order.
pub fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyFlow> {
    let mut months: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
    for transaction in transactions {
        let slot = months
            .entry((transaction.date.year(), transaction.date.month()))
            .or_default();
        match transaction.kind {
            TransactionKind::Income => slot.0 += transaction.amount,
            TransactionKind::Expense => slot.1 += transaction.amount,
        }
    }
    months
        .into_iter()
        .map(|((year, month), (income, expenses))| MonthlyFlow {
            year,
            month,
            income,
            expenses,
        })
        .collect()
}

/// Average spend per elapsed day of the calendar month containing
/// `today`: that month's expenses divided by `today`'s day-of-month.
pub fn daily_average_spend(transactions: &[Transaction], today: NaiveDate) -> f64 {
    let month_expenses: f64 = transactions
        .iter()
        .filter(|transaction| {
            transaction.is_expense()
                && transaction.date.year() == today.year()
                && transaction.date.month() == today.month()
        })
        .map(|transaction| transaction.amount)
        .sum();
    month_expenses / today.day() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(
        kind: TransactionKind,
        amount: f64,
        category: &str,
        day: NaiveDate,
    ) -> Transaction {
        Transaction::from_draft(TransactionDraft::new(
            kind, amount, category, "test entry", day,
        ))
    }

    fn sample_ledger() -> Vec<Transaction> {
        vec![
            record(TransactionKind::Income, 5000.0, "Salary", date(2025, 7, 1)),
            record(TransactionKind::Expense, 1200.0, "Housing", date(2025, 7, 1)),
            record(TransactionKind::Expense, 300.0, "Food", date(2025, 7, 2)),
        ]
    }

    #[test]
    fn totals_and_net_balance_agree() {
        let ledger = sample_ledger();
        let totals = totals(&ledger);
        assert_eq!(totals.income, 5000.0);
        assert_eq!(totals.expenses, 1500.0);
        assert_eq!(totals.net_balance(), 3500.0);
    }

    #[test]
    fn budget_metrics_match_scenario() {
        let ledger = sample_ledger();
        assert_eq!(remaining_budget(3000.0, &ledger), 1800.0);
        assert_eq!(budget_utilization(3000.0, &ledger), Some(50.0));
        assert_eq!(budget_utilization(0.0, &ledger), None);
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let expenses_only = vec![record(
            TransactionKind::Expense,
            400.0,
            "Food",
            date(2025, 7, 1),
        )];
        assert_eq!(savings_rate(&expenses_only), 0.0);
        assert!((savings_rate(&sample_ledger()) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_orders_ties_deterministically() {
        let ledger = vec![
            record(TransactionKind::Expense, 100.0, "Food", date(2025, 7, 1)),
            record(TransactionKind::Expense, 100.0, "Education", date(2025, 7, 2)),
            record(TransactionKind::Expense, 250.0, "Housing", date(2025, 7, 3)),
        ];
        let breakdown = category_breakdown(&ledger, TransactionKind::Expense);
        let order: Vec<&str> = breakdown
            .iter()
            .map(|entry| entry.category.as_str())
            .collect();
        assert_eq!(order, ["Housing", "Education", "Food"]);
    }

    #[test]
    fn top_category_reports_share() {
        let ledger = sample_ledger();
        let top = top_category(&ledger, TransactionKind::Expense).unwrap();
        assert_eq!(top.category, "Housing");
        assert_eq!(top.total, 1200.0);
        assert!((top.share - 80.0).abs() < 1e-9);
        assert!(top_category(&[], TransactionKind::Income).is_none());
    }

    #[test]
    fn breakdown_follows_kind_changes() {
        let mut ledger = sample_ledger();
        let expenses = category_breakdown(&ledger, TransactionKind::Expense);
        assert!(expenses.iter().any(|entry| entry.category == "Housing"));

        // Reclassify the housing entry as income.
        for transaction in &mut ledger {
            if transaction.category == "Housing" {
                transaction.kind = TransactionKind::Income;
            }
        }
        let expenses = category_breakdown(&ledger, TransactionKind::Expense);
        assert!(expenses.iter().all(|entry| entry.category != "Housing"));
        let income = category_breakdown(&ledger, TransactionKind::Income);
        assert!(income.iter().any(|entry| entry.category == "Housing"));
    }

    #[test]
    fn period_filter_windows_by_view_period() {
        let ledger = vec![
            record(TransactionKind::Expense, 10.0, "Food", date(2025, 7, 2)),
            record(TransactionKind::Expense, 20.0, "Food", date(2025, 7, 20)),
            record(TransactionKind::Expense, 30.0, "Food", date(2025, 6, 29)),
        ];
        let weekly = period_filter(&ledger, ViewPeriod::Weekly, date(2025, 7, 2));
        assert_eq!(weekly.len(), 1);
        let monthly = period_filter(&ledger, ViewPeriod::Monthly, date(2025, 7, 2));
        assert_eq!(monthly.len(), 2);
    }

    #[test]
    fn empty_filter_is_identity() {
        let ledger = sample_ledger();
        let filtered = apply_filter(&ledger, &Filter::default());
        assert_eq!(filtered, ledger);
    }

    #[test]
    fn filter_criteria_are_and_combined() {
        let ledger = sample_ledger();
        let filter = Filter {
            search_term: "hous".into(),
            kind: Some(TransactionKind::Expense),
            ..Filter::default()
        };
        let filtered = apply_filter(&ledger, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].category, "Housing");

        let mismatch = Filter {
            search_term: "hous".into(),
            kind: Some(TransactionKind::Income),
            ..Filter::default()
        };
        assert!(apply_filter(&ledger, &mismatch).is_empty());
    }

    #[test]
    fn monthly_trend_is_chronological() {
        let ledger = vec![
            record(TransactionKind::Expense, 50.0, "Food", date(2025, 8, 3)),
            record(TransactionKind::Income, 900.0, "Salary", date(2025, 6, 28)),
            record(TransactionKind::Expense, 70.0, "Food", date(2025, 6, 12)),
        ];
        let trend = monthly_trend(&ledger);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label(), "Jun 2025");
        assert_eq!(trend[0].income, 900.0);
        assert_eq!(trend[0].expenses, 70.0);
        assert_eq!(trend[1].label(), "Aug 2025");
    }

    #[test]
    fn daily_average_covers_current_month_only() {
        let ledger = vec![
            record(TransactionKind::Expense, 60.0, "Food", date(2025, 7, 1)),
            record(TransactionKind::Expense, 40.0, "Food", date(2025, 7, 3)),
            record(TransactionKind::Expense, 999.0, "Food", date(2025, 6, 30)),
        ];
        assert_eq!(daily_average_spend(&ledger, date(2025, 7, 4)), 25.0);
        assert_eq!(daily_average_spend(&[], date(2025, 7, 4)), 0.0);
    }
}
