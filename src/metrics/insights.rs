//! Dashboard insight helpers layered on top of the core metrics.

use std::fmt;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;

use super::{budget_utilization, savings_rate};

/// Rolling lookback applied by the analytics period selector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecencyWindow {
    #[default]
    All,
    LastWeek,
    LastMonth,
    LastThreeMonths,
    LastSixMonths,
    LastYear,
}

impl RecencyWindow {
    /// Earliest date admitted by the window, or `None` for all time.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        let months_back = |n: u32| today.checked_sub_months(Months::new(n)).unwrap_or(today);
        match self {
            RecencyWindow::All => None,
            RecencyWindow::LastWeek => Some(today - Duration::days(7)),
            RecencyWindow::LastMonth => Some(months_back(1)),
            RecencyWindow::LastThreeMonths => Some(months_back(3)),
            RecencyWindow::LastSixMonths => Some(months_back(6)),
            RecencyWindow::LastYear => Some(months_back(12)),
        }
    }
}

/// Transactions dated on or after the window's cutoff.
pub fn recency_filter(
    transactions: &[Transaction],
    window: RecencyWindow,
    today: NaiveDate,
) -> Vec<Transaction> {
    match window.cutoff(today) {
        None => transactions.to_vec(),
        Some(cutoff) => transactions
            .iter()
            .filter(|transaction| transaction.date >= cutoff)
            .cloned()
            .collect(),
    }
}

/// Where current spending sits relative to the configured budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    NoBudget,
    OnTrack,
    Caution,
    NearLimit,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::NoBudget => "No budget set",
            BudgetStatus::OnTrack => "On track",
            BudgetStatus::Caution => "Caution",
            BudgetStatus::NearLimit => "Near limit",
            BudgetStatus::OverBudget => "Over budget",
        };
        f.write_str(label)
    }
}

/// Classifies budget utilization into the dashboard's status bands.
pub fn budget_status(budget: f64, transactions: &[Transaction]) -> BudgetStatus {
    match budget_utilization(budget, transactions) {
        None => BudgetStatus::NoBudget,
        Some(used) if used <= 50.0 => BudgetStatus::OnTrack,
        Some(used) if used <= 80.0 => BudgetStatus::Caution,
        Some(used) if used <= 100.0 => BudgetStatus::NearLimit,
        Some(_) => BudgetStatus::OverBudget,
    }
}

/// Savings-rate verdict shown on the insights panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinancialHealth {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl fmt::Display for FinancialHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FinancialHealth::Excellent => "Excellent",
            FinancialHealth::Good => "Good",
            FinancialHealth::Fair => "Fair",
            FinancialHealth::NeedsAttention => "Needs Attention",
        };
        f.write_str(label)
    }
}

pub fn financial_health(transactions: &[Transaction]) -> FinancialHealth {
    let rate = savings_rate(transactions);
    if rate >= 20.0 {
        FinancialHealth::Excellent
    } else if rate >= 10.0 {
        FinancialHealth::Good
    } else if rate >= 0.0 {
        FinancialHealth::Fair
    } else {
        FinancialHealth::NeedsAttention
    }
}

/// The `count` most recently created transactions, newest first.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    let mut recent = transactions.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(count);
    recent
}
