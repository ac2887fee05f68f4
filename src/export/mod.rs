//! Assembles transaction report text for download-style exports.
//!
//! Only the string assembly lives here; handing the bytes to the user
//! (file dialogs, downloads) is the embedding UI's concern.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::{DateRange, Transaction};
use crate::metrics;

const REPORT_TITLE: &str = "PERSONAL FINANCE TRACKER - TRANSACTION REPORT";
const DATE_FORMAT: &str = "%b %d, %Y";

/// Summary figures shown alongside the export action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportInsights {
    pub transaction_count: usize,
    pub date_range: Option<DateRange>,
    pub distinct_categories: usize,
    pub average_amount: f64,
}

pub fn export_insights(transactions: &[Transaction]) -> ExportInsights {
    let date_range = transactions
        .iter()
        .map(|transaction| transaction.date)
        .min()
        .zip(transactions.iter().map(|transaction| transaction.date).max())
        .map(|(start, end)| DateRange { start, end });
    let mut categories: Vec<&str> = transactions
        .iter()
        .map(|transaction| transaction.category.as_str())
        .collect();
    categories.sort_unstable();
    categories.dedup();
    let average_amount = if transactions.is_empty() {
        0.0
    } else {
        transactions
            .iter()
            .map(|transaction| transaction.amount)
            .sum::<f64>()
            / transactions.len() as f64
    };
    ExportInsights {
        transaction_count: transactions.len(),
        date_range,
        distinct_categories: categories.len(),
        average_amount,
    }
}

/// Suggested file name for a report generated on `date`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("Personal-Finance-Transactions-{}.csv", date.format("%Y-%m-%d"))
}

/// Builds the full CSV report: header block, financial summary, and
/// date-ordered detail rows carrying a running balance.
pub fn csv_report(transactions: &[Transaction], generated_at: DateTime<Utc>) -> String {
    let totals = metrics::totals(transactions);
    let insights = export_insights(transactions);

    let mut rows: Vec<Vec<String>> = vec![
        vec![REPORT_TITLE.into()],
        vec![String::new()],
        vec![
            "Report Generated:".into(),
            generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
        vec![
            "Total Transactions:".into(),
            insights.transaction_count.to_string(),
        ],
    ];
    if let Some(range) = insights.date_range {
        rows.push(vec![
            "Date Range:".into(),
            format!(
                "{} to {}",
                range.start.format(DATE_FORMAT),
                range.end.format(DATE_FORMAT)
            ),
        ]);
    }
    rows.extend([
        vec![String::new()],
        vec!["FINANCIAL SUMMARY".into()],
        vec!["Total Income:".into(), format!("${:.2}", totals.income)],
        vec!["Total Expenses:".into(), format!("${:.2}", totals.expenses)],
        vec![
            "Net Balance:".into(),
            format!("${:.2}", totals.net_balance()),
        ],
        vec![String::new()],
        vec!["TRANSACTION DETAILS".into()],
        [
            "Date",
            "Day of Week",
            "Type",
            "Category",
            "Description",
            "Amount",
            "Running Balance",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    ]);

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|transaction| transaction.date);

    let mut running_balance = 0.0;
    for transaction in ordered {
        running_balance += transaction.signed_amount();
        let sign = if transaction.is_income() { "+" } else { "-" };
        rows.push(vec![
            transaction.date.format(DATE_FORMAT).to_string(),
            transaction.date.format("%A").to_string(),
            transaction.kind.to_string().to_uppercase(),
            transaction.category.clone(),
            transaction.description.clone(),
            format!("{}${:.2}", sign, transaction.amount),
            format!("${:.2}", running_balance),
        ]);
    }

    let mut report = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        report.push_str(&line.join(","));
        report.push('\n');
    }
    report
}

/// Quotes a field when it contains a delimiter, doubling embedded quotes.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
