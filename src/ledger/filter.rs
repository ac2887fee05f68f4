use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::FinanceError;

use super::transaction::{Transaction, TransactionKind};

/// Windowing mode applied when browsing transactions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewPeriod {
    Weekly,
    #[default]
    Monthly,
}

impl ViewPeriod {
    /// The week (Monday through Sunday) or calendar month containing
    /// `reference`, both bounds inclusive.
    pub fn window_containing(self, reference: NaiveDate) -> DateRange {
        match self {
            ViewPeriod::Weekly => {
                let monday =
                    reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
                DateRange {
                    start: monday,
                    end: monday + Duration::days(6),
                }
            }
            ViewPeriod::Monthly => DateRange {
                start: first_of_month(reference),
                end: last_of_month(reference),
            },
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| first_next - Duration::days(1))
        .unwrap_or(date)
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FinanceError> {
        if end < start {
            return Err(FinanceError::InvalidArgument(
                "date range end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Criteria narrowing which transactions a view shows. Empty fields impose
/// no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Filter {
    pub search_term: String,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub date_range: Option<DateRange>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.category.is_none()
            && self.kind.is_none()
            && self.date_range.is_none()
    }

    /// Whether `transaction` satisfies every set criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.search_term.is_empty() {
            let needle = self.search_term.to_lowercase();
            let in_description = transaction.description.to_lowercase().contains(&needle);
            let in_category = transaction.category.to_lowercase().contains(&needle);
            if !in_description && !in_category {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            if transaction.category != category {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(range) = self.date_range {
            if !range.contains(transaction.date) {
                return false;
            }
        }
        true
    }

    /// Shallow-merges `patch` into this filter. Fields the patch leaves at
    /// `None` keep their prior value; `Some(None)` (or an empty search
    /// term) clears the field.
    pub fn apply_patch(&mut self, patch: FilterPatch) {
        if let Some(search_term) = patch.search_term {
            self.search_term = search_term;
        }
        if let Some(category) = patch.category {
            self.category = category.filter(|label| !label.is_empty());
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(date_range) = patch.date_range {
            self.date_range = date_range;
        }
    }
}

/// Partial filter update. The outer `Option` distinguishes "leave as is"
/// from "overwrite", the inner one carries the cleared state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Option<TransactionKind>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<Option<DateRange>>,
}

impl FilterPatch {
    /// A patch that clears every criterion at once.
    pub fn clear_all() -> Self {
        Self {
            search_term: Some(String::new()),
            category: Some(None),
            kind: Some(None),
            date_range: Some(None),
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn category(label: impl Into<String>) -> Self {
        Self {
            category: Some(Some(label.into())),
            ..Self::default()
        }
    }

    pub fn kind(kind: TransactionKind) -> Self {
        Self {
            kind: Some(Some(kind)),
            ..Self::default()
        }
    }

    pub fn date_range(range: DateRange) -> Self {
        Self {
            date_range: Some(Some(range)),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_window_is_monday_anchored() {
        // 2025-07-02 is a Wednesday.
        let window = ViewPeriod::Weekly.window_containing(date(2025, 7, 2));
        assert_eq!(window.start, date(2025, 6, 30));
        assert_eq!(window.end, date(2025, 7, 6));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
    }

    #[test]
    fn monthly_window_spans_calendar_month() {
        let window = ViewPeriod::Monthly.window_containing(date(2025, 2, 14));
        assert_eq!(window.start, date(2025, 2, 1));
        assert_eq!(window.end, date(2025, 2, 28));

        let december = ViewPeriod::Monthly.window_containing(date(2024, 12, 25));
        assert_eq!(december.end, date(2024, 12, 31));
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        assert!(DateRange::new(date(2025, 3, 2), date(2025, 3, 1)).is_err());
    }

    #[test]
    fn patch_merges_and_clears() {
        let mut filter = Filter {
            search_term: "rent".into(),
            category: Some("Housing".into()),
            kind: Some(TransactionKind::Expense),
            date_range: None,
        };

        filter.apply_patch(FilterPatch::search("groceries"));
        assert_eq!(filter.search_term, "groceries");
        assert_eq!(filter.category.as_deref(), Some("Housing"));

        filter.apply_patch(FilterPatch {
            category: Some(None),
            ..FilterPatch::default()
        });
        assert!(filter.category.is_none());
        assert_eq!(filter.kind, Some(TransactionKind::Expense));

        filter.apply_patch(FilterPatch::clear_all());
        assert!(filter.is_empty());
    }
}
