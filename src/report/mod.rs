//! In-memory views derived from the full expense list.
//!
//! Everything here is a pure function of its input: nothing is cached and
//! nothing touches the store.

pub(crate) mod export;

use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::Expense;

/// Filter criteria. `None` means "All" for that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ExpenseFilter {
    pub(crate) month: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) min_amount: Decimal,
}

impl ExpenseFilter {
    pub(crate) fn matches(&self, expense: &Expense) -> bool {
        self.month.as_deref().is_none_or(|m| expense.month() == m)
            && self
                .category
                .as_deref()
                .is_none_or(|c| expense.category == c)
            && expense.amount >= self.min_amount
    }

    pub(crate) fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Summary {
    pub(crate) total: Decimal,
    pub(crate) count: usize,
    /// `None` when there is nothing to average.
    pub(crate) mean: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyTotal {
    pub(crate) month: String,
    pub(crate) amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
}

pub(crate) fn filter(records: &[Expense], criteria: &ExpenseFilter) -> Vec<Expense> {
    records
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect()
}

pub(crate) fn summarize(records: &[Expense]) -> Summary {
    let total: Decimal = records.iter().map(|e| e.amount).sum();
    let count = records.len();
    let mean = if count == 0 {
        None
    } else {
        total.checked_div(Decimal::from(count))
    };
    Summary { total, count, mean }
}

/// Sum per month, oldest month first.
pub(crate) fn group_by_month(records: &[Expense]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in records {
        *totals.entry(e.month()).or_default() += e.amount;
    }
    totals
        .into_iter()
        .map(|(month, amount)| MonthlyTotal { month, amount })
        .collect()
}

/// Sum per category, largest first. Equal sums keep alphabetical order.
pub(crate) fn group_by_category(records: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for e in records {
        *totals.entry(e.category.as_str()).or_default() += e.amount;
    }
    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    // sort_by is stable, so ties stay in BTreeMap (alphabetical) order
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    rows
}

/// Distinct months present, ascending. Feeds the month selector.
pub(crate) fn month_options(records: &[Expense]) -> Vec<String> {
    records
        .iter()
        .map(|e| e.month())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories present, ascending. Feeds the category selector.
pub(crate) fn category_options(records: &[Expense]) -> Vec<String> {
    records
        .iter()
        .map(|e| e.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone)]
pub(crate) struct DashboardView {
    pub(crate) records: Vec<Expense>,
    pub(crate) summary: Summary,
    pub(crate) monthly: Vec<MonthlyTotal>,
    pub(crate) by_category: Vec<CategoryTotal>,
}

impl DashboardView {
    /// Run filter → summarize → group. Returns `None` when there are no
    /// expenses at all, so the caller can show guidance instead of empty charts.
    pub(crate) fn build(all: &[Expense], criteria: &ExpenseFilter) -> Option<Self> {
        if all.is_empty() {
            return None;
        }
        let records = filter(all, criteria);
        Some(Self {
            summary: summarize(&records),
            monthly: group_by_month(&records),
            by_category: group_by_category(&records),
            records,
        })
    }
}

#[cfg(test)]
mod tests;
