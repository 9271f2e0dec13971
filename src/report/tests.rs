#![allow(clippy::unwrap_used)]

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::export::{monthly_report_csv, write_monthly_report};
use super::*;
use crate::models::TIMESTAMP_FORMAT;

fn make(id: i64, amount: Decimal, category: &str, created_at: &str) -> Expense {
    Expense {
        id: Some(id),
        amount,
        category: category.into(),
        note: String::new(),
        created_at: NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT).unwrap(),
    }
}

/// The three-record example: two January expenses and one in February.
fn sample() -> Vec<Expense> {
    vec![
        make(3, dec!(5.00), "Food", "2024-02-01 00:00:00"),
        make(2, dec!(20.00), "Travel", "2024-01-20 00:00:00"),
        make(1, dec!(10.00), "Food", "2024-01-05 00:00:00"),
    ]
}

fn wider_sample() -> Vec<Expense> {
    vec![
        make(1, dec!(12.50), "Food", "2024-01-03 08:00:00"),
        make(2, dec!(80.00), "Travel", "2024-01-15 10:00:00"),
        make(3, dec!(3.25), "Food", "2024-02-02 12:00:00"),
        make(4, dec!(45.00), "Shopping", "2024-02-11 18:30:00"),
        make(5, dec!(15.00), "Health", "2024-03-01 09:00:00"),
        make(6, dec!(60.00), "Entertainment", "2024-03-20 21:00:00"),
        make(7, dec!(7.75), "Other", "2024-03-28 14:00:00"),
    ]
}

fn ids(records: &[Expense]) -> Vec<i64> {
    records.iter().filter_map(|e| e.id).collect()
}

// ── filter ────────────────────────────────────────────────────

#[test]
fn test_default_filter_passes_everything() {
    let records = wider_sample();
    let filtered = filter(&records, &ExpenseFilter::default());
    assert_eq!(filtered, records);
    assert!(ExpenseFilter::default().is_default());
}

#[test]
fn test_filter_by_month() {
    let criteria = ExpenseFilter {
        month: Some("2024-01".into()),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&sample(), &criteria)), [2, 1]);
}

#[test]
fn test_filter_by_category() {
    let criteria = ExpenseFilter {
        category: Some("Food".into()),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&sample(), &criteria)), [3, 1]);
}

#[test]
fn test_filter_min_amount_is_inclusive() {
    let criteria = ExpenseFilter {
        min_amount: dec!(10),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&sample(), &criteria)), [2, 1]);
}

#[test]
fn test_filters_compose_with_and() {
    let criteria = ExpenseFilter {
        month: Some("2024-01".into()),
        category: Some("Food".into()),
        min_amount: dec!(1),
    };
    assert_eq!(ids(&filter(&sample(), &criteria)), [1]);

    let none = ExpenseFilter {
        month: Some("2024-02".into()),
        category: Some("Travel".into()),
        ..Default::default()
    };
    assert!(filter(&sample(), &none).is_empty());
}

#[test]
fn test_filter_category_is_exact_match() {
    let criteria = ExpenseFilter {
        category: Some("food".into()),
        ..Default::default()
    };
    assert!(filter(&sample(), &criteria).is_empty());
}

#[test]
fn test_filter_is_idempotent() {
    let records = wider_sample();
    let criteria_list = [
        ExpenseFilter::default(),
        ExpenseFilter {
            month: Some("2024-03".into()),
            ..Default::default()
        },
        ExpenseFilter {
            category: Some("Food".into()),
            min_amount: dec!(5),
            ..Default::default()
        },
        ExpenseFilter {
            month: Some("2024-02".into()),
            category: Some("Shopping".into()),
            min_amount: dec!(45),
        },
    ];
    for criteria in &criteria_list {
        let once = filter(&records, criteria);
        let twice = filter(&once, criteria);
        assert_eq!(once, twice, "Not idempotent for {criteria:?}");
    }
}

#[test]
fn test_filter_empty_input() {
    assert!(filter(&[], &ExpenseFilter::default()).is_empty());
}

// ── summarize ─────────────────────────────────────────────────

#[test]
fn test_summarize_sample() {
    let s = summarize(&sample());
    assert_eq!(s.total, dec!(35.00));
    assert_eq!(s.count, 3);
    assert_eq!(s.mean.unwrap().round_dp(2), dec!(11.67));
}

#[test]
fn test_summarize_empty_has_no_mean() {
    let s = summarize(&[]);
    assert_eq!(s.total, Decimal::ZERO);
    assert_eq!(s.count, 0);
    assert!(s.mean.is_none());
}

#[test]
fn test_summarize_single() {
    let s = summarize(&[make(1, dec!(42.25), "Health", "2024-06-01 00:00:00")]);
    assert_eq!(s.total, dec!(42.25));
    assert_eq!(s.mean, Some(dec!(42.25)));
}

// ── group_by_month ────────────────────────────────────────────

#[test]
fn test_group_by_month_sample() {
    let months = group_by_month(&sample());
    assert_eq!(
        months,
        [
            MonthlyTotal {
                month: "2024-01".into(),
                amount: dec!(30.00)
            },
            MonthlyTotal {
                month: "2024-02".into(),
                amount: dec!(5.00)
            },
        ]
    );
}

#[test]
fn test_group_by_month_ascending_across_years() {
    let records = vec![
        make(1, dec!(1), "Food", "2025-01-01 00:00:00"),
        make(2, dec!(2), "Food", "2024-12-31 23:59:59"),
        make(3, dec!(3), "Food", "2024-02-15 00:00:00"),
    ];
    let months: Vec<String> = group_by_month(&records)
        .into_iter()
        .map(|m| m.month)
        .collect();
    assert_eq!(months, ["2024-02", "2024-12", "2025-01"]);
}

#[test]
fn test_group_by_month_empty() {
    assert!(group_by_month(&[]).is_empty());
}

// ── group_by_category ─────────────────────────────────────────

#[test]
fn test_group_by_category_sample() {
    let cats = group_by_category(&sample());
    assert_eq!(
        cats,
        [
            CategoryTotal {
                category: "Travel".into(),
                amount: dec!(20.00)
            },
            CategoryTotal {
                category: "Food".into(),
                amount: dec!(15.00)
            },
        ]
    );
}

#[test]
fn test_group_by_category_ties_alphabetical() {
    let records = vec![
        make(1, dec!(10), "Travel", "2024-01-01 00:00:00"),
        make(2, dec!(10), "Food", "2024-01-02 00:00:00"),
        make(3, dec!(30), "Health", "2024-01-03 00:00:00"),
    ];
    let names: Vec<String> = group_by_category(&records)
        .into_iter()
        .map(|c| c.category)
        .collect();
    assert_eq!(names, ["Health", "Food", "Travel"]);
}

#[test]
fn test_group_by_category_preserves_total() {
    for records in [sample(), wider_sample()] {
        let grouped: Decimal = group_by_category(&records).iter().map(|c| c.amount).sum();
        let by_month: Decimal = group_by_month(&records).iter().map(|m| m.amount).sum();
        let raw: Decimal = records.iter().map(|e| e.amount).sum();
        assert_eq!(grouped, raw);
        assert_eq!(by_month, raw);
    }
}

#[test]
fn test_group_by_category_empty() {
    assert!(group_by_category(&[]).is_empty());
}

// ── options ───────────────────────────────────────────────────

#[test]
fn test_month_and_category_options_sorted_distinct() {
    let records = wider_sample();
    assert_eq!(month_options(&records), ["2024-01", "2024-02", "2024-03"]);
    assert_eq!(
        category_options(&records),
        ["Entertainment", "Food", "Health", "Other", "Shopping", "Travel"]
    );
    assert!(month_options(&[]).is_empty());
}

// ── DashboardView ─────────────────────────────────────────────

#[test]
fn test_dashboard_view_none_when_no_expenses() {
    assert!(DashboardView::build(&[], &ExpenseFilter::default()).is_none());
}

#[test]
fn test_dashboard_view_filtered_to_nothing() {
    let criteria = ExpenseFilter {
        min_amount: dec!(1000),
        ..Default::default()
    };
    let view = DashboardView::build(&sample(), &criteria).unwrap();
    assert!(view.records.is_empty());
    assert_eq!(view.summary.count, 0);
    assert!(view.summary.mean.is_none());
    assert!(view.monthly.is_empty());
    assert!(view.by_category.is_empty());
}

#[test]
fn test_dashboard_view_pipeline() {
    let criteria = ExpenseFilter {
        category: Some("Food".into()),
        ..Default::default()
    };
    let view = DashboardView::build(&sample(), &criteria).unwrap();
    assert_eq!(ids(&view.records), [3, 1]);
    assert_eq!(view.summary.total, dec!(15.00));
    assert_eq!(view.monthly.len(), 2);
    assert_eq!(view.by_category.len(), 1);
}

// ── export ────────────────────────────────────────────────────

#[test]
fn test_monthly_report_csv_sample() {
    let bytes = monthly_report_csv(&group_by_month(&sample())).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "month,amount\n2024-01,30.00\n2024-02,5.00\n");
}

#[test]
fn test_monthly_report_csv_empty_has_header() {
    let text = String::from_utf8(monthly_report_csv(&[]).unwrap()).unwrap();
    assert_eq!(text, "month,amount\n");
}

#[test]
fn test_monthly_report_rounds_to_cents() {
    let rows = [MonthlyTotal {
        month: "2024-07".into(),
        amount: dec!(1234.5),
    }];
    let text = String::from_utf8(monthly_report_csv(&rows).unwrap()).unwrap();
    assert!(text.ends_with("2024-07,1234.50\n"));
}

#[test]
fn test_write_monthly_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(export::DEFAULT_FILE_NAME);
    let count = write_monthly_report(&path, &group_by_month(&sample())).unwrap();
    assert_eq!(count, 2);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("month,amount\n"));
}

#[test]
fn test_write_monthly_report_bad_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.csv");
    assert!(write_monthly_report(&path, &[]).is_err());
}
