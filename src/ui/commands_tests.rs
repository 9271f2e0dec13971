#![allow(clippy::unwrap_used)]

use chrono::NaiveDateTime;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use super::*;
use crate::models::TIMESTAMP_FORMAT;

fn setup() -> (TempDir, Store, App) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("expenses.db"));
    store.initialize().unwrap();
    for (amount, category, at) in [
        (dec!(10.00), "Food", "2024-01-05 12:00:00"),
        (dec!(20.00), "Travel", "2024-01-20 12:00:00"),
        (dec!(5.00), "Food", "2024-02-01 12:00:00"),
    ] {
        let created_at = NaiveDateTime::parse_from_str(at, TIMESTAMP_FORMAT).unwrap();
        store
            .insert_expense(&Expense::new(amount, category, "", created_at))
            .unwrap();
    }
    let mut app = App::new();
    app.refresh(&store).unwrap();
    (dir, store, app)
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("", ""), 0);
    assert_eq!(levenshtein("sort", "sort"), 0);
    assert_eq!(levenshtein("exprot", "export"), 2);
    assert_eq!(levenshtein("", "abc"), 3);
}

#[test]
fn test_unknown_command_suggests() {
    let (_dir, store, mut app) = setup();
    handle_command("exprot", &mut app, &store).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :exprot. Did you mean :export?"
    );
}

#[test]
fn test_empty_command_is_ignored() {
    let (_dir, store, mut app) = setup();
    handle_command("   ", &mut app, &store).unwrap();
    assert!(app.status_message.is_empty());
}

#[test]
fn test_quit() {
    let (_dir, store, mut app) = setup();
    handle_command("q", &mut app, &store).unwrap();
    assert!(!app.running);
}

#[test]
fn test_add_inserts_expense() {
    let (_dir, store, mut app) = setup();
    handle_command("add 7.5 shopping new socks", &mut app, &store).unwrap();

    let all = store.fetch_all().unwrap();
    assert_eq!(all.len(), 4);
    let added = all.iter().find(|e| e.note == "new socks").unwrap();
    assert_eq!(added.amount, dec!(7.5));
    assert_eq!(added.category, "Shopping");
    assert_eq!(app.expenses.len(), 4);
}

#[test]
fn test_add_rejects_zero_amount() {
    let (_dir, store, mut app) = setup();
    handle_command("add 0 Food", &mut app, &store).unwrap();
    assert_eq!(app.status_message, "Amount must be greater than zero.");
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_add_without_category_shows_usage() {
    let (_dir, store, mut app) = setup();
    handle_command("add 12", &mut app, &store).unwrap();
    assert!(app.status_message.starts_with("Usage: :add"));
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_add_without_args_opens_form() {
    let (_dir, store, mut app) = setup();
    handle_command("add", &mut app, &store).unwrap();
    assert_eq!(app.input_mode, InputMode::Form);
}

#[test]
fn test_delete_asks_for_confirmation() {
    let (_dir, store, mut app) = setup();
    handle_command("delete 2", &mut app, &store).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_delete_rejects_negative_id() {
    let (_dir, store, mut app) = setup();
    handle_command("delete -4", &mut app, &store).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.status_message.contains("Invalid expense id"));
}

#[test]
fn test_month_filter() {
    let (_dir, store, mut app) = setup();
    handle_command("month 2024-01", &mut app, &store).unwrap();
    assert_eq!(app.filter.month.as_deref(), Some("2024-01"));
    assert_eq!(app.table_len(), 2);

    handle_command("month 2023-05", &mut app, &store).unwrap();
    assert_eq!(app.status_message, "No expenses in 2023-05");
    assert_eq!(app.filter.month.as_deref(), Some("2024-01"));

    handle_command("month all", &mut app, &store).unwrap();
    assert!(app.filter.month.is_none());
}

#[test]
fn test_category_filter_case_insensitive() {
    let (_dir, store, mut app) = setup();
    handle_command("category food", &mut app, &store).unwrap();
    assert_eq!(app.filter.category.as_deref(), Some("Food"));
    assert_eq!(app.view.as_ref().unwrap().summary.total, dec!(15.00));

    handle_command("cat Health", &mut app, &store).unwrap();
    assert_eq!(app.filter.category.as_deref(), Some("Food"));
}

#[test]
fn test_min_and_clear() {
    let (_dir, store, mut app) = setup();
    handle_command("min 10", &mut app, &store).unwrap();
    assert_eq!(app.filter.min_amount, dec!(10));
    assert_eq!(app.table_len(), 2);

    handle_command("min -3", &mut app, &store).unwrap();
    assert_eq!(app.filter.min_amount, dec!(10));

    handle_command("clear", &mut app, &store).unwrap();
    assert!(app.filter.is_default());
    assert_eq!(app.table_len(), 3);
}

#[test]
fn test_sort_command() {
    let (_dir, store, mut app) = setup();
    handle_command("sort amount", &mut app, &store).unwrap();
    assert_eq!(app.sort, SortKey::Amount);
    handle_command("sort", &mut app, &store).unwrap();
    assert_eq!(app.sort, SortKey::Category);
    handle_command("sort colour", &mut app, &store).unwrap();
    assert_eq!(app.sort, SortKey::Category);
}

#[test]
fn test_export_command() {
    let (dir, store, mut app) = setup();
    let path = dir.path().join("out.csv");
    handle_command(&format!("export {}", path.display()), &mut app, &store).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "month,amount\n2024-01,30.00\n2024-02,5.00\n"
    );
}
