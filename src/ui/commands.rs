use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::Local;
use rust_decimal::Decimal;

use super::app::{App, InputMode, SortKey};
use crate::config;
use crate::db::Store;
use crate::entry;
use crate::models::{Category, Expense};
use crate::report::ExpenseFilter;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense now (e.g. :add 12.50 Food lunch) or open the form",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense now (e.g. :add 12.50 Food lunch) or open the form",
        cmd_add,
        r
    );
    register_command!(
        "delete",
        "Delete expense by id (e.g. :delete 3), selected row if no id",
        cmd_delete,
        r
    );
    register_command!(
        "del",
        "Delete expense by id (e.g. :delete 3), selected row if no id",
        cmd_delete,
        r
    );
    register_command!(
        "month",
        "Filter by month (e.g. :month 2024-01, :month all)",
        cmd_month,
        r
    );
    register_command!(
        "m",
        "Filter by month (e.g. :month 2024-01, :month all)",
        cmd_month,
        r
    );
    register_command!(
        "category",
        "Filter by category (e.g. :category Food, :category all)",
        cmd_category,
        r
    );
    register_command!(
        "cat",
        "Filter by category (e.g. :category Food, :category all)",
        cmd_category,
        r
    );
    register_command!(
        "min",
        "Minimum amount filter (e.g. :min 25)",
        cmd_min,
        r
    );
    register_command!("clear", "Reset all filters", cmd_clear, r);
    register_command!(
        "sort",
        "Sort table by date, amount, category or id",
        cmd_sort,
        r
    );
    register_command!(
        "export",
        "Export monthly totals as CSV (e.g. :export ~/report.csv)",
        cmd_export,
        r
    );
    register_command!(
        "e",
        "Export monthly totals as CSV (e.g. :export ~/report.csv)",
        cmd_export,
        r
    );
    register_command!("refresh", "Reload expenses from disk", cmd_refresh, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn is_all(args: &str) -> bool {
    args.is_empty() || args.eq_ignore_ascii_case("all")
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.refresh(store)?;
    app.set_status(format!("Loaded {} expense(s)", app.expenses.len()));
    Ok(())
}

/// `:add <amount> <category> [note...]`, timestamped now. No args opens the form.
fn cmd_add(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.input_mode = InputMode::Form;
        return Ok(());
    }

    let mut parts = args.splitn(3, ' ');
    let amount_str = parts.next().unwrap_or("");
    let Some(category) = parts.next().filter(|c| !c.trim().is_empty()) else {
        app.set_status("Usage: :add <amount> <category> [note]. Example: :add 12.50 Food lunch");
        return Ok(());
    };
    let note = parts.next().unwrap_or("").trim();

    let amount = match entry::parse_amount(amount_str) {
        Ok(a) => a,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let expense = Expense::new(
        amount,
        Category::normalize(category),
        note,
        Local::now().naive_local(),
    );
    app.add_expense(store, &expense)?;
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        match app.selected_expense().and_then(|e| e.id) {
            Some(id) => app.request_delete(id),
            None => app.set_status("Usage: :delete <id>"),
        }
        return Ok(());
    }

    match entry::parse_expense_id(args) {
        Ok(id) => app.request_delete(id),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    let mut filter = app.filter.clone();
    if is_all(args) {
        filter.month = None;
    } else {
        let month = match entry::parse_month(args) {
            Ok(m) => m,
            Err(e) => {
                app.set_status(e.to_string());
                return Ok(());
            }
        };
        if !app.month_options.contains(&month) {
            app.set_status(format!("No expenses in {month}"));
            return Ok(());
        }
        filter.month = Some(month);
    }
    app.set_filter(filter);
    app.set_status(format!("Month: {}", app.month_label()));
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    let mut filter = app.filter.clone();
    if is_all(args) {
        filter.category = None;
    } else {
        let found = app
            .category_options
            .iter()
            .find(|c| c.eq_ignore_ascii_case(args))
            .cloned();
        match found {
            Some(c) => filter.category = Some(c),
            None => {
                app.set_status(format!("No expenses in category '{args}'"));
                return Ok(());
            }
        }
    }
    app.set_filter(filter);
    app.set_status(format!("Category: {}", app.category_label()));
    Ok(())
}

fn cmd_min(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    let min_amount = if args.is_empty() {
        Decimal::ZERO
    } else {
        match entry::parse_min_amount(args) {
            Ok(m) => m,
            Err(e) => {
                app.set_status(e.to_string());
                return Ok(());
            }
        }
    };
    let mut filter = app.filter.clone();
    filter.min_amount = min_amount;
    app.set_filter(filter);
    app.set_status(format!("Minimum amount: {min_amount}"));
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.set_filter(ExpenseFilter::default());
    app.set_status("Filters cleared");
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_sort(app.sort.next());
        return Ok(());
    }
    match SortKey::parse(args) {
        Some(key) => app.set_sort(key),
        None => app.set_status(format!(
            "Unknown sort column '{args}'. Use date, amount, category or id"
        )),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        config::default_export_path()
    } else {
        PathBuf::from(config::expand_home(args))
    };
    app.export_report(&path);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
