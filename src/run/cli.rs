use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config;
use crate::db::Store;
use crate::entry;
use crate::models::{Category, Expense};
use crate::report::{export, DashboardView, ExpenseFilter};
use crate::ui::charts::DEFAULT_TOP_N;
use crate::ui::util::{format_amount, format_mean, truncate};

/// Flags that take a value. Everything else is positional.
const VALUE_FLAGS: &[&str] = &["--month", "--category", "--min", "--note", "--at"];

pub(crate) fn as_cli(args: &[String], store: &Store) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args, store, &mut out)
}

/// Run one CLI command. `args` starts at the command name.
pub(crate) fn execute(args: &[String], store: &Store, out: &mut dyn Write) -> Result<()> {
    let Some((command, rest)) = args.split_first() else {
        print_usage(out)?;
        return Ok(());
    };

    match command.as_str() {
        "add" | "a" => cli_add(rest, store, out),
        "list" | "ls" => cli_list(rest, store, out),
        "summary" | "s" => cli_summary(rest, store, out),
        "export" => cli_export(rest, store, out),
        "delete" | "del" => cli_delete(rest, store, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "expensetui {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut dyn Write) -> Result<()> {
    let text = "\
ExpenseTUI - personal expense dashboard

Usage: expensetui [--db <path>] [--verbose] [command]

Commands:
  (none)                              Launch interactive dashboard
  add <amount> <category>             Record an expense
    --note <text>                     Optional note
    --at \"YYYY-MM-DD HH:MM[:SS]\"      Timestamp (default: now)
  list [filters]                      List expenses, newest first
  summary [filters]                   Totals, monthly trend and top categories
  export [path] [filters]             Write monthly totals as CSV
  delete <id>                         Delete an expense
  --help, -h                          Show this help
  --version, -V                       Show version

Filters:
  --month <YYYY-MM>    --category <name>    --min <amount>
";
    write!(out, "{text}")?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn positional(args: &[String]) -> Vec<&str> {
    let mut result = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else {
            result.push(arg.as_str());
        }
    }
    result
}

fn parse_filter(args: &[String]) -> Result<ExpenseFilter> {
    let month = flag_value(args, "--month")
        .map(entry::parse_month)
        .transpose()?;
    let category = flag_value(args, "--category").map(Category::normalize);
    let min_amount = flag_value(args, "--min")
        .map(entry::parse_min_amount)
        .transpose()?
        .unwrap_or(Decimal::ZERO);
    Ok(ExpenseFilter {
        month,
        category,
        min_amount,
    })
}

fn describe_filter(filter: &ExpenseFilter) -> String {
    let min = if filter.min_amount > Decimal::ZERO {
        format_amount(filter.min_amount)
    } else {
        "none".to_string()
    };
    format!(
        "Month: {} | Category: {} | Min: {min}",
        filter.month.as_deref().unwrap_or("All"),
        filter.category.as_deref().unwrap_or("All"),
    )
}

/// Shared fetch → filter → aggregate step. `None` means the store is empty.
fn load_view(args: &[String], store: &Store) -> Result<Option<(ExpenseFilter, DashboardView)>> {
    let filter = parse_filter(args)?;
    let all = store.fetch_all()?;
    Ok(DashboardView::build(&all, &filter).map(|view| (filter, view)))
}

fn print_empty(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "No expenses recorded yet.")?;
    writeln!(out, "Add one with: expensetui add <amount> <category>")?;
    Ok(())
}

// ── Commands ─────────────────────────────────────────────────

fn cli_add(args: &[String], store: &Store, out: &mut dyn Write) -> Result<()> {
    let pos = positional(args);
    let [amount, category, ..] = pos.as_slice() else {
        anyhow::bail!("Usage: expensetui add <amount> <category> [--note <text>] [--at <timestamp>]");
    };

    let amount = entry::parse_amount(amount)?;
    let created_at = match flag_value(args, "--at") {
        Some(at) => entry::parse_datetime(at)?,
        None => Local::now().naive_local(),
    };
    let note = flag_value(args, "--note").unwrap_or("").trim();

    let expense = Expense::new(amount, Category::normalize(category), note, created_at);
    let id = store.insert_expense(&expense)?;
    log::info!("Added expense {id} from the command line");
    writeln!(out, "Expense #{id} added successfully!")?;
    Ok(())
}

fn cli_list(args: &[String], store: &Store, out: &mut dyn Write) -> Result<()> {
    let Some((_, view)) = load_view(args, store)? else {
        return print_empty(out);
    };
    if view.records.is_empty() {
        writeln!(out, "No expenses match the given filters")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<6} {:>12}  {:<16} {:<19}  Note",
        "ID", "Amount", "Category", "Created At"
    )?;
    writeln!(out, "{}", "─".repeat(72))?;
    for e in &view.records {
        writeln!(
            out,
            "{:<6} {:>12}  {:<16} {:<19}  {}",
            e.id.unwrap_or(0),
            format_amount(e.amount),
            truncate(&e.category, 16),
            e.timestamp(),
            e.note,
        )?;
    }
    Ok(())
}

fn cli_summary(args: &[String], store: &Store, out: &mut dyn Write) -> Result<()> {
    let Some((filter, view)) = load_view(args, store)? else {
        return print_empty(out);
    };

    writeln!(out, "Expense Summary ({})", describe_filter(&filter))?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Total Spent:        {}", format_amount(view.summary.total))?;
    writeln!(out, "  Number of Expenses: {}", view.summary.count)?;
    writeln!(out, "  Average Expense:    {}", format_mean(view.summary.mean))?;

    if !view.monthly.is_empty() {
        writeln!(out)?;
        writeln!(out, "Monthly Totals:")?;
        for m in &view.monthly {
            writeln!(out, "  {:<10} {:>14}", m.month, format_amount(m.amount))?;
        }
    }

    if !view.by_category.is_empty() {
        writeln!(out)?;
        writeln!(out, "Top Spending Categories:")?;
        for c in view.by_category.iter().take(DEFAULT_TOP_N) {
            writeln!(out, "  {:<16} {:>14}", c.category, format_amount(c.amount))?;
        }
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store, out: &mut dyn Write) -> Result<()> {
    let path = positional(args)
        .first()
        .map(|p| PathBuf::from(config::expand_home(p)))
        .unwrap_or_else(config::default_export_path);

    let Some((_, view)) = load_view(args, store)? else {
        return print_empty(out);
    };
    let count = export::write_monthly_report(&path, &view.monthly)?;
    writeln!(out, "Exported {count} month(s) to {}", path.display())?;
    Ok(())
}

fn cli_delete(args: &[String], store: &Store, out: &mut dyn Write) -> Result<()> {
    let pos = positional(args);
    let Some(raw) = pos.first() else {
        anyhow::bail!("Usage: expensetui delete <id>");
    };
    let id = entry::parse_expense_id(raw)?;
    let removed = store.delete_expense(id)?;
    if removed == 0 {
        log::debug!("Delete requested for unknown expense {id}");
    }
    writeln!(out, "Expense with ID {id} deleted successfully!")?;
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
