mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::models::{Expense, TIMESTAMP_FORMAT};

/// Handle to the expense database file.
///
/// Holds only the location. Each operation opens its own connection and
/// releases it before returning, so nothing stays locked between actions.
pub(crate) struct Store {
    path: PathBuf,
}

/// Row as SQLite hands it back, before timestamp and amount conversion.
struct ExpenseRow {
    id: i64,
    amount: f64,
    category: String,
    note: Option<String>,
    created_at: String,
}

impl ExpenseRow {
    fn into_expense(self) -> Result<Expense> {
        let created_at = NaiveDateTime::parse_from_str(&self.created_at, TIMESTAMP_FORMAT)
            .with_context(|| {
                format!(
                    "Expense {} has a malformed timestamp: '{}'",
                    self.id, self.created_at
                )
            })?;
        Ok(Expense {
            id: Some(self.id),
            amount: Decimal::from_f64(self.amount).unwrap_or_default(),
            category: self.category,
            note: self.note.unwrap_or_default(),
            created_at,
        })
    }
}

impl Store {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path)
            .with_context(|| format!("Failed to open database: {}", self.path.display()))
    }

    /// Create the expenses table if it does not exist yet. Safe to call repeatedly.
    pub(crate) fn initialize(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(schema::SCHEMA)
            .context("Failed to create expenses table")?;
        log::debug!("Initialized expense store at {}", self.path.display());
        Ok(())
    }

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        let amount = expense
            .amount
            .to_f64()
            .ok_or_else(|| anyhow::anyhow!("Amount out of range: {}", expense.amount))?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO expenses (amount, category, note, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![amount, expense.category, expense.note, expense.timestamp()],
        )
        .context("Failed to insert expense")?;
        let id = conn.last_insert_rowid();
        log::debug!("Inserted expense {id}");
        Ok(id)
    }

    /// Delete by id. Returns the number of rows removed, which is 0 when the
    /// id never existed.
    pub(crate) fn delete_expense(&self, id: i64) -> Result<usize> {
        let conn = self.connect()?;
        let removed = conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete expense {id}"))?;
        log::debug!("Delete expense {id}: {removed} row(s) removed");
        Ok(removed)
    }

    /// Every stored expense, newest first.
    pub(crate) fn fetch_all(&self) -> Result<Vec<Expense>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, category, note, created_at
             FROM expenses
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ExpenseRow {
                    id: row.get(0)?,
                    amount: row.get(1)?,
                    category: row.get(2)?,
                    note: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read expenses")?;
        log::debug!("Fetched {} expense(s)", rows.len());
        rows.into_iter().map(ExpenseRow::into_expense).collect()
    }

    pub(crate) fn count(&self) -> Result<i64> {
        let conn = self.connect()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }
}
