use anyhow::Result;
use chrono::Local;
use std::path::Path;

use crate::db::Store;
use crate::entry::{self, EntryError};
use crate::models::{Category, Expense};
use crate::report::{self, export, DashboardView, ExpenseFilter};
use crate::ui::util::cycle_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "ADD"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Category,
    Note,
    Date,
    Time,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Amount,
            Self::Category,
            Self::Note,
            Self::Date,
            Self::Time,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Note => "Note (optional)",
            Self::Date => "Date",
            Self::Time => "Time",
        }
    }

    fn step(&self, delta: i32) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0) as i32;
        let next = (idx + delta).rem_euclid(all.len() as i32) as usize;
        all[next]
    }

    pub(crate) fn next(&self) -> Self {
        self.step(1)
    }

    pub(crate) fn prev(&self) -> Self {
        self.step(-1)
    }
}

/// State of the "Add Expense" side panel.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) amount: String,
    pub(crate) category: Category,
    pub(crate) note: String,
    pub(crate) date: String,
    pub(crate) time: String,
    pub(crate) field: FormField,
    pub(crate) error: Option<String>,
}

impl ExpenseForm {
    pub(crate) fn new() -> Self {
        let now = Local::now();
        Self {
            amount: String::new(),
            category: Category::Food,
            note: String::new(),
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
            field: FormField::Amount,
            error: None,
        }
    }

    /// Validate the entered values into a new expense. Nothing is written here.
    pub(crate) fn to_expense(&self) -> std::result::Result<Expense, EntryError> {
        let amount = entry::parse_amount(&self.amount)?;
        let created_at = entry::parse_timestamp(&self.date, &self.time)?;
        Ok(Expense::new(
            amount,
            self.category.as_str(),
            self.note.trim(),
            created_at,
        ))
    }

    /// Text buffer behind the focused field. The category field is a selector.
    pub(crate) fn input_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Amount => Some(&mut self.amount),
            FormField::Category => None,
            FormField::Note => Some(&mut self.note),
            FormField::Date => Some(&mut self.date),
            FormField::Time => Some(&mut self.time),
        }
    }

    pub(crate) fn cycle_category(&mut self, delta: i32) {
        let all = Category::all();
        let idx = all.iter().position(|c| *c == self.category).unwrap_or(0) as i32;
        let next = (idx + delta).rem_euclid(all.len() as i32) as usize;
        self.category = all[next];
    }

    /// After a successful add: keep category, date and time for the next entry.
    fn clear_entry(&mut self) {
        self.amount.clear();
        self.note.clear();
        self.error = None;
        self.field = FormField::Amount;
    }
}

/// Table ordering. The store hands back newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortKey {
    Newest,
    Amount,
    Category,
    Id,
}

impl SortKey {
    pub(crate) fn all() -> &'static [SortKey] {
        &[Self::Newest, Self::Amount, Self::Category, Self::Id]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Newest => "date",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Id => "id",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" | "newest" | "created_at" => Some(Self::Newest),
            "amount" => Some(Self::Amount),
            "category" | "cat" => Some(Self::Category),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    pub(crate) fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|k| k == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub(crate) fn apply(&self, records: &mut [Expense]) {
        match self {
            Self::Newest => records.sort_by(|a, b| {
                b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
            }),
            Self::Amount => records.sort_by(|a, b| b.amount.cmp(&a.amount)),
            Self::Category => records.sort_by(|a, b| a.category.cmp(&b.category)),
            Self::Id => records.sort_by_key(|e| e.id),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Side panel
    pub(crate) form: ExpenseForm,

    // Data, refetched in full on every refresh
    pub(crate) expenses: Vec<Expense>,
    pub(crate) filter: ExpenseFilter,
    pub(crate) month_options: Vec<String>,
    pub(crate) category_options: Vec<String>,
    pub(crate) view: Option<DashboardView>,

    // Table
    pub(crate) sort: SortKey,
    pub(crate) table_index: usize,
    pub(crate) table_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            form: ExpenseForm::new(),

            expenses: Vec::new(),
            filter: ExpenseFilter::default(),
            month_options: Vec::new(),
            category_options: Vec::new(),
            view: None,

            sort: SortKey::Newest,
            table_index: 0,
            table_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 10,
        }
    }

    /// Reload every expense from the store and rebuild the dashboard.
    pub(crate) fn refresh(&mut self, store: &Store) -> Result<()> {
        self.expenses = store.fetch_all()?;
        self.month_options = report::month_options(&self.expenses);
        self.category_options = report::category_options(&self.expenses);

        // A selection whose last expense was deleted falls back to All.
        if let Some(m) = &self.filter.month {
            if !self.month_options.contains(m) {
                self.filter.month = None;
            }
        }
        if let Some(c) = &self.filter.category {
            if !self.category_options.contains(c) {
                self.filter.category = None;
            }
        }

        self.rebuild_view();
        Ok(())
    }

    /// Re-run filter and aggregation over the already loaded expenses.
    pub(crate) fn rebuild_view(&mut self) {
        self.view = DashboardView::build(&self.expenses, &self.filter);
        let len = match &mut self.view {
            Some(view) => {
                self.sort.apply(&mut view.records);
                view.records.len()
            }
            None => 0,
        };
        if self.table_index >= len {
            self.table_index = len.saturating_sub(1);
        }
        if self.table_scroll > self.table_index {
            self.table_scroll = self.table_index;
        }
    }

    pub(crate) fn table_len(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.records.len())
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.view.as_ref()?.records.get(self.table_index)
    }

    pub(crate) fn set_filter(&mut self, filter: ExpenseFilter) {
        self.filter = filter;
        self.table_index = 0;
        self.table_scroll = 0;
        self.rebuild_view();
    }

    pub(crate) fn cycle_month(&mut self, delta: i32) {
        let mut filter = self.filter.clone();
        filter.month = cycle_option(filter.month.as_deref(), &self.month_options, delta);
        self.set_filter(filter);
        self.set_status(format!("Month: {}", self.month_label()));
    }

    pub(crate) fn cycle_category(&mut self, delta: i32) {
        let mut filter = self.filter.clone();
        filter.category = cycle_option(filter.category.as_deref(), &self.category_options, delta);
        self.set_filter(filter);
        self.set_status(format!("Category: {}", self.category_label()));
    }

    pub(crate) fn month_label(&self) -> &str {
        self.filter.month.as_deref().unwrap_or("All")
    }

    pub(crate) fn category_label(&self) -> &str {
        self.filter.category.as_deref().unwrap_or("All")
    }

    pub(crate) fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        if let Some(view) = &mut self.view {
            sort.apply(&mut view.records);
        }
        self.table_index = 0;
        self.table_scroll = 0;
        self.set_status(format!("Sorted by {}", sort.label()));
    }

    /// Validate the side panel and insert. Invalid input stays in the form
    /// with an inline error; nothing is written.
    pub(crate) fn submit_form(&mut self, store: &Store) -> Result<()> {
        match self.form.to_expense() {
            Err(e) => {
                log::info!("Rejected expense entry: {e}");
                self.form.error = Some(e.to_string());
            }
            Ok(expense) => {
                self.add_expense(store, &expense)?;
                self.form.clear_entry();
            }
        }
        Ok(())
    }

    pub(crate) fn add_expense(&mut self, store: &Store, expense: &Expense) -> Result<i64> {
        let id = store.insert_expense(expense)?;
        log::info!(
            "Added expense {id}: {} {} at {}",
            expense.amount,
            expense.category,
            expense.timestamp()
        );
        self.set_status(format!("Expense #{id} added successfully!"));
        self.refresh(store)?;
        Ok(id)
    }

    pub(crate) fn request_delete(&mut self, id: i64) {
        self.confirm_message = format!("Delete expense #{id}?");
        self.pending_action = Some(PendingAction::DeleteExpense { id });
        self.input_mode = InputMode::Confirm;
    }

    /// Delete by id. Reported as success even when no expense had that id.
    pub(crate) fn delete_expense(&mut self, store: &Store, id: i64) -> Result<()> {
        let removed = store.delete_expense(id)?;
        if removed == 0 {
            log::debug!("Delete requested for unknown expense {id}");
        } else {
            log::info!("Deleted expense {id}");
        }
        self.set_status(format!("Expense with ID {id} deleted successfully!"));
        self.refresh(store)
    }

    /// Write the monthly totals of the current view as CSV. A write failure
    /// is reported in the status line rather than ending the session.
    pub(crate) fn export_report(&mut self, path: &Path) {
        let Some(view) = &self.view else {
            self.set_status("Nothing to export yet");
            return;
        };
        match export::write_monthly_report(path, &view.monthly) {
            Ok(count) => {
                self.set_status(format!("Exported {count} month(s) to {}", path.display()))
            }
            Err(e) => {
                log::warn!("Export failed: {e:#}");
                self.set_status(format!("Export failed: {e:#}"));
            }
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
