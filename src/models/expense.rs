use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Storage format for `created_at`, e.g. `2024-03-05 18:30:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Grouping key format derived from `created_at`, e.g. `2024-03`.
pub const MONTH_FORMAT: &str = "%Y-%m";

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Option<i64>,
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    pub created_at: NaiveDateTime,
}

impl Expense {
    pub fn new(
        amount: Decimal,
        category: impl Into<String>,
        note: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            amount,
            category: category.into(),
            note: note.into(),
            created_at,
        }
    }

    /// Year-month period of `created_at`. Only used for grouping and filtering.
    pub fn month(&self) -> String {
        self.created_at.format(MONTH_FORMAT).to_string()
    }

    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
