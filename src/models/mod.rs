mod category;
mod expense;

pub use category::Category;
pub use expense::{Expense, MONTH_FORMAT, TIMESTAMP_FORMAT};
