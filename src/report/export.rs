use anyhow::{Context, Result};
use std::path::Path;

use super::MonthlyTotal;

pub(crate) const DEFAULT_FILE_NAME: &str = "monthly_expense_report.csv";

/// Monthly totals as CSV bytes: `month,amount` header, one row per month,
/// amounts with two decimals.
pub(crate) fn monthly_report_csv(rows: &[MonthlyTotal]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["month", "amount"])?;
    for row in rows {
        let amount = format!("{:.2}", row.amount.round_dp(2));
        wtr.write_record([row.month.as_str(), amount.as_str()])?;
    }
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV report: {}", e.error()))
}

/// Write the monthly report to `path`. Returns the number of data rows.
pub(crate) fn write_monthly_report(path: &Path, rows: &[MonthlyTotal]) -> Result<usize> {
    let bytes = monthly_report_csv(rows)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    log::info!("Exported {} month(s) to {}", rows.len(), path.display());
    Ok(rows.len())
}
