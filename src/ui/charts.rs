//! Chart values for the dashboard.
//!
//! Each builder is a pure function of aggregated rows and returns an owned,
//! immutable chart. Drawing happens through `Widget for &Chart` into whatever
//! buffer the caller supplies, so the same value can be drawn to the terminal
//! or into an in-memory `Buffer`.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph, Widget},
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::report::{CategoryTotal, MonthlyTotal};
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) const DEFAULT_TOP_N: usize = 6;

const TREND_TITLE: &str = "Monthly Expense Trend";
const CATEGORY_TITLE: &str = "Top Spending Categories";

/// Above this many months only the first and last month are labelled.
const MAX_X_LABELS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrendChart {
    months: Vec<String>,
    points: Vec<(f64, f64)>,
}

impl TrendChart {
    fn y_max(&self) -> f64 {
        let max = self.points.iter().map(|(_, y)| *y).fold(0.0, f64::max);
        if max <= 0.0 {
            1.0
        } else {
            max * 1.1
        }
    }

    fn x_labels(&self) -> Vec<Span<'static>> {
        match self.months.as_slice() {
            [] => Vec::new(),
            [only] => vec![Span::raw(only.clone()), Span::raw("")],
            months if months.len() <= MAX_X_LABELS => {
                months.iter().map(|m| Span::raw(m.clone())).collect()
            }
            [first, .., last] => vec![Span::raw(first.clone()), Span::raw(last.clone())],
        }
    }
}

/// Line-with-markers of monthly totals, x in the order given.
pub(crate) fn monthly_trend_chart(monthly: &[MonthlyTotal]) -> TrendChart {
    TrendChart {
        months: monthly.iter().map(|m| m.month.clone()).collect(),
        points: monthly
            .iter()
            .enumerate()
            .map(|(i, m)| (i as f64, m.amount.to_f64().unwrap_or(0.0)))
            .collect(),
    }
}

impl Widget for &TrendChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = theme::panel(TREND_TITLE);
        if self.points.is_empty() {
            render_no_data(block, area, buf);
            return;
        }

        let x_max = self.points.len().saturating_sub(1).max(1) as f64;
        let y_max = self.y_max();

        let datasets = vec![
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::ACCENT))
                .data(&self.points),
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(
                    Style::default()
                        .fg(theme::YELLOW)
                        .add_modifier(Modifier::BOLD),
                )
                .data(&self.points),
        ];

        let y_labels: Vec<Span> = [0.0, y_max / 2.0, y_max]
            .iter()
            .map(|v| Span::raw(format!("{v:.0}")))
            .collect();

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("Month")
                    .style(theme::dim_style())
                    .bounds([0.0, x_max])
                    .labels(self.x_labels()),
            )
            .y_axis(
                Axis::default()
                    .title("Total Amount")
                    .style(theme::dim_style())
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryBars {
    rows: Vec<(String, Decimal)>,
}

/// The first `top_n` categories. Input is expected largest-first.
pub(crate) fn category_bar_chart(totals: &[CategoryTotal], top_n: usize) -> CategoryBars {
    CategoryBars {
        rows: totals
            .iter()
            .take(top_n)
            .map(|c| (c.category.clone(), c.amount))
            .collect(),
    }
}

impl Widget for &CategoryBars {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = theme::panel(CATEGORY_TITLE);
        if self.rows.is_empty() {
            render_no_data(block, area, buf);
            return;
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let slot = inner_width / self.rows.len().max(1);
        let bar_width = slot.saturating_sub(1).clamp(3, 14) as u16;

        let bars: Vec<Bar> = self
            .rows
            .iter()
            .map(|(name, amount)| {
                Bar::default()
                    .value(amount.round().to_u64().unwrap_or(0))
                    .text_value(format_amount(*amount))
                    .label(Line::from(truncate(name, bar_width as usize)))
                    .style(Style::default().fg(theme::SKY))
                    .value_style(
                        Style::default()
                            .fg(theme::HEADER_BG)
                            .bg(theme::SKY)
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();

        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(theme::SKY))
            .label_style(theme::dim_style())
            .render(area, buf);
    }
}

fn render_no_data(block: ratatui::widgets::Block<'static>, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(Span::styled(
        "No data for this selection",
        theme::dim_style(),
    )))
    .centered()
    .block(block)
    .render(area, buf);
}

#[cfg(test)]
#[path = "charts_tests.rs"]
mod charts_tests;
