use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::report::{DashboardView, Summary};
use crate::ui::app::App;
use crate::ui::charts::{self, DEFAULT_TOP_N};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_mean, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(view) = &app.view else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Filters
            Constraint::Length(5),      // Summary cards
            Constraint::Percentage(45), // Charts
            Constraint::Min(5),         // Table
        ])
        .split(area);

    render_filters(f, chunks[0], app);
    render_summary_cards(f, chunks[1], &view.summary);
    render_charts(f, chunks[2], view);
    render_table(f, chunks[3], app, view);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No expenses recorded yet.",
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'a' to add one from the side panel.",
            theme::dim_style(),
        )),
    ];
    f.render_widget(
        Paragraph::new(msg)
            .centered()
            .block(theme::panel("Dashboard")),
        area,
    );
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let value_style = Style::default()
        .fg(theme::ACCENT)
        .add_modifier(Modifier::BOLD);
    let min = if app.filter.min_amount > Decimal::ZERO {
        format_amount(app.filter.min_amount)
    } else {
        "none".to_string()
    };

    let hint = if app.filter.is_default() {
        "  (m/M c/C :min)"
    } else {
        "  (x to clear)"
    };

    let line = Line::from(vec![
        Span::styled(" Month: ", theme::dim_style()),
        Span::styled(app.month_label().to_string(), value_style),
        Span::styled("  Category: ", theme::dim_style()),
        Span::styled(app.category_label().to_string(), value_style),
        Span::styled("  Min: ", theme::dim_style()),
        Span::styled(min, value_style),
        Span::styled(hint, theme::dim_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_summary_cards(f: &mut Frame, area: Rect, summary: &Summary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_card(f, cards[0], "Total Spent", format_amount(summary.total), theme::RED);
    render_card(
        f,
        cards[1],
        "Number of Expenses",
        summary.count.to_string(),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[2],
        "Average Expense",
        format_mean(summary.mean),
        theme::YELLOW,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn render_charts(f: &mut Frame, area: Rect, view: &DashboardView) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let trend = charts::monthly_trend_chart(&view.monthly);
    let bars = charts::category_bar_chart(&view.by_category, DEFAULT_TOP_N);
    f.render_widget(&trend, halves[0]);
    f.render_widget(&bars, halves[1]);
}

fn render_table(f: &mut Frame, area: Rect, app: &App, view: &DashboardView) {
    let title = format!(
        "Expenses ({}) sorted by {}",
        view.records.len(),
        app.sort.label()
    );

    if view.records.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses match the current filters",
                theme::dim_style(),
            )),
            Line::from(Span::styled("Press x to clear them", theme::dim_style())),
        ])
        .centered()
        .block(theme::panel(&title));
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["ID", "Amount", "Category", "Note", "Created At"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = view
        .records
        .iter()
        .enumerate()
        .skip(app.table_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, e)| {
            let style = if i == app.table_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let id = e.id.map(|id| id.to_string()).unwrap_or_default();

            Row::new(vec![
                Cell::from(id),
                Cell::from(Span::styled(format_amount(e.amount), theme::amount_style())),
                Cell::from(truncate(&e.category, 16)),
                Cell::from(truncate(&e.note, 40)),
                Cell::from(e.timestamp()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Min(12),
        Constraint::Length(19),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(&title));

    f.render_widget(table, area);
}
