use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;

/// "Add Expense" side panel. Fields are only focused while in form mode.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let active = app.input_mode == InputMode::Form;
    let border = if active { theme::ACCENT } else { theme::OVERLAY };
    let block = theme::panel_with_border("Add Expense", border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FormField::all().len() as u16 * 2), // Fields
            Constraint::Length(2),                                 // Error
            Constraint::Min(0),                                    // Tip
        ])
        .split(inner);

    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::all() {
        let focused = active && form.field == *field;
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let value = match field {
            FormField::Amount => form.amount.clone(),
            FormField::Category => format!("\u{2039} {} \u{203a}", form.category),
            FormField::Note => form.note.clone(),
            FormField::Date => form.date.clone(),
            FormField::Time => form.time.clone(),
        };
        let cursor = if focused && *field != FormField::Category {
            "\u{2588}"
        } else {
            ""
        };
        let value_style = if focused {
            theme::selected_style()
        } else {
            theme::normal_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {value}"), value_style),
            Span::styled(cursor, Style::default().fg(theme::ACCENT)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), chunks[0]);

    if let Some(err) = &form.error {
        let msg = Paragraph::new(Line::from(Span::styled(err.as_str(), theme::error_style())))
            .wrap(Wrap { trim: true });
        f.render_widget(msg, chunks[1]);
    }

    let tip = if active {
        "Enter saves. Category, date and time stay for the next entry."
    } else {
        "Press 'a' to add an expense. Tip: use the filters to narrow the charts."
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(tip, theme::dim_style())))
            .wrap(Wrap { trim: true }),
        chunks[2],
    );
}
