use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Store;
use crate::ui::app::{App, FormField, InputMode, PendingAction};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &Store) -> Result<()> {
    let mut app = App::new();
    app.refresh(store)?;
    log::info!("Starting dashboard with {} expenses", app.expenses.len());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Dashboard stopped: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.visible_rows = table_rows(f.area().height);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Form => handle_form_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

/// Table body rows left after the bars, filter line, cards, charts and borders.
fn table_rows(height: u16) -> usize {
    let main = height.saturating_sub(3) as usize;
    let charts = main * 45 / 100;
    main.saturating_sub(1 + 5 + charts + 3).max(1)
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    let len = app.table_len();
    let page = app.visible_rows.max(1);

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_down(&mut app.table_index, &mut app.table_scroll, len, page);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_up(&mut app.table_index, &mut app.table_scroll);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.table_index, &mut app.table_scroll, len, page)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.table_index, &mut app.table_scroll)
        }
        KeyCode::Char('g') => scroll_to_top(&mut app.table_index, &mut app.table_scroll),
        KeyCode::Char('G') => {
            scroll_to_bottom(&mut app.table_index, &mut app.table_scroll, len, page)
        }
        KeyCode::Char('a') => {
            app.input_mode = InputMode::Form;
            app.form.error = None;
        }
        KeyCode::Char('D') => commands::handle_command("delete", app, store)?,
        KeyCode::Char('m') => app.cycle_month(1),
        KeyCode::Char('M') => app.cycle_month(-1),
        KeyCode::Char('c') => app.cycle_category(1),
        KeyCode::Char('C') => app.cycle_category(-1),
        KeyCode::Char('s') => commands::handle_command("sort", app, store)?,
        KeyCode::Char('e') => commands::handle_command("export", app, store)?,
        KeyCode::Char('x') => commands::handle_command("clear", app, store)?,
        KeyCode::Char('r') => commands::handle_command("refresh", app, store)?,
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            return Ok(());
        }
        KeyCode::Enter => return app.submit_form(store),
        _ => {}
    }

    let form = &mut app.form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
        KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
        KeyCode::Left if form.field == FormField::Category => form.cycle_category(-1),
        KeyCode::Right | KeyCode::Char(' ') if form.field == FormField::Category => {
            form.cycle_category(1)
        }
        KeyCode::Backspace => {
            if let Some(input) = form.input_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = form.input_mut() {
                input.push(c);
                form.error = None;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteExpense { id } => app.delete_expense(store, id)?,
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}
