//! Ratatui-based prediction form.
//!
//! Two panels hold the store and date inputs; below them sit the Predict
//! button and the result metric. Every key press re-derives the day of week and
//! the encoded row; only Predict runs the model.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::Field;
use crate::error::AppError;
use crate::features::{DateCheck, weekday_name};
use crate::io::ArtifactContext;

pub mod form;
mod metric;

use form::{Form, PREDICT_ROW};
use metric::SalesMetric;

/// Start the TUI.
pub fn run(ctx: &ArtifactContext) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut form = Form::new(ctx);
    event_loop(&mut form, &mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn event_loop<B: ratatui::backend::Backend>(
    form: &mut Form<'_>,
    terminal: &mut Terminal<B>,
) -> Result<(), AppError> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal
                .draw(|f| draw(f, &*form))
                .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(100))
            .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
        {
            continue;
        }

        match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if form.handle_key(key.code) {
                    break;
                }
                needs_redraw = true;
            }
            Event::Resize(_, _) => needs_redraw = true,
            _ => {}
        }
    }
    Ok(())
}

pub fn draw(frame: &mut Frame<'_>, form: &Form<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, form, chunks[0]);
    draw_inputs(frame, form, chunks[1]);
    draw_predict_button(frame, form, chunks[2]);
    draw_result(frame, form, chunks[3]);
    draw_footer(frame, form, chunks[4]);
}

fn draw_header(frame: &mut Frame<'_>, form: &Form<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Weekly Sales Prediction",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Uses the trained {} model ({}) to predict weekly sales.",
                form.ctx().model().display_name(),
                form.ctx().model_path().display(),
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_inputs(frame: &mut Frame<'_>, form: &Form<'_>, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let store_lines = [Field::Store, Field::Dept, Field::Holiday]
        .into_iter()
        .map(|field| field_line(form, field))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(store_lines)
            .block(Block::default().title("Store Information").borders(Borders::ALL)),
        cols[0],
    );

    let mut date_lines = [Field::Year, Field::Month, Field::Day]
        .into_iter()
        .map(|field| field_line(form, field))
        .collect::<Vec<_>>();
    date_lines.push(match form.prepared().date {
        DateCheck::Valid { date, day_of_week } => Line::from(Span::styled(
            format!("  {date} is a {} (DayOfWeek={day_of_week})", weekday_name(day_of_week)),
            Style::default().fg(Color::Gray),
        )),
        DateCheck::Invalid { .. } => Line::from(Span::styled(
            format!("  {}", form.prepared().warning().unwrap_or_default()),
            Style::default().fg(Color::Yellow),
        )),
    });
    frame.render_widget(
        Paragraph::new(date_lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Date Information").borders(Borders::ALL)),
        cols[1],
    );
}

fn field_line(form: &Form<'_>, field: Field) -> Line<'static> {
    let selected = form.selected_field() == Some(field);
    let value = match (field, form.editing()) {
        (_, Some(buffer)) if selected => format!("{buffer}_"),
        (Field::Holiday, _) => {
            let holiday = form.input().holiday;
            ["No", "Yes"]
                .iter()
                .map(|opt| {
                    if *opt == holiday.display_name() {
                        format!("(•) {opt}")
                    } else {
                        format!("( ) {opt}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        }
        _ => form
            .input()
            .numeric(field)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    };

    let marker = if selected { "» " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<20}", field.label()), Style::default().fg(Color::Gray)),
        Span::styled(value, style),
    ])
}

fn draw_predict_button(frame: &mut Frame<'_>, form: &Form<'_>, area: Rect) {
    let selected = form.selected() == PREDICT_ROW;
    let style = if selected {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let button = Paragraph::new(Line::from(Span::styled("[ Predict Weekly Sales ]", style)))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn draw_result(frame: &mut Frame<'_>, form: &Form<'_>, area: Rect) {
    let block = Block::default().title("Result").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ctx = form.ctx();
    let mut problems: Vec<Line> = Vec::new();
    if let Err(err) = ctx.schema() {
        problems.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
    }
    for notice in ctx.notices() {
        problems.push(Line::from(Span::styled(
            format!("notice: {notice}"),
            Style::default().fg(Color::Yellow),
        )));
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(
        SalesMetric {
            label: "Predicted Weekly Sales",
            outcome: form.outcome(),
        },
        rows[0],
    );
    frame.render_widget(Paragraph::new(problems).wrap(Wrap { trim: true }), rows[1]);
}

fn draw_footer(frame: &mut Frame<'_>, form: &Form<'_>, area: Rect) {
    let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ±10  0-9 type  Enter/p predict  q quit";
    let line = Line::from(vec![
        Span::styled(help, Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled(form.status(), Style::default().fg(Color::Yellow)),
    ]);
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}
