//! "Predicted Weekly Sales" metric widget.
//!
//! Render-only: the caller decides what to show, the widget only lays it out
//! as a label line followed by a bold value (or a red error message).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::report::format_currency;
use crate::tui::form::Outcome;

pub struct SalesMetric<'a> {
    pub label: &'a str,
    pub outcome: Option<&'a Outcome>,
}

impl Widget for SalesMetric<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = Line::from(Span::styled(self.label, Style::default().fg(Color::Gray)));

        let value = match self.outcome {
            None => Line::from(Span::styled(
                "Press Enter on Predict (or p) to estimate.",
                Style::default().fg(Color::DarkGray),
            )),
            Some(Outcome::Prediction(v)) => Line::from(Span::styled(
                format_currency(*v),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Some(Outcome::Error(msg)) => {
                Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Red)))
            }
        };

        Paragraph::new(vec![label, value])
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
