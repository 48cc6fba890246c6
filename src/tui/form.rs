//! Form state and key handling, kept free of any terminal I/O so it can be
//! driven directly from tests.

use crossterm::event::KeyCode;

use crate::app::pipeline::{self, PipelineError, Prepared};
use crate::domain::{Field, RawInput};
use crate::io::ArtifactContext;

/// Rows the cursor can rest on: the six fields, then the Predict button.
pub const PREDICT_ROW: usize = Field::ALL.len();

/// Longest numeric entry accepted (years have four digits).
const MAX_EDIT_DIGITS: usize = 4;

const PAGE_STEP: i64 = 10;

/// Result of the most recent submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Prediction(f64),
    Error(String),
}

const READY: &str = "Ready.";

/// Footer text when nothing else needs the user's attention.
fn idle_status(ctx: &ArtifactContext) -> &'static str {
    match ctx.schema() {
        Ok(_) => READY,
        Err(_) => "Column list missing; predictions are disabled.",
    }
}

pub struct Form<'a> {
    ctx: &'a ArtifactContext,
    input: RawInput,
    selected: usize,
    editing: Option<String>,
    prepared: Prepared,
    outcome: Option<Outcome>,
    status: String,
}

impl<'a> Form<'a> {
    pub fn new(ctx: &'a ArtifactContext) -> Self {
        let input = RawInput::default();
        Self {
            ctx,
            input,
            selected: 0,
            editing: None,
            prepared: pipeline::prepare(ctx, &input),
            outcome: None,
            status: idle_status(ctx).to_string(),
        }
    }

    pub fn ctx(&self) -> &ArtifactContext {
        self.ctx
    }

    pub fn input(&self) -> &RawInput {
        &self.input
    }

    pub fn prepared(&self) -> &Prepared {
        &self.prepared
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_field(&self) -> Option<Field> {
        Field::ALL.get(self.selected).copied()
    }

    /// The in-progress numeric entry, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Handle one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::BackTab => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Tab => self.selected = (self.selected + 1).min(PREDICT_ROW),
            KeyCode::Left | KeyCode::Char('-') => self.adjust(-1),
            KeyCode::Right | KeyCode::Char('+') => self.adjust(1),
            KeyCode::PageDown => self.adjust(-PAGE_STEP),
            KeyCode::PageUp => self.adjust(PAGE_STEP),
            KeyCode::Char('p') => self.submit(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected_field() {
                None => self.submit(),
                Some(Field::Holiday) => self.adjust(1),
                Some(field) if code == KeyCode::Enter => self.start_edit(field, None),
                Some(_) => {}
            },
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(field) = self.selected_field().filter(|f| f.range().is_some()) {
                    self.start_edit(field, Some(c));
                }
            }
            _ => {}
        }
        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => self.apply_edit(),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() && buffer.len() < MAX_EDIT_DIGITS => {
                buffer.push(c)
            }
            _ => {}
        }
    }

    fn start_edit(&mut self, field: Field, first: Option<char>) {
        self.editing = Some(first.map(String::from).unwrap_or_default());
        self.status = format!("Editing {}. Enter to apply, Esc to cancel.", field.label());
    }

    fn apply_edit(&mut self) {
        let buffer = self.editing.take().unwrap_or_default();
        let Some(field) = self.selected_field() else {
            return;
        };
        let Ok(value) = buffer.parse::<i64>() else {
            self.status = "Edit canceled.".to_string();
            return;
        };
        self.input.set_numeric(field, value);
        self.refresh();
        match self.input.numeric(field) {
            Some(current) if self.status == READY => {
                self.status = format!("{}: {current}", field.label());
            }
            _ => {}
        }
    }

    fn adjust(&mut self, delta: i64) {
        let Some(field) = self.selected_field() else {
            return;
        };
        match field {
            Field::Holiday => self.input.holiday = self.input.holiday.toggle(),
            _ => {
                let current = self.input.numeric(field).map_or(0, i64::from);
                self.input.set_numeric(field, current + delta);
            }
        }
        self.refresh();
    }

    /// Re-derive everything after an input change. A previous result no
    /// longer describes the form, so it is cleared.
    fn refresh(&mut self) {
        self.prepared = pipeline::prepare(self.ctx, &self.input);
        self.outcome = None;
        self.status = self
            .prepared
            .warning()
            .unwrap_or_else(|| idle_status(self.ctx))
            .to_string();
    }

    fn submit(&mut self) {
        match pipeline::predict_prepared(self.ctx, self.prepared.clone()) {
            Ok(output) => {
                self.outcome = Some(Outcome::Prediction(output.weekly_sales));
                self.status = "Predicted.".to_string();
            }
            Err(err @ PipelineError::MissingSchema(_)) => {
                self.outcome = Some(Outcome::Error(err.to_string()));
                self.status = "Column list missing; nothing was predicted.".to_string();
            }
            Err(err) => {
                self.outcome = Some(Outcome::Error(err.to_string()));
                self.status = "Prediction failed.".to_string();
            }
        }
    }
}
