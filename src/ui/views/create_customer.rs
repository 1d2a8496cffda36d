//! Modal form for adding a customer.
//!
//! The view owns the text inputs and focus; the draft itself lives in the
//! screen state. Every edit is reported back as a [`CreateCustomerAction`]
//! so the state stays the source of truth.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::api::{CustomerDraft, DraftField};
use crate::ui::components::{centered_rect_fixed, TextInput};
use crate::ui::theme::theme;

/// Actions returned from the create customer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateCustomerAction {
    /// Close the form, keeping what was typed.
    Cancel,
    /// Validate and submit the draft.
    Submit,
    /// A field's value changed.
    FieldChanged(DraftField, String),
}

/// The customer creation form.
pub struct CreateCustomerView {
    inputs: Vec<(DraftField, TextInput)>,
    focus: usize,
}

impl Default for CreateCustomerView {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateCustomerView {
    /// Create the form with one input per editable field.
    pub fn new() -> Self {
        let inputs = DraftField::EDITABLE
            .into_iter()
            .map(|field| {
                let mut input = TextInput::new();
                input.set_placeholder(field.placeholder());
                (field, input)
            })
            .collect();

        Self { inputs, focus: 0 }
    }

    /// The focused field.
    pub fn focused_field(&self) -> DraftField {
        self.inputs[self.focus].0
    }

    /// Move focus back to the first field.
    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    /// Show the draft's values in the inputs.
    pub fn sync_from_draft(&mut self, draft: &CustomerDraft) {
        for (field, input) in &mut self.inputs {
            let value = draft.get(*field);
            if input.value() != value {
                input.set_value(value);
            }
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    fn on_last_field(&self) -> bool {
        self.focus + 1 == self.inputs.len()
    }

    /// Handle keyboard input.
    ///
    /// While `submitting`, only closing the form is accepted.
    pub fn handle_input(&mut self, key: KeyEvent, submitting: bool) -> Option<CreateCustomerAction> {
        if key.code == KeyCode::Esc {
            return Some(CreateCustomerAction::Cancel);
        }
        if submitting {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.focus_next();
                None
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::Up, _) => {
                self.focus_prev();
                None
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(CreateCustomerAction::Submit),
            (KeyCode::Enter, _) if self.on_last_field() => Some(CreateCustomerAction::Submit),
            (KeyCode::Enter, _) => {
                self.focus_next();
                None
            }
            _ => {
                let (field, input) = &mut self.inputs[self.focus];
                if input.handle_input(key) {
                    Some(CreateCustomerAction::FieldChanged(
                        *field,
                        input.value().to_string(),
                    ))
                } else {
                    None
                }
            }
        }
    }

    /// Render the form as a modal overlay.
    pub fn render(&self, frame: &mut Frame, area: Rect, submitting: bool, error: Option<&str>) {
        let t = theme();

        let dialog_area = centered_rect_fixed(
            80u16.min(area.width.saturating_sub(4)),
            21u16.min(area.height.saturating_sub(2)),
            area,
        );
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                " New Customer ",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let rows = (self.inputs.len() + 1) / 2;
        let mut constraints = vec![Constraint::Length(3); rows];
        constraints.push(Constraint::Length(2)); // status
        constraints.push(Constraint::Length(1)); // button

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(1)
            .constraints(constraints)
            .split(inner);

        for (row, pair) in self.inputs.chunks(2).enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[row]);

            for (col, (field, input)) in pair.iter().enumerate() {
                let index = row * 2 + col;
                let label = if field.is_required() {
                    format!("{} *", field.label())
                } else {
                    field.label().to_string()
                };
                input.render_with_label(frame, columns[col], &label, index == self.focus);
            }
        }

        self.render_status(frame, chunks[rows], submitting, error);
        self.render_submit_button(frame, chunks[rows + 1], submitting);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, submitting: bool, error: Option<&str>) {
        let t = theme();

        let status = if submitting {
            Some(Span::styled("Saving customer...", Style::default().fg(t.warning)))
        } else {
            error.map(|e| Span::styled(e.to_string(), Style::default().fg(t.error)))
        };

        if let Some(span) = status {
            let paragraph = Paragraph::new(span)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
    }

    fn render_submit_button(&self, frame: &mut Frame, area: Rect, submitting: bool) {
        let t = theme();

        let (text, style) = if submitting {
            (" Saving... ", Style::default().fg(t.dim))
        } else {
            (
                " [Ctrl+s] Save   [Esc] Close ",
                Style::default().fg(t.success).add_modifier(Modifier::BOLD),
            )
        };

        frame.render_widget(
            Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center),
            area,
        );
    }
}
