//! Loading indicator component.
//!
//! Whether something is loading is owned by the screen state; this component
//! only animates the spinner shown while it is.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An animated spinner with a message.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    message: String,
    spinner_state: usize,
}

impl LoadingIndicator {
    /// Create a loading indicator with a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner_state: 0,
        }
    }

    /// Advance the spinner animation. Called on each tick.
    pub fn tick(&mut self) {
        self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state]
    }

    /// Get the spinner and message as one string.
    pub fn text(&self) -> String {
        format!("{} {}", self.spinner_frame(), self.message)
    }

    /// Render the indicator centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}
