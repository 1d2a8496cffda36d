//! Customer list view.
//!
//! Draws exactly one of: the spinner, the error message, the empty notice,
//! or the customer table, as decided by [`ViewState::content`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::events::{KeyBindings, KeyContext};
use crate::state::{ContentView, ViewState};
use crate::ui::components::{render_context_help, LoadingIndicator, RecordTable};
use crate::ui::theme::theme;

/// Actions returned from the customer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomersAction {
    /// Open the creation form.
    OpenForm,
    /// Reload the list.
    Refresh,
}

/// The customer list screen.
pub struct CustomersView {
    table: RecordTable,
    loader: LoadingIndicator,
    keys: KeyBindings,
}

impl CustomersView {
    /// Create the view with the given key bindings.
    pub fn new(keys: KeyBindings) -> Self {
        Self {
            table: RecordTable::new(),
            loader: LoadingIndicator::with_message("Loading customers..."),
            keys,
        }
    }

    /// The selected row, if any.
    pub fn selected(&self) -> Option<usize> {
        self.table.selected()
    }

    /// Advance the spinner.
    pub fn tick(&mut self) {
        self.loader.tick();
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent, state: &ViewState) -> Option<CustomersAction> {
        if let Some(nav) = self.keys.navigation(&key) {
            self.table.navigate(nav, state.collection().len());
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Char('a'), KeyModifiers::NONE) => {
                Some(CustomersAction::OpenForm)
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::F(5), _) => {
                Some(CustomersAction::Refresh)
            }
            _ => None,
        }
    }

    /// Render the screen.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(3),    // content
                Constraint::Length(1), // hints
            ])
            .split(area);

        self.render_title(frame, chunks[0], state);

        match state.content() {
            ContentView::Loading => {
                let middle = vertical_middle(chunks[1]);
                self.loader.render(frame, middle);
            }
            ContentView::Error(message) => render_message(frame, chunks[1], message, true),
            ContentView::Empty => {
                render_message(frame, chunks[1], "No customers to show.", false)
            }
            ContentView::Table(model) => {
                let title = format!(" Customers ({}) ", model.rows.len());
                self.table.render(frame, chunks[1], &model, &title);
            }
        }

        render_context_help(frame, chunks[2], KeyContext::Customers);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let t = theme();
        let mut spans = vec![Span::styled(
            " Customer List ",
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        )];

        if state.is_loading() && !state.collection().is_empty() {
            spans.push(Span::styled(self.loader.text(), Style::default().fg(t.dim)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn vertical_middle(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y, area.width, 1.min(area.height))
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, is_error: bool) {
    let t = theme();
    let color = if is_error { t.error } else { t.dim };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_error { t.error } else { t.border }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(color)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_text_area(inner, message));
}

/// Area below a top offset that roughly centers `message` once wrapped.
///
/// The area extends to the bottom of `area`, so a wider wrap than estimated
/// still shows every line.
fn centered_text_area(area: Rect, message: &str) -> Rect {
    let width = usize::from(area.width.max(1));
    let estimated = (message.chars().count() + width - 1) / width;
    let lines = u16::try_from(estimated).unwrap_or(u16::MAX);
    let offset = area.height.saturating_sub(lines) / 2;
    Rect::new(area.x, area.y + offset, area.width, area.height - offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Record;
    use crate::state::{update, Msg};
    use ratatui::{backend::TestBackend, Terminal};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn loaded(records: Vec<Record>) -> ViewState {
        let (state, _) = update(ViewState::new(), Msg::Load);
        let (state, _) = update(
            state,
            Msg::LoadFinished {
                generation: 1,
                result: Ok(records),
            },
        );
        state
    }

    fn failed(error: &str) -> ViewState {
        let (state, _) = update(ViewState::new(), Msg::Load);
        let (state, _) = update(
            state,
            Msg::LoadFinished {
                generation: 1,
                result: Err(error.to_string()),
            },
        );
        state
    }

    fn render_to_text(view: &mut CustomersView, state: &ViewState) -> String {
        render_sized(view, state, 80, 20)
    }

    fn render_sized(view: &mut CustomersView, state: &ViewState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new()
                .with("cod_cliente", 1_i64)
                .with("nombre", "Ana")
                .with("estado", 1_i64),
            Record::new()
                .with("cod_cliente", 2_i64)
                .with("nombre", "Luis")
                .with("estado", 1_i64),
        ]
    }

    #[test]
    fn test_actions() {
        let mut view = CustomersView::new(KeyBindings::default());
        let state = ViewState::new();
        assert_eq!(view.handle_input(key('n'), &state), Some(CustomersAction::OpenForm));
        assert_eq!(view.handle_input(key('r'), &state), Some(CustomersAction::Refresh));
        assert_eq!(view.handle_input(key('x'), &state), None);
    }

    #[test]
    fn test_navigation_moves_selection() {
        let mut view = CustomersView::new(KeyBindings::default());
        let state = loaded(sample());
        view.handle_input(key('j'), &state);
        assert_eq!(view.selected(), Some(1));
    }

    #[test]
    fn test_render_loading() {
        let mut view = CustomersView::new(KeyBindings::default());
        let (state, _) = update(ViewState::new(), Msg::Load);
        let text = render_to_text(&mut view, &state);
        assert!(text.contains("Loading customers..."));
        assert!(!text.contains("No customers"));
    }

    #[test]
    fn test_render_table_hides_internal_columns() {
        let mut view = CustomersView::new(KeyBindings::default());
        let text = render_to_text(&mut view, &loaded(sample()));
        assert!(text.contains("NOMBRE"));
        assert!(text.contains("Luis"));
        assert!(!text.contains("COD_CLIENTE"));
        assert!(!text.contains("ESTADO"));
        assert!(text.contains("Customers (2)"));
    }

    #[test]
    fn test_render_error_only() {
        let mut view = CustomersView::new(KeyBindings::default());
        let text = render_to_text(&mut view, &failed("timeout"));
        assert!(text.contains("Could not load"));
        assert!(!text.contains("No customers"));
        assert!(!text.contains("Loading customers"));
    }

    #[test]
    fn test_render_error_keeps_status_text_visible() {
        let mut view = CustomersView::new(KeyBindings::default());
        let state = failed("Network error: 404 Not Found");
        let text = render_sized(&mut view, &state, 80, 24);
        assert!(text.contains("Could not load"));
        assert!(text.contains("404 Not Found"));
    }

    #[test]
    fn test_centered_text_area_fits_wrapped_lines() {
        let area = Rect::new(0, 0, 10, 9);
        let two_lines = centered_text_area(area, "abcdefghijklmno");
        assert_eq!(two_lines.y, 3);
        assert_eq!(two_lines.height, 6);

        let tiny = centered_text_area(Rect::new(0, 0, 10, 1), &"x".repeat(50));
        assert_eq!(tiny.height, 1);
    }

    #[test]
    fn test_render_empty() {
        let mut view = CustomersView::new(KeyBindings::default());
        let text = render_to_text(&mut view, &loaded(vec![]));
        assert!(text.contains("No customers to show."));
    }
}
