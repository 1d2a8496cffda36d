//! Help panel view displaying keyboard shortcuts.
//!
//! Opened with '?' and closed with '?', 'q', or Escape. Also shows where the
//! log files are written.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::{get_keybindings_grouped, KeyContext, Keybinding};
use crate::ui::components::centered_rect;
use crate::ui::theme::theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help panel.
    Close,
}

/// The help panel view.
pub struct HelpView {
    grouped_bindings: Vec<(KeyContext, Vec<Keybinding>)>,
    log_dir: Option<PathBuf>,
    scroll: usize,
    /// Visible height, updated on render.
    visible_height: usize,
}

impl HelpView {
    /// Create a new help view showing where logs are written.
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        Self {
            grouped_bindings: get_keybindings_grouped(),
            log_dir,
            scroll: 0,
            visible_height: 0,
        }
    }

    /// Reset scroll position to top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.build_content_lines()
            .len()
            .saturating_sub(self.visible_height)
    }

    /// Handle keyboard input. All keys are consumed while help is open.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match key_event.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => Some(HelpAction::Close),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll = 0;
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.scroll = self.max_scroll();
                None
            }
            _ => None,
        }
    }

    /// Render the help panel centered over `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let panel = centered_rect(70, 80, area);

        frame.render_widget(Clear, panel);

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.build_content_lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        let mut lines: Vec<Line<'static>> = Vec::new();

        for (context, bindings) in &self.grouped_bindings {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", context.display()),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));

            for binding in bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>16}", binding.key),
                        Style::default().fg(t.success).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(binding.description.clone()),
                ]));
            }

            lines.push(Line::from(""));
        }

        if let Some(dir) = &self.log_dir {
            lines.push(Line::from(Span::styled(
                format!("Logs: {}", dir.display()),
                Style::default().fg(t.dim),
            )));
        }

        lines.push(Line::from(Span::styled(
            "Press ?, q, or Esc to close",
            Style::default().fg(t.dim),
        )));

        lines
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new(None)
    }
}
