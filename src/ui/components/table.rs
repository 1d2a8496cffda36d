//! Customer table component.
//!
//! Draws a [`TableModel`] and keeps the row selection. Columns share the
//! width equally since their names come from the data.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Row, Table, TableState},
    Frame,
};

use crate::events::Navigation;
use crate::state::TableModel;
use crate::ui::theme::theme;

/// Selection state for the record table.
#[derive(Debug, Default)]
pub struct RecordTable {
    state: TableState,
    /// Rows visible in the last render, used for paging.
    page_size: usize,
}

impl RecordTable {
    /// Create a table with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected row index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Keep the selection within `row_count` rows.
    ///
    /// Selects the first row when rows appear and clears the selection when
    /// there are none.
    pub fn clamp(&mut self, row_count: usize) {
        let selected = match (row_count, self.state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) => Some(i.min(n - 1)),
        };
        self.state.select(selected);
    }

    /// Move the selection.
    pub fn navigate(&mut self, nav: Navigation, row_count: usize) {
        if row_count == 0 {
            self.state.select(None);
            return;
        }

        let last = row_count - 1;
        let current = self.state.selected().unwrap_or(0);
        let page = self.page_size.max(1);

        let next = match nav {
            Navigation::Down => (current + 1).min(last),
            Navigation::Up => current.saturating_sub(1),
            Navigation::Top => 0,
            Navigation::Bottom => last,
            Navigation::PageDown => (current + page).min(last),
            Navigation::PageUp => current.saturating_sub(page),
        };
        self.state.select(Some(next));
    }

    /// Render the model inside a bordered block titled `title`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, model: &TableModel, title: &str) {
        let t = theme();

        self.clamp(model.rows.len());
        // Border plus header row
        self.page_size = area.height.saturating_sub(3) as usize;

        let header = Row::new(model.headers.clone())
            .style(t.header_style())
            .bottom_margin(1);

        let rows = model
            .rows
            .iter()
            .map(|cells| Row::new(cells.clone()).style(Style::default().fg(t.fg)));

        let column_count = model.headers.len().max(1) as u32;
        let widths = vec![Constraint::Ratio(1, column_count); model.headers.len()];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(title.to_string())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.border)),
            )
            .column_spacing(2)
            .highlight_style(t.selection_style())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}
