//! Reusable UI components.

mod help_bar;
mod input;
mod loading;
mod modal;
mod table;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use modal::{centered_rect, centered_rect_fixed, render_alert};
pub use table::RecordTable;
