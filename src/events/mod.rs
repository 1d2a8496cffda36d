//! Event handling for the application.
//!
//! This module polls terminal input and describes the key bindings shown in
//! the help panel.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{
    get_context_hints, get_keybindings_grouped, KeyBindings, KeyContext, Keybinding, Navigation,
};

/// Application events produced by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate; drives the spinner.
    Tick,
}
