//! Key binding definitions.
//!
//! Besides the navigation mapping, this module is the single source of the
//! shortcut descriptions shown in the help panel and the status bar hints.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Movement within the customer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Map a key to a table movement.
    ///
    /// Arrow keys always work; `j`/`k`/`g`/`G` only with vim mode enabled.
    pub fn navigation(&self, key: &KeyEvent) -> Option<Navigation> {
        match (key.code, key.modifiers) {
            (KeyCode::Down, _) => Some(Navigation::Down),
            (KeyCode::Up, _) => Some(Navigation::Up),
            (KeyCode::Home, _) => Some(Navigation::Top),
            (KeyCode::End, _) => Some(Navigation::Bottom),
            (KeyCode::PageDown, _) => Some(Navigation::PageDown),
            (KeyCode::PageUp, _) => Some(Navigation::PageUp),
            (KeyCode::Char('j'), KeyModifiers::NONE) if self.vim_mode => Some(Navigation::Down),
            (KeyCode::Char('k'), KeyModifiers::NONE) if self.vim_mode => Some(Navigation::Up),
            (KeyCode::Char('g'), KeyModifiers::NONE) if self.vim_mode => Some(Navigation::Top),
            (KeyCode::Char('G'), _) if self.vim_mode => Some(Navigation::Bottom),
            (KeyCode::Char('d'), KeyModifiers::CONTROL) if self.vim_mode => {
                Some(Navigation::PageDown)
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) if self.vim_mode => {
                Some(Navigation::PageUp)
            }
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Where a shortcut applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Global,
    Customers,
    Form,
    Alert,
}

impl KeyContext {
    /// Section title in the help panel.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Global => "Global",
            KeyContext::Customers => "Customer List",
            KeyContext::Form => "New Customer Form",
            KeyContext::Alert => "Alerts",
        }
    }
}

/// One documented shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
    pub context: KeyContext,
}

impl Keybinding {
    fn new(key: &str, description: &str, context: KeyContext) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
            context,
        }
    }
}

/// Every documented shortcut.
pub fn get_keybindings() -> Vec<Keybinding> {
    use KeyContext::*;

    vec![
        Keybinding::new("?", "Toggle this help", Global),
        Keybinding::new("q", "Quit", Global),
        Keybinding::new("Ctrl+c", "Quit from anywhere", Global),
        Keybinding::new("j / Down", "Next customer", Customers),
        Keybinding::new("k / Up", "Previous customer", Customers),
        Keybinding::new("g / Home", "First customer", Customers),
        Keybinding::new("G / End", "Last customer", Customers),
        Keybinding::new("Ctrl+d / PgDn", "Page down", Customers),
        Keybinding::new("Ctrl+u / PgUp", "Page up", Customers),
        Keybinding::new("n / a", "Add a customer", Customers),
        Keybinding::new("r", "Reload the list", Customers),
        Keybinding::new("Tab", "Next field", Form),
        Keybinding::new("Shift+Tab", "Previous field", Form),
        Keybinding::new("Enter", "Next field, save on the last one", Form),
        Keybinding::new("Ctrl+s", "Save the customer", Form),
        Keybinding::new("Esc", "Close the form (keeps input)", Form),
        Keybinding::new("Enter / Esc", "Dismiss", Alert),
    ]
}

/// Shortcuts grouped by context, in display order.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, Vec<Keybinding>)> {
    let all = get_keybindings();
    [
        KeyContext::Global,
        KeyContext::Customers,
        KeyContext::Form,
        KeyContext::Alert,
    ]
    .into_iter()
    .map(|context| {
        let bindings = all
            .iter()
            .filter(|b| b.context == context)
            .cloned()
            .collect();
        (context, bindings)
    })
    .collect()
}

/// One-line hints for the status bar.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Global | KeyContext::Customers => {
            "[j/k] navigate  [n] new customer  [r] reload  [?] help  [q] quit"
        }
        KeyContext::Form => "[Tab] next field  [Ctrl+s] save  [Esc] close",
        KeyContext::Alert => "[Enter] dismiss",
    }
}
