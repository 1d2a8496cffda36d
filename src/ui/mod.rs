//! User interface components and views.
//!
//! Everything here draws from the screen state; nothing in this module
//! performs I/O.

mod components;
pub mod theme;
mod views;

pub use components::render_alert;
pub use theme::load_theme;
pub use views::{
    CreateCustomerAction, CreateCustomerView, CustomersAction, CustomersView, HelpAction, HelpView,
};
