//! Application views (screens).

mod create_customer;
mod customers;
mod help;

pub use create_customer::{CreateCustomerAction, CreateCustomerView};
pub use customers::{CustomersAction, CustomersView};
pub use help::{HelpAction, HelpView};
