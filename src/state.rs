//! Screen state and its transitions.
//!
//! All state of the customer screen lives in one [`ViewState`] value. It only
//! changes through [`update`], a pure function from `(state, message)` to
//! `(state, commands)`. Commands describe the I/O the event loop must start;
//! their results come back as further messages. This keeps the
//! loading/error/empty/ready exclusivity and the modal lifecycle testable
//! without a terminal.

use tracing::{debug, trace};

use crate::api::types::{CustomerDraft, DraftField, Record, HIDDEN_FIELDS};

/// Message shown when the customer list cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str =
    "Could not load the customer data. Check the server connection and the API";

/// Prefix for errors raised while submitting a new customer.
pub const SUBMIT_ERROR_PREFIX: &str = "Error sending data";

/// Visibility of the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Severity of a blocking alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Confirmation of a successful operation.
    Info,
    /// The user must fix something before continuing.
    Warning,
}

/// A blocking message the user must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Warning,
            message: message.into(),
        }
    }
}

/// Inputs to [`update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Start a load: on mount, after a creation, or on manual refresh.
    Load,
    /// A load finished. Stale generations are ignored.
    LoadFinished {
        generation: u64,
        result: Result<Vec<Record>, String>,
    },
    /// Show the creation form.
    OpenForm,
    /// Hide the creation form without touching the draft.
    CloseForm,
    /// Set one draft field.
    UpdateField(DraftField, String),
    /// Validate and submit the draft.
    Submit,
    /// A submission finished with the backend's confirmation or error text.
    SubmitFinished(Result<String, String>),
    /// Acknowledge the current alert.
    DismissAlert,
}

/// Side effects requested by [`update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the customer list, tagging the result with `generation`.
    FetchCustomers { generation: u64 },
    /// Post the draft to the create endpoint.
    CreateCustomer(CustomerDraft),
}

/// The derived status of the screen. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiStatus<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Ready,
}

/// What the content area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Table(TableModel),
}

/// Headers and cells of the customer table, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    /// Column keys in display order.
    pub columns: Vec<String>,
    /// Upper-cased header labels.
    pub headers: Vec<String>,
    /// One entry per record, one cell per column.
    pub rows: Vec<Vec<String>>,
}

/// The complete state of the customer screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    collection: Vec<Record>,
    loading: bool,
    error: Option<String>,
    /// Set when `error` came from a rejected submission rather than a load.
    submit_failed: bool,
    modal: ModalState,
    draft: CustomerDraft,
    submitting: bool,
    alert: Option<Alert>,
    generation: u64,
}

impl ViewState {
    /// Create the initial state: nothing loaded, form closed, empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// The records currently displayed.
    pub fn collection(&self) -> &[Record] {
        &self.collection
    }

    /// Check if a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The error of the last rejected submission, if it is still shown.
    pub fn submit_error(&self) -> Option<&str> {
        if self.submit_failed {
            self.error.as_deref()
        } else {
            None
        }
    }

    /// Visibility of the creation form.
    pub fn modal(&self) -> ModalState {
        self.modal
    }

    /// Check if the creation form is open.
    pub fn is_form_open(&self) -> bool {
        self.modal == ModalState::Open
    }

    /// The in-progress draft.
    pub fn draft(&self) -> &CustomerDraft {
        &self.draft
    }

    /// Check if a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The alert awaiting acknowledgment.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Generation of the most recently started load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Derive the screen status: loading, then error, then empty, else ready.
    pub fn status(&self) -> UiStatus<'_> {
        if self.loading {
            UiStatus::Loading
        } else if let Some(error) = self.error.as_deref() {
            UiStatus::Error(error)
        } else if self.collection.is_empty() {
            UiStatus::Empty
        } else {
            UiStatus::Ready
        }
    }

    /// Build the content to draw for the current status.
    pub fn content(&self) -> ContentView<'_> {
        match self.status() {
            UiStatus::Loading => ContentView::Loading,
            UiStatus::Error(message) => ContentView::Error(message),
            UiStatus::Empty => ContentView::Empty,
            UiStatus::Ready => ContentView::Table(table_model(&self.collection)),
        }
    }
}

/// Columns shown for a collection.
///
/// Columns are the keys of the *first* record, in key order, minus the
/// internal id and status fields. Keys that only appear in later records are
/// not shown.
pub fn display_columns(collection: &[Record]) -> Vec<String> {
    collection
        .first()
        .map(|first| {
            first
                .keys()
                .filter(|key| !HIDDEN_FIELDS.contains(key))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Build the table for a collection. Rows are keyed by position.
pub fn table_model(collection: &[Record]) -> TableModel {
    let columns = display_columns(collection);
    let headers = columns.iter().map(|c| c.to_uppercase()).collect();
    let rows = collection
        .iter()
        .map(|record| columns.iter().map(|c| record.cell(c)).collect())
        .collect();

    TableModel {
        columns,
        headers,
        rows,
    }
}

/// Apply a message to the state.
///
/// Returns the next state and the commands the event loop must run.
pub fn update(mut state: ViewState, msg: Msg) -> (ViewState, Vec<Command>) {
    trace!(?msg, "Applying message");

    let mut commands = Vec::new();

    match msg {
        Msg::Load => {
            commands.push(begin_load(&mut state));
        }
        Msg::LoadFinished { generation, result } => {
            if generation != state.generation {
                debug!(
                    generation,
                    latest = state.generation,
                    "Ignoring stale load result"
                );
                return (state, commands);
            }

            state.loading = false;
            match result {
                Ok(records) => {
                    debug!(count = records.len(), "Customers loaded");
                    state.collection = records;
                }
                Err(e) => {
                    debug!(error = %e, "Customer load failed");
                    state.error = Some(format!("{}: {}", LOAD_ERROR_MESSAGE, e));
                }
            }
        }
        Msg::OpenForm => {
            state.modal = ModalState::Open;
        }
        Msg::CloseForm => {
            state.modal = ModalState::Closed;
        }
        Msg::UpdateField(field, value) => {
            state.draft.set(field, value);
        }
        Msg::Submit => {
            if state.modal != ModalState::Open || state.submitting {
                debug!(
                    modal = ?state.modal,
                    submitting = state.submitting,
                    "Ignoring submit"
                );
                return (state, commands);
            }

            match state.draft.validate() {
                Ok(()) => {
                    state.submitting = true;
                    commands.push(Command::CreateCustomer(state.draft.clone()));
                }
                Err(e) => {
                    debug!(missing = ?e.missing, "Draft failed validation");
                    state.alert = Some(Alert::warning(e.to_string()));
                }
            }
        }
        Msg::SubmitFinished(result) => {
            if !state.submitting {
                debug!("Ignoring submission result with no submission in flight");
                return (state, commands);
            }

            state.submitting = false;
            match result {
                Ok(message) => {
                    state.alert = Some(Alert::info(message));
                    state.modal = ModalState::Closed;
                    state.draft = CustomerDraft::default();
                    commands.push(begin_load(&mut state));
                }
                Err(e) => {
                    state.error = Some(format!("{}: {}", SUBMIT_ERROR_PREFIX, e));
                    state.submit_failed = true;
                }
            }
        }
        Msg::DismissAlert => {
            state.alert = None;
        }
    }

    (state, commands)
}

fn begin_load(state: &mut ViewState) -> Command {
    state.generation += 1;
    state.loading = true;
    state.error = None;
    state.submit_failed = false;
    Command::FetchCustomers {
        generation: state.generation,
    }
}
