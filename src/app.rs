//! Main application state and event loop glue.
//!
//! [`App`] follows The Elm Architecture: terminal events and API results are
//! turned into [`Msg`]s for the screen state, and `view` draws the state.
//! Side effects requested by the state are queued until the main loop
//! collects them with [`App::take_commands`].

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::events::{Event, KeyBindings};
use crate::state::{update, Command, Msg, ViewState};
use crate::tasks::ApiMessage;
use crate::ui::{
    render_alert, CreateCustomerAction, CreateCustomerView, CustomersAction, CustomersView,
    HelpAction, HelpView,
};

/// The main application struct that holds all state.
pub struct App {
    state: ViewState,
    pending: Vec<Command>,
    customers: CustomersView,
    form: CreateCustomerView,
    help: HelpView,
    show_help: bool,
    should_quit: bool,
}

impl App {
    /// Create the application and queue the initial load.
    pub fn new(settings: &Settings, log_dir: Option<PathBuf>) -> Self {
        debug!(vim_mode = settings.vim_mode, "Creating application");

        let mut app = Self {
            state: ViewState::new(),
            pending: Vec::new(),
            customers: CustomersView::new(KeyBindings::new(settings.vim_mode)),
            form: CreateCustomerView::new(),
            help: HelpView::new(log_dir),
            show_help: false,
            should_quit: false,
        };
        app.dispatch(Msg::Load);
        app
    }

    /// The screen state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Check if the application should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Check if the help panel is open.
    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Drain the side effects requested since the last call.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    /// Apply a message to the screen state and queue its commands.
    fn dispatch(&mut self, msg: Msg) {
        let current = std::mem::take(&mut self.state);
        let (next, commands) = update(current, msg);
        self.state = next;
        self.pending.extend(commands);
        self.form.sync_from_draft(self.state.draft());
    }

    /// Update the application based on a terminal event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.customers.tick(),
        }
    }

    /// Feed a background task result into the screen state.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::CustomersFetched { generation, result } => {
                self.dispatch(Msg::LoadFinished { generation, result });
            }
            ApiMessage::CustomerCreated(result) => {
                let created = result.is_ok();
                self.dispatch(Msg::SubmitFinished(result));
                if created {
                    info!("Customer created, reloading list");
                    self.form.reset_focus();
                }
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Quit requested");
            self.should_quit = true;
            return;
        }

        // Alerts block all other input
        if self.state.alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.dispatch(Msg::DismissAlert);
            }
            return;
        }

        if self.show_help {
            if let Some(HelpAction::Close) = self.help.handle_input(key) {
                self.show_help = false;
            }
            return;
        }

        if self.state.is_form_open() {
            let submitting = self.state.is_submitting();
            match self.form.handle_input(key, submitting) {
                Some(CreateCustomerAction::Cancel) => self.dispatch(Msg::CloseForm),
                Some(CreateCustomerAction::Submit) => self.dispatch(Msg::Submit),
                Some(CreateCustomerAction::FieldChanged(field, value)) => {
                    self.dispatch(Msg::UpdateField(field, value))
                }
                None => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                info!("Quit requested");
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.help.reset_scroll();
                self.show_help = true;
            }
            _ => match self.customers.handle_input(key, &self.state) {
                Some(CustomersAction::OpenForm) => self.dispatch(Msg::OpenForm),
                Some(CustomersAction::Refresh) => {
                    debug!("Manual refresh");
                    self.dispatch(Msg::Load);
                }
                None => {}
            },
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        self.customers.render(frame, area, &self.state);

        if self.state.is_form_open() {
            self.form
                .render(frame, area, self.state.is_submitting(), self.state.submit_error());
        }

        if self.show_help {
            self.help.render(frame, area);
        }

        if let Some(alert) = self.state.alert() {
            render_alert(frame, area, alert);
        }
    }
}
