//! clientdesk - a terminal user interface for customer records.
//!
//! Lists the customers returned by a REST endpoint and adds new ones through
//! a modal form.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod state;
mod tasks;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::api::CustomerClient;
use crate::app::App;
use crate::config::Config;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::create_task_channel;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Parser)]
#[command(name = "clientdesk")]
#[command(version, about = "Browse and add customer records from the terminal", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the customer list endpoint
    #[arg(long)]
    list_url: Option<String>,

    /// Override the customer creation endpoint
    #[arg(long)]
    create_url: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Write a default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn config_path(&self) -> error::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::default_path()?),
        }
    }

    /// Load the configuration and apply command line overrides.
    fn load_config(&self) -> error::Result<Config> {
        let mut config = Config::load_from(&self.config_path()?)?;

        if let Some(url) = &self.list_url {
            config.api.list_url = url.clone();
        }
        if let Some(url) = &self.create_url {
            config.api.create_url = url.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn init_config(&self) -> error::Result<PathBuf> {
        let path = self.config_path()?;
        if path.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        Config::default().save_to(&path)?;
        Ok(path)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = cli
            .init_config()
            .map_err(|e| anyhow::anyhow!(e.user_message()))
            .context("Could not write the configuration file")?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            eprintln!("  caused by: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    logging::init(&config.logging).context("Failed to initialize logging")?;
    ui::load_theme(&config.settings.theme);

    let result = run(config).await;
    logging::shutdown();

    if let Err(e) = result {
        error!(error = %e, "Application error");
        eprintln!("{}", e.user_message());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

/// Run the terminal UI until the user quits.
async fn run(config: Config) -> error::Result<()> {
    let client = CustomerClient::new(&config.api)?;
    info!(list_url = client.list_url(), create_url = client.create_url(), "Using endpoints");

    let mut terminal = setup_terminal()?;
    install_panic_hook();

    let result = event_loop(&mut terminal, &client, &config).await;

    restore_terminal()?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(terminal: &mut Tui, client: &CustomerClient, config: &Config) -> error::Result<()> {
    let (mut rx, spawner) = create_task_channel();
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);
    let mut app = App::new(&config.settings, logging::log_directory(&config.logging));

    loop {
        for command in app.take_commands() {
            spawner.dispatch(client, command);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        if app.should_quit() {
            break;
        }

        // Let spawned requests make progress on this worker
        tokio::task::yield_now().await;
    }

    Ok(())
}

fn setup_terminal() -> error::Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("cannot enable raw mode: {}", e)))?;

    let terminal = execute!(io::stdout(), EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));
    terminal.map_err(|e| {
        // Leave raw mode even if the alternate screen was never entered
        let _ = restore_terminal();
        AppError::terminal(format!("cannot create terminal: {}", e))
    })
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Restore the terminal before the default panic output is printed.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("clientdesk").chain(args.iter().copied()))
    }

    #[test]
    fn test_url_flags_override_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[api]\nlist_url = \"http://file.test/list\"\ncreate_url = \"http://file.test/add\"\n",
        )
        .unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let from_file = cli(&["--config", &path_arg]).load_config().unwrap();
        assert_eq!(from_file.api.list_url, "http://file.test/list");
        assert_eq!(from_file.api.create_url, "http://file.test/add");

        let overridden = cli(&[
            "--config",
            &path_arg,
            "--list-url",
            "https://cli.test/list",
            "--create-url",
            "https://cli.test/add",
        ])
        .load_config()
        .unwrap();
        assert_eq!(overridden.api.list_url, "https://cli.test/list");
        assert_eq!(overridden.api.create_url, "https://cli.test/add");
    }

    #[test]
    fn test_invalid_url_override_is_rejected() {
        let dir = tempdir().unwrap();
        let path_arg = dir.path().join("absent.toml").to_string_lossy().to_string();

        let err = cli(&["--config", &path_arg, "--list-url", "ftp://nope"])
            .load_config()
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_init_config_writes_defaults_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_arg = path.to_string_lossy().to_string();
        let command = cli(&["--config", &path_arg, "--init-config"]);
        assert!(command.init_config);

        assert_eq!(command.init_config().unwrap(), path);
        let written = Config::load_from(&path).unwrap();
        assert_eq!(written.api.list_url, Config::default().api.list_url);

        fs::write(&path, "# edited by hand\n").unwrap();
        let err = command.init_config().unwrap_err();
        assert!(matches!(err, AppError::Io(ref e) if e.kind() == io::ErrorKind::AlreadyExists));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# edited by hand\n");
    }
}
