mod action;
mod app;
mod config;
mod controller;
mod debounce;
mod error;
mod event;
mod fetch;
mod source;
#[cfg(test)]
mod testing;
mod tui;
mod types;
mod ui;

use std::fs::OpenOptions;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::event::Event;
use crate::source::HttpSource;
use crate::tui::EventHandler;

#[derive(Parser, Debug)]
#[command(name = "todo-scroll", version, about)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the todo endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal is owned by the UI, so logs go to a file when one can be
/// opened and to stderr otherwise.
fn log_writer(path: Option<PathBuf>) -> (BoxMakeWriter, bool) {
    let path = path.or_else(|| {
        let dir = dirs::cache_dir()?.join("todo-scroll");
        std::fs::create_dir_all(&dir).ok()?;
        Some(dir.join("todo-scroll.log"))
    });

    match path.and_then(|p| OpenOptions::new().create(true).append(true).open(p).ok()) {
        Some(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let (writer, ansi) = log_writer(cli.log_file);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.source.base_url = endpoint;
    }

    let source = HttpSource::new(&config.source)?;
    tracing::info!(endpoint = %config.source.base_url, "starting");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    // Run the application
    let result = run(Arc::new(source), config).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(source: Arc<HttpSource>, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize terminal
    let mut terminal = tui::init()?;
    let height = terminal.size()?.height;

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app state; this issues the first fetch
    let mut app = App::new(source, config, action_tx.clone(), height);

    // Create event handler
    let tick_rate = Duration::from_millis(100);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    // Main loop
    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    app.update(Action::Quit);
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
