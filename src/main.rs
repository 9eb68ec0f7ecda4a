mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use view::AppView;
use controller::{AppController, FetchOutcome};
use model::{MetadataClient, TmdbClient};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Movie Search Starting ===");

    let settings = config::load_settings()?;
    tracing::debug!(
        base_url = %settings.api_base_url,
        language = %settings.language,
        timeout_secs = settings.request_timeout_secs,
        "Settings loaded"
    );

    let client: Arc<dyn MetadataClient> = Arc::new(TmdbClient::new(&settings)?);
    let (controller, outcomes) = AppController::new(client);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller, outcomes).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Movie Search shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut controller: AppController,
    mut outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_INTERVAL);

    loop {
        let size = terminal.size()?;
        controller.set_grid_columns(view::grid_columns(size.width));

        terminal.draw(|f| {
            AppView::render(f, controller.model());
        })?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => controller.handle_key_event(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(outcome) = outcomes.recv() => controller.apply_fetch_outcome(outcome),
            _ = tick.tick() => controller.tick(),
        }

        if controller.should_quit() {
            break;
        }
    }

    Ok(())
}
