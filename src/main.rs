//! Netpulse TUI - Real-time network quality dashboard
//!
//! This application provides a terminal user interface for monitoring
//! network throughput and latency from a measurement service, with an
//! on-demand optimization report.

use std::io;
use std::sync::Arc;

use color_eyre::Result;
use netpulse_tui::app::{App, AppConfig};
use netpulse_tui::event::EventHandler;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    setup_terminal()?;

    let config = AppConfig::new();
    let mut app = App::new(config);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut events = EventHandler::new();

    let result = app.run(&mut terminal, &mut events).await;

    restore_terminal()?;

    result
}

fn setup_terminal() -> Result<()> {
    // Set up error handling
    color_eyre::install()?;

    // Log to a file; stdout belongs to the alternate screen
    let log_file = std::fs::File::create("netpulse-tui.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("netpulse_tui=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    // Configure terminal
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    // Restore terminal configuration
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    crossterm::terminal::disable_raw_mode()?;

    Ok(())
}
