//! Application state and logic.
//!
//! Wires the polling controller, the optimizer, and the UI together: the
//! main loop draws from state snapshots, consumes the terminal event
//! stream, and dispatches key presses.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::client::{ApiClient, MetricsApi};
use crate::event::{Event, EventHandler};
use crate::poller::{Optimizer, StatsPoller, DEFAULT_POLL_INTERVAL, DEFAULT_WINDOW};
use crate::ui::{Ui, UpdateKind};

/// Application configuration.
pub struct AppConfig {
    /// Base URL of the measurement service.
    pub base_url: String,
    /// Period between measurement requests.
    pub poll_interval: Duration,
    /// Samples retained per signal.
    pub window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            window: DEFAULT_WINDOW,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main application.
pub struct App {
    /// Recurring measurement poll
    poller: StatsPoller,
    /// On-demand optimization requester
    optimizer: Optimizer,
    /// Current view controller
    ui: Ui,
    /// Should the application exit?
    should_quit: bool,
}

impl App {
    /// Creates a new application instance.
    pub fn new(config: AppConfig) -> Self {
        let api: Arc<dyn MetricsApi> = Arc::new(ApiClient::new(config.base_url));

        Self {
            poller: StatsPoller::new(Arc::clone(&api), config.window, config.poll_interval),
            optimizer: Optimizer::new(api),
            ui: Ui::new(),
            should_quit: false,
        }
    }

    /// Runs the application main loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        events: &mut EventHandler,
    ) -> Result<()> {
        self.poller.start();

        while !self.should_quit {
            // Draw from snapshots so no lock is held across the render
            let net = self.poller.snapshot();
            let optimizer = self.optimizer.snapshot();
            let optimizing = self.optimizer.is_running();

            terminal.draw(|frame| self.ui.render(frame, &net, &optimizer, optimizing))?;

            if let Some(event) = events.next().await {
                self.handle_event(event);
            }
        }

        self.poller.stop();
        Ok(())
    }

    /// Handles input and other events.
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Tick => {}
            Event::Resize(_, _) => {}
        }
    }

    /// Handles keyboard input.
    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C and Ctrl-D exit regardless of view
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            self.should_quit = true;
            return;
        }

        match self.ui.handle_key_event(key) {
            UpdateKind::Quit => self.should_quit = true,
            UpdateKind::ToggleHelp => self.ui.toggle_help(),
            UpdateKind::RunOptimizer => {
                let optimizer = self.optimizer.clone();
                tokio::spawn(async move {
                    optimizer.run().await;
                });
            }
            UpdateKind::Other => {}
        }
    }
}
