//! Event collection for the Netpulse TUI.
//!
//! Pumps terminal events through a channel and exposes them as an async
//! stream; interpretation of the events belongs to the application.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;

use super::Event;
use crate::event;

/// Stream of terminal events for the main loop.
pub struct EventHandler {
    event_rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler and start collecting events.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn a task that polls for events and sends them to the channel
        let _handle = tokio::spawn(async move {
            let dispatcher = event::EventDispatcher::new();
            loop {
                match dispatcher.next() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                }
            }
        });

        Self { event_rx: rx }
    }

    fn poll_event(&mut self, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        Pin::new(&mut self.event_rx).poll_recv(cx)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for EventHandler {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.poll_event(cx)
    }
}
