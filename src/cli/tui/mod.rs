//! Interactive project board
//!
//! A terminal interface with a new-project form and two lists (active and
//! finished). Cards move between lists by dragging them with the mouse or by
//! pressing `m` on a selected card.

mod app;
mod components;
mod event;
mod ui;
mod utils;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::config::Config;
use app::App;
use event::EventHandler;

/// Launch the board
pub fn run(output: &Output, config: &Config) -> Result<()> {
    output.verbose_ctx("tui", "Initializing board");

    let mut app = App::new(config.validation.clone());

    // Initialize terminal
    let mut terminal = ui::init_terminal()?;

    // Create event handler
    let event_handler = EventHandler::new(config.tick_rate_ms);

    tracing::info!("board started");

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            tracing::info!(projects = app.store().len(), "board closed");
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Board panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Board panicked: {}", s))
            } else {
                Err(anyhow!("Board panicked with unknown error"))
            }
        }
    }
}
