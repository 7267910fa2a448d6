//! Board components
//!
//! Every on-screen view implements [`Component`]: `configure` wires it to the
//! store once at startup, `render_content` draws it into the area the
//! layout hands out. [`host_block`] provides the shared bordered frame the
//! views render into.

mod input;
mod item;
mod list;

pub use input::ProjectInput;
pub use list::ProjectList;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders},
};

use crate::domain::ProjectStatus;
use crate::state::ProjectStore;

/// Contract shared by the board's views
pub trait Component {
    /// Registers listeners and other store wiring
    fn configure(&mut self, store: &mut ProjectStore);

    /// Draws the component into `area`
    fn render_content(&mut self, frame: &mut Frame, area: Rect);
}

/// Bordered frame for a component
///
/// Highlighted frames get a thick border in the accent color.
pub fn host_block(title: impl Into<Line<'static>>, accent: Color, highlighted: bool) -> Block<'static> {
    let block = Block::default()
        .title(title.into())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    if highlighted {
        block
            .border_type(BorderType::Thick)
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

/// Accent color for a status list
pub fn status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Active => Color::Green,
        ProjectStatus::Finished => Color::Blue,
    }
}
