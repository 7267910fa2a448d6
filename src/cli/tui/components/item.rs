//! A single project card inside a list

use ratatui::{prelude::*, widgets::Paragraph};
use tracing::debug;

use crate::cli::tui::utils::truncate_str;
use crate::dnd::{DataTransfer, Draggable, DropEffect, PLAIN_TEXT};
use crate::domain::Project;

/// Rows a card occupies
pub const ITEM_HEIGHT: u16 = 3;

/// Draggable card showing one project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectItem {
    project: Project,
    dragging: bool,
}

impl ProjectItem {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            dragging: false,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Draws title, headcount and description on three rows
    pub fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let width = area.width.saturating_sub(2) as usize;

        let mut title_style = Style::default().add_modifier(Modifier::BOLD);
        let mut body_style = Style::default();
        if self.dragging {
            title_style = title_style.add_modifier(Modifier::DIM);
            body_style = body_style.add_modifier(Modifier::DIM);
        }
        if selected {
            title_style = title_style.bg(Color::DarkGray);
            body_style = body_style.bg(Color::DarkGray);
        }

        let marker = if selected { "> " } else { "  " };
        let lines = vec![
            Line::from(vec![
                Span::raw(marker),
                Span::styled(truncate_str(&self.project.title, width), title_style),
            ]),
            Line::styled(
                format!("  {}", truncate_str(&self.project.people_label(), width)),
                body_style.fg(Color::Yellow),
            ),
            Line::styled(
                format!("  {}", truncate_str(&self.project.description, width)),
                body_style.fg(Color::Gray),
            ),
        ];

        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Draggable for ProjectItem {
    fn drag_start(&mut self, transfer: &mut DataTransfer) {
        transfer.set_data(PLAIN_TEXT, self.project.id.to_string());
        transfer.effect_allowed = DropEffect::Move;
        self.dragging = true;
        debug!(id = %self.project.id, "drag start");
    }

    fn drag_end(&mut self) {
        self.dragging = false;
        debug!(id = %self.project.id, "drag end");
    }
}
