//! Project list for one status
//!
//! The list subscribes to the store and keeps only the projects whose status
//! matches its own. It is also the drop target that moves projects into that
//! status.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::{layout::Position, prelude::*, widgets::Paragraph};

use super::item::{ProjectItem, ITEM_HEIGHT};
use super::{host_block, status_color, Component};
use crate::dnd::{DataTransfer, DragTarget, PLAIN_TEXT};
use crate::domain::{ProjectId, ProjectStatus};
use crate::state::ProjectStore;

/// List view and drop target for one status
pub struct ProjectList {
    status: ProjectStatus,
    /// Shared with the store listener that refills it
    items: Rc<RefCell<Vec<ProjectItem>>>,
    droppable: bool,
    focused: bool,
    selected: usize,
    offset: usize,
    /// Where the list was last drawn, for hit testing
    area: Rect,
}

impl ProjectList {
    pub fn new(status: ProjectStatus) -> Self {
        Self {
            status,
            items: Rc::new(RefCell::new(Vec::new())),
            droppable: false,
            focused: false,
            selected: 0,
            offset: 0,
            area: Rect::default(),
        }
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn title(&self) -> String {
        format!("{} PROJECTS", self.status.as_str().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn is_droppable(&self) -> bool {
        self.droppable
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    /// Ids of the listed projects in display order
    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.items
            .borrow()
            .iter()
            .map(|item| item.project().id.clone())
            .collect()
    }

    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.len()).then_some(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                (self.selected - 1).min(len - 1)
            };
        }
    }

    /// Index of the card drawn at a screen position
    pub fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.inner_area();
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.offset + usize::from((row - inner.y) / ITEM_HEIGHT);
        (index < self.len()).then_some(index)
    }

    /// Runs `f` on the card at `index`
    pub fn with_item<R>(&self, index: usize, f: impl FnOnce(&mut ProjectItem) -> R) -> Option<R> {
        self.items.borrow_mut().get_mut(index).map(f)
    }

    /// Runs `f` on the card showing project `id`
    pub fn with_item_by_id<R>(
        &self,
        id: &ProjectId,
        f: impl FnOnce(&mut ProjectItem) -> R,
    ) -> Option<R> {
        self.items
            .borrow_mut()
            .iter_mut()
            .find(|item| &item.project().id == id)
            .map(f)
    }

    fn inner_area(&self) -> Rect {
        self.area.inner(Margin::new(1, 1))
    }

    fn visible_rows(&self) -> usize {
        usize::from((self.inner_area().height / ITEM_HEIGHT).max(1))
    }

    /// Keeps the selected card on screen
    fn scroll_to_selection(&mut self) {
        let len = self.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        let rows = self.visible_rows();
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
        self.offset = self.offset.min(len.saturating_sub(1));
    }

    fn render_projects(&self, frame: &mut Frame, inner: Rect) {
        let items = self.items.borrow();
        if items.is_empty() {
            let hint = if self.droppable {
                "Drop here"
            } else {
                "No projects"
            };
            frame.render_widget(
                Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let mut y = inner.y;
        for (index, item) in items.iter().enumerate().skip(self.offset) {
            if y + ITEM_HEIGHT > inner.y + inner.height {
                break;
            }
            let card = Rect::new(inner.x, y, inner.width, ITEM_HEIGHT);
            item.render(frame, card, self.focused && index == self.selected);
            y += ITEM_HEIGHT;
        }
    }
}

impl Component for ProjectList {
    fn configure(&mut self, store: &mut ProjectStore) {
        let items = Rc::clone(&self.items);
        let status = self.status;
        store.subscribe(move |projects| {
            *items.borrow_mut() = projects
                .into_iter()
                .filter(|project| project.status == status)
                .map(ProjectItem::new)
                .collect();
        });
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        self.area = area;
        self.scroll_to_selection();

        let accent = if self.droppable {
            Color::Magenta
        } else {
            status_color(self.status)
        };
        let title = format!(" {} ({}) ", self.title(), self.len());
        let block = host_block(title, accent, self.droppable || self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.render_projects(frame, inner);
    }
}

impl DragTarget for ProjectList {
    fn drag_over(&mut self, transfer: &DataTransfer) -> bool {
        if transfer.types().next() == Some(PLAIN_TEXT) {
            self.droppable = true;
            return true;
        }
        false
    }

    fn drop(&mut self, transfer: &DataTransfer, store: &mut ProjectStore) {
        self.droppable = false;
        let Some(id) = transfer
            .get_data(PLAIN_TEXT)
            .and_then(|data| data.parse::<ProjectId>().ok())
        else {
            return;
        };
        store.move_project(&id, self.status);
    }

    fn drag_leave(&mut self) {
        self.droppable = false;
    }
}
