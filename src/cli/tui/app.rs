//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{Clear, Paragraph, Wrap},
};
use tracing::debug;

use super::components::{host_block, Component, ProjectInput, ProjectList};
use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::utils::centered_rect;
use crate::dnd::{DataTransfer, DragTarget, Draggable};
use crate::domain::{Field, FormRules, ProjectId, ProjectStatus};
use crate::state::ProjectStore;

/// Which part of the board has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Title,
    Description,
    People,
    Active,
    Finished,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Title => Focus::Description,
            Focus::Description => Focus::People,
            Focus::People => Focus::Active,
            Focus::Active => Focus::Finished,
            Focus::Finished => Focus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Title => Focus::Finished,
            Focus::Description => Focus::Title,
            Focus::People => Focus::Description,
            Focus::Active => Focus::People,
            Focus::Finished => Focus::Active,
        }
    }

    fn field(self) -> Option<Field> {
        match self {
            Focus::Title => Some(Field::Title),
            Focus::Description => Some(Field::Description),
            Focus::People => Some(Field::People),
            Focus::Active | Focus::Finished => None,
        }
    }

    fn list(self) -> Option<ProjectStatus> {
        match self {
            Focus::Active => Some(ProjectStatus::Active),
            Focus::Finished => Some(ProjectStatus::Finished),
            _ => None,
        }
    }
}

impl From<Field> for Focus {
    fn from(field: Field) -> Self {
        match field {
            Field::Title => Focus::Title,
            Field::Description => Focus::Description,
            Field::People => Focus::People,
        }
    }
}

impl From<ProjectStatus> for Focus {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Active => Focus::Active,
            ProjectStatus::Finished => Focus::Finished,
        }
    }
}

/// An in-flight mouse drag
#[derive(Debug)]
struct DragSession {
    transfer: DataTransfer,
    source: ProjectId,
    /// List currently marked as a valid drop target
    hover: Option<ProjectStatus>,
}

/// Application state
pub struct App {
    /// Every project on the board
    store: ProjectStore,

    /// New-project form
    input: ProjectInput,

    /// Active and finished lists, in that order
    lists: [ProjectList; 2],

    /// Current focus
    focus: Focus,

    /// Blocking alert; swallows input until dismissed
    alert: Option<String>,

    /// Mouse drag in progress
    drag: Option<DragSession>,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application around a fresh store
    pub fn new(rules: FormRules) -> Self {
        let mut store = ProjectStore::new();
        let mut input = ProjectInput::new(rules);
        let mut lists = ProjectStatus::ALL.map(ProjectList::new);

        input.configure(&mut store);
        for list in &mut lists {
            list.configure(&mut store);
        }

        Self {
            store,
            input,
            lists,
            focus: Focus::Title,
            alert: None,
            drag: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self, frame: &mut Frame) {
        self.sync_focus();

        let [form, board, status_bar] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        let [active, finished] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(board);

        self.input.render_content(frame, form);
        self.lists[0].render_content(frame, active);
        self.lists[1].render_content(frame, finished);
        self.draw_status_bar(frame, status_bar);

        if let Some(message) = &self.alert {
            draw_alert(frame, message);
        }
    }

    fn draw_status_bar(&self, frame: &mut Frame, area: Rect) {
        let (content, style) = if self.alert.is_some() {
            (
                "Press Enter to dismiss".to_string(),
                Style::default().fg(Color::Red),
            )
        } else if self.drag.is_some() {
            (
                "Release over a list to move the project".to_string(),
                Style::default().fg(Color::Magenta),
            )
        } else if let Some(message) = &self.status_message {
            (message.clone(), Style::default())
        } else if self.focus.field().is_some() {
            (
                "[Enter]create [Tab]next field [Esc]lists [Ctrl+C]quit".to_string(),
                Style::default(),
            )
        } else {
            (
                "[j/k]select [h/l]list [m]ove [n]ew [?]help [q]uit  drag cards with the mouse"
                    .to_string(),
                Style::default(),
            )
        };

        let paragraph = Paragraph::new(format!("projboard {}", content))
            .style(style)
            .block(host_block("", Color::DarkGray, false));

        frame.render_widget(paragraph, area);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Check for quit first (Ctrl+C anywhere)
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.set_focus(self.focus.next()),
            KeyCode::BackTab => self.set_focus(self.focus.prev()),
            _ if self.focus.field().is_some() => self.handle_form_key(key),
            _ => self.handle_list_key(key),
        }
    }

    /// Handle keys while a form field has focus
    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_form(),
            KeyCode::Esc => self.set_focus(Focus::Active),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Char(c) => self.input.push_char(c),
            _ => {}
        }
    }

    /// Handle keys while a list has focus
    fn handle_list_key(&mut self, key: KeyEvent) {
        let Some(status) = self.focus.list() else {
            return;
        };

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.list_mut(status).select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.list_mut(status).select_prev(),

            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
                self.set_focus(status.other().into());
            }

            KeyCode::Char('m') | KeyCode::Char(' ') | KeyCode::Enter => {
                self.move_selected(status);
            }

            KeyCode::Char('n') | KeyCode::Char('i') => self.set_focus(Focus::Title),

            KeyCode::Char('?') => {
                self.status_message = Some(
                    "j/k:select h/l:switch list m:move to other list n:new project q:quit"
                        .to_string(),
                );
            }

            _ => {}
        }
    }

    /// Handle mouse events: clicks focus, left-drag moves cards
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.alert.is_some() {
            return;
        }

        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(field) = self.input.field_at(column, row) {
                    self.cancel_drag();
                    self.set_focus(field.into());
                    return;
                }
                if let Some((status, index)) = self.card_at(column, row) {
                    self.set_focus(status.into());
                    self.list_mut(status).select(index);
                    self.begin_drag(status, index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.drag_to(column, row),
            MouseEventKind::Up(MouseButton::Left) => self.end_drag(column, row),
            _ => {}
        }
    }

    /// Picks up the card at `index` of the `status` list
    fn begin_drag(&mut self, status: ProjectStatus, index: usize) {
        self.cancel_drag();

        let mut transfer = DataTransfer::new();
        let source = self
            .list(status)
            .with_item(index, |item| {
                item.drag_start(&mut transfer);
                item.project().id.clone()
            });

        if let Some(source) = source {
            self.drag = Some(DragSession {
                transfer,
                source,
                hover: None,
            });
        }
    }

    /// Abandons a drag whose release never arrived
    fn cancel_drag(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        if let Some(status) = session.hover {
            self.list_mut(status).drag_leave();
        }
        self.finish_drag(&session.source);
        debug!(id = %session.source, "stale drag cancelled");
    }

    /// Updates drop target marking as the pointer moves
    fn drag_to(&mut self, column: u16, row: u16) {
        let Some(mut session) = self.drag.take() else {
            return;
        };

        let target = self.list_at(column, row);
        if let Some(previous) = session.hover.filter(|prev| Some(*prev) != target) {
            self.list_mut(previous).drag_leave();
            session.hover = None;
        }
        if let Some(status) = target {
            if self.list_mut(status).drag_over(&session.transfer) {
                session.hover = Some(status);
            }
        }

        self.drag = Some(session);
    }

    /// Drops onto the list under the pointer, if it accepted the payload
    fn end_drag(&mut self, column: u16, row: u16) {
        let Some(session) = self.drag.take() else {
            return;
        };

        let target = self.list_at(column, row);
        if let Some(status) = session.hover {
            if target == Some(status) {
                let [active, finished] = &mut self.lists;
                let list = match status {
                    ProjectStatus::Active => active,
                    ProjectStatus::Finished => finished,
                };
                list.drop(&session.transfer, &mut self.store);
            } else {
                self.list_mut(status).drag_leave();
            }
        }

        self.finish_drag(&session.source);
        self.follow_project(&session.source);
    }

    /// Runs the move protocol from the keyboard: drag the selected card of
    /// `status` over the other list and drop it there
    fn move_selected(&mut self, status: ProjectStatus) {
        let Some(index) = self.list(status).selected() else {
            return;
        };
        self.begin_drag(status, index);
        let Some(session) = self.drag.take() else {
            return;
        };

        let target = status.other();
        let [active, finished] = &mut self.lists;
        let list = match target {
            ProjectStatus::Active => active,
            ProjectStatus::Finished => finished,
        };
        if list.drag_over(&session.transfer) {
            list.drop(&session.transfer, &mut self.store);
        }

        self.finish_drag(&session.source);
        self.follow_project(&session.source);
    }

    /// Tells the dragged card the drag is over, wherever it now lives
    fn finish_drag(&mut self, source: &ProjectId) {
        for list in &self.lists {
            list.with_item_by_id(source, |item| item.drag_end());
        }
        debug!(id = %source, "drag finished");
    }

    /// Selects `id` in whichever list holds it and reports the outcome
    fn follow_project(&mut self, id: &ProjectId) {
        let Some(project) = self.store.get(id).cloned() else {
            return;
        };

        let status = project.status;
        if let Some(index) = self.list(status).project_ids().iter().position(|p| p == id) {
            self.list_mut(status).select(index);
        }
        if self.focus.list().is_some() {
            self.set_focus(status.into());
        }
        self.status_message = Some(format!("{}: {}", project.title, status));
    }

    fn submit_form(&mut self) {
        match self.input.submit(&mut self.store) {
            Ok(id) => {
                let title = self
                    .store
                    .get(&id)
                    .map(|p| p.title.clone())
                    .unwrap_or_default();
                self.status_message = Some(format!("Created: {}", title));
                self.set_focus(Focus::Title);
            }
            Err(err) => {
                self.alert = Some(format!("Invalid input, please check your values!\n\n{}", err));
                self.set_focus(err.field().into());
            }
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_focus();
    }

    /// Pushes the focus state into the components
    fn sync_focus(&mut self) {
        if let Some(field) = self.focus.field() {
            self.input.set_active_field(field);
        }
        self.input.set_focused(self.focus.field().is_some());
        for list in &mut self.lists {
            let focused = self.focus.list() == Some(list.status());
            list.set_focused(focused);
        }
    }

    fn card_at(&self, column: u16, row: u16) -> Option<(ProjectStatus, usize)> {
        self.lists
            .iter()
            .find_map(|list| list.item_at(column, row).map(|index| (list.status(), index)))
    }

    fn list_at(&self, column: u16, row: u16) -> Option<ProjectStatus> {
        self.lists
            .iter()
            .find(|list| list.contains(column, row))
            .map(|list| list.status())
    }

    fn list_mut(&mut self, status: ProjectStatus) -> &mut ProjectList {
        match status {
            ProjectStatus::Active => &mut self.lists[0],
            ProjectStatus::Finished => &mut self.lists[1],
        }
    }

    // Public accessors

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn list(&self, status: ProjectStatus) -> &ProjectList {
        match status {
            ProjectStatus::Active => &self.lists[0],
            ProjectStatus::Finished => &self.lists[1],
        }
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn draw_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, 8, frame.area());
    let paragraph = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .block(host_block(" Alert ", Color::Red, true));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
