//! New-project form
//!
//! Three text fields. Submitting validates the input; valid input creates a
//! project in the store and clears the form, invalid input is handed back to
//! the caller untouched.

use ratatui::{
    layout::Position,
    prelude::*,
    widgets::Paragraph,
};
use tracing::info;

use super::{host_block, Component};
use crate::domain::{Field, FormRules, ProjectDraft, ProjectId, ValidationError};
use crate::state::ProjectStore;

/// The project input form
pub struct ProjectInput {
    title: String,
    description: String,
    people: String,
    active: Field,
    focused: bool,
    rules: FormRules,
    /// Field areas from the last render, for hit testing
    field_areas: [(Field, Rect); 3],
}

impl ProjectInput {
    pub fn new(rules: FormRules) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            people: String::new(),
            active: Field::Title,
            focused: true,
            rules,
            field_areas: [
                (Field::Title, Rect::default()),
                (Field::Description, Rect::default()),
                (Field::People, Rect::default()),
            ],
        }
    }

    pub fn active_field(&self) -> Field {
        self.active
    }

    pub fn set_active_field(&mut self, field: Field) {
        self.active = field;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::People => &self.people,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::People => &mut self.people,
        }
    }

    /// Types a character into the active field
    pub fn push_char(&mut self, c: char) {
        let field = self.active;
        self.value_mut(field).push(c);
    }

    /// Deletes the last character of the active field
    pub fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Field drawn at a screen position
    pub fn field_at(&self, column: u16, row: u16) -> Option<Field> {
        self.field_areas
            .iter()
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|(field, _)| *field)
    }

    /// Validates the current input
    pub fn gather_user_input(&self) -> Result<ProjectDraft, ValidationError> {
        self.rules.check(&self.title, &self.description, &self.people)
    }

    pub fn clear_inputs(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
        self.active = Field::Title;
    }

    /// Creates a project from valid input and clears the form
    ///
    /// Invalid input leaves both the form and the store unchanged.
    pub fn submit(&mut self, store: &mut ProjectStore) -> Result<ProjectId, ValidationError> {
        let draft = match self.gather_user_input() {
            Ok(draft) => draft,
            Err(err) => {
                info!(field = err.field().as_str(), "form submission rejected");
                return Err(err);
            }
        };

        let id = store.create(draft.title, draft.description, draft.people);
        self.clear_inputs();
        Ok(id)
    }

    fn render_field(&self, frame: &mut Frame, field: Field, label: &str, area: Rect) {
        let highlighted = self.focused && self.active == field;
        let accent = if highlighted { Color::Cyan } else { Color::Gray };
        let block = host_block(format!(" {} ", label), accent, highlighted);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value = self.value(field);
        // Show the tail when the value is wider than the box
        let width = usize::from(inner.width.saturating_sub(1));
        let skip = value.chars().count().saturating_sub(width);
        let visible: String = value.chars().skip(skip).collect();
        frame.render_widget(Paragraph::new(visible.clone()), inner);

        if highlighted {
            let cursor_x = inner.x + visible.chars().count() as u16;
            frame.set_cursor_position(Position::new(cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }
}

impl Component for ProjectInput {
    fn configure(&mut self, _store: &mut ProjectStore) {}

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let block = host_block(" NEW PROJECT ", Color::Cyan, false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title, description, people] = Layout::horizontal([
            Constraint::Percentage(30),
            Constraint::Percentage(50),
            Constraint::Percentage(20),
        ])
        .areas(inner);

        self.field_areas = [
            (Field::Title, title),
            (Field::Description, description),
            (Field::People, people),
        ];

        self.render_field(frame, Field::Title, "Title", title);
        self.render_field(frame, Field::Description, "Description", description);
        self.render_field(frame, Field::People, "People", people);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectStatus;
    use ratatui::backend::TestBackend;

    fn type_into(input: &mut ProjectInput, field: Field, text: &str) {
        input.set_active_field(field);
        for c in text.chars() {
            input.push_char(c);
        }
    }

    fn filled() -> ProjectInput {
        let mut input = ProjectInput::new(FormRules::default());
        type_into(&mut input, Field::Title, "Rocket");
        type_into(&mut input, Field::Description, "Build a rocket and go to space");
        type_into(&mut input, Field::People, "7");
        input
    }

    #[test]
    fn typing_edits_active_field() {
        let mut input = ProjectInput::new(FormRules::default());
        type_into(&mut input, Field::Description, "abc");
        input.backspace();
        assert_eq!(input.value(Field::Description), "ab");
        assert_eq!(input.value(Field::Title), "");
    }

    #[test]
    fn valid_submit_creates_project_and_clears() {
        let mut store = ProjectStore::new();
        let mut input = filled();

        let id = input.submit(&mut store).unwrap();

        let project = store.get(&id).unwrap();
        assert_eq!(project.title, "Rocket");
        assert_eq!(project.people, 7);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(input.value(Field::Title), "");
        assert_eq!(input.value(Field::People), "");
        assert_eq!(input.active_field(), Field::Title);
    }

    #[test]
    fn invalid_submit_keeps_input_and_skips_store() {
        let mut store = ProjectStore::new();
        let mut input = filled();
        input.set_active_field(Field::People);
        input.push_char('0');

        let err = input.submit(&mut store).unwrap_err();

        assert_eq!(err.field(), Field::People);
        assert!(store.is_empty());
        assert_eq!(input.value(Field::People), "70");
    }

    #[test]
    fn field_hit_testing_after_render() {
        let mut input = ProjectInput::new(FormRules::default());
        let mut terminal = ratatui::Terminal::new(TestBackend::new(100, 5)).unwrap();
        terminal
            .draw(|frame| input.render_content(frame, frame.area()))
            .unwrap();

        assert_eq!(input.field_at(5, 2), Some(Field::Title));
        assert_eq!(input.field_at(50, 2), Some(Field::Description));
        assert_eq!(input.field_at(95, 2), Some(Field::People));
        assert_eq!(input.field_at(0, 0), None);
    }
}
