//! Input validation for the project form
//!
//! A [`Validatable`] bundles a value with the rules it must satisfy.
//! Length rules only apply to text values and range rules only to numbers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value under validation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    fn as_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => n.to_string(),
        }
    }
}

/// A value plus the rules it must satisfy
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: Value,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validatable {
    pub fn text(value: impl Into<String>) -> Self {
        Self::with_value(Value::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::with_value(Value::Number(value))
    }

    fn with_value(value: Value) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Checks a value against all of its rules
///
/// The lower bound is exclusive (`value > min`), the upper bound inclusive.
pub fn validate(validatable: &Validatable) -> bool {
    let mut is_valid = true;

    if validatable.required {
        is_valid = is_valid && !validatable.value.as_text().trim().is_empty();
    }

    if let Value::Text(s) = &validatable.value {
        let len = s.chars().count();
        if let Some(min_length) = validatable.min_length {
            is_valid = is_valid && len >= min_length;
        }
        if let Some(max_length) = validatable.max_length {
            is_valid = is_valid && len <= max_length;
        }
    }

    if let Value::Number(n) = validatable.value {
        if let Some(min) = validatable.min {
            is_valid = is_valid && n > min;
        }
        if let Some(max) = validatable.max {
            is_valid = is_valid && n <= max;
        }
    }

    is_valid
}

/// Form field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
    People,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::People => "people",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid {}: {reason}", .field.as_str())]
    Invalid { field: Field, reason: String },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Invalid { field, .. } => *field,
        }
    }
}

/// Limits applied to the three form fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRules {
    pub title_min_length: usize,
    pub description_min_length: usize,
    pub people_min: u32,
    pub people_max: u32,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            title_min_length: 3,
            description_min_length: 20,
            people_min: 0,
            people_max: 10,
        }
    }
}

/// A validated form submission, ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub people: u32,
}

impl FormRules {
    /// Validates raw form input and converts it to a draft
    ///
    /// Reports the first failing field in form order.
    pub fn check(
        &self,
        title: &str,
        description: &str,
        people: &str,
    ) -> Result<ProjectDraft, ValidationError> {
        let title_rule = Validatable::text(title)
            .required()
            .min_length(self.title_min_length);
        if !validate(&title_rule) {
            return Err(ValidationError::Invalid {
                field: Field::Title,
                reason: format!("required, at least {} characters", self.title_min_length),
            });
        }

        let description_rule = Validatable::text(description)
            .required()
            .min_length(self.description_min_length);
        if !validate(&description_rule) {
            return Err(ValidationError::Invalid {
                field: Field::Description,
                reason: format!(
                    "required, at least {} characters",
                    self.description_min_length
                ),
            });
        }

        let range_reason = || {
            format!(
                "required, a whole number above {} and at most {}",
                self.people_min, self.people_max
            )
        };
        let people_value: u32 = people.trim().parse().map_err(|_| ValidationError::Invalid {
            field: Field::People,
            reason: range_reason(),
        })?;
        let people_rule = Validatable::number(f64::from(people_value))
            .required()
            .min(f64::from(self.people_min))
            .max(f64::from(self.people_max));
        if !validate(&people_rule) {
            return Err(ValidationError::Invalid {
                field: Field::People,
                reason: range_reason(),
            });
        }

        Ok(ProjectDraft {
            title: title.to_string(),
            description: description.to_string(),
            people: people_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESC: &str = "A description that is long enough";

    #[test]
    fn required_rejects_blank() {
        assert!(!validate(&Validatable::text("   ").required()));
        assert!(validate(&Validatable::text("x").required()));
    }

    #[test]
    fn unrequired_empty_is_valid() {
        assert!(validate(&Validatable::text("")));
    }

    #[test]
    fn min_length_is_inclusive() {
        assert!(validate(&Validatable::text("abc").min_length(3)));
        assert!(!validate(&Validatable::text("ab").min_length(3)));
    }

    #[test]
    fn max_length_is_inclusive() {
        assert!(validate(&Validatable::text("abc").max_length(3)));
        assert!(!validate(&Validatable::text("abcd").max_length(3)));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(validate(&Validatable::text("äöü").max_length(3)));
    }

    #[test]
    fn min_is_exclusive() {
        assert!(!validate(&Validatable::number(0.0).min(0.0)));
        assert!(validate(&Validatable::number(1.0).min(0.0)));
    }

    #[test]
    fn max_is_inclusive() {
        assert!(validate(&Validatable::number(10.0).max(10.0)));
        assert!(!validate(&Validatable::number(11.0).max(10.0)));
    }

    #[test]
    fn length_rules_ignore_numbers() {
        assert!(validate(&Validatable::number(5.0).min_length(10)));
    }

    #[test]
    fn range_rules_ignore_text() {
        assert!(validate(&Validatable::text("5").min(10.0)));
    }

    #[test]
    fn form_accepts_valid_input() {
        let draft = FormRules::default().check("Web", DESC, "5").unwrap();
        assert_eq!(draft.title, "Web");
        assert_eq!(draft.description, DESC);
        assert_eq!(draft.people, 5);
    }

    #[test]
    fn form_rejects_short_title() {
        let err = FormRules::default().check("ab", DESC, "5").unwrap_err();
        assert_eq!(err.field(), Field::Title);
    }

    #[test]
    fn form_rejects_short_description() {
        let err = FormRules::default().check("Title", "too short", "5").unwrap_err();
        assert_eq!(err.field(), Field::Description);
    }

    #[test]
    fn form_reports_first_failure() {
        let err = FormRules::default().check("", "", "").unwrap_err();
        assert_eq!(err.field(), Field::Title);
    }

    #[test]
    fn form_rejects_non_numeric_people() {
        let err = FormRules::default().check("Title", DESC, "many").unwrap_err();
        assert_eq!(err.field(), Field::People);
    }

    #[test]
    fn form_people_bounds() {
        let rules = FormRules::default();
        assert!(rules.check("Title", DESC, "0").is_err());
        assert!(rules.check("Title", DESC, "1").is_ok());
        assert!(rules.check("Title", DESC, "10").is_ok());
        assert!(rules.check("Title", DESC, "11").is_err());
    }

    #[test]
    fn form_uses_custom_rules() {
        let rules = FormRules {
            title_min_length: 1,
            description_min_length: 1,
            people_min: 2,
            people_max: 3,
        };
        assert!(rules.check("T", "D", "3").is_ok());
        assert!(rules.check("T", "D", "2").is_err());
    }

    #[test]
    fn error_message_names_field() {
        let err = FormRules::default().check("ab", DESC, "5").unwrap_err();
        assert!(err.to_string().starts_with("Invalid title"));
    }
}
