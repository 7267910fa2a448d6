//! Domain models for projboard
//!
//! Contains the core business logic without any I/O concerns.

mod id;
mod project;
pub mod validation;

pub use id::{IdError, ProjectId};
pub use project::{Project, ProjectStatus, StatusParseError};
pub use validation::{Field, FormRules, ProjectDraft, ValidationError};
