//! projboard - a terminal project board
//!
//! Projects live in an active and a finished list. An observable
//! [`ProjectStore`] owns them and notifies subscribed views after every
//! change; the drag-and-drop protocol in [`dnd`] moves projects between
//! lists.

pub mod cli;
pub mod config;
pub mod dnd;
pub mod domain;
pub mod state;

pub use domain::{Project, ProjectId, ProjectStatus};
pub use state::ProjectStore;
