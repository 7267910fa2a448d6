//! # Application State
//!
//! The observable [`ProjectStore`] owns every project on the board. Views
//! register listeners with [`ProjectStore::subscribe`] and receive a fresh
//! copy of the project list after each mutation.
//!
//! ## Mutations
//!
//! | Operation | Effect | Notifies |
//! |-----------|--------|----------|
//! | [`ProjectStore::create`] | Appends an active project | always |
//! | [`ProjectStore::move_project`] | Changes one project's status | only if the status changed |
//!
//! The store is constructed by the application's top-level setup and
//! passed by `&mut` to the components that need it.

mod store;

pub use store::{Listener, ProjectStore, State};
