//! Drag-and-drop move protocol
//!
//! A drag carries a [`DataTransfer`] from a [`Draggable`] source to a
//! [`DragTarget`]. Targets only accept payloads whose first declared kind is
//! [`PLAIN_TEXT`]; dropping one moves the named project into the target's
//! status through the store.

use crate::state::ProjectStore;

/// Payload kind carrying a project id
pub const PLAIN_TEXT: &str = "text/plain";

/// Operation a drag source allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
}

/// Data attached to an in-flight drag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data for `kind`, replacing any previous value of that kind
    pub fn set_data(&mut self, kind: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(k, _)| k == kind) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((kind.to_string(), data)),
        }
    }

    /// Returns the data for `kind`, if set
    pub fn get_data(&self, kind: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, v)| v.as_str())
    }

    /// Declared kinds in the order they were first set
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

/// Something that can be picked up and dragged
pub trait Draggable {
    fn drag_start(&mut self, transfer: &mut DataTransfer);
    fn drag_end(&mut self);
}

/// Something that projects can be dropped onto
pub trait DragTarget {
    /// Returns `true` if the payload may be dropped here
    fn drag_over(&mut self, transfer: &DataTransfer) -> bool;
    fn drop(&mut self, transfer: &DataTransfer, store: &mut ProjectStore);
    fn drag_leave(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transfer_is_empty() {
        let transfer = DataTransfer::new();
        assert_eq!(transfer.types().count(), 0);
        assert_eq!(transfer.effect_allowed, DropEffect::None);
        assert_eq!(transfer.get_data(PLAIN_TEXT), None);
    }

    #[test]
    fn set_and_get_data() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(PLAIN_TEXT, "p-1234567");
        assert_eq!(transfer.get_data(PLAIN_TEXT), Some("p-1234567"));
        assert_eq!(transfer.get_data("text/html"), None);
    }

    #[test]
    fn set_data_replaces_same_kind() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(PLAIN_TEXT, "first");
        transfer.set_data(PLAIN_TEXT, "second");
        assert_eq!(transfer.get_data(PLAIN_TEXT), Some("second"));
        assert_eq!(transfer.types().count(), 1);
    }

    #[test]
    fn types_keep_insertion_order() {
        let mut transfer = DataTransfer::new();
        transfer.set_data("text/html", "<b>x</b>");
        transfer.set_data(PLAIN_TEXT, "x");
        let types: Vec<_> = transfer.types().collect();
        assert_eq!(types, ["text/html", PLAIN_TEXT]);
    }
}
