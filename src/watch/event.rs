// src/watch/event.rs

//! Change notifications as seen by the rest of the crate.
//!
//! `notify` reports a rich event taxonomy; the watcher only distinguishes
//! creation, content modification and attribute-only changes, so raw
//! events are flattened into one [`ChangeEvent`] per affected path.

use std::path::PathBuf;

use bitflags::bitflags;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

/// Kind of a single change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    Modify,
    AttributeChange,
}

bitflags! {
    /// Event classes a registration is interested in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Interest: u8 {
        const CREATE = 0b001;
        const MODIFY = 0b010;
        const ATTRIBUTE = 0b100;
    }
}

impl From<ChangeKind> for Interest {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Create => Interest::CREATE,
            ChangeKind::Modify => Interest::MODIFY,
            ChangeKind::AttributeChange => Interest::ATTRIBUTE,
        }
    }
}

/// A change to one filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn is_create(&self) -> bool {
        self.kind == ChangeKind::Create
    }

    pub fn is_modify(&self) -> bool {
        self.kind == ChangeKind::Modify
    }

    pub fn is_attribute(&self) -> bool {
        self.kind == ChangeKind::AttributeChange
    }
}

/// Map a `notify` event kind onto our coarser taxonomy.
///
/// A file moved into a watched directory counts as created. Removals,
/// accesses and moves out are not reported.
pub fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Create),
        EventKind::Modify(ModifyKind::Metadata(_)) => Some(ChangeKind::AttributeChange),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(ChangeKind::Create),
        EventKind::Modify(ModifyKind::Name(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Modify),
        _ => None,
    }
}

/// Flatten a `notify` event into per-path change events.
///
/// Backends that pair up the two halves of a rename also report the
/// destination on its own as `Name(To)`; the combined `Name(Both)` event is
/// dropped so the destination is only reported once.
pub fn change_events(event: Event) -> Vec<ChangeEvent> {
    match classify(&event.kind) {
        Some(change) => event
            .paths
            .into_iter()
            .map(|path| ChangeEvent::new(change, path))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind};

    #[test]
    fn classifies_creates_and_writes() {
        assert_eq!(
            classify(&EventKind::Create(CreateKind::File)),
            Some(ChangeKind::Create)
        );
        assert_eq!(
            classify(&EventKind::Create(CreateKind::Folder)),
            Some(ChangeKind::Create)
        );
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Data(DataChange::Any))),
            Some(ChangeKind::Modify)
        );
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Any)),
            Some(ChangeKind::Modify)
        );
    }

    #[test]
    fn metadata_changes_are_attribute_only() {
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions))),
            Some(ChangeKind::AttributeChange)
        );
    }

    #[test]
    fn removals_and_access_are_dropped() {
        assert_eq!(classify(&EventKind::Remove(RemoveKind::File)), None);
        assert_eq!(classify(&EventKind::Access(AccessKind::Any)), None);
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Name(RenameMode::From))),
            None
        );
    }

    #[test]
    fn rename_into_directory_is_one_creation() {
        // inotify delivers the destination alone, then both halves paired.
        let to = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
            .add_path(PathBuf::from("/w/new"));
        let both = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/w/old"))
            .add_path(PathBuf::from("/w/new"));

        let changes: Vec<ChangeEvent> = [to, both].into_iter().flat_map(change_events).collect();

        assert_eq!(changes, vec![ChangeEvent::new(ChangeKind::Create, "/w/new")]);
    }

    #[test]
    fn one_change_per_path() {
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from("/w/a"))
            .add_path(PathBuf::from("/w/b"));

        let changes = change_events(event);
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(ChangeEvent::is_modify));
    }

    #[test]
    fn interest_from_kind() {
        let mask = Interest::CREATE | Interest::MODIFY;
        assert!(mask.contains(ChangeKind::Create.into()));
        assert!(mask.contains(ChangeKind::Modify.into()));
        assert!(!mask.contains(ChangeKind::AttributeChange.into()));
    }
}
