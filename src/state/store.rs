//! Observable project store
//!
//! [`ProjectStore`] is the single source of truth for all projects. Every
//! mutation is followed by a synchronous fan-out to the registered listeners,
//! in registration order, each receiving its own copy of the project list.

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{Project, ProjectId, ProjectStatus};

/// Callback invoked with a snapshot after every mutation
pub type Listener<T> = Box<dyn FnMut(Vec<T>)>;

/// Ordered listener registry shared by observable stores
pub struct State<T> {
    listeners: Vec<Listener<T>>,
}

impl<T: Clone> State<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Registers a listener. The same closure logic may be registered twice
    /// and will then run twice per notification.
    pub fn add_listener(&mut self, listener: impl FnMut(Vec<T>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Hands every listener its own copy of `items`
    fn notify(&mut self, items: &[T]) {
        for listener in &mut self.listeners {
            listener(items.to_vec());
        }
    }
}

impl<T: Clone> Default for State<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Authoritative list of projects plus its subscribers
///
/// Mutation and notification happen inside a single `&mut self` call, so no
/// caller can observe a mutated list before the listeners have run. Hosts
/// that share the store across threads wrap it in a `Mutex`.
pub struct ProjectStore {
    state: State<Project>,
    projects: Vec<Project>,
    sequence: u64,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self {
            state: State::new(),
            projects: Vec::new(),
            sequence: 0,
        }
    }

    /// Registers a listener for change notifications
    pub fn subscribe(&mut self, listener: impl FnMut(Vec<Project>) + 'static) {
        self.state.add_listener(listener);
        debug!(listeners = self.state.len(), "listener subscribed");
    }

    /// Adds a new active project and notifies all listeners
    ///
    /// Does no validation; callers check input first.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let title = title.into();
        let id = self.next_id(&title);
        let project = Project::new(id.clone(), title, description, people);

        info!(id = %project.id, title = %project.title, people, "project created");
        self.projects.push(project);
        self.update_listeners();

        id
    }

    /// Moves a project to `new_status`
    ///
    /// Returns `true` if the status changed. An unknown id or a move to the
    /// current status does nothing and notifies no one.
    pub fn move_project(&mut self, id: &ProjectId, new_status: ProjectStatus) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| &p.id == id) else {
            return false;
        };
        if project.status == new_status {
            return false;
        }

        project.status = new_status;
        info!(id = %id, status = %new_status, "project moved");
        self.update_listeners();
        true
    }

    /// Returns an owned copy of all projects in insertion order
    pub fn snapshot(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Projects with the given status, in insertion order
    pub fn projects_with_status(&self, status: ProjectStatus) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(move |p| p.status == status)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.state.len()
    }

    fn next_id(&mut self, title: &str) -> ProjectId {
        let now = Utc::now();
        loop {
            let id = ProjectId::new(title, now, self.sequence);
            self.sequence += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn update_listeners(&mut self) {
        self.state.notify(&self.projects);
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Records every snapshot a listener receives
    fn recorder(store: &mut ProjectStore) -> Rc<RefCell<Vec<Vec<Project>>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot));
        calls
    }

    // ==========================================================================
    // create
    // ==========================================================================

    #[test]
    fn create_appends_active_project() {
        let mut store = ProjectStore::new();
        store.create("T", "D", 5);

        let snapshot = store.snapshot();
        let last = snapshot.last().unwrap();
        assert_eq!(last.title, "T");
        assert_eq!(last.description, "D");
        assert_eq!(last.people, 5);
        assert_eq!(last.status, ProjectStatus::Active);
    }

    #[test]
    fn create_returns_id_of_new_project() {
        let mut store = ProjectStore::new();
        let id = store.create("T", "D", 1);
        assert_eq!(store.get(&id).unwrap().title, "T");
    }

    #[test]
    fn create_keeps_insertion_order() {
        let mut store = ProjectStore::new();
        store.create("first", "", 1);
        store.create("second", "", 2);
        store.create("third", "", 3);

        let titles: Vec<_> = store.snapshot().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn create_with_same_title_yields_distinct_ids() {
        let mut store = ProjectStore::new();
        let a = store.create("Same", "D", 1);
        let b = store.create("Same", "D", 1);
        assert_ne!(a, b);
    }

    #[test]
    fn create_notifies_each_listener_once_in_order() {
        let mut store = ProjectStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order = Rc::clone(&order);
            store.subscribe(move |snapshot: Vec<Project>| {
                order.borrow_mut().push((n, snapshot.last().map(|p| p.title.clone())));
            });
        }

        store.create("New", "D", 2);

        assert_eq!(
            *order.borrow(),
            vec![
                (0, Some("New".to_string())),
                (1, Some("New".to_string())),
                (2, Some("New".to_string())),
            ]
        );
    }

    #[test]
    fn duplicate_subscription_runs_twice() {
        let mut store = ProjectStore::new();
        let count = Rc::new(RefCell::new(0));
        for _ in 0..2 {
            let count = Rc::clone(&count);
            store.subscribe(move |_| *count.borrow_mut() += 1);
        }

        store.create("T", "D", 1);
        assert_eq!(*count.borrow(), 2);
        assert_eq!(store.listener_count(), 2);
    }

    #[test]
    fn subscribe_does_not_replay_existing_state() {
        let mut store = ProjectStore::new();
        store.create("T", "D", 1);
        let calls = recorder(&mut store);
        assert!(calls.borrow().is_empty());
    }

    // ==========================================================================
    // move_project
    // ==========================================================================

    #[test]
    fn move_unknown_id_is_silent_noop() {
        let mut store = ProjectStore::new();
        store.create("T", "D", 1);
        let calls = recorder(&mut store);
        let before = store.snapshot();

        let unknown: ProjectId = "p-0000000".parse().unwrap();
        assert!(!store.move_project(&unknown, ProjectStatus::Finished));

        assert_eq!(store.snapshot(), before);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn move_to_same_status_is_silent_noop() {
        let mut store = ProjectStore::new();
        let id = store.create("T", "D", 1);
        let calls = recorder(&mut store);

        assert!(!store.move_project(&id, ProjectStatus::Active));

        assert_eq!(store.get(&id).unwrap().status, ProjectStatus::Active);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn move_flips_status_and_notifies_once() {
        let mut store = ProjectStore::new();
        let id = store.create("T", "D", 1);
        let calls = recorder(&mut store);

        assert!(store.move_project(&id, ProjectStatus::Finished));

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(calls.borrow()[0][0].status, ProjectStatus::Finished);
        assert_eq!(store.get(&id).unwrap().status, ProjectStatus::Finished);

        assert!(store.move_project(&id, ProjectStatus::Active));
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(calls.borrow()[1][0].status, ProjectStatus::Active);
    }

    #[test]
    fn move_does_not_reorder() {
        let mut store = ProjectStore::new();
        let first = store.create("first", "", 1);
        store.create("second", "", 1);

        store.move_project(&first, ProjectStatus::Finished);

        let titles: Vec<_> = store.snapshot().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn projects_with_status_filters() {
        let mut store = ProjectStore::new();
        let a = store.create("a", "", 1);
        store.create("b", "", 1);
        store.move_project(&a, ProjectStatus::Finished);

        let finished: Vec<_> = store
            .projects_with_status(ProjectStatus::Finished)
            .map(|p| p.title.as_str())
            .collect();
        let active: Vec<_> = store
            .projects_with_status(ProjectStatus::Active)
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(finished, ["a"]);
        assert_eq!(active, ["b"]);
    }

    // ==========================================================================
    // snapshots
    // ==========================================================================

    #[test]
    fn mutating_delivered_snapshot_does_not_touch_store() {
        let mut store = ProjectStore::new();
        store.subscribe(|mut snapshot: Vec<Project>| {
            for project in &mut snapshot {
                project.title = "hijacked".to_string();
                project.status = ProjectStatus::Finished;
            }
            snapshot.clear();
        });

        let id = store.create("T", "D", 1);

        let project = store.get(&id).unwrap();
        assert_eq!(project.title, "T");
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mutating_returned_snapshot_does_not_touch_store() {
        let mut store = ProjectStore::new();
        store.create("T", "D", 1);

        let mut snapshot = store.snapshot();
        snapshot[0].people = 99;
        snapshot.push(snapshot[0].clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].people, 1);
    }

    #[test]
    fn new_store_is_empty() {
        let store = ProjectStore::default();
        assert!(store.is_empty());
        assert_eq!(store.listener_count(), 0);
    }

    // ==========================================================================
    // Property tests
    // ==========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn length_matches_creates_and_ids_are_unique(
                titles in proptest::collection::vec("[a-z]{0,6}", 0..40)
            ) {
                let mut store = ProjectStore::new();
                for title in &titles {
                    store.create(title.clone(), "", 1);
                }

                let snapshot = store.snapshot();
                prop_assert_eq!(snapshot.len(), titles.len());

                let ids: HashSet<_> = snapshot.iter().map(|p| p.id.clone()).collect();
                prop_assert_eq!(ids.len(), titles.len());
            }

            #[test]
            fn notifications_match_effective_moves(
                moves in proptest::collection::vec((0usize..5, any::<bool>()), 0..30)
            ) {
                let mut store = ProjectStore::new();
                let ids: Vec<_> = (0..5).map(|n| store.create(format!("p{n}"), "", 1)).collect();
                let calls = recorder(&mut store);

                let mut expected = vec![ProjectStatus::Active; ids.len()];
                let mut expected_calls = 0;
                for (index, finished) in moves {
                    let status = if finished { ProjectStatus::Finished } else { ProjectStatus::Active };
                    let changed = store.move_project(&ids[index], status);
                    prop_assert_eq!(changed, expected[index] != status);
                    if changed {
                        expected[index] = status;
                        expected_calls += 1;
                    }
                }

                prop_assert_eq!(calls.borrow().len(), expected_calls);
                let statuses: Vec<_> = store.snapshot().into_iter().map(|p| p.status).collect();
                prop_assert_eq!(statuses, expected);
            }
        }
    }
}
