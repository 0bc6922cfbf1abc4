use super::storage::KeyValueStore;
use crate::domain::{default_tasks, has_canonical_ids, replace_task, Task, TaskId, TaskList};

/// Storage key holding the six tasks as a JSON array
pub const STORAGE_KEY: &str = "sixfocus.tasks";

/// Parse a persisted task array; None unless it holds exactly ids 1..=6 in order
pub fn parse_tasks(json: &str) -> Option<TaskList> {
    let tasks: Vec<Task> = serde_json::from_str(json).ok()?;
    if !has_canonical_ids(&tasks) {
        return None;
    }
    TaskList::try_from(tasks).ok()
}

pub fn serialize_tasks(tasks: &TaskList) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Owns the six tasks and mirrors every change to storage.
///
/// Until `load` runs the store shows the defaults and writes nothing, so a
/// first render never clobbers persisted data.
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    tasks: TaskList,
    hydrated: bool,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tasks: default_tasks(),
            hydrated: false,
        }
    }

    /// Read persisted tasks, falling back to defaults on any problem
    pub fn load(&mut self) -> &TaskList {
        self.tasks = match self.storage.get(STORAGE_KEY) {
            Ok(Some(json)) => parse_tasks(&json).unwrap_or_else(|| {
                tracing::debug!("persisted tasks malformed, using defaults");
                default_tasks()
            }),
            Ok(None) => default_tasks(),
            Err(e) => {
                tracing::debug!(error = %e, "could not read persisted tasks, using defaults");
                default_tasks()
            }
        };
        self.hydrated = true;
        &self.tasks
    }

    #[cfg(test)]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the name of task `id`. Any text is accepted, including empty.
    pub fn rename(&mut self, id: TaskId, name: &str) {
        let updated = replace_task(&self.tasks, id, |t| t.renamed(name));
        self.replace_all(updated);
    }

    /// Flip the revenue generating flag of task `id`
    pub fn toggle_revenue(&mut self, id: TaskId) {
        let updated = replace_task(&self.tasks, id, Task::with_revenue_toggled);
        self.replace_all(updated);
    }

    fn replace_all(&mut self, updated: TaskList) {
        if updated == self.tasks {
            return;
        }
        self.tasks = updated;
        self.on_change();
    }

    /// Best-effort write-through; failures are logged and dropped
    fn on_change(&mut self) {
        if !self.hydrated {
            return;
        }
        let json = match serialize_tasks(&self.tasks) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize tasks");
                return;
            }
        };
        if let Err(e) = self.storage.set(STORAGE_KEY, &json) {
            tracing::warn!(error = %e, "could not persist tasks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TASK_COUNT;
    use crate::persistence::storage::{FileStore, MemoryStore};
    use pretty_assertions::assert_eq;

    fn loaded(storage: MemoryStore) -> TaskStore<MemoryStore> {
        let mut store = TaskStore::new(storage);
        store.load();
        store
    }

    fn assert_defaults(tasks: &TaskList) {
        assert_eq!(tasks, &default_tasks());
    }

    #[test]
    fn test_load_without_data() {
        let store = loaded(MemoryStore::new());
        assert!(store.is_hydrated());
        assert_defaults(store.tasks());
    }

    #[test]
    fn test_load_invalid_json() {
        let store = loaded(MemoryStore::with_entry(STORAGE_KEY, "{not json"));
        assert_defaults(store.tasks());
    }

    #[test]
    fn test_load_non_array() {
        let store = loaded(MemoryStore::with_entry(STORAGE_KEY, r#"{"id":1}"#));
        assert_defaults(store.tasks());
    }

    #[test]
    fn test_load_wrong_length() {
        let mut five = default_tasks().to_vec();
        five.pop();
        let json = serde_json::to_string(&five).unwrap();

        let store = loaded(MemoryStore::with_entry(STORAGE_KEY, &json));
        assert_defaults(store.tasks());
    }

    #[test]
    fn test_load_wrong_shape() {
        let json = r#"[1, 2, 3, 4, 5, 6]"#;
        let store = loaded(MemoryStore::with_entry(STORAGE_KEY, json));
        assert_defaults(store.tasks());
    }

    #[test]
    fn test_load_valid_data() {
        let json = r#"[
            {"id":1,"name":"Call client","isRGA":true},
            {"id":2,"name":"","isRGA":false},
            {"id":3,"name":"Write report","isRGA":false},
            {"id":4,"name":"","isRGA":false},
            {"id":5,"name":"","isRGA":true},
            {"id":6,"name":"Gym","isRGA":false}
        ]"#;
        let store = loaded(MemoryStore::with_entry(STORAGE_KEY, json));

        assert_eq!(store.tasks()[0].name, "Call client");
        assert!(store.tasks()[0].is_revenue_generating);
        assert!(store.tasks()[4].is_revenue_generating);
        assert_eq!(store.tasks()[5].name, "Gym");
    }

    #[test]
    fn test_load_record_without_flag() {
        let json = r#"[
            {"id":1,"name":"Call client"},
            {"id":2,"name":"","isRGA":true},
            {"id":3,"name":""},
            {"id":4,"name":""},
            {"id":5,"name":""},
            {"id":6,"name":""}
        ]"#;
        let store = loaded(MemoryStore::with_entry(STORAGE_KEY, json));

        assert_eq!(store.tasks()[0].name, "Call client");
        assert!(!store.tasks()[0].is_revenue_generating);
        assert!(store.tasks()[1].is_revenue_generating);
    }

    #[test]
    fn test_roundtrip_through_file_store() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut store = TaskStore::new(FileStore::new(temp_dir.path()));
        store.load();
        store.rename(2, "Invoice");
        store.toggle_revenue(2);
        store.rename(6, "Plan tomorrow");
        let saved = store.tasks().clone();

        let mut reloaded = TaskStore::new(FileStore::new(temp_dir.path()));
        assert_eq!(reloaded.load(), &saved);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = loaded(MemoryStore::new());

        store.rename(1, "a");
        store.rename(1, "ab");
        store.toggle_revenue(3);
        assert_eq!(store.storage().writes(), 3);

        let json = store.storage().get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(parse_tasks(&json).as_ref(), Some(store.tasks()));
    }

    #[test]
    fn test_no_writes_before_hydration() {
        let mut store = TaskStore::new(MemoryStore::new());
        store.rename(1, "early");

        assert!(!store.is_hydrated());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_write_failure_is_ignored() {
        let mut store = loaded(MemoryStore::read_only());
        store.rename(4, "still works");
        store.toggle_revenue(4);

        let task = store.task(4).unwrap();
        assert_eq!(task.name, "still works");
        assert!(task.is_revenue_generating);
    }

    #[test]
    fn test_rename_allows_empty() {
        let mut store = loaded(MemoryStore::new());
        store.rename(2, "Something");
        store.rename(2, "");
        assert_eq!(store.task(2).unwrap().name, "");
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut store = loaded(MemoryStore::new());
        store.rename(7, "nope");
        store.toggle_revenue(0);

        assert_defaults(store.tasks());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = loaded(MemoryStore::new());
        store.toggle_revenue(5);
        assert!(store.task(5).unwrap().is_revenue_generating);
        store.toggle_revenue(5);
        assert!(!store.task(5).unwrap().is_revenue_generating);
    }

    #[test]
    fn test_mutations_keep_six_ordered_tasks() {
        let mut store = loaded(MemoryStore::new());
        for round in 0..3u32 {
            for id in 1..=TASK_COUNT as TaskId {
                store.rename(id, &format!("task {} round {}", id, round));
                if (id + round) % 2 == 0 {
                    store.toggle_revenue(id);
                }
                assert!(has_canonical_ids(store.tasks()));
            }
        }
    }
}
