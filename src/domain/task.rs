use serde::{Deserialize, Serialize};

/// Number of task slots. The collection never grows or shrinks.
pub const TASK_COUNT: usize = 6;

/// Slot identifier, 1 through 6
pub type TaskId = u32;

/// One of the six daily task slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Revenue generating activity flag
    #[serde(rename = "isRGA", default)]
    pub is_revenue_generating: bool,
}

impl Task {
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            name: String::new(),
            is_revenue_generating: false,
        }
    }

    /// Same task with a different name
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Same task with the RGA flag flipped
    pub fn with_revenue_toggled(&self) -> Self {
        Self {
            is_revenue_generating: !self.is_revenue_generating,
            ..self.clone()
        }
    }
}

/// The fixed six-slot collection, ordered by id ascending
pub type TaskList = [Task; TASK_COUNT];

/// Six empty tasks with ids 1..=6
pub fn default_tasks() -> TaskList {
    std::array::from_fn(|idx| Task::new(idx as TaskId + 1))
}

/// Check that a list holds ids 1..=6 in order
pub fn has_canonical_ids(tasks: &[Task]) -> bool {
    tasks.len() == TASK_COUNT
        && tasks
            .iter()
            .enumerate()
            .all(|(idx, task)| task.id == idx as TaskId + 1)
}

/// Copy of `tasks` with the entry matching `id` replaced by `f(entry)`.
/// Unknown ids leave the collection untouched.
pub fn replace_task<F>(tasks: &TaskList, id: TaskId, f: F) -> TaskList
where
    F: Fn(&Task) -> Task,
{
    std::array::from_fn(|idx| {
        let task = &tasks[idx];
        if task.id == id {
            f(task)
        } else {
            task.clone()
        }
    })
}
