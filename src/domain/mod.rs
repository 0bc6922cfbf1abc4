pub mod enums;
pub mod task;
pub mod timer;

pub use enums::{TimerPhase, UiMode};
pub use task::{default_tasks, has_canonical_ids, replace_task, Task, TaskId, TaskList, TASK_COUNT};
#[cfg(test)]
pub use timer::FOCUS_SECONDS;
pub use timer::{format_time, FocusTimer};
