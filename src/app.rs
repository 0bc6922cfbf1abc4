use crate::domain::{FocusTimer, Task, TaskId, TaskList, TimerPhase, UiMode, TASK_COUNT};
use crate::persistence::{FileStore, KeyValueStore, TaskStore};
use crate::ticker::Deferred;
use std::time::{Duration, Instant};

/// Delay before a focused row is scrolled to the middle of the list
pub const SCROLL_DELAY_MS: u64 = 300;

/// Main application state
pub struct AppState<S: KeyValueStore = FileStore> {
    pub store: TaskStore<S>,
    pub timer: FocusTimer,
    pub ui_mode: UiMode,
    /// Highlighted row (0-based), independent of the active task
    pub cursor: usize,
    /// Centering scroll waiting for its delay to pass
    pub pending_scroll: Option<Deferred<usize>>,
    /// Row the list should center on at the next render
    pub scroll_target: Option<usize>,
    /// First visible line of the list, maintained by the renderer
    pub list_scroll: u16,
}

impl<S: KeyValueStore> AppState<S> {
    /// Create state showing the default tasks. Call `hydrate` to load storage.
    pub fn new(storage: S) -> Self {
        Self {
            store: TaskStore::new(storage),
            timer: FocusTimer::new(),
            ui_mode: UiMode::Normal,
            cursor: 0,
            pending_scroll: None,
            scroll_target: None,
            list_scroll: 0,
        }
    }

    /// Load persisted tasks; every later change is written back
    pub fn hydrate(&mut self) {
        self.store.load();
        tracing::info!("tasks loaded");
    }

    pub fn tasks(&self) -> &TaskList {
        self.store.tasks()
    }

    pub fn active_task_id(&self) -> Option<TaskId> {
        self.timer.active_task_id()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.timer.seconds_remaining()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_input_focused(&self) -> bool {
        self.ui_mode == UiMode::EditingName
    }

    pub fn timer_phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    /// Task under the cursor
    pub fn cursor_task(&self) -> &Task {
        &self.store.tasks()[self.cursor]
    }

    /// Move cursor up
    pub fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor down
    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < TASK_COUNT {
            self.cursor += 1;
        }
    }

    /// Select a task, or deselect it if it is already active
    pub fn select(&mut self, id: TaskId) {
        if self.store.task(id).is_none() {
            return;
        }
        self.timer.select(id);
    }

    /// Select (or deselect) the task under the cursor
    pub fn select_cursor(&mut self) {
        let id = self.cursor_task().id;
        self.select(id);
    }

    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    /// Toggle the RGA flag; selection and timer are untouched
    pub fn toggle_revenue(&mut self, id: TaskId) {
        self.store.toggle_revenue(id);
    }

    pub fn toggle_revenue_at_cursor(&mut self) {
        let id = self.cursor_task().id;
        self.toggle_revenue(id);
    }

    /// Replace a task name; selection and timer are untouched
    pub fn rename(&mut self, id: TaskId, name: &str) {
        self.store.rename(id, name);
    }

    /// Give the cursor row's name field focus
    pub fn focus_name(&mut self) {
        self.focus_name_at(Instant::now());
    }

    pub fn focus_name_at(&mut self, now: Instant) {
        self.ui_mode = UiMode::EditingName;
        self.pending_scroll = Some(Deferred::after(
            now,
            Duration::from_millis(SCROLL_DELAY_MS),
            self.cursor,
        ));
    }

    /// Drop focus from the name field (the dismiss control)
    pub fn blur(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Append a character to the focused name
    pub fn input_char(&mut self, c: char) {
        if !self.is_input_focused() {
            return;
        }
        let task = self.cursor_task();
        let mut name = task.name.clone();
        name.push(c);
        let id = task.id;
        self.rename(id, &name);
    }

    /// Remove the last character of the focused name
    pub fn input_backspace(&mut self) {
        if !self.is_input_focused() {
            return;
        }
        let task = self.cursor_task();
        let mut name = task.name.clone();
        if name.pop().is_none() {
            return;
        }
        let id = task.id;
        self.rename(id, &name);
    }

    /// Advance the countdown and run due deferred actions
    pub fn tick(&mut self, now: Instant) {
        self.timer.poll(now);

        if self.pending_scroll.as_ref().is_some_and(|d| d.is_due(now)) {
            if let Some(deferred) = self.pending_scroll.take() {
                self.scroll_target = Some(deferred.into_action());
            }
        }
    }
}
