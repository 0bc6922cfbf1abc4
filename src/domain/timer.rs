use super::enums::TimerPhase;
use super::task::TaskId;
use crate::ticker::Ticker;
use std::time::Instant;

/// Length of one focus session in seconds (25 minutes)
pub const FOCUS_SECONDS: u32 = 1500;

/// Selection and countdown state.
///
/// The tick source lives in `Running` only. Every transition replaces the
/// whole state, so leaving `Running` drops the ticker before any new one
/// can be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Stopped { task_id: TaskId, remaining: u32 },
    Running { task_id: TaskId, remaining: u32, ticker: Ticker },
    Expired { task_id: TaskId },
}

/// Controller for the active task and its focus countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    state: TimerState,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        match self.state {
            TimerState::Idle => TimerPhase::Idle,
            TimerState::Stopped { .. } => TimerPhase::Stopped,
            TimerState::Running { .. } => TimerPhase::Running,
            TimerState::Expired { .. } => TimerPhase::Expired,
        }
    }

    pub fn active_task_id(&self) -> Option<TaskId> {
        match self.state {
            TimerState::Idle => None,
            TimerState::Stopped { task_id, .. }
            | TimerState::Running { task_id, .. }
            | TimerState::Expired { task_id } => Some(task_id),
        }
    }

    pub fn seconds_remaining(&self) -> u32 {
        match self.state {
            TimerState::Idle => FOCUS_SECONDS,
            TimerState::Stopped { remaining, .. } | TimerState::Running { remaining, .. } => {
                remaining
            }
            TimerState::Expired { .. } => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Start is only offered while stopped with time left
    pub fn can_start(&self) -> bool {
        matches!(self.state, TimerState::Stopped { remaining, .. } if remaining > 0)
    }

    pub fn can_pause(&self) -> bool {
        self.is_running()
    }

    /// Select `id`, or deselect it when it is already active.
    /// Either way the countdown is stopped and reset.
    pub fn select(&mut self, id: TaskId) {
        if self.active_task_id() == Some(id) {
            tracing::debug!(task_id = id, "deselected task");
            self.state = TimerState::Idle;
        } else {
            tracing::debug!(task_id = id, "selected task");
            self.state = TimerState::Stopped {
                task_id: id,
                remaining: FOCUS_SECONDS,
            };
        }
    }

    /// Start counting down from the current remaining time
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if let TimerState::Stopped { task_id, remaining } = self.state {
            if remaining == 0 {
                return;
            }
            tracing::debug!(task_id, remaining, "timer started");
            self.state = TimerState::Running {
                task_id,
                remaining,
                ticker: Ticker::start(now),
            };
        }
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&mut self) {
        if let TimerState::Running {
            task_id, remaining, ..
        } = self.state
        {
            tracing::debug!(task_id, remaining, "timer paused");
            self.state = TimerState::Stopped { task_id, remaining };
        }
    }

    /// One second elapsed. Ignored unless running.
    pub fn tick(&mut self) {
        let TimerState::Running {
            task_id, remaining, ..
        } = &mut self.state
        else {
            return;
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            let task_id = *task_id;
            tracing::info!(task_id, "focus session complete");
            self.state = TimerState::Expired { task_id };
        }
    }

    /// Fire every tick that became due up to `now`. Returns the number of
    /// ticks applied.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let due = match &mut self.state {
            TimerState::Running { ticker, .. } => ticker.poll(now),
            _ => return 0,
        };

        let mut applied = 0;
        for _ in 0..due {
            if !self.is_running() {
                break;
            }
            self.tick();
            applied += 1;
        }
        applied
    }
}

/// Format seconds as "MM:SS"
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
