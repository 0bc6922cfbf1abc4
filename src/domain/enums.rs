/// Phase of the focus timer, without the data each phase carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// No task selected
    Idle,
    /// Task selected, countdown not running
    Stopped,
    /// Task selected, countdown running
    Running,
    /// Countdown reached zero; only a new selection resets it
    Expired,
}

impl TimerPhase {
    /// Short label for the timer panel
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Stopped => "PAUSED",
            Self::Running => "RUNNING",
            Self::Expired => "DONE",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// A name field has focus; keys edit the name
    EditingName,
}
