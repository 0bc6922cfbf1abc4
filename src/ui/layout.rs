use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: task list with the timer panel inline
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Task list
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        list_area: chunks[1],
    }
}

/// Width of the floating dismiss control
pub const DISMISS_WIDTH: u16 = 24;
/// Height of the floating dismiss control
pub const DISMISS_HEIGHT: u16 = 3;

/// Bottom-right corner area for the floating dismiss control
pub fn create_dismiss_area(area: Rect) -> Rect {
    let width = DISMISS_WIDTH.min(area.width);
    let height = DISMISS_HEIGHT.min(area.height);

    Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    )
}
