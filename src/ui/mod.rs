pub mod dismiss_control;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::AppState;
use crate::persistence::KeyValueStore;
use dismiss_control::render_dismiss_control;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render<S: KeyValueStore>(f: &mut Frame, app: &mut AppState<S>) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);

    // Floating control on top while a name field has focus
    if app.is_input_focused() {
        render_dismiss_control(f, size);
    }
}
