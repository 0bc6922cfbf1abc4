use crate::ui::{
    layout::create_dismiss_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the floating control that drops focus from the name field
pub fn render_dismiss_control(f: &mut Frame, area: Rect) {
    let control_area = create_dismiss_area(area);

    // Clear the area behind the control
    f.render_widget(Clear, control_area);

    let line = Line::from(vec![
        Span::styled(" [Esc]", modal_title_style()),
        Span::raw(" Done editing"),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .style(modal_bg_style()),
    );

    f.render_widget(paragraph, control_area);
}
