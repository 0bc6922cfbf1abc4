use crate::app::AppState;
use crate::domain::{format_time, Task, TimerPhase};
use crate::persistence::KeyValueStore;
use crate::ui::styles::{
    active_style, border_style, control_style, default_style, disabled_style, done_style,
    paused_style, placeholder_style, rga_style, running_style, selected_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Indentation of the timer panel under the active row
const PANEL_INDENT: &str = "         ";

/// Shown instead of an empty name
pub const EMPTY_NAME_PLACEHOLDER: &str = "(empty slot)";

/// Lines of the list plus the first line of each task row
struct ListLines {
    lines: Vec<Line<'static>>,
    row_starts: Vec<u16>,
}

/// Render the six task rows, with the timer panel under the active one
pub fn render_list_pane<S: KeyValueStore>(f: &mut Frame, app: &mut AppState<S>, area: Rect) {
    let ListLines { lines, row_starts } = build_lines(app);

    let inner_height = area.height.saturating_sub(2);
    app.list_scroll = next_scroll(
        app.list_scroll,
        app.scroll_target.take().map(|row| row_starts[row]),
        row_starts[app.cursor],
        lines.len() as u16,
        inner_height,
    );

    let rga_count = app
        .tasks()
        .iter()
        .filter(|t| t.is_revenue_generating)
        .count();
    let date = Local::now().format("%a %b %d");
    let title = format!(" Today's Six ({}) · {} RGA ", date, rga_count);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .scroll((app.list_scroll, 0));

    f.render_widget(paragraph, area);
}

fn build_lines<S: KeyValueStore>(app: &AppState<S>) -> ListLines {
    let mut lines = Vec::new();
    let mut row_starts = Vec::new();
    let active = app.active_task_id();

    for (idx, task) in app.tasks().iter().enumerate() {
        row_starts.push(lines.len() as u16);

        let is_active = active == Some(task.id);
        let is_cursor = idx == app.cursor;
        let is_editing = is_cursor && app.is_input_focused();
        lines.push(task_line(task, is_active, is_cursor, is_editing));

        if is_active {
            lines.extend(timer_panel_lines(app));
        }
        lines.push(Line::raw(""));
    }

    ListLines { lines, row_starts }
}

/// Single row: " ▶ 3  [$] Write report"
fn task_line(task: &Task, is_active: bool, is_cursor: bool, is_editing: bool) -> Line<'static> {
    let pick = |base: Style| if is_cursor { selected_style() } else { base };

    let marker = if is_active { " ▶ " } else { "   " };
    let mut spans = vec![
        Span::styled(marker.to_string(), pick(active_style())),
        Span::styled(format!("{}  ", task.id), pick(default_style())),
    ];

    if task.is_revenue_generating {
        spans.push(Span::styled("[$] ".to_string(), pick(rga_style())));
    } else {
        spans.push(Span::styled("[ ] ".to_string(), pick(default_style())));
    }

    let name_base = if is_active { active_style() } else { default_style() };
    if is_editing {
        spans.push(Span::styled(task.name.clone(), pick(name_base)));
        spans.push(Span::styled("█".to_string(), pick(name_base)));
    } else if task.name.is_empty() {
        spans.push(Span::styled(
            EMPTY_NAME_PLACEHOLDER.to_string(),
            pick(placeholder_style()),
        ));
    } else {
        spans.push(Span::styled(task.name.clone(), pick(name_base)));
    }

    Line::from(spans)
}

/// Countdown and Start/Pause controls for the active task
fn timer_panel_lines<S: KeyValueStore>(app: &AppState<S>) -> Vec<Line<'static>> {
    let phase = app.timer_phase();
    let clock_style = match phase {
        TimerPhase::Running => running_style(),
        TimerPhase::Expired => done_style(),
        _ => paused_style(),
    };

    let control = |label: &str, enabled: bool| {
        let style = if enabled { control_style() } else { disabled_style() };
        Span::styled(label.to_string(), style)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(PANEL_INDENT),
            Span::styled(format!("⏱ {}", format_time(app.seconds_remaining())), clock_style),
            Span::raw("  "),
            Span::styled(phase.to_tag(), clock_style),
        ]),
        Line::from(vec![
            Span::raw(PANEL_INDENT),
            control("[s] Start", app.timer.can_start()),
            Span::raw("   "),
            control("[p] Pause", app.timer.can_pause()),
        ]),
    ];

    if phase == TimerPhase::Expired {
        lines.push(Line::from(vec![
            Span::raw(PANEL_INDENT),
            Span::styled("Session complete", done_style()),
        ]));
    }

    lines
}

/// Scroll offset for the next frame: center on `center_line` when given,
/// then keep the cursor line visible and stay within the content
fn next_scroll(
    current: u16,
    center_line: Option<u16>,
    cursor_line: u16,
    total_lines: u16,
    viewport: u16,
) -> u16 {
    let mut scroll = match center_line {
        Some(line) => line.saturating_sub(viewport / 2),
        None => current,
    };

    if cursor_line < scroll {
        scroll = cursor_line;
    } else if viewport > 0 && cursor_line >= scroll + viewport {
        scroll = cursor_line + 1 - viewport;
    }

    scroll.min(total_lines.saturating_sub(viewport))
}
