//! Board column rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use taskdeck_api::{EnrichedTask, TaskStatus};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the three board columns side by side.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (chunk, status) in chunks.iter().zip(TaskStatus::ALL) {
        render_column(frame, *chunk, app, status);
    }
}

/// Render one column: title with task count, then the task cards.
fn render_column(frame: &mut Frame, area: Rect, app: &App, status: TaskStatus) {
    let tasks = app.snapshot.column(status);
    let focused = app.focus == PanelFocus::Board && app.selected_column == status;

    let items: Vec<ListItem> = if app.snapshot.tasks_loading && app.snapshot.tasks.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Loading tasks...",
            theme::dimmed(),
        )))]
    } else if let Some(error) = app.snapshot.error.as_deref() {
        let mut items = vec![ListItem::new(Line::from(Span::styled(
            error.to_string(),
            theme::error(),
        )))];
        items.extend(
            tasks
                .iter()
                .enumerate()
                .map(|(row, task)| card(app, task, focused && row == app.selected_row)),
        );
        items
    } else {
        tasks
            .iter()
            .enumerate()
            .map(|(row, task)| card(app, task, focused && row == app.selected_row))
            .collect()
    };

    let border_style = if focused {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {status} ({}) ", tasks.len()),
            theme::column_title(title_color(status)),
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(List::new(items).block(block), area);
}

/// Build the two-line card for one task: description, then owner.
fn card(app: &App, task: &EnrichedTask, is_selected: bool) -> ListItem<'static> {
    let description_line = match app.editing.as_ref() {
        Some(edit) if is_selected && edit.id == task.task.id => Line::from(Span::styled(
            format!("{}\u{2588}", edit.buffer),
            theme::editing(),
        )),
        _ => {
            let style = if is_selected {
                theme::selected()
            } else {
                theme::normal()
            };
            Line::from(Span::styled(task.task.description.clone(), style))
        }
    };

    let owner = task.user.as_ref().map_or_else(
        || "Unassigned".to_string(),
        |user| format!("@ {}", user.full_name),
    );
    let owner_line = Line::from(Span::styled(format!("  {owner}"), theme::dimmed()));

    ListItem::new(vec![description_line, owner_line])
}

const fn title_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => theme::TODO_TITLE,
        TaskStatus::Doing => theme::DOING_TITLE,
        TaskStatus::Done => theme::DONE_TITLE,
    }
}
