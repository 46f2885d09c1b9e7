//! Create-task form rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, CreateField};

/// Render the create form: description input plus owner and status pickers.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let field_style = |field: CreateField| {
        if app.create.field == field {
            theme::highlighted()
        } else {
            theme::dimmed()
        }
    };

    let description = if app.create.description.is_empty() {
        Span::styled("(type a description)", theme::dimmed())
    } else {
        Span::styled(app.create.description.clone(), theme::normal())
    };

    let owner = app
        .create
        .owner_index
        .and_then(|i| app.snapshot.users.get(i))
        .map_or_else(
            || "Unassigned".to_string(),
            |user| user.full_name.clone(),
        );

    let lines = vec![
        Line::from(vec![
            Span::styled("Description: ", field_style(CreateField::Description)),
            description,
        ]),
        Line::from(vec![
            Span::styled("Owner: ", field_style(CreateField::Owner)),
            Span::styled(owner, theme::normal()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", field_style(CreateField::Status)),
            Span::styled(app.create.status.to_string(), theme::normal()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" New task ", theme::bold()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
