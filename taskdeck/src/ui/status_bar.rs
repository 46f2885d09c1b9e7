//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.editing.is_some() {
        "Enter: save | Esc: cancel"
    } else {
        match app.focus {
            PanelFocus::Board => {
                "hjkl/arrows: navigate | Shift-←→: move | e: edit | u: owner | d: delete | n: new | r: refresh | q: quit"
            }
            PanelFocus::CreateForm => "Tab: next field | ←→: pick | Enter: create | Esc: back",
        }
    };

    let mut spans = vec![Span::styled("Taskdeck", theme::bold()), Span::raw(" | ")];

    if app.snapshot.is_loading() {
        spans.push(Span::styled("Refreshing...", theme::dimmed()));
        spans.push(Span::raw(" | "));
    }
    if let Some(message) = app.messages.last() {
        spans.push(Span::styled(message.clone(), theme::error()));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
