//! Terminal UI rendering.

pub mod columns;
pub mod create_form;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{App, PanelFocus};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Create form on top, board in the middle, status bar at the bottom.
    let form_height = if app.focus == PanelFocus::CreateForm {
        5
    } else {
        0
    };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    if app.focus == PanelFocus::CreateForm {
        create_form::render(frame, main_chunks[0], app);
    }
    columns::render(frame, main_chunks[1], app);
    status_bar::render(frame, main_chunks[2], app);
}
