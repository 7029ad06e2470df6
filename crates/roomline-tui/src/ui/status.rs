//! Status bar
//!
//! Displays connection state, identity, active room and the latest status
//! message.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use roomline_core::{ConnectionState, SessionView};

const SEPARATOR: &str = " | ";

/// Render the status bar.
pub fn render(frame: &mut Frame, view: &SessionView, area: Rect) {
    let connection_status = match view.connection() {
        ConnectionState::Disconnected => Span::styled("Disconnected", Style::default().fg(Color::Red)),
        ConnectionState::Connecting => Span::styled("Connecting...", Style::default().fg(Color::Yellow)),
        ConnectionState::Connected => {
            Span::styled("Connected", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        },
    };

    let mut info = format!("{SEPARATOR}{}", view.identity());
    if let Some(room) = view.active_room() {
        info.push_str(&format!("{SEPARATOR}#{room}"));
    }
    if let Some(status) = view.status() {
        info.push_str(&format!("{SEPARATOR}{status}"));
    }

    let status_line = Line::from(vec![Span::raw(" "), connection_status, Span::raw(info)]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use roomline_core::{Identity, ViewChange};

    use super::*;
    use crate::ui::tests::rows;

    fn status_row(view: &SessionView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal.draw(|frame| render(frame, view, frame.area())).unwrap();
        rows(terminal.backend().buffer()).remove(0).trim_start().to_owned()
    }

    #[test]
    fn shows_connection_identity_room_and_status() {
        let mut view = SessionView::new(&Identity::new("me"), &["General".into()]);
        insta::assert_snapshot!(status_row(&view), @"Disconnected | me");

        view.apply(ViewChange::ConnectionChanged(ConnectionState::Connected));
        view.apply(ViewChange::RoomHighlighted("General".into()));
        view.apply(ViewChange::StatusChanged("Reconnected".into()));
        insta::assert_snapshot!(status_row(&view), @"Connected | me | #General | Reconnected");
    }
}
