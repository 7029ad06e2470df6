//! UI rendering
//!
//! Rendering functions that turn a [`SessionView`] into terminal output
//! using ratatui widgets. All functions are pure (no I/O), taking the view
//! and drawing into a frame.

mod chat;
mod input;
mod rooms;
mod roster;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use roomline_core::SessionView;

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &SessionView) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(input::height(view)),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, view, *main_area);
    input::render(frame, view, *input_area);
    status::render(frame, view, *status_area);
}

/// Render the main area (rooms sidebar, transcript, roster).
fn render_main_area(frame: &mut Frame, view: &SessionView, area: Rect) {
    const ROOM_SIDEBAR_WIDTH: u16 = 14;
    const CHAT_AREA_MIN_WIDTH: u16 = 20;
    const ROSTER_WIDTH: u16 = 18;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ROOM_SIDEBAR_WIDTH),
            Constraint::Min(CHAT_AREA_MIN_WIDTH),
            Constraint::Length(ROSTER_WIDTH),
        ])
        .split(area);

    let [rooms_area, chat_area, roster_area] = chunks.as_ref() else {
        return;
    };

    rooms::render(frame, view, *rooms_area);
    chat::render(frame, view, *chat_area);
    roster::render(frame, view, *roster_area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use roomline_core::{
        Classification, ConnectionState, Identity, Message, RosterEntry, SessionConfig, ViewChange,
    };

    use super::*;

    pub(super) fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                let row: String = (0..area.width).map(|x| buffer[(x, y)].symbol()).collect();
                row.trim_end().to_owned()
            })
            .collect()
    }

    fn draw(view: &SessionView, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, view)).unwrap();
        rows(terminal.backend().buffer())
    }

    fn view() -> SessionView {
        SessionView::new(&Identity::new("me"), &SessionConfig::default().rooms)
    }

    #[test]
    fn empty_view_prompts_to_join() {
        let screen = draw(&view(), 80, 16).join("\n");
        assert!(screen.contains("No Room"));
        assert!(screen.contains("Join a room to start chatting"));
        assert!(screen.contains(" General"));
        assert!(screen.contains("Disconnected"));
    }

    #[test]
    fn active_room_and_transcript_are_drawn() {
        let mut view = view();
        view.apply(ViewChange::ConnectionChanged(ConnectionState::Connected));
        view.apply(ViewChange::RoomHighlighted("Tech".into()));
        view.apply(ViewChange::EntryAppended(
            Message::new("bob", "hello there", Classification::Other)
                .with_timestamp(Some("2024-05-01T09:30:12".into())),
        ));
        view.apply(ViewChange::EntryAppended(Message::private_echo("amy", "psst")));
        view.apply(ViewChange::RosterReplaced(vec![
            RosterEntry { name: "bob".into(), is_self: false },
            RosterEntry { name: "me".into(), is_self: true },
        ]));

        let screen = draw(&view, 90, 16);
        let joined = screen.join("\n");
        assert!(screen.iter().any(|row| row.contains(">Tech")));
        assert!(joined.contains("09:30 bob: hello there"));
        assert!(joined.contains("To amy: psst"));
        assert!(joined.contains("me (you)"));
        assert!(joined.contains("Online (2)"));
    }

    #[test]
    fn long_transcript_keeps_latest_visible() {
        let mut view = view();
        view.apply(ViewChange::RoomHighlighted("General".into()));
        for n in 0..40 {
            view.apply(ViewChange::EntryAppended(Message::new(
                "bob",
                format!("line {n}"),
                Classification::Other,
            )));
        }

        let joined = draw(&view, 80, 16).join("\n");
        assert!(joined.contains("line 39"));
        assert!(!joined.contains("line 0"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut view = view();
        view.apply(ViewChange::ComposerChanged {
            text: "a\nb\nc\nd\ne".into(),
            cursor: 9,
            focused: true,
        });
        draw(&view, 10, 3);
    }
}
