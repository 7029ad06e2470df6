//! Chat area
//!
//! Displays the transcript of the active room.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use roomline_core::{Classification, Message, SessionView};

const BORDER_SIZE: u16 = 2;
const CONTINUATION_INDENT: &str = "  ";

/// Render the chat area.
pub fn render(frame: &mut Frame, view: &SessionView, area: Rect) {
    let title = view.active_room().map_or_else(|| " No Room ".to_string(), |room| format!(" #{room} "));
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if view.active_room().is_none() && view.transcript().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Join a room to start chatting",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        view.transcript().iter().flat_map(message_lines).map(ListItem::new).collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

/// One line per body line. The first carries time and sender; the rest are
/// indented.
fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let mut body = message.body.lines();
    let first = body.next().unwrap_or_default().to_owned();

    let mut head = Vec::with_capacity(4);
    if let Some(time) = message.timestamp.as_deref().and_then(clock) {
        head.push(Span::styled(format!("{time} "), Style::default().fg(Color::DarkGray)));
    }
    head.push(Span::styled(format!("{}:", message.sender), sender_style(message.classification)));
    head.push(Span::raw(" "));
    head.push(Span::styled(first, body_style(message.classification)));

    let mut lines = vec![Line::from(head)];
    lines.extend(body.map(|rest| {
        Line::from(Span::styled(
            format!("{CONTINUATION_INDENT}{rest}"),
            body_style(message.classification),
        ))
    }));
    lines
}

/// `HH:MM` from an ISO-8601 timestamp.
fn clock(timestamp: &str) -> Option<&str> {
    timestamp.get(11..16)
}

fn sender_style(classification: Classification) -> Style {
    let color = match classification {
        Classification::Own => Color::Green,
        Classification::Other => Color::Cyan,
        Classification::System => Color::DarkGray,
        Classification::Private => Color::Magenta,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn body_style(classification: Classification) -> Style {
    match classification {
        Classification::System => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        Classification::Private => Style::default().fg(Color::Magenta),
        Classification::Own | Classification::Other => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn multiline_body_is_indented() {
        let message = Message::new("bob", "first\nsecond", Classification::Other);
        let lines: Vec<_> = message_lines(&message).iter().map(plain).collect();
        assert_eq!(lines, ["bob: first", "  second"]);
    }

    #[test]
    fn timestamp_shows_clock_only() {
        let message = Message::system("bob has joined the room")
            .with_timestamp(Some("2024-05-01T17:04:59.123456".into()));
        let lines: Vec<_> = message_lines(&message).iter().map(plain).collect();
        assert_eq!(lines, ["17:04 System: bob has joined the room"]);
    }

    #[test]
    fn short_timestamp_is_skipped() {
        assert_eq!(clock("17:04"), None);
    }
}
