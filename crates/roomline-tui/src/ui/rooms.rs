//! Rooms sidebar
//!
//! Displays the room directory with the active room marked. Labels are the
//! exact room names.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use roomline_core::SessionView;

const ACTIVE_PREFIX: &str = ">";
const INACTIVE_PREFIX: &str = " ";

/// Render the rooms sidebar.
pub fn render(frame: &mut Frame, view: &SessionView, area: Rect) {
    let items: Vec<ListItem> = view
        .rooms()
        .iter()
        .map(|room| {
            let (prefix, style) = if room.active {
                (ACTIVE_PREFIX, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                (INACTIVE_PREFIX, Style::default())
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(room.name.as_str(), style),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Rooms ");
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
