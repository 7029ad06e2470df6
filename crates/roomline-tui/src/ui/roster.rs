//! Roster sidebar
//!
//! Displays who is online. The local identity is annotated and never
//! selectable; the selected member is highlighted while the roster has
//! focus.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};
use roomline_core::SessionView;

const SELF_SUFFIX: &str = " (you)";

/// Render the roster sidebar.
pub fn render(frame: &mut Frame, view: &SessionView, area: Rect) {
    let selected = if view.composer_focused() { None } else { view.roster_cursor() };

    let items: Vec<ListItem> = view
        .roster()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let line = if entry.is_self {
                Line::styled(format!("{}{SELF_SUFFIX}", entry.name), Style::default().fg(Color::DarkGray))
            } else if selected == Some(index) {
                Line::styled(entry.name.clone(), Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Line::raw(entry.name.clone())
            };
            ListItem::new(line)
        })
        .collect();

    let title = format!(" Online ({}) ", view.roster().len());
    let block = Block::default().borders(Borders::ALL).title(title);
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
