//! Input field
//!
//! Displays the composition buffer with cursor. Multi-line compositions grow
//! the field up to a few lines, then scroll with the cursor.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use roomline_core::SessionView;

const PROMPT: &str = "> ";
const CONTINUATION: &str = "  ";
const PROMPT_WIDTH: u16 = 2;
const BORDER_SIZE: u16 = 2;
const MAX_VISIBLE_LINES: usize = 4;
const RIGHT_PADDING: u16 = 1; // inside right border

/// Height of the input field, borders included.
pub fn height(view: &SessionView) -> u16 {
    let lines = view.composer().split('\n').count().clamp(1, MAX_VISIBLE_LINES);
    lines as u16 + BORDER_SIZE
}

/// Render the input field.
pub fn render(frame: &mut Frame, view: &SessionView, area: Rect) {
    let (cursor_line, cursor_column) = cursor_position(view.composer(), view.composer_cursor());
    let first_visible = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);

    let lines: Vec<Line> = view
        .composer()
        .split('\n')
        .enumerate()
        .skip(first_visible)
        .take(MAX_VISIBLE_LINES)
        .map(|(index, text)| {
            let prefix = if index == 0 { PROMPT } else { CONTINUATION };
            Line::raw(format!("{prefix}{text}"))
        })
        .collect();

    let (title, border_style) = if view.composer_focused() {
        (" Message ", Style::default())
    } else {
        (" Message (Enter: whisper to selected) ", Style::default().fg(Color::DarkGray))
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style).title(title);
    let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::White)).block(block);

    frame.render_widget(paragraph, area);

    if !view.composer_focused() {
        return;
    }

    // inside left border, after the prompt
    let available_width = area.width.saturating_sub(1 + PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = (cursor_column as u16).min(available_width);
    let cursor_x = area.x.saturating_add(1 + PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(1).saturating_add((cursor_line - first_visible) as u16);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let max_y = area.y.saturating_add(area.height).saturating_sub(1);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y.min(max_y)));
}

/// Line index and column (both in chars) of a char-indexed cursor.
fn cursor_position(text: &str, cursor: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for c in text.chars().take(cursor) {
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_position_counts_chars_per_line() {
        assert_eq!(cursor_position("", 0), (0, 0));
        assert_eq!(cursor_position("héllo", 3), (0, 3));
        assert_eq!(cursor_position("ab\ncd", 3), (1, 0));
        assert_eq!(cursor_position("ab\ncd", 5), (1, 2));
    }
}
