//! Composition field.

/// Text being composed, with a cursor and focus flag.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    buffer: String,
    cursor: usize,
    focused: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self { buffer: String::new(), cursor: 0, focused: true }
    }
}

impl Composer {
    /// Create an empty, focused composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether keystrokes go to the composer.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give or take focus.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Insert `c` at the cursor and focus.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
        self.focused = true;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Move the cursor one character left.
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Cursor to start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Cursor to end.
    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the text, move the cursor to the end and focus.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.char_len();
        self.focused = true;
    }

    /// Take the text out, leaving the composer empty. Focus is unchanged.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}
