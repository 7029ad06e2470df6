//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples session logic from terminal libraries so key handling runs the
/// same under crossterm and in simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (submit).
    Enter,
    /// Enter with a modifier held (insert newline, never submits).
    ModifiedEnter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (next room).
    Tab,
    /// Shift+Tab (previous room).
    BackTab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key (roster cursor up).
    Up,
    /// Down arrow key (roster cursor down).
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
    /// Start a private message to the roster entry under the cursor.
    Mention,
}
