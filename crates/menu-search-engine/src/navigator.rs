//! Keyboard navigation over search results.
//!
//! The cursor wraps: moving down from the last result selects the first,
//! moving up from the first selects the last.

use menu_search_core::SearchResult;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A key press the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Move(Direction),
    /// Open the selected result.
    Activate,
    /// Dismiss the search.
    Close,
}

impl NavKey {
    /// Map a key name (`"ArrowDown"`, `"tab"`, ...) to a navigation key.
    ///
    /// Tab moves down and Shift+Tab moves up, like the arrow keys. Keys with
    /// no meaning for the search box map to `None`.
    pub fn from_key(key: &str, shift: bool) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "arrowdown" | "down" => Some(NavKey::Move(Direction::Down)),
            "arrowup" | "up" => Some(NavKey::Move(Direction::Up)),
            "tab" if shift => Some(NavKey::Move(Direction::Up)),
            "tab" => Some(NavKey::Move(Direction::Down)),
            "enter" | "return" => Some(NavKey::Activate),
            "escape" | "esc" => Some(NavKey::Close),
            _ => None,
        }
    }
}

/// Step `current` one position in `direction`, wrapping over `len` items.
///
/// Returns 0 when there is nothing to select.
pub fn advance(current: usize, direction: Direction, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let current = current % len;
    match direction {
        Direction::Down => (current + 1) % len,
        Direction::Up => (current + len - 1) % len,
    }
}

/// Result under the cursor, if any.
pub fn activate(cursor: usize, results: &[SearchResult]) -> Option<&SearchResult> {
    results.get(cursor)
}

/// Selection cursor over the current result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardNavigator {
    cursor: usize,
}

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor and return its new position.
    pub fn advance(&mut self, direction: Direction, len: usize) -> usize {
        self.cursor = advance(self.cursor, direction, len);
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn selected<'a>(&self, results: &'a [SearchResult]) -> Option<&'a SearchResult> {
        activate(self.cursor, results)
    }
}
