//! Index entries and search results.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::action::{ActionRef, Navigation};
use crate::menu::MenuId;

/// What the search index stores for one actionable menu.
///
/// This is the menu itself without its subtree; the subtree is indexed
/// under its own paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: MenuId,
    pub name: String,
    pub action: ActionRef,

    /// Enclosing menu, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<MenuId>,

    /// Top-level app that owns this menu (itself for an app).
    pub app_id: MenuId,
}

impl MenuEntry {
    /// Build the navigation request for opening this entry.
    pub fn navigation(&self, path: &str) -> Navigation {
        Navigation {
            path: path.to_string(),
            action: self.action.clone(),
            action_id: self.action.target().ok().map(|t| t.id),
            menu_id: self.id,
            previous_menu_id: self.parent_id,
            app_id: self.app_id,
        }
    }
}

/// Half-open range of matched characters (char offsets, not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Merge sorted char positions into contiguous spans.
    pub fn from_positions(positions: &[usize]) -> Vec<MatchSpan> {
        let mut spans: Vec<MatchSpan> = Vec::new();
        for &pos in positions {
            match spans.last_mut() {
                Some(last) if last.end == pos => last.end += 1,
                _ => spans.push(MatchSpan::new(pos, pos + 1)),
            }
        }
        spans
    }
}

/// A run of path text, either matched by the query or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSegment {
    pub text: String,
    pub matched: bool,
}

/// Split `text` into alternating matched and unmatched segments.
///
/// Spans must be sorted and non-overlapping; spans past the end of the text
/// are clipped.
pub fn highlight(text: &str, spans: &[MatchSpan]) -> Vec<HighlightSegment> {
    let mut segments = Vec::new();
    let mut spans = spans.iter().peekable();
    let mut current = String::new();
    let mut current_matched = false;

    for (pos, ch) in text.chars().enumerate() {
        while spans.peek().is_some_and(|s| s.end <= pos) {
            spans.next();
        }
        let matched = spans.peek().is_some_and(|s| s.range().contains(&pos));

        if matched != current_matched && !current.is_empty() {
            segments.push(HighlightSegment {
                text: std::mem::take(&mut current),
                matched: current_matched,
            });
        }
        current_matched = matched;
        current.push(ch);
    }

    if !current.is_empty() {
        segments.push(HighlightSegment {
            text: current,
            matched: current_matched,
        });
    }

    segments
}

/// One ranked match of the query against the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Full menu path that matched.
    pub path: String,

    /// Fuzzy score; higher is better.
    pub score: u32,

    /// Matched characters of `path`.
    pub spans: Vec<MatchSpan>,

    pub entry: MenuEntry,
}

impl SearchResult {
    /// Structured highlight of the matched characters.
    pub fn highlight(&self) -> Vec<HighlightSegment> {
        highlight(&self.path, &self.spans)
    }

    pub fn navigation(&self) -> Navigation {
        self.entry.navigation(&self.path)
    }
}
