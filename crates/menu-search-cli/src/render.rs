//! Plain-text rendering of search results.
//!
//! Matched characters are wrapped in brackets: `Settings/Technical/[Act]ions`.

use menu_search_core::SearchResult;
use menu_search_engine::SearchIndex;

/// Render one result path with its matches bracketed.
pub fn render_path(result: &SearchResult) -> String {
    let mut out = String::with_capacity(result.path.len() + 4);
    for segment in result.highlight() {
        if segment.matched {
            out.push('[');
            out.push_str(&segment.text);
            out.push(']');
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

/// Render a result list, marking the row under the cursor.
pub fn render_results(results: &[SearchResult], cursor: Option<usize>) -> String {
    if results.is_empty() {
        return "(no results)".to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let marker = if cursor == Some(i) { '>' } else { ' ' };
            format!("{} {}  {}", marker, render_path(result), result.entry.action)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render every indexed path, one per line.
pub fn render_index(index: &SearchIndex) -> String {
    index
        .iter()
        .map(|(path, entry)| format!("{}\t{}\t{}", entry.id, path, entry.action))
        .collect::<Vec<_>>()
        .join("\n")
}
