//! Fuzzy ranking of menu paths.
//!
//! A candidate matches when every query character appears in it, in order,
//! ignoring case. Scoring is delegated to `nucleo-matcher`, which rewards
//! contiguous runs, word and path-segment boundaries, and early matches.
//!
//! Results are totally ordered: score descending, then shorter path, then
//! lexicographic path.

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use menu_search_core::{MatchSpan, SearchConfig, SearchResult};

use crate::index::SearchIndex;

/// One candidate that matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub text: String,
    pub score: u32,
    pub spans: Vec<MatchSpan>,
}

/// Reusable fuzzy scorer. Holds matcher scratch memory between calls.
pub struct FuzzySearcher {
    matcher: Matcher,
    max_results: Option<usize>,
    haystack_buf: Vec<char>,
    indices: Vec<u32>,
}

impl FuzzySearcher {
    /// Create a searcher that scores `/` as a segment boundary.
    pub fn new() -> Self {
        Self::with_paths(true)
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::with_paths(config.match_paths).with_max_results(config.max_results)
    }

    fn with_paths(match_paths: bool) -> Self {
        let config = if match_paths {
            Config::DEFAULT.match_paths()
        } else {
            Config::DEFAULT
        };
        Self {
            matcher: Matcher::new(config),
            max_results: None,
            haystack_buf: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Cap the number of results returned by each search.
    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    /// Rank `candidates` against `query`.
    ///
    /// An empty query means no search is active and returns nothing.
    pub fn search<'a, I>(&mut self, query: &str, candidates: I) -> Vec<FuzzyMatch>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if query.is_empty() {
            return Vec::new();
        }

        let atom = Atom::new(
            query,
            CaseMatching::Ignore,
            Normalization::Never,
            AtomKind::Fuzzy,
            false,
        );

        let mut ranked: Vec<(usize, FuzzyMatch)> = Vec::new();
        for candidate in candidates {
            self.haystack_buf.clear();
            self.indices.clear();
            let haystack = Utf32Str::new(candidate, &mut self.haystack_buf);
            let Some(score) = atom.indices(haystack, &mut self.matcher, &mut self.indices) else {
                continue;
            };

            self.indices.sort_unstable();
            self.indices.dedup();
            let positions: Vec<usize> = self.indices.iter().map(|&i| i as usize).collect();

            ranked.push((
                candidate.chars().count(),
                FuzzyMatch {
                    text: candidate.to_string(),
                    score: u32::from(score),
                    spans: MatchSpan::from_positions(&positions),
                },
            ));
        }

        ranked.sort_by(|(a_len, a), (b_len, b)| {
            b.score
                .cmp(&a.score)
                .then_with(|| a_len.cmp(b_len))
                .then_with(|| a.text.cmp(&b.text))
        });

        let mut matches: Vec<FuzzyMatch> = ranked.into_iter().map(|(_, m)| m).collect();
        if let Some(max) = self.max_results {
            matches.truncate(max);
        }
        matches
    }

    /// Rank every path of `index` against `query`.
    pub fn search_index(&mut self, query: &str, index: &SearchIndex) -> Vec<SearchResult> {
        self.search(query, index.paths())
            .into_iter()
            .filter_map(|m| {
                let entry = index.get(&m.text)?.clone();
                Some(SearchResult {
                    path: m.text,
                    score: m.score,
                    spans: m.spans,
                    entry,
                })
            })
            .collect()
    }
}

impl Default for FuzzySearcher {
    fn default() -> Self {
        Self::new()
    }
}
