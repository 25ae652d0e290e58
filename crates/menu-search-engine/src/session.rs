//! Debounced search session state machine.
//!
//! The session is driven by discrete events and never touches a timer
//! itself. When it needs a delayed search it returns
//! [`SessionEffect::Schedule`] and waits for the driver to feed back
//! [`SessionEvent::TimerFired`] with the same generation.
//!
//! ```text
//!            input                    timer(gen)
//!   Idle ───────────► Pending ─────────────────► Rendered
//!    ▲                 │  ▲  input (gen + 1)        │
//!    │                 │  └─────────────────────────┘
//!    └── close/escape ─┴────────────────────────────┘
//! ```
//!
//! Every input bumps the generation, so a timer scheduled for an older
//! input is stale and ignored.

use std::sync::Arc;
use std::time::Duration;

use menu_search_core::{Navigation, SearchConfig, SearchResult};

use crate::fuzzy::FuzzySearcher;
use crate::index::SearchIndex;
use crate::navigator::{KeyboardNavigator, NavKey};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// No search active.
    #[default]
    Idle,
    /// Waiting for the debounce timer of the latest input.
    Pending,
    /// Results for the latest input are available.
    Rendered,
}

/// Input to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The search box text changed.
    Input(String),
    /// A debounce timer elapsed.
    TimerFired(u64),
    Key(NavKey),
    /// The search box was closed or lost focus.
    Close,
}

/// What the driver should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Start (or restart) the debounce timer.
    Schedule { generation: u64, delay: Duration },
    /// New results are ready.
    Render { count: usize },
    /// The cursor moved.
    Select { cursor: usize },
    /// Open this menu; the session has closed itself.
    Navigate(Navigation),
    /// The session was reset.
    Closed,
    /// Nothing to do.
    Ignored,
}

/// Search state for one search box.
pub struct SearchSession {
    index: Arc<SearchIndex>,
    searcher: FuzzySearcher,
    debounce: Duration,
    phase: SessionPhase,
    query: String,
    results: Vec<SearchResult>,
    navigator: KeyboardNavigator,
    generation: u64,
}

impl SearchSession {
    pub fn new(index: Arc<SearchIndex>, config: &SearchConfig) -> Self {
        Self {
            index,
            searcher: FuzzySearcher::from_config(config),
            debounce: config.debounce(),
            phase: SessionPhase::Idle,
            query: String::new(),
            results: Vec::new(),
            navigator: KeyboardNavigator::new(),
            generation: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.navigator.cursor()
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.navigator.selected(&self.results)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn handle(&mut self, event: SessionEvent) -> SessionEffect {
        match event {
            SessionEvent::Input(query) => self.input(query),
            SessionEvent::TimerFired(generation) => self.timer_fired(generation),
            SessionEvent::Key(key) => self.key(key),
            SessionEvent::Close => self.close(),
        }
    }

    /// Record new search box text and ask for a debounced search.
    pub fn input(&mut self, query: impl Into<String>) -> SessionEffect {
        self.query = query.into();
        self.generation += 1;
        self.phase = SessionPhase::Pending;
        tracing::debug!(
            "Search scheduled: query={:?} generation={}",
            self.query,
            self.generation
        );
        SessionEffect::Schedule {
            generation: self.generation,
            delay: self.debounce,
        }
    }

    /// Run the search if `generation` belongs to the latest input.
    pub fn timer_fired(&mut self, generation: u64) -> SessionEffect {
        if self.phase != SessionPhase::Pending || generation != self.generation {
            tracing::debug!(
                "Ignoring stale timer: generation={} current={}",
                generation,
                self.generation
            );
            return SessionEffect::Ignored;
        }

        self.results = self.searcher.search_index(&self.query, &self.index);
        self.navigator.reset();
        self.phase = SessionPhase::Rendered;
        tracing::debug!(
            "Search rendered: query={:?} results={}",
            self.query,
            self.results.len()
        );
        SessionEffect::Render {
            count: self.results.len(),
        }
    }

    pub fn key(&mut self, key: NavKey) -> SessionEffect {
        match key {
            NavKey::Close => self.close(),
            // Navigation keys only apply to displayed results.
            _ if self.results.is_empty() => SessionEffect::Ignored,
            NavKey::Move(direction) => SessionEffect::Select {
                cursor: self.navigator.advance(direction, self.results.len()),
            },
            NavKey::Activate => match self.selected() {
                Some(result) => {
                    let navigation = result.navigation();
                    tracing::debug!("Activating {:?}", navigation.path);
                    self.close();
                    SessionEffect::Navigate(navigation)
                }
                None => SessionEffect::Ignored,
            },
        }
    }

    /// Clear input, results and cursor.
    pub fn close(&mut self) -> SessionEffect {
        self.query.clear();
        self.results.clear();
        self.navigator.reset();
        // Invalidate any timer still in flight.
        self.generation += 1;
        self.phase = SessionPhase::Idle;
        SessionEffect::Closed
    }

    /// Swap in an index rebuilt from a reloaded menu tree.
    pub fn replace_index(&mut self, index: Arc<SearchIndex>) {
        tracing::info!("Search index replaced ({} entries)", index.len());
        self.index = index;
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MenuIndexBuilder;
    use crate::navigator::Direction;
    use menu_search_core::{MenuId, MenuNode, MenuTree};

    fn test_index() -> Arc<SearchIndex> {
        let tree = MenuTree::new(vec![
            MenuNode::new(1u64, "Settings")
                .with_action("ir.actions.client,1")
                .with_children(vec![MenuNode::new(2u64, "Technical").with_children(vec![
                    MenuNode::new(3u64, "Actions").with_action("ir.actions.client,94"),
                    MenuNode::new(4u64, "Sequences").with_action("ir.actions.act_window,5"),
                ])]),
            MenuNode::new(10u64, "Sales").with_children(vec![
                MenuNode::new(11u64, "Orders").with_action("ir.actions.act_window,20"),
            ]),
        ]);
        Arc::new(MenuIndexBuilder::build_tree(&tree).unwrap())
    }

    fn session() -> SearchSession {
        SearchSession::new(test_index(), &SearchConfig::default())
    }

    /// Input followed by its own timer.
    fn search(session: &mut SearchSession, query: &str) -> SessionEffect {
        let SessionEffect::Schedule { generation, .. } = session.input(query) else {
            panic!("input did not schedule");
        };
        session.timer_fired(generation)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.has_results());
        assert_eq!(session.cursor(), 0);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_input_schedules_with_configured_delay() {
        let config = SearchConfig {
            debounce_ms: 75,
            ..SearchConfig::default()
        };
        let mut session = SearchSession::new(test_index(), &config);

        assert_eq!(
            session.input("se"),
            SessionEffect::Schedule {
                generation: 1,
                delay: Duration::from_millis(75)
            }
        );
        assert_eq!(session.phase(), SessionPhase::Pending);
        assert!(!session.has_results());
    }

    #[test]
    fn test_timer_renders_results() {
        let mut session = session();
        let effect = search(&mut session, "seq");

        assert_eq!(effect, SessionEffect::Render { count: 1 });
        assert_eq!(session.phase(), SessionPhase::Rendered);
        assert_eq!(
            session.selected().unwrap().path,
            "Settings/Technical/Sequences"
        );
    }

    #[test]
    fn test_newer_input_supersedes_pending_timer() {
        let mut session = session();
        session.input("s");
        session.input("se");
        let SessionEffect::Schedule { generation, .. } = session.input("ord") else {
            panic!("input did not schedule");
        };

        assert_eq!(session.timer_fired(generation - 1), SessionEffect::Ignored);
        assert_eq!(session.timer_fired(generation - 2), SessionEffect::Ignored);
        assert_eq!(session.phase(), SessionPhase::Pending);

        assert_eq!(session.timer_fired(generation), SessionEffect::Render { count: 1 });
        assert_eq!(session.results()[0].entry.id, MenuId(11));
    }

    #[test]
    fn test_timer_after_render_is_ignored() {
        let mut session = session();
        search(&mut session, "act");
        let generation = session.generation();
        assert_eq!(session.timer_fired(generation), SessionEffect::Ignored);
    }

    #[test]
    fn test_empty_query_clears_results() {
        let mut session = session();
        search(&mut session, "s");
        assert!(session.has_results());

        assert_eq!(search(&mut session, ""), SessionEffect::Render { count: 0 });
        assert!(!session.has_results());
        assert_eq!(session.phase(), SessionPhase::Rendered);
    }

    #[test]
    fn test_new_results_reset_cursor() {
        let mut session = session();
        search(&mut session, "s");
        assert!(session.results().len() > 1);

        session.key(NavKey::Move(Direction::Down));
        assert_eq!(session.cursor(), 1);

        search(&mut session, "se");
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut session = session();
        search(&mut session, "s");
        let len = session.results().len();

        assert_eq!(
            session.key(NavKey::Move(Direction::Up)),
            SessionEffect::Select { cursor: len - 1 }
        );
        assert_eq!(
            session.key(NavKey::Move(Direction::Down)),
            SessionEffect::Select { cursor: 0 }
        );
    }

    #[test]
    fn test_navigation_keys_ignored_without_results() {
        let mut session = session();
        assert_eq!(
            session.key(NavKey::Move(Direction::Down)),
            SessionEffect::Ignored
        );
        assert_eq!(session.key(NavKey::Activate), SessionEffect::Ignored);

        search(&mut session, "zzz");
        assert_eq!(session.key(NavKey::Activate), SessionEffect::Ignored);
    }

    #[test]
    fn test_activate_navigates_and_closes() {
        let mut session = session();
        search(&mut session, "actions");

        let SessionEffect::Navigate(navigation) = session.key(NavKey::Activate) else {
            panic!("expected navigation");
        };
        assert_eq!(navigation.path, "Settings/Technical/Actions");
        assert_eq!(navigation.action_id, Some(94));
        assert_eq!(navigation.menu_id, MenuId(3));
        assert_eq!(navigation.previous_menu_id, Some(MenuId(2)));
        assert_eq!(navigation.app_id, MenuId(1));

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.query(), "");
        assert!(!session.has_results());
    }

    #[test]
    fn test_close_resets_and_invalidates_pending_timer() {
        let mut session = session();
        search(&mut session, "s");
        session.key(NavKey::Move(Direction::Down));

        let SessionEffect::Schedule { generation, .. } = session.input("se") else {
            panic!("input did not schedule");
        };
        assert_eq!(session.handle(SessionEvent::Close), SessionEffect::Closed);

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.query(), "");
        assert_eq!(session.cursor(), 0);
        assert!(!session.has_results());
        assert_eq!(session.timer_fired(generation), SessionEffect::Ignored);
    }

    #[test]
    fn test_escape_closes() {
        let mut session = session();
        search(&mut session, "s");
        assert_eq!(session.key(NavKey::Close), SessionEffect::Closed);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_replace_index_resets_session() {
        let mut session = session();
        search(&mut session, "s");

        let tree = MenuTree::new(vec![
            MenuNode::new(7u64, "Discuss").with_action("ir.actions.client,7")
        ]);
        session.replace_index(Arc::new(MenuIndexBuilder::build_tree(&tree).unwrap()));

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.index().len(), 1);
        assert_eq!(search(&mut session, "dis"), SessionEffect::Render { count: 1 });
    }

    #[test]
    fn test_handle_dispatches_events() {
        let mut session = session();
        let effect = session.handle(SessionEvent::Input("ord".to_string()));
        let SessionEffect::Schedule { generation, .. } = effect else {
            panic!("input did not schedule");
        };
        assert_eq!(
            session.handle(SessionEvent::TimerFired(generation)),
            SessionEffect::Render { count: 1 }
        );
        assert!(matches!(
            session.handle(SessionEvent::Key(NavKey::Activate)),
            SessionEffect::Navigate(_)
        ));
    }
}
