//! Tokio driver for a [`SearchSession`].
//!
//! The session decides *when* a search should run; this driver owns the
//! timers. Each scheduled search spawns a sleep task that reports its
//! generation back over a channel. A newer schedule aborts the previous
//! task, and the session ignores any generation that still slips through.
//!
//! Hosts typically `select!` over their own input and [`next_render`]:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(text) = input_rx.recv() => search.input(text),
//!         Some(count) = search.next_render() => draw(search.session().results()),
//!     }
//! }
//! ```
//!
//! [`next_render`]: DebouncedSearch::next_render

use std::sync::Arc;

use menu_search_core::{Navigation, SearchConfig, SourceError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::index::{MenuIndexBuilder, SearchIndex};
use crate::navigator::NavKey;
use crate::router::{ActionRouter, RouteError};
use crate::session::{SearchSession, SessionEffect};
use crate::source::MenuSource;

/// Debounced search session bound to a host router.
pub struct DebouncedSearch {
    session: SearchSession,
    router: Arc<dyn ActionRouter>,
    timer_tx: mpsc::UnboundedSender<u64>,
    timer_rx: mpsc::UnboundedReceiver<u64>,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedSearch {
    /// Create a driver over `index`. Must be called within a tokio runtime
    /// before any input is fed.
    pub fn new(index: Arc<SearchIndex>, config: &SearchConfig, router: Arc<dyn ActionRouter>) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            session: SearchSession::new(index, config),
            router,
            timer_tx,
            timer_rx,
            pending: None,
        }
    }

    /// Create a driver with an index loaded from `source`.
    pub async fn load(
        source: &dyn MenuSource,
        config: &SearchConfig,
        router: Arc<dyn ActionRouter>,
    ) -> Result<Self, SourceError> {
        let index = load_index(source).await?;
        Ok(Self::new(Arc::new(index), config, router))
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Feed new search box text. The search runs after the debounce delay
    /// unless more input arrives first.
    pub fn input(&mut self, text: impl Into<String>) {
        let effect = self.session.input(text);
        self.apply(effect);
    }

    /// Feed a key press.
    ///
    /// Returns the navigation handed to the router when the key opened a
    /// result.
    pub fn key(&mut self, key: NavKey) -> Result<Option<Navigation>, RouteError> {
        let effect = self.session.key(key);
        match effect {
            SessionEffect::Navigate(navigation) => {
                self.cancel_pending();
                tracing::info!("Opening {:?}", navigation.path);
                if let Err(e) = self.router.navigate(&navigation) {
                    tracing::error!("Router failed to open {:?}: {}", navigation.path, e);
                    return Err(e);
                }
                Ok(Some(navigation))
            }
            other => {
                self.apply(other);
                Ok(None)
            }
        }
    }

    /// Close the search box (escape, blur).
    pub fn close(&mut self) {
        let effect = self.session.close();
        self.apply(effect);
    }

    /// Reload the menu tree from `source` and rebuild the index.
    ///
    /// On error the current index stays in place.
    pub async fn reload(&mut self, source: &dyn MenuSource) -> Result<usize, SourceError> {
        let index = load_index(source).await?;
        let len = index.len();
        self.cancel_pending();
        self.session.replace_index(Arc::new(index));
        Ok(len)
    }

    /// Wait until a scheduled search renders; returns the result count.
    ///
    /// Stale timers are skipped. Pending forever if nothing is scheduled,
    /// which makes it safe to use as a `select!` branch.
    pub async fn next_render(&mut self) -> Option<usize> {
        while let Some(generation) = self.timer_rx.recv().await {
            if let SessionEffect::Render { count } = self.session.timer_fired(generation) {
                self.pending = None;
                return Some(count);
            }
        }
        None
    }

    fn apply(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::Schedule { generation, delay } => {
                self.cancel_pending();
                let tx = self.timer_tx.clone();
                self.pending = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(generation);
                }));
            }
            SessionEffect::Closed => self.cancel_pending(),
            _ => {}
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn load_index(source: &dyn MenuSource) -> Result<SearchIndex, SourceError> {
    let tree = source.load().await?;
    Ok(MenuIndexBuilder::build_tree(&tree)?)
}
