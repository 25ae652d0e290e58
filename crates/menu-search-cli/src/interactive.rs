//! Interactive session over stdin.
//!
//! Each input line replaces the search box text, except for key commands:
//!
//! | line | key |
//! |------|-----|
//! | `:down`, `:tab` | next result |
//! | `:up`, `:shift-tab` | previous result |
//! | `:enter` | open the selected result |
//! | `:esc`, `:close` | close the search |
//! | `:reload` | reload the menu payload |
//! | `:q`, `:quit` | exit |
//!
//! Opened menus are printed as JSON lines by [`JsonLinesRouter`].

use std::io::{BufRead, Write};
use std::thread;

use menu_search_core::Navigation;
use menu_search_engine::{
    ActionRouter, DebouncedSearch, MenuSource, NavKey, RouteError, SessionPhase,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::render::render_results;

/// A parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    Key(NavKey),
    Reload,
    Quit,
}

pub fn parse_line(line: &str) -> Line {
    let Some(command) = line.strip_prefix(':') else {
        return Line::Text(line.to_string());
    };

    match command.trim() {
        "q" | "quit" => Line::Quit,
        "reload" => Line::Reload,
        "close" => Line::Key(NavKey::Close),
        "shift-tab" => NavKey::from_key("tab", true)
            .map(Line::Key)
            .unwrap_or_else(|| Line::Text(line.to_string())),
        key => NavKey::from_key(key, false)
            .map(Line::Key)
            .unwrap_or_else(|| Line::Text(line.to_string())),
    }
}

/// Router that writes each navigation as one JSON line.
pub struct JsonLinesRouter<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesRouter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn output(&self) -> parking_lot::MutexGuard<'_, W> {
        self.out.lock()
    }
}

impl<W: Write + Send> ActionRouter for JsonLinesRouter<W> {
    fn navigate(&self, navigation: &Navigation) -> Result<(), RouteError> {
        let rejected = |message: String| RouteError::Rejected {
            path: navigation.path.clone(),
            message,
        };
        let line = serde_json::to_string(navigation).map_err(|e| rejected(e.to_string()))?;
        writeln!(self.out.lock(), "{}", line).map_err(|e| rejected(e.to_string()))
    }
}

/// Read stdin lines on a dedicated OS thread.
///
/// Blocking reads stay off the runtime; the channel closes at end of input.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("stdin reader finished");
    });
    rx
}

/// Drive `search` from `lines` until quit or end of input.
pub async fn run<W: Write>(
    search: &mut DebouncedSearch,
    source: &dyn MenuSource,
    mut lines: mpsc::UnboundedReceiver<String>,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                match parse_line(&line) {
                    Line::Text(text) => search.input(text),
                    Line::Key(key) => match search.key(key) {
                        Ok(Some(_)) => {}
                        Ok(None) if search.session().has_results() => {
                            print_results(search, out)?;
                        }
                        Ok(None) => {}
                        Err(e) => writeln!(out, "error: {}", e)?,
                    },
                    Line::Reload => match search.reload(source).await {
                        Ok(len) => writeln!(out, "reloaded {} menus", len)?,
                        Err(e) => writeln!(out, "error: {}", e)?,
                    },
                    Line::Quit => return Ok(()),
                }
            }
            Some(count) = search.next_render() => {
                tracing::debug!("Rendering {} results", count);
                print_results(search, out)?;
            }
        }
    }

    // Input ended while a search was still waiting for its timer.
    if search.session().phase() == SessionPhase::Pending && search.next_render().await.is_some() {
        print_results(search, out)?;
    }
    Ok(())
}

fn print_results<W: Write>(search: &DebouncedSearch, out: &mut W) -> std::io::Result<()> {
    let session = search.session();
    writeln!(
        out,
        "{}",
        render_results(session.results(), Some(session.cursor()))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_search_core::{MenuId, MenuNode, MenuTree, SearchConfig};
    use menu_search_engine::{Direction, StaticSource};
    use std::sync::Arc;
    use std::time::Duration;

    fn source() -> StaticSource {
        StaticSource::new(MenuTree::new(vec![MenuNode::new(10u64, "Sales").with_children(
            vec![
                MenuNode::new(11u64, "Orders").with_action("ir.actions.act_window,20"),
                MenuNode::new(12u64, "Customers").with_action("ir.actions.act_window,21"),
            ],
        )]))
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("sales"), Line::Text("sales".to_string()));
        assert_eq!(parse_line(""), Line::Text(String::new()));
        assert_eq!(parse_line(":down"), Line::Key(NavKey::Move(Direction::Down)));
        assert_eq!(parse_line(":tab"), Line::Key(NavKey::Move(Direction::Down)));
        assert_eq!(parse_line(":shift-tab"), Line::Key(NavKey::Move(Direction::Up)));
        assert_eq!(parse_line(":up"), Line::Key(NavKey::Move(Direction::Up)));
        assert_eq!(parse_line(":enter"), Line::Key(NavKey::Activate));
        assert_eq!(parse_line(":esc"), Line::Key(NavKey::Close));
        assert_eq!(parse_line(":close"), Line::Key(NavKey::Close));
        assert_eq!(parse_line(":reload"), Line::Reload);
        assert_eq!(parse_line(":q"), Line::Quit);
        assert_eq!(parse_line(":nope"), Line::Text(":nope".to_string()));
    }

    #[test]
    fn test_json_lines_router() {
        let router = JsonLinesRouter::new(Vec::new());
        let navigation = Navigation {
            path: "Sales/Orders".to_string(),
            action: "ir.actions.act_window,20".into(),
            action_id: Some(20),
            menu_id: MenuId(11),
            previous_menu_id: Some(MenuId(10)),
            app_id: MenuId(10),
        };

        router.navigate(&navigation).unwrap();
        let written = String::from_utf8(router.output().clone()).unwrap();
        assert_eq!(
            written,
            "{\"path\":\"Sales/Orders\",\"action\":\"ir.actions.act_window,20\",\"action_id\":20,\"menu_id\":11,\"previous_menu_id\":10,\"app_id\":10}\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_searches_and_opens() {
        let source = source();
        let router = Arc::new(JsonLinesRouter::new(Vec::new()));
        let mut search = DebouncedSearch::load(&source, &SearchConfig::default(), router.clone())
            .await
            .unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            tx.send("cust".to_string()).unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
            tx.send(":down".to_string()).unwrap();
            tx.send(":enter".to_string()).unwrap();
        });

        let mut out = Vec::new();
        run(&mut search, &source, rx, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("> Sales/[Cust]omers"), "{}", printed);

        let opened = String::from_utf8(router.output().clone()).unwrap();
        assert!(opened.contains("\"menu_id\":12"), "{}", opened);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_flushes_pending_search_at_end_of_input() {
        let source = source();
        let router = Arc::new(JsonLinesRouter::new(Vec::new()));
        let mut search = DebouncedSearch::load(&source, &SearchConfig::default(), router)
            .await
            .unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send("ord".to_string()).unwrap();
        drop(tx);

        let mut out = Vec::new();
        run(&mut search, &source, rx, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "> Sales/[Ord]ers  ir.actions.act_window,20\n");
    }

    #[tokio::test]
    async fn test_run_quit_and_reload() {
        let source = source();
        let router = Arc::new(JsonLinesRouter::new(Vec::new()));
        let mut search = DebouncedSearch::load(&source, &SearchConfig::default(), router)
            .await
            .unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(":reload".to_string()).unwrap();
        tx.send(":quit".to_string()).unwrap();
        tx.send("ignored".to_string()).unwrap();

        let mut out = Vec::new();
        run(&mut search, &source, rx, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "reloaded 2 menus\n");
        assert_eq!(search.session().phase(), SessionPhase::Idle);
    }
}
