//! Output collaborator: the host's router.
//!
//! Opening a chosen menu is the host's job. The search engine only produces
//! a [`Navigation`] and hands it over.

use menu_search_core::Navigation;
use parking_lot::Mutex;
use thiserror::Error;

/// Errors reported by a host router.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The host refused or failed to open the action.
    #[error("Navigation to {path:?} failed: {message}")]
    Rejected { path: String, message: String },
}

/// Host side of navigation.
#[cfg_attr(test, mockall::automock)]
pub trait ActionRouter: Send + Sync {
    /// Open the menu described by `navigation`.
    fn navigate(&self, navigation: &Navigation) -> Result<(), RouteError>;
}

/// Router that remembers every navigation it receives.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    navigations: Mutex<Vec<Navigation>>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded navigations.
    pub fn take(&self) -> Vec<Navigation> {
        std::mem::take(&mut *self.navigations.lock())
    }

    pub fn len(&self) -> usize {
        self.navigations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.navigations.lock().is_empty()
    }
}

impl ActionRouter for RecordingRouter {
    fn navigate(&self, navigation: &Navigation) -> Result<(), RouteError> {
        self.navigations.lock().push(navigation.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_search_core::{ActionRef, MenuId};

    fn navigation() -> Navigation {
        Navigation {
            path: "Discuss".to_string(),
            action: ActionRef::from("ir.actions.client,7"),
            action_id: Some(7),
            menu_id: MenuId(7),
            previous_menu_id: None,
            app_id: MenuId(7),
        }
    }

    #[test]
    fn test_recording_router_records_and_drains() {
        let router = RecordingRouter::new();
        assert!(router.is_empty());

        router.navigate(&navigation()).unwrap();
        router.navigate(&navigation()).unwrap();
        assert_eq!(router.len(), 2);

        let taken = router.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].menu_id, MenuId(7));
        assert!(router.is_empty());
    }
}
