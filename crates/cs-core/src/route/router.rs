//! Router holding the current route and the navigation history

use std::sync::Arc;
use parking_lot::RwLock;

use super::Route;

/// Oldest entries are dropped past this many back steps
pub const MAX_HISTORY: usize = 64;

#[derive(Debug, Clone)]
struct RouterState {
    current: Route,
    history: Vec<Route>,
    /// Bumped on every change so views can detect a new route cheaply
    generation: u64,
}

/// Shared router; views push routes, the app renders `current()`
#[derive(Debug, Clone)]
pub struct Router {
    state: Arc<RwLock<RouterState>>,
}

impl Router {
    /// Create a router starting at `initial`
    pub fn new(initial: Route) -> Self {
        Self {
            state: Arc::new(RwLock::new(RouterState {
                current: initial,
                history: Vec::new(),
                generation: 0,
            })),
        }
    }

    pub fn current(&self) -> Route {
        self.state.read().current.clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Navigate to `route`; pushing the current route is a no-op
    pub fn push(&self, route: Route) {
        let mut state = self.state.write();
        if state.current == route {
            return;
        }
        tracing::info!("Navigating {} -> {}", state.current, route);
        let previous = std::mem::replace(&mut state.current, route);
        state.history.push(previous);
        if state.history.len() > MAX_HISTORY {
            state.history.remove(0);
        }
        state.generation += 1;
    }

    /// Navigate to a path; unknown paths are ignored
    pub fn push_path(&self, path: &str) -> bool {
        match Route::parse(path) {
            Some(route) => {
                self.push(route);
                true
            }
            None => {
                tracing::warn!("Ignoring unknown path '{}'", path);
                false
            }
        }
    }

    /// Go back one step; returns false at the start of history
    pub fn back(&self) -> bool {
        let mut state = self.state.write();
        match state.history.pop() {
            Some(previous) => {
                state.current = previous;
                state.generation += 1;
                true
            }
            None => false,
        }
    }

    /// The breadcrumb `HOME` action
    pub fn home(&self) {
        self.push(Route::Home);
    }

    pub fn can_go_back(&self) -> bool {
        !self.state.read().history.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entity;

    #[test]
    fn test_push_and_back() {
        let router = Router::default();
        router.push(Route::stats(Entity::World));
        router.push(Route::detail(Entity::World, "Brazil"));
        assert_eq!(router.current(), Route::detail(Entity::World, "Brazil"));
        assert_eq!(router.generation(), 2);

        assert!(router.back());
        assert_eq!(router.current(), Route::stats(Entity::World));
        assert!(router.back());
        assert_eq!(router.current(), Route::Home);
        assert!(!router.back());
    }

    #[test]
    fn test_same_route_is_not_recorded() {
        let router = Router::default();
        router.home();
        assert!(!router.can_go_back());
        assert_eq!(router.generation(), 0);
    }

    #[test]
    fn test_push_path() {
        let router = Router::default();
        assert!(router.push_path("/india/detail/Kerala"));
        assert_eq!(router.current(), Route::detail(Entity::India, "Kerala"));
        assert!(!router.push_path("/nowhere"));
        assert_eq!(router.current(), Route::detail(Entity::India, "Kerala"));
    }

    #[test]
    fn test_history_is_capped() {
        let router = Router::default();
        for i in 0..MAX_HISTORY + 10 {
            router.push(Route::detail(Entity::World, format!("C{i}")));
        }

        let mut steps = 0;
        while router.back() {
            steps += 1;
        }
        assert_eq!(steps, MAX_HISTORY);
        // Home and the first pushes fell off the front
        assert_eq!(router.current(), Route::detail(Entity::World, "C9"));
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_clones_share_state() {
        let router = Router::default();
        let handle = router.clone();
        handle.push(Route::stats(Entity::India));
        assert_eq!(router.current(), Route::stats(Entity::India));
    }
}
