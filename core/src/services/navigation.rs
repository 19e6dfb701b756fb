//! Client-side route targets.

use std::sync::Mutex;

/// Screens the controllers can send the user to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Store,
    Course(String),
    Checkout(String),
    Payments,
    Profile,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Store => "/store".to_string(),
            Route::Course(id) => format!("/course/{}", id),
            Route::Checkout(id) => format!("/checkout/{}", id),
            Route::Payments => "/payments".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }
}

/// Performs navigation on behalf of the controllers
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only remembers where it was sent
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn current(&self) -> Option<Route> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route.path(), "navigate");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route);
        }
    }
}
