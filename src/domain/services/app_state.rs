#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use super::Gallery;
use super::ListManager;
use crate::domain::models::Route;
use crate::domain::models::Session;

/// Everything the interactive client keeps between screens. All of it belongs
/// to the signed in user and is rebuilt whenever the user changes.
#[derive(Default)]
pub struct AppState {
    pub session: Option<Session>,
    pub gallery: Gallery,
    pub lists: ListManager,
}

impl AppState {
    pub fn new(session: Option<Session>) -> AppState {
        return AppState {
            session,
            ..Default::default()
        };
    }

    pub fn start_route(&self) -> Route {
        if self.session.is_some() {
            return Route::Search;
        }

        return Route::Login;
    }

    pub fn sign_in(&mut self, session: Session) {
        *self = AppState::new(Some(session));
    }

    pub fn sign_out(&mut self) {
        *self = AppState::default();
    }
}
