//! Authentication provider seam
//!
//! Token issuance happens elsewhere (the login flow); the dashboard only
//! reads the token and drops it when the backend answers 401.

use super::storage;
use std::cell::RefCell;

pub trait AuthProvider {
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn token(&self) -> Option<String>;

    fn clear_token(&self);
}

/// Provider backed by `localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageAuth;

impl AuthProvider for LocalStorageAuth {
    fn token(&self) -> Option<String> {
        storage::get_access_token()
    }

    fn clear_token(&self) {
        log::info!("Clearing stored access token");
        storage::clear_access_token();
    }
}

/// In-memory provider, handy when the token comes from somewhere other than storage
#[derive(Debug, Default)]
pub struct StaticAuth {
    token: RefCell<Option<String>>,
}

impl StaticAuth {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: RefCell::new(token.map(str::to_string)),
        }
    }
}

impl AuthProvider for StaticAuth {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn clear_token(&self) {
        self.token.borrow_mut().take();
    }
}
