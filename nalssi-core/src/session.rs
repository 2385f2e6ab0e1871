use std::sync::RwLock;

use reqwest::header::{HeaderMap, SET_COOKIE};

use crate::patterns;

/// Cookie carried from one weather page response to the next request.
///
/// Concurrent fetches may overwrite each other's update; the last response to
/// arrive wins.
#[derive(Debug, Default)]
pub struct Session {
    cookie: RwLock<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cookie with the tokens from the response's `set-cookie` headers.
    ///
    /// Leaves the cookie alone when the response sets none.
    pub fn update_from_headers(&self, headers: &HeaderMap) {
        let values: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();

        if values.is_empty() {
            tracing::debug!("no set-cookie header, keeping previous session cookie");
            return;
        }

        self.update_from_set_cookie(&values.join(", "));
    }

    pub fn update_from_set_cookie(&self, set_cookie: &str) {
        let cookie = patterns::cookie_tokens(set_cookie).join("; ");
        tracing::debug!(%cookie, "session cookie updated");

        match self.cookie.write() {
            Ok(mut guard) => *guard = cookie,
            Err(poisoned) => *poisoned.into_inner() = cookie,
        }
    }

    pub fn current_cookie(&self) -> String {
        match self.cookie.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
