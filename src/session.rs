//! Browser session identification.
//!
//! The cookie carries only a random v4 UUID; all state lives server-side
//! in the [`crate::history::HistoryStore`]. Extracted per request and
//! passed to handlers explicitly.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use std::convert::Infallible;
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Session identity for the current request.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub id: Uuid,
    is_new: bool,
}

impl Session {
    /// `Set-Cookie` value for a freshly minted session, `None` when the
    /// request already carried a valid session cookie.
    pub fn set_cookie(&self) -> Option<String> {
        self.is_new.then(|| {
            format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                SESSION_COOKIE, self.id
            )
        })
    }

    #[cfg(test)]
    pub fn is_new(&self) -> bool {
        self.is_new
    }
}

// A request with no cookie (or an unparseable one) silently gets a fresh
// session, so extraction never rejects.
#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, id)| Uuid::parse_str(id).ok());

        Ok(match existing {
            Some(id) => Session { id, is_new: false },
            None => Session {
                id: Uuid::new_v4(),
                is_new: true,
            },
        })
    }
}
