//! # Session State
//!
//! Server-side sessions addressed by a cookie.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /login ──► SessionStore::open(role) ──► id (uuid v4)              │
//! │                      │                                                  │
//! │                      └─► Set-Cookie: merka_session=<id>; HttpOnly       │
//! │                                                                         │
//! │  later request ──► Cookie header ──► CurrentSession extractor           │
//! │                                         │                               │
//! │                                         ├── unknown / missing → 401     │
//! │                                         └── Session { role, view }      │
//! │                                                                         │
//! │  POST /logout ──► SessionStore::close(id) + expired cookie              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sessions live in memory only; a restart logs everyone out. A session
//! left idle for [`DEFAULT_IDLE_TIMEOUT`] is dropped.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};
use merka_core::{Role, Session, View};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "merka_session";

/// How long a session survives without a request.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: Instant,
}

/// All live sessions.
///
/// ## Thread Safety
/// `Arc<Mutex<_>>`: every operation is a short map access, never held
/// across an `.await`.
///
/// ## Expiry
/// Lookups drop an idle entry instead of returning it; `open` sweeps
/// every idle entry, so the map stays bounded by recent logins.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Entry>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore {
            sessions: Arc::default(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long an unused session lives.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // map operations never leave a torn entry
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_idle(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.last_seen) >= self.idle_timeout
    }

    /// Live entry for `id`, touched; an idle one is removed.
    fn touch<'a>(
        &self,
        sessions: &'a mut HashMap<String, Entry>,
        id: &str,
    ) -> Option<&'a mut Entry> {
        let now = Instant::now();
        if sessions.get(id).is_some_and(|entry| self.is_idle(entry, now)) {
            sessions.remove(id);
            debug!("Idle session dropped");
            return None;
        }
        let entry = sessions.get_mut(id)?;
        entry.last_seen = now;
        Some(entry)
    }

    /// Starts a session for `role` and returns its id.
    pub fn open(&self, role: Role) -> (String, Session) {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(role);
        let now = Instant::now();

        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_idle(entry, now));
        if sessions.len() < before {
            debug!(dropped = before - sessions.len(), "Swept idle sessions");
        }
        sessions.insert(
            id.clone(),
            Entry {
                session: session.clone(),
                last_seen: now,
            },
        );
        (id, session)
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let mut sessions = self.lock();
        self.touch(&mut sessions, id).map(|entry| entry.session.clone())
    }

    /// Moves the session to another view. `None` if the session is gone.
    pub fn navigate(&self, id: &str, view: View) -> Option<Session> {
        let mut sessions = self.lock();
        let entry = self.touch(&mut sessions, id)?;
        entry.session.navigate(view);
        Some(entry.session.clone())
    }

    /// Ends a session.
    pub fn close(&self, id: &str) -> Option<Session> {
        self.lock().remove(id).map(|entry| entry.session)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// =============================================================================
// Cookies
// =============================================================================

/// Cookie carrying a fresh session id.
pub fn session_cookie(id: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that makes the client forget its session id.
pub fn expired_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// Extracts the session id from the request's `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

// =============================================================================
// Extractor
// =============================================================================

/// The caller's session. Rejects with 401 when there is none.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn whoami(current: CurrentSession) -> Json<SessionView> {
///     Json(SessionView::from(&current.session))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: String,
    pub session: Session,
}

impl<S> FromRequestParts<S> for CurrentSession
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::from_ref(state);
        let id = session_id(&parts.headers).ok_or_else(ApiError::unauthorized)?;
        let session = store.get(&id).ok_or_else(ApiError::unauthorized)?;
        Ok(CurrentSession { id, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_open_navigate_close() {
        let store = SessionStore::new();
        let (id, session) = store.open(Role::Admin);
        assert_eq!(session.view, View::Venta);
        assert_eq!(store.len(), 1);

        let moved = store.navigate(&id, View::Monitor).unwrap();
        assert_eq!(moved.view, View::Monitor);
        assert_eq!(store.get(&id).unwrap().view, View::Monitor);

        assert!(store.close(&id).is_some());
        assert!(store.get(&id).is_none());
        assert!(store.navigate(&id, View::Venta).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let (a, _) = store.open(Role::Admin);
        let (b, _) = store.open(Role::Barbero);
        assert_ne!(a, b);

        store.navigate(&a, View::Monitor);
        assert_eq!(store.get(&b).unwrap().view, View::Venta);
        assert_eq!(store.get(&b).unwrap().role, Role::Barbero);
    }

    #[test]
    fn test_idle_session_is_dropped_on_lookup() {
        let store = SessionStore::new().with_idle_timeout(Duration::ZERO);
        let (id, _) = store.open(Role::Barbero);

        assert!(store.get(&id).is_none());
        assert!(store.navigate(&id, View::Monitor).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_sweeps_idle_sessions() {
        let store = SessionStore::new().with_idle_timeout(Duration::ZERO);
        for _ in 0..50 {
            store.open(Role::Admin);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_active_sessions_survive_sweep() {
        let store = SessionStore::new();
        let ids: Vec<String> = (0..5).map(|_| store.open(Role::Admin).0).collect();
        assert_eq!(store.len(), 5);
        assert!(ids.iter().all(|id| store.get(id).is_some()));
    }

    #[test]
    fn test_session_id_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(session_id(&headers).is_none());

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; merka_session=abc-123; lang=es"),
        );
        assert_eq!(session_id(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_cookie_attributes() {
        let set = session_cookie("abc-123").to_string();
        assert!(set.starts_with("merka_session=abc-123"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Path=/"));

        let cleared = expired_cookie().to_string();
        assert!(cleared.starts_with("merka_session=;"));
        assert!(cleared.contains("Max-Age=0"));
    }
}
