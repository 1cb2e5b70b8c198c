use std::sync::{Arc, PoisonError, RwLock};

/// Holder of the current bearer token.
///
/// Cheap to clone; all clones share the same slot. Reads come from every
/// in-flight request builder, writes only from login/refresh/sign-out.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.into());
    }

    pub fn clear(&self) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// `Authorization` header value, if a token is set.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_has_no_header() {
        let session = AuthSession::new();
        assert!(!session.has_token());
        assert!(session.bearer().is_none());
    }

    #[test]
    fn test_clones_share_token() {
        let session = AuthSession::new();
        let reader = session.clone();
        session.set_token("abc");
        assert_eq!(reader.bearer().as_deref(), Some("Bearer abc"));

        reader.clear();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_concurrent_readers() {
        let session = AuthSession::with_token("t0");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let s = session.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        assert!(s.token().is_some_and(|t| t.starts_with('t')));
                    }
                })
            })
            .collect();
        for i in 0..100 {
            session.set_token(format!("t{i}"));
        }
        for h in handles {
            h.join().unwrap();
        }
    }
}
