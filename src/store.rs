// In-memory session store - nothing survives a restart

use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;

use crate::session::QuizSession;

#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
    max_sessions: usize,
}

struct Inner {
    sessions: BTreeMap<String, QuizSession>,
    tokens: ulid::Generator,
}

impl Store {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                sessions: BTreeMap::new(),
                tokens: ulid::Generator::new(),
            })),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Keep a new session and return its token.
    ///
    /// Tokens are monotonic ULIDs, so the smallest key is always the oldest
    /// session and is the first to go once the store is full.
    pub async fn create(&self, session: QuizSession) -> String {
        let mut inner = self.inner.write().await;
        let token = inner
            .tokens
            .generate()
            .unwrap_or_else(|_| ulid::Ulid::new())
            .to_string();
        inner.sessions.insert(token.clone(), session);

        while inner.sessions.len() > self.max_sessions {
            if let Some((evicted, _)) = inner.sessions.pop_first() {
                tracing::info!("evicted quiz session {evicted}");
            }
        }

        tracing::debug!("{} live quiz sessions", inner.sessions.len());
        token
    }

    pub async fn read<R>(&self, token: &str, f: impl FnOnce(&QuizSession) -> R) -> Option<R> {
        self.inner.read().await.sessions.get(token).map(f)
    }

    pub async fn update<R>(
        &self,
        token: &str,
        f: impl FnOnce(&mut QuizSession) -> R,
    ) -> Option<R> {
        self.inner.write().await.sessions.get_mut(token).map(f)
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.inner.write().await.sessions.remove(token).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
