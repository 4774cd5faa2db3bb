//! Gemeinsamer Axum-State

use std::sync::Arc;

use tempo_auth::{AuthService, OwnershipGuard, PasswortHasher, TokenCodec};
use tempo_db::{JournalRepository, NotizRepository, TodoRepository, UserRepository};

/// State aller Handler
///
/// Enthaelt nur geteilte, nach dem Start unveraenderliche Dienste. Der
/// Store kuemmert sich selbst um Nebenlaeufigkeit.
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthService,
    pub guard: OwnershipGuard,
    pub tokens: Arc<TokenCodec>,
    pub todos: Arc<dyn TodoRepository>,
    pub notizen: Arc<dyn NotizRepository>,
    pub journal: Arc<dyn JournalRepository>,
}

impl ApiState {
    /// Baut den State aus einem Store, der alle Repositories implementiert
    pub fn neu<D>(db: Arc<D>, tokens: Arc<TokenCodec>, hasher: PasswortHasher) -> Self
    where
        D: UserRepository + TodoRepository + NotizRepository + JournalRepository + 'static,
    {
        Self {
            auth: AuthService::neu(db.clone(), hasher, tokens.clone()),
            guard: OwnershipGuard::neu(db.clone(), db.clone(), db.clone()),
            tokens,
            todos: db.clone(),
            notizen: db.clone(),
            journal: db,
        }
    }
}
