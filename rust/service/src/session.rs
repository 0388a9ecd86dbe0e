use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

use pontoon_engine::round::Round;

use crate::store::UserId;

/// One user's active game. The directory hands these out behind an
/// `Arc<Mutex<_>>`; holding the mutex is what serializes a user's actions.
#[derive(Debug)]
pub struct GameSession {
    pub user_id: UserId,
    pub round: Round,
    /// Tombstone flag, set under the session mutex right before the entry
    /// leaves the directory (settlement recorded, or explicitly abandoned).
    /// A resolved session whose stats write failed keeps `false` and stays
    /// in the directory so a later touch can retry; stale handles seeing
    /// `true` must treat the session as gone.
    pub closed: bool,
}

impl GameSession {
    pub fn new(user_id: UserId, round: Round) -> Self {
        Self {
            user_id,
            round,
            closed: false,
        }
    }
}

/// Shared map of active games, at most one per user. The `RwLock` guards the
/// map shape only; per-game mutation goes through each session's own mutex,
/// so different users never contend beyond the brief map lock.
pub struct SessionDirectory {
    sessions: RwLock<HashMap<UserId, Arc<Mutex<GameSession>>>>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Atomic check-and-insert: the existence check and the insert happen
    /// under one write lock, so two racing starts for the same user cannot
    /// both succeed. An existing game is never replaced or redealt.
    pub fn create(
        &self,
        user_id: UserId,
        round: Round,
    ) -> Result<Arc<Mutex<GameSession>>, SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?;
        if sessions.contains_key(&user_id) {
            return Err(SessionError::AlreadyActive(user_id));
        }
        let session = Arc::new(Mutex::new(GameSession::new(user_id, round)));
        sessions.insert(user_id, Arc::clone(&session));
        Ok(session)
    }

    pub fn get(&self, user_id: UserId) -> Result<Arc<Mutex<GameSession>>, SessionError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        sessions
            .get(&user_id)
            .cloned()
            .ok_or(SessionError::NoActiveSession(user_id))
    }

    /// Explicit destruction, after settlement or on abandonment. Returns the
    /// removed session if one existed.
    pub fn remove(
        &self,
        user_id: UserId,
    ) -> Result<Option<Arc<Mutex<GameSession>>>, SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?;
        Ok(sessions.remove(&user_id))
    }

    pub fn active_users(&self) -> Vec<UserId> {
        self.sessions
            .read()
            .map(|sessions| sessions.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for SessionDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No active game for user {0}")]
    NoActiveSession(UserId),
    #[error("User {0} already has an active game")]
    AlreadyActive(UserId),
    #[error("Session storage poisoned")]
    StoragePoisoned,
}
