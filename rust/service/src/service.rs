use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use pontoon_engine::cards::Card;
use pontoon_engine::deck::Deck;
use pontoon_engine::errors::GameError;
use pontoon_engine::round::{Action, Outcome, Round, RoundState};

use crate::session::{SessionDirectory, SessionError};
use crate::store::{StatsStore, StoreError, UserId, UserStats};

/// Result descriptor handed back to transports after every action.
/// Carries only what the player is allowed to see: while the round is open
/// the dealer shows a single up-card and `dealer_score` stays `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReply {
    pub player_cards: Vec<Card>,
    pub player_score: u8,
    /// Dealer cards visible to the player: the up-card only while the player
    /// acts, the full hand once resolved.
    pub dealer_cards: Vec<Card>,
    /// Count of face-down dealer cards, for rendering placeholders.
    pub dealer_hidden: usize,
    pub dealer_score: Option<u8>,
    /// `None` while the player may still act.
    pub outcome: Option<Outcome>,
    /// The post-settlement record when this action resolved the round.
    pub stats: Option<UserStats>,
}

fn reply_for(round: &Round, stats: Option<UserStats>) -> ActionReply {
    let dealer = round.dealer_hand();
    let (dealer_cards, dealer_hidden, dealer_score) = if round.is_resolved() {
        (dealer.cards().to_vec(), 0, Some(dealer.score()))
    } else {
        let visible: Vec<Card> = dealer.cards().iter().take(1).copied().collect();
        (visible, dealer.len().saturating_sub(1), None)
    };
    ActionReply {
        player_cards: round.player_hand().cards().to_vec(),
        player_score: round.player_hand().score(),
        dealer_cards,
        dealer_hidden,
        dealer_score,
        outcome: round.outcome(),
        stats,
    }
}

/// The transport-facing facade: routes actions into per-user sessions and
/// settles resolved rounds into the stats store.
///
/// Settlement is the one place game results become durable, and it runs
/// exactly once per resolved round: the stats upsert lands first, the
/// session leaves the directory second. A failed upsert therefore leaves
/// the session in place, and the next touch of that user retries the
/// settlement before doing anything else.
pub struct GameService {
    directory: SessionDirectory,
    store: Arc<StatsStore>,
}

impl GameService {
    pub fn new(store: Arc<StatsStore>) -> Self {
        Self {
            directory: SessionDirectory::new(),
            store,
        }
    }

    /// Applies one action for one user and returns what the transport should
    /// render. `Start` deals from a fresh entropy-shuffled deck; `Hit` and
    /// `Stand` require an active game.
    pub fn handle_action(
        &self,
        user_id: UserId,
        action: Action,
    ) -> Result<ActionReply, ServiceError> {
        self.settle_lingering(user_id)?;
        match action {
            Action::Start => {
                let mut deck = Deck::new();
                deck.shuffle();
                self.start_round(user_id, deck)
            }
            Action::Hit | Action::Stand => {
                let session = self.directory.get(user_id)?;
                let mut guard = session
                    .lock()
                    .map_err(|_| SessionError::StoragePoisoned)?;
                if guard.closed {
                    return Err(SessionError::NoActiveSession(user_id).into());
                }
                let state = match action {
                    Action::Hit => guard.round.hit()?,
                    _ => guard.round.stand()?,
                };
                tracing::debug!(user_id, action = ?action, state = ?state, "Action applied");
                match state {
                    RoundState::AwaitingAction => Ok(reply_for(&guard.round, None)),
                    RoundState::Resolved(outcome) => {
                        let stats = self.settle_locked(&mut guard, outcome)?;
                        Ok(reply_for(&guard.round, Some(stats)))
                    }
                }
            }
        }
    }

    /// Starts a round from a caller-supplied deck. Deterministic entry point
    /// for replays and tests; [`handle_action`](Self::handle_action) feeds it
    /// an entropy-shuffled deck. An opening natural settles immediately.
    pub fn start_round(&self, user_id: UserId, deck: Deck) -> Result<ActionReply, ServiceError> {
        let round = Round::start(deck)?;
        let session = self.directory.create(user_id, round)?;
        tracing::info!(user_id, "Round started");
        let mut guard = session
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        match guard.round.state() {
            RoundState::AwaitingAction => Ok(reply_for(&guard.round, None)),
            RoundState::Resolved(outcome) => {
                let stats = self.settle_locked(&mut guard, outcome)?;
                Ok(reply_for(&guard.round, Some(stats)))
            }
        }
    }

    /// Current stats for one user; unknown users get the default record.
    pub fn stats(&self, user_id: UserId) -> Result<UserStats, ServiceError> {
        Ok(self.store.get(user_id)?)
    }

    /// Sets the user's leaderboard name. The name is trimmed; empty after
    /// trimming is rejected.
    pub fn set_nickname(&self, user_id: UserId, nickname: &str) -> Result<(), ServiceError> {
        let trimmed = nickname.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::EmptyNickname);
        }
        self.store.set_nickname(user_id, trimmed)?;
        tracing::info!(user_id, nickname = trimmed, "Nickname updated");
        Ok(())
    }

    /// Leaderboard of named users ordered by wins.
    pub fn top_by_wins(&self, limit: u32) -> Result<Vec<UserStats>, ServiceError> {
        Ok(self.store.top_by_wins(limit)?)
    }

    /// Drops the user's active game without recording a result. A resolved
    /// round that is still waiting on a failed settlement is settled first,
    /// never dropped. Returns whether an in-progress game was abandoned.
    pub fn abandon(&self, user_id: UserId) -> Result<bool, ServiceError> {
        self.settle_lingering(user_id)?;
        let session = match self.directory.get(user_id) {
            Ok(session) => session,
            Err(SessionError::NoActiveSession(_)) => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        let mut guard = session
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        if guard.closed {
            return Ok(false);
        }
        guard.closed = true;
        self.directory.remove(user_id)?;
        tracing::info!(user_id, "Game abandoned");
        Ok(true)
    }

    /// Retries the settlement of a resolved round left behind by an earlier
    /// store failure. Called before every user-facing operation so a broken
    /// store delays, but never loses, a finished game.
    fn settle_lingering(&self, user_id: UserId) -> Result<(), ServiceError> {
        let session = match self.directory.get(user_id) {
            Ok(session) => session,
            Err(SessionError::NoActiveSession(_)) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        let mut guard = session
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        if guard.closed {
            return Ok(());
        }
        if let Some(outcome) = guard.round.outcome() {
            self.settle_locked(&mut guard, outcome)?;
        }
        Ok(())
    }

    /// Records one resolved round: `games` plus exactly one of
    /// wins/losses/ties, then the full-record upsert, then removal from the
    /// directory. Caller must hold the session mutex, which is what makes
    /// the settlement exactly-once under concurrent touches.
    fn settle_locked(
        &self,
        session: &mut crate::session::GameSession,
        outcome: Outcome,
    ) -> Result<UserStats, ServiceError> {
        match self.write_result(session.user_id, outcome) {
            Ok(stats) => {
                session.closed = true;
                self.directory.remove(session.user_id)?;
                tracing::info!(
                    user_id = session.user_id,
                    outcome = ?outcome,
                    games = stats.games,
                    "Round settled"
                );
                Ok(stats)
            }
            Err(err) => {
                tracing::error!(
                    user_id = session.user_id,
                    error = %err,
                    "Failed to record round result; session retained for retry"
                );
                Err(err)
            }
        }
    }

    fn write_result(&self, user_id: UserId, outcome: Outcome) -> Result<UserStats, ServiceError> {
        let mut stats = self.store.get(user_id)?;
        stats.games += 1;
        if outcome.is_win() {
            stats.wins += 1;
        } else if outcome.is_loss() {
            stats.losses += 1;
        } else {
            stats.ties += 1;
        }
        self.store.upsert(&stats)?;
        Ok(stats)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Nickname must not be empty")]
    EmptyNickname,
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("Game engine error: {0}")]
    Game(#[from] GameError),
    #[error("Stats store error: {0}")]
    Store(#[from] StoreError),
}
