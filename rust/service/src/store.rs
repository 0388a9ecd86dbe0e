use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use thiserror::Error;

/// External user identity, as supplied by the transport.
pub type UserId = i64;

/// Starting balance written into new rows. The column is reserved for a
/// future economy; no game logic reads or changes it.
pub const STARTING_BALANCE: i64 = 1000;

pub(crate) const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS users (
    id       INTEGER PRIMARY KEY,
    nickname TEXT,
    games    INTEGER NOT NULL DEFAULT 0,
    wins     INTEGER NOT NULL DEFAULT 0,
    losses   INTEGER NOT NULL DEFAULT 0,
    ties     INTEGER NOT NULL DEFAULT 0,
    balance  INTEGER NOT NULL DEFAULT 1000
)";

/// One user's lifetime statistics.
/// After every settled round, `games == wins + losses + ties`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct UserStats {
    pub id: UserId,
    pub nickname: Option<String>,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Reserved economy column, carried through every update untouched.
    pub balance: i64,
}

impl UserStats {
    /// The record a user has before ever finishing a game.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            nickname: None,
            games: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            balance: STARTING_BALANCE,
        }
    }
}

/// Durable per-user statistics over SQLite. A single shared connection,
/// acquired for exactly the duration of each statement and released on
/// every exit path by guard drop.
pub struct StatsStore {
    conn: Mutex<Connection>,
}

impl StatsStore {
    /// Opens (creating if needed) the database at `path` and applies the
    /// schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::StoragePoisoned)
    }

    /// Reads one user's record. Unknown users get the default record; reads
    /// never create rows.
    pub fn get(&self, id: UserId) -> Result<UserStats, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, nickname, games, wins, losses, ties, balance
                 FROM users WHERE id = ?1",
                params![id],
                stats_from_row,
            )
            .optional()?;
        Ok(row.unwrap_or_else(|| UserStats::new(id)))
    }

    /// Writes the full record in one statement. Insert and update are the
    /// same atomic operation, so concurrent upserts for different users
    /// never interleave partial writes.
    pub fn upsert(&self, stats: &UserStats) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (id, nickname, games, wins, losses, ties, balance)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                 nickname = excluded.nickname,
                 games    = excluded.games,
                 wins     = excluded.wins,
                 losses   = excluded.losses,
                 ties     = excluded.ties,
                 balance  = excluded.balance",
            params![
                stats.id,
                stats.nickname,
                stats.games,
                stats.wins,
                stats.losses,
                stats.ties,
                stats.balance
            ],
        )?;
        Ok(())
    }

    /// Sets only the nickname, creating a default row for unknown users.
    /// One statement, so it cannot clobber counters written concurrently.
    pub fn set_nickname(&self, id: UserId, nickname: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (id, nickname) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET nickname = excluded.nickname",
            params![id, nickname],
        )?;
        Ok(())
    }

    /// Leaderboard: users with a non-empty nickname, most wins first, ties
    /// broken by id for a stable order.
    pub fn top_by_wins(&self, limit: u32) -> Result<Vec<UserStats>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, nickname, games, wins, losses, ties, balance
             FROM users
             WHERE nickname IS NOT NULL AND nickname != ''
             ORDER BY wins DESC, id ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], stats_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn stats_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserStats> {
    Ok(UserStats {
        id: row.get(0)?,
        nickname: row.get(1)?,
        games: row.get(2)?,
        wins: row.get(3)?,
        losses: row.get(4)?,
        ties: row.get(5)?,
        balance: row.get(6)?,
    })
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Store connection poisoned")]
    StoragePoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: UserId, nickname: &str, wins: u32) -> UserStats {
        UserStats {
            nickname: Some(nickname.to_string()),
            games: wins,
            wins,
            ..UserStats::new(id)
        }
    }

    fn row_count(store: &StatsStore) -> i64 {
        let conn = store.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn unknown_user_gets_default_record_without_a_row() {
        let store = StatsStore::open_in_memory().unwrap();
        let stats = store.get(7).unwrap();
        assert_eq!(stats, UserStats::new(7));
        assert_eq!(stats.balance, STARTING_BALANCE);
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn upsert_inserts_then_updates() {
        let store = StatsStore::open_in_memory().unwrap();
        let mut stats = UserStats::new(1);
        stats.games = 1;
        stats.wins = 1;
        store.upsert(&stats).unwrap();
        assert_eq!(store.get(1).unwrap(), stats);

        stats.games = 2;
        stats.ties = 1;
        stats.nickname = Some("ada".to_string());
        store.upsert(&stats).unwrap();
        assert_eq!(store.get(1).unwrap(), stats);
        assert_eq!(row_count(&store), 1);
    }

    #[test]
    fn upsert_preserves_balance() {
        let store = StatsStore::open_in_memory().unwrap();
        let mut stats = UserStats::new(3);
        stats.balance = 2500;
        store.upsert(&stats).unwrap();

        let mut updated = store.get(3).unwrap();
        updated.games += 1;
        updated.wins += 1;
        store.upsert(&updated).unwrap();
        assert_eq!(store.get(3).unwrap().balance, 2500);
    }

    #[test]
    fn set_nickname_creates_default_row_for_unknown_user() {
        let store = StatsStore::open_in_memory().unwrap();
        store.set_nickname(9, "turing").unwrap();
        let stats = store.get(9).unwrap();
        assert_eq!(stats.nickname.as_deref(), Some("turing"));
        assert_eq!(stats.games, 0);
        assert_eq!(stats.balance, STARTING_BALANCE);
    }

    #[test]
    fn set_nickname_keeps_existing_counters() {
        let store = StatsStore::open_in_memory().unwrap();
        store.upsert(&named(4, "old", 6)).unwrap();
        store.set_nickname(4, "new").unwrap();
        let stats = store.get(4).unwrap();
        assert_eq!(stats.nickname.as_deref(), Some("new"));
        assert_eq!(stats.wins, 6);
    }

    #[test]
    fn top_by_wins_skips_anonymous_users_and_orders_by_wins() {
        let store = StatsStore::open_in_memory().unwrap();
        store.upsert(&named(1, "a", 5)).unwrap();
        store.upsert(&named(2, "b", 9)).unwrap();
        let mut anonymous = UserStats::new(3);
        anonymous.games = 4;
        anonymous.wins = 4;
        store.upsert(&anonymous).unwrap();

        let top = store.top_by_wins(3).unwrap();
        let ids: Vec<UserId> = top.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn top_by_wins_respects_limit_and_breaks_ties_by_id() {
        let store = StatsStore::open_in_memory().unwrap();
        store.upsert(&named(30, "c", 2)).unwrap();
        store.upsert(&named(10, "a", 2)).unwrap();
        store.upsert(&named(20, "b", 7)).unwrap();

        let top = store.top_by_wins(2).unwrap();
        let ids: Vec<UserId> = top.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![20, 10]);
    }

    #[test]
    fn empty_nickname_rows_stay_off_the_leaderboard() {
        let store = StatsStore::open_in_memory().unwrap();
        store.upsert(&named(5, "", 8)).unwrap();
        assert!(store.top_by_wins(10).unwrap().is_empty());
    }

    #[test]
    fn reopened_file_store_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.db");

        let store = StatsStore::open(&path).unwrap();
        store.upsert(&named(11, "grace", 3)).unwrap();
        drop(store);

        let reopened = StatsStore::open(&path).unwrap();
        let stats = reopened.get(11).unwrap();
        assert_eq!(stats.nickname.as_deref(), Some("grace"));
        assert_eq!(stats.wins, 3);
    }
}
