//! Storage substrate for the trainer.
//!
//! A single SQLite key-value table holds JSON blobs (challenge progress,
//! per-mode performance, the reward wallet). The engine only ever sees
//! decoded values: reads fall back to the caller's default on any failure
//! and failed writes are dropped silently.

use crate::models::{ChallengeProgress, Mode, PerfStat};
use rusqlite::{Connection, Result, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub const PROGRESS_KEY: &str = "challenge_progress";
pub const PERF_KEY: &str = "perf_by_mode";
pub const WALLET_KEY: &str = "wallet";

/// Coins and experience accumulated from claimed challenge rewards.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Wallet {
    #[serde(default)]
    pub coins: u32,
    #[serde(default)]
    pub xp: u32,
}

/// Opens the trainer database and creates the key-value table.
pub fn init_database() -> Result<Connection> {
    let conn = Connection::open("trainer.sqlite3")?;
    create_tables(&conn)?;
    Ok(conn)
}

/// In-memory database with the same schema, for tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads and decodes a persisted value. Missing key, storage error or
/// malformed JSON all come back as `None`.
pub fn get_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Option<T> {
    let raw: String = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .ok()?;
    serde_json::from_str(&raw).ok()
}

/// Encodes and stores a value under `key`. Write failures are dropped.
pub fn set_json<T: Serialize>(conn: &Connection, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    let _ = conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, raw],
    );
}

pub fn load_progress(conn: &Connection) -> Option<ChallengeProgress> {
    get_json(conn, PROGRESS_KEY)
}

pub fn save_progress(conn: &Connection, progress: &ChallengeProgress) {
    set_json(conn, PROGRESS_KEY, progress);
}

pub fn load_perf(conn: &Connection) -> HashMap<Mode, PerfStat> {
    get_json(conn, PERF_KEY).unwrap_or_default()
}

pub fn save_perf(conn: &Connection, perf: &HashMap<Mode, PerfStat>) {
    set_json(conn, PERF_KEY, perf);
}

pub fn load_wallet(conn: &Connection) -> Wallet {
    get_json(conn, WALLET_KEY).unwrap_or_default()
}

pub fn save_wallet(conn: &Connection, wallet: &Wallet) {
    set_json(conn, WALLET_KEY, wallet);
}
