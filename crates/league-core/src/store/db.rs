//! Persistent record store using redb.
//!
//! # Table design
//!
//! `teams` and `matches` share one key layout, a 24-byte composite:
//! ```text
//! [ seq: u64 big-endian (8 bytes) | uuid: 16 bytes ]
//! ```
//!
//! `seq` is one past the highest sequence in the table, assigned inside the
//! inserting write transaction. Big-endian keeps byte order equal to
//! insertion order, so a plain table scan returns records oldest first.
//! Values are JSON-encoded `Team` / `Match` records.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{LeagueError, Result};
use crate::matches::{Match, MatchQuery, MatchReport, Pairing};
use crate::team::{Team, TeamPatch, TeamQuery};

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

/// Key: 24-byte composite (seq big-endian ++ uuid bytes)
/// Value: JSON-encoded record
type RecordTable = TableDefinition<'static, &'static [u8], &'static [u8]>;

const TEAMS: RecordTable = TableDefinition::new("teams");
const MATCHES: RecordTable = TableDefinition::new("matches");

// ---------------------------------------------------------------------------
// Key / codec helpers
// ---------------------------------------------------------------------------

fn record_key(seq: u64, id: Uuid) -> [u8; 24] {
    let mut key = [0u8; 24];
    key[..8].copy_from_slice(&seq.to_be_bytes());
    key[8..].copy_from_slice(id.as_bytes());
    key
}

fn key_seq(key: &[u8]) -> u64 {
    let mut seq = [0u8; 8];
    seq.copy_from_slice(&key[..8]);
    u64::from_be_bytes(seq)
}

fn store_err(e: impl std::fmt::Display) -> LeagueError {
    LeagueError::Store(e.to_string())
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(store_err)
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(store_err)
}

// ---------------------------------------------------------------------------
// RedbStore
// ---------------------------------------------------------------------------

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the database at `path`, creating both tables if they
    /// don't already exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            crate::io::ensure_dir(parent)?;
        }
        let db = Database::create(path).map_err(store_err)?;
        let wt = db.begin_write().map_err(store_err)?;
        wt.open_table(TEAMS).map_err(store_err)?;
        wt.open_table(MATCHES).map_err(store_err)?;
        wt.commit().map_err(store_err)?;
        Ok(Self { db })
    }

    fn insert(&self, def: RecordTable, id: Uuid, value: &[u8]) -> Result<()> {
        let wt = self.db.begin_write().map_err(store_err)?;
        {
            let mut table = wt.open_table(def).map_err(store_err)?;
            let next = match table.last().map_err(store_err)? {
                Some((k, _)) => key_seq(k.value()) + 1,
                None => 0,
            };
            let key = record_key(next, id);
            table.insert(key.as_slice(), value).map_err(store_err)?;
        }
        wt.commit().map_err(store_err)?;
        Ok(())
    }

    fn scan<T: DeserializeOwned>(&self, def: RecordTable) -> Result<Vec<T>> {
        let rt = self.db.begin_read().map_err(store_err)?;
        let table = rt.open_table(def).map_err(store_err)?;
        let mut result = Vec::new();
        for entry in table.iter().map_err(store_err)? {
            let (_, v) = entry.map_err(store_err)?;
            result.push(decode(v.value())?);
        }
        Ok(result)
    }

    /// Find the first record accepted by `select`, let `update` modify it,
    /// and write it back, all in one write transaction.
    ///
    /// Returns the rewritten record, or `None` if nothing was selected or
    /// `update` declined.
    fn update_first<T, S, U>(
        &self,
        def: RecordTable,
        select: S,
        update: U,
    ) -> Result<Option<T>>
    where
        T: Serialize + DeserializeOwned,
        S: Fn(&T) -> bool,
        U: FnOnce(&mut T) -> bool,
    {
        let wt = self.db.begin_write().map_err(store_err)?;
        let updated = {
            let mut table = wt.open_table(def).map_err(store_err)?;
            let mut found = None;
            for entry in table.iter().map_err(store_err)? {
                let (k, v) = entry.map_err(store_err)?;
                let record: T = decode(v.value())?;
                if select(&record) {
                    found = Some((k.value().to_vec(), record));
                    break;
                }
            }
            match found {
                Some((key, mut record)) => {
                    if update(&mut record) {
                        let value = encode(&record)?;
                        table
                            .insert(key.as_slice(), value.as_slice())
                            .map_err(store_err)?;
                        Some(record)
                    } else {
                        None
                    }
                }
                None => None,
            }
        };
        wt.commit().map_err(store_err)?;
        Ok(updated)
    }
}

impl RecordStore for RedbStore {
    fn find_team(&self, query: &TeamQuery) -> Result<Option<Team>> {
        debug!(?query, "find team");
        Ok(self
            .scan::<Team>(TEAMS)?
            .into_iter()
            .find(|t| t.matches(query)))
    }

    fn list_teams(&self) -> Result<Vec<Team>> {
        self.scan(TEAMS)
    }

    fn insert_team(&self, team: &Team) -> Result<()> {
        debug!(team = %team.name, "insert team");
        self.insert(TEAMS, team.id, &encode(team)?)
    }

    fn update_team(&self, name: &str, patch: &TeamPatch) -> Result<Option<Team>> {
        debug!(team = name, ?patch, "update team");
        let query = TeamQuery::Name(name.to_string());
        self.update_first(
            TEAMS,
            |t: &Team| t.matches(&query),
            |t| {
                t.apply(patch);
                true
            },
        )
    }

    fn delete_all_teams(&self) -> Result<usize> {
        let wt = self.db.begin_write().map_err(store_err)?;
        let removed = {
            let mut table = wt.open_table(TEAMS).map_err(store_err)?;
            let mut keys = Vec::new();
            for entry in table.iter().map_err(store_err)? {
                let (k, _) = entry.map_err(store_err)?;
                keys.push(k.value().to_vec());
            }
            for key in &keys {
                table.remove(key.as_slice()).map_err(store_err)?;
            }
            keys.len()
        };
        wt.commit().map_err(store_err)?;
        debug!(removed, "deleted all teams");
        Ok(removed)
    }

    fn insert_match(&self, record: &Match) -> Result<()> {
        debug!(team = %record.team, opponent = %record.opponent, "insert match");
        self.insert(MATCHES, record.id, &encode(record)?)
    }

    fn find_matches(&self, query: &MatchQuery) -> Result<Vec<Match>> {
        debug!(?query, "find matches");
        Ok(self
            .scan::<Match>(MATCHES)?
            .into_iter()
            .filter(|m| m.matches(query))
            .collect())
    }

    fn report_pending(&self, pairing: &Pairing, report: &MatchReport) -> Result<Option<Match>> {
        debug!(?pairing, "report pending match");
        self.update_first(
            MATCHES,
            |m: &Match| m.awaits_report(pairing),
            |m| m.apply_report(pairing, report),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
