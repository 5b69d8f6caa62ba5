//! Record store for teams and matches.
//!
//! Command handlers receive a `&dyn RecordStore` instead of reaching for a
//! process-wide connection. Two implementations ship:
//!
//! - [`MemoryStore`]: mutex-guarded vectors, for tests and throwaway leagues.
//! - [`RedbStore`]: an embedded redb database under `.league/league.db`.
//!
//! Both return teams and matches in insertion order, which the standings
//! tie-break depends on.

pub mod db;
pub mod memory;

pub use db::RedbStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::matches::{Match, MatchQuery, MatchReport, Pairing};
use crate::team::{Team, TeamPatch, TeamQuery};

pub trait RecordStore: Send + Sync {
    /// First team satisfying `query`, in insertion order.
    fn find_team(&self, query: &TeamQuery) -> Result<Option<Team>>;

    fn list_teams(&self) -> Result<Vec<Team>>;

    fn insert_team(&self, team: &Team) -> Result<()>;

    /// Apply `patch` to the team named `name` (case-insensitive). Returns the
    /// updated team, or `None` when no team has that name.
    fn update_team(&self, name: &str, patch: &TeamPatch) -> Result<Option<Team>>;

    /// Remove every team, returning how many were removed.
    fn delete_all_teams(&self) -> Result<usize>;

    fn insert_match(&self, record: &Match) -> Result<()>;

    fn find_matches(&self, query: &MatchQuery) -> Result<Vec<Match>>;

    /// Resolve the first unresolved match between the paired teams.
    ///
    /// The check and the update happen as one step, so of two concurrent
    /// reports for the same fixture only one gets `Some`.
    fn report_pending(&self, pairing: &Pairing, report: &MatchReport) -> Result<Option<Match>>;
}
