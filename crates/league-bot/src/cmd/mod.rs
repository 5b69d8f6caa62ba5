pub mod chat;
pub mod config;
pub mod init;
pub mod view;

use anyhow::Context;
use league_core::config::LeagueConfig;
use league_core::paths;
use league_core::store::RedbStore;
use std::path::Path;

/// An initialized league: its config and its open record store.
pub struct League {
    pub config: LeagueConfig,
    pub store: RedbStore,
}

pub fn open_league(root: &Path) -> anyhow::Result<League> {
    let config = LeagueConfig::load(root).context("failed to load config")?;
    let db_path = paths::database_path(root);
    let store = RedbStore::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    Ok(League { config, store })
}
