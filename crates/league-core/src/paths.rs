use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const LEAGUE_DIR: &str = ".league";
pub const CONFIG_FILE: &str = ".league/config.yaml";
pub const DATABASE_FILE: &str = ".league/league.db";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn league_dir(root: &Path) -> PathBuf {
    root.join(LEAGUE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}
