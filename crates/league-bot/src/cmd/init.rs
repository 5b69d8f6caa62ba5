use anyhow::Context;
use league_core::{config::LeagueConfig, io, paths, store::RedbStore};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let league_name = name.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "league".to_string())
    });

    println!("Initializing league in: {}", root.display());

    let dir = paths::league_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    if !paths::config_path(root).exists() {
        let cfg = LeagueConfig::new(&league_name);
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    let db_path = paths::database_path(root);
    let existed = db_path.exists();
    RedbStore::open(&db_path).with_context(|| format!("failed to create {}", db_path.display()))?;
    if existed {
        println!("  exists:  {}", paths::DATABASE_FILE);
    } else {
        println!("  created: {}", paths::DATABASE_FILE);
    }

    println!("\nLeague '{league_name}' is ready.");
    Ok(())
}
