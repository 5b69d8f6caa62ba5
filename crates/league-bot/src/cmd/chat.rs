use super::open_league;
use crate::output::print_json;
use anyhow::Context;
use league_bot::chat::{Caller, Dispatcher};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

/// Dispatch a single chat line and print the reply.
pub fn exec(root: &Path, handle: &str, admin: bool, line: &str, json: bool) -> anyhow::Result<()> {
    let league = open_league(root)?;
    let dispatcher = Dispatcher::new(&league.store, &league.config);
    let caller = Caller::new(handle, admin);
    let reply = dispatcher.handle(&caller, line);

    if json {
        return print_json(&serde_json::json!({ "reply": reply }));
    }
    if let Some(reply) = reply {
        println!("{reply}");
    }
    Ok(())
}

/// Read chat lines from stdin until EOF or the quit command.
pub fn session(root: &Path, handle: &str, admin: bool) -> anyhow::Result<()> {
    let league = open_league(root)?;
    let dispatcher = Dispatcher::new(&league.store, &league.config);
    let caller = Caller::new(handle, admin);
    let quit = format!("{}quit", league.config.command_prefix);

    info!(league = %league.config.league.name, caller = handle, admin, "chat session started");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().eq_ignore_ascii_case(&quit) {
            break;
        }
        if let Some(reply) = dispatcher.handle(&caller, &line) {
            writeln!(stdout, "{reply}").context("failed to write reply")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    info!(caller = handle, "chat session ended");
    Ok(())
}
