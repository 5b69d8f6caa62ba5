//! Chat command dispatch.
//!
//! A [`Dispatcher`] takes one line of chat text from a [`Caller`] and
//! produces at most one reply. Lines that do not start with the league's
//! command prefix produce no reply at all.

pub mod command;
mod matches;
mod teams;

use command::{Command, CommandSpec, Invocation, UnknownCommand, COMMANDS};
use league_core::config::LeagueConfig;
use league_core::store::RecordStore;
use tracing::{debug, error, warn};

pub const PERMISSION_DENIED: &str = "You do not have permission to use this command.";
pub const INTERNAL_FAULT: &str = "An error occurred while processing the command.";

/// The chat user behind a line. Admin status is decided by the hosting
/// platform, not by the league.
#[derive(Debug, Clone)]
pub struct Caller {
    pub handle: String,
    pub is_admin: bool,
}

impl Caller {
    pub fn new(handle: impl Into<String>, is_admin: bool) -> Self {
        Self {
            handle: handle.into(),
            is_admin,
        }
    }
}

pub struct Dispatcher<'a> {
    store: &'a dyn RecordStore,
    config: &'a LeagueConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(store: &'a dyn RecordStore, config: &'a LeagueConfig) -> Self {
        Self { store, config }
    }

    fn prefix(&self) -> &str {
        &self.config.command_prefix
    }

    /// Handle one chat line. `None` means the line was not addressed to
    /// the bot.
    pub fn handle(&self, caller: &Caller, line: &str) -> Option<String> {
        let invocation = match command::invocation(line, self.prefix())? {
            Ok(invocation) => invocation,
            Err(UnknownCommand(name)) => {
                debug!(command = %name, caller = %caller.handle, "unknown command");
                return Some(self.unknown_reply(&name));
            }
        };
        Some(self.run(caller, &invocation))
    }

    fn run(&self, caller: &Caller, invocation: &Invocation<'_>) -> String {
        let spec = invocation.spec;
        if spec.admin && !caller.is_admin {
            warn!(command = spec.name, caller = %caller.handle, "permission denied");
            return PERMISSION_DENIED.to_string();
        }

        let command = match invocation.command() {
            Ok(command) => command,
            Err(_) => {
                debug!(command = spec.name, args = invocation.args, "wrong argument count");
                return self.usage_reply(spec);
            }
        };

        match self.execute(caller, command) {
            Ok(reply) => reply,
            Err(e) if e.is_rejection() => {
                warn!(command = spec.name, caller = %caller.handle, "{e}");
                e.to_string()
            }
            Err(e) => {
                error!(command = spec.name, caller = %caller.handle, "{e}");
                INTERNAL_FAULT.to_string()
            }
        }
    }

    fn execute(&self, caller: &Caller, command: Command) -> league_core::Result<String> {
        let (store, config) = (self.store, self.config);
        match command {
            Command::Hello => Ok(format!("Hello {}!", caller.handle)),
            Command::Help => Ok(self.help()),
            Command::AddTeam { name, owner } => teams::add_team(store, config, &name, &owner),
            Command::ShowAllTeams => teams::show_all_teams(store),
            Command::AddRosterEntry {
                team,
                entry,
                points,
            } => teams::add_roster_entry(store, &team, &entry, &points),
            Command::ShowRoster { team } => teams::show_roster(store, &team),
            Command::ClearRoster { team } => teams::clear_roster(store, config, &team),
            Command::DeleteAllTeams => teams::delete_all_teams(store),
            Command::ScheduleMatch {
                week,
                team,
                team_owner,
                opponent,
                opponent_owner,
            } => matches::schedule_match(
                store,
                &week,
                &team,
                &team_owner,
                &opponent,
                &opponent_owner,
            ),
            Command::ReportMatch(args) => matches::report_match(store, &caller.handle, &args),
            Command::RecordMatch(args) => matches::record_match(store, &caller.handle, &args),
            Command::ShowMatches { search } => matches::show_matches(store, &search),
            Command::ViewMatches => matches::view_matches(store),
            Command::ShowStandings => matches::show_standings(store, config),
        }
    }

    fn usage_reply(&self, spec: &CommandSpec) -> String {
        let prefix = self.prefix();
        let mut reply = format!("Usage: {}", spec.usage(prefix));
        if !spec.example.is_empty() {
            reply.push_str(&format!("\nExample: {prefix}{} {}", spec.name, spec.example));
        }
        reply
    }

    fn unknown_reply(&self, name: &str) -> String {
        let prefix = self.prefix();
        let names: Vec<String> = COMMANDS
            .iter()
            .map(|spec| format!("{prefix}{}", spec.name))
            .collect();
        format!(
            "Unknown command '{name}'. Available commands: {}. \
             Type {prefix}help for usage.",
            names.join(", ")
        )
    }

    fn help(&self) -> String {
        let prefix = self.prefix();
        let mut lines = vec!["Available commands:".to_string()];
        for spec in COMMANDS {
            let admin = if spec.admin { " (admin)" } else { "" };
            lines.push(format!("  {} - {}{admin}", spec.usage(prefix), spec.about));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_core::store::MemoryStore;

    struct League {
        store: MemoryStore,
        config: LeagueConfig,
    }

    impl League {
        fn new() -> Self {
            Self {
                store: MemoryStore::new(),
                config: LeagueConfig::new("test league"),
            }
        }

        fn say(&self, caller: &Caller, line: &str) -> Option<String> {
            Dispatcher::new(&self.store, &self.config).handle(caller, line)
        }

        fn admin(&self, line: &str) -> String {
            self.say(&Caller::new("oak", true), line).unwrap()
        }

        fn player(&self, handle: &str, line: &str) -> String {
            self.say(&Caller::new(handle, false), line).unwrap()
        }
    }

    #[test]
    fn ignores_lines_without_prefix() {
        let league = League::new();
        assert_eq!(league.say(&Caller::new("ash", false), "hello bot"), None);
    }

    #[test]
    fn hello_greets_caller() {
        let league = League::new();
        assert_eq!(league.player("ash", "!hello"), "Hello ash!");
    }

    #[test]
    fn unknown_command_lists_commands() {
        let league = League::new();
        let reply = league.player("ash", "!dance");
        assert!(reply.starts_with("Unknown command 'dance'. Available commands: !hello, !help, "));
        for spec in COMMANDS {
            assert!(reply.contains(&format!("!{}", spec.name)), "missing {}", spec.name);
        }
        assert!(reply.ends_with("!show_standings. Type !help for usage."));
    }

    #[test]
    fn help_lists_every_command() {
        let league = League::new();
        let reply = league.player("ash", "!help");
        for spec in COMMANDS {
            assert!(reply.contains(&spec.usage("!")), "missing {}", spec.name);
        }
        assert!(reply
            .contains("!add_team team name, owner - Register a team and its owner (admin)"));
    }

    #[test]
    fn admin_commands_are_gated() {
        let league = League::new();
        assert_eq!(league.player("ash", "!add_team Fire Squad, ash"), PERMISSION_DENIED);
        assert_eq!(league.player("ash", "!delete_all_teams"), PERMISSION_DENIED);
        assert_eq!(league.player("ash", "!show_all_teams"), "No teams found in the league.");
    }

    #[test]
    fn wrong_arity_replies_with_usage() {
        let league = League::new();
        assert_eq!(
            league.admin("!add_team Fire Squad"),
            "Usage: !add_team team name, owner\nExample: !add_team Team Name, username"
        );
    }

    #[test]
    fn rejections_are_shown_verbatim() {
        let league = League::new();
        league.admin("!add_team Fire Squad, ash");
        assert_eq!(
            league.admin("!add_team fire squad, misty"),
            "Team 'Fire Squad' or user 'misty' already exists in the league."
        );
    }

    #[test]
    fn custom_prefix_is_honored() {
        let mut league = League::new();
        league.config.command_prefix = "?".into();
        assert_eq!(league.player("ash", "?hello"), "Hello ash!");
        assert_eq!(league.say(&Caller::new("ash", false), "!hello"), None);
    }

    #[test]
    fn full_season_flow() {
        let league = League::new();
        league.admin("!add_team Fire Squad, ash");
        league.admin("!add_team Water Works, misty");
        league.admin("!add_team Rock Solid, brock");
        league.admin("!schedule_match 1, Fire Squad, ash, Water Works, misty");
        league.admin("!schedule_match 1, Rock Solid, brock, Fire Squad, ash");

        assert_eq!(
            league.player("ash", "!report_match Fire Squad, Water Works, 3, 1"),
            "Match result reported successfully!"
        );
        assert_eq!(
            league.player("brock", "!report_match brock, ash, 2, 2"),
            "Match result reported successfully!"
        );

        let standings = league.player("ash", "!show_standings");
        let lines: Vec<&str> = standings.lines().collect();
        assert_eq!(lines[0], "```markdown");
        assert!(lines[3].starts_with("| Fire Squad "));
        assert!(lines[3].ends_with("|  1   |   0    |  1  |   3    |"));
        assert!(lines[4].starts_with("| Water Works "));
        assert!(lines[5].starts_with("| Rock Solid "));
        assert_eq!(lines.last(), Some(&"```"));
    }
}
