//! Chat line parsing: `<prefix><name>[ <comma-separated args>]`.

use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Command table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Hello,
    Help,
    AddTeam,
    ShowAllTeams,
    AddRosterEntry,
    ShowRoster,
    ClearRoster,
    DeleteAllTeams,
    ScheduleMatch,
    ReportMatch,
    RecordMatch,
    ShowMatches,
    ViewMatches,
    ShowStandings,
}

#[derive(Debug)]
pub struct CommandSpec {
    pub kind: Kind,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Requires the caller to be a league administrator.
    pub admin: bool,
    /// Argument list shown in usage text; empty for no arguments.
    pub args: &'static str,
    pub example: &'static str,
    pub about: &'static str,
}

impl CommandSpec {
    pub fn usage(&self, prefix: &str) -> String {
        if self.args.is_empty() {
            format!("{prefix}{}", self.name)
        } else {
            format!("{prefix}{} {}", self.name, self.args)
        }
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        kind: Kind::Hello,
        name: "hello",
        aliases: &[],
        admin: false,
        args: "",
        example: "",
        about: "Say hello",
    },
    CommandSpec {
        kind: Kind::Help,
        name: "help",
        aliases: &[],
        admin: false,
        args: "",
        example: "",
        about: "List available commands",
    },
    CommandSpec {
        kind: Kind::AddTeam,
        name: "add_team",
        aliases: &[],
        admin: true,
        args: "team name, owner",
        example: "Team Name, username",
        about: "Register a team and its owner",
    },
    CommandSpec {
        kind: Kind::ShowAllTeams,
        name: "show_all_teams",
        aliases: &["teams"],
        admin: false,
        args: "",
        example: "",
        about: "List every team with owner and budget",
    },
    CommandSpec {
        kind: Kind::AddRosterEntry,
        name: "add_roster_entry",
        aliases: &["add_pokemon"],
        admin: true,
        args: "team name, entry name, point value",
        example: "Team Name, Pikachu, 20",
        about: "Add an entry to a team's roster and charge its cost",
    },
    CommandSpec {
        kind: Kind::ShowRoster,
        name: "show_roster",
        aliases: &["roster"],
        admin: false,
        args: "team name",
        example: "Team Name",
        about: "Show a team's roster",
    },
    CommandSpec {
        kind: Kind::ClearRoster,
        name: "clear_roster",
        aliases: &[],
        admin: true,
        args: "team name",
        example: "Team Name",
        about: "Empty a roster and restore the starting budget",
    },
    CommandSpec {
        kind: Kind::DeleteAllTeams,
        name: "delete_all_teams",
        aliases: &[],
        admin: true,
        args: "",
        example: "",
        about: "Remove every team from the league",
    },
    CommandSpec {
        kind: Kind::ScheduleMatch,
        name: "schedule_match",
        aliases: &[],
        admin: true,
        args: "week, team name, owner, opponent team name, opponent owner",
        example: "1, Team Name, username, Other Team, otheruser",
        about: "Add an unplayed match to the schedule",
    },
    CommandSpec {
        kind: Kind::ReportMatch,
        name: "report_match",
        aliases: &[],
        admin: false,
        args: "team name, opponent team name, team score, opponent score",
        example: "Team Name, Other Team, 3, 1",
        about: "Report the result of a scheduled match",
    },
    CommandSpec {
        kind: Kind::RecordMatch,
        name: "record_match",
        aliases: &[],
        admin: false,
        args: "team name, opponent team name, team score, opponent score",
        example: "Team Name, Other Team, 3, 1",
        about: "Record the result of an unscheduled match",
    },
    CommandSpec {
        kind: Kind::ShowMatches,
        name: "show_matches",
        aliases: &[],
        admin: false,
        args: "week | team name | owner",
        example: "1",
        about: "Search the schedule",
    },
    CommandSpec {
        kind: Kind::ViewMatches,
        name: "view_matches",
        aliases: &[],
        admin: false,
        args: "",
        example: "",
        about: "List every match",
    },
    CommandSpec {
        kind: Kind::ShowStandings,
        name: "show_standings",
        aliases: &["standings"],
        admin: false,
        args: "",
        example: "",
        about: "Show the league table",
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.answers_to(name))
}

// ---------------------------------------------------------------------------
// Parsed commands
// ---------------------------------------------------------------------------

/// Raw result arguments; validation happens in `league_core::matches`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreArgs {
    pub team: String,
    pub opponent: String,
    pub team_score: String,
    pub opponent_score: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Help,
    AddTeam {
        name: String,
        owner: String,
    },
    ShowAllTeams,
    AddRosterEntry {
        team: String,
        entry: String,
        points: String,
    },
    ShowRoster {
        team: String,
    },
    ClearRoster {
        team: String,
    },
    DeleteAllTeams,
    ScheduleMatch {
        week: String,
        team: String,
        team_owner: String,
        opponent: String,
        opponent_owner: String,
    },
    ReportMatch(ScoreArgs),
    RecordMatch(ScoreArgs),
    ShowMatches {
        search: String,
    },
    ViewMatches,
    ShowStandings,
}

/// A line addressed to the bot, before argument parsing.
#[derive(Debug)]
pub struct Invocation<'a> {
    pub spec: &'static CommandSpec,
    pub args: &'a str,
}

/// The command name did not match any entry in [`COMMANDS`].
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

/// The argument text did not split into the command's arity.
#[derive(Debug, PartialEq, Eq)]
pub struct WrongArity(pub Kind);

static LINE_RE: OnceLock<Regex> = OnceLock::new();

fn line_re() -> &'static Regex {
    LINE_RE.get_or_init(|| Regex::new(r"(?s)^(\w+)(?:\s+(.*))?$").unwrap())
}

/// Split a chat line into command and argument text.
///
/// Returns `None` for lines that are not addressed to the bot.
pub fn invocation<'a>(
    line: &'a str,
    prefix: &str,
) -> Option<Result<Invocation<'a>, UnknownCommand>> {
    let rest = line.trim().strip_prefix(prefix)?;
    let caps = line_re().captures(rest)?;
    let name = caps.get(1)?.as_str();
    let args = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(match lookup(name) {
        Some(spec) => Ok(Invocation { spec, args }),
        None => Err(UnknownCommand(name.to_string())),
    })
}

fn split_exact(args: &str, n: usize, kind: Kind) -> Result<Vec<String>, WrongArity> {
    let parts: Vec<String> = args.split(',').map(|p| p.trim().to_string()).collect();
    if parts.len() != n {
        return Err(WrongArity(kind));
    }
    Ok(parts)
}

fn score_args(args: &str, kind: Kind) -> Result<ScoreArgs, WrongArity> {
    let mut parts = split_exact(args, 4, kind)?.into_iter();
    let mut next = || parts.next().unwrap_or_default();
    Ok(ScoreArgs {
        team: next(),
        opponent: next(),
        team_score: next(),
        opponent_score: next(),
    })
}

fn whole(args: &str, kind: Kind) -> Result<String, WrongArity> {
    if args.is_empty() {
        return Err(WrongArity(kind));
    }
    Ok(args.to_string())
}

impl Invocation<'_> {
    /// Parse the argument text according to the command's arity.
    pub fn command(&self) -> Result<Command, WrongArity> {
        let kind = self.spec.kind;
        let args = self.args;
        Ok(match kind {
            Kind::Hello => Command::Hello,
            Kind::Help => Command::Help,
            Kind::ShowAllTeams => Command::ShowAllTeams,
            Kind::DeleteAllTeams => Command::DeleteAllTeams,
            Kind::ViewMatches => Command::ViewMatches,
            Kind::ShowStandings => Command::ShowStandings,
            Kind::AddTeam => {
                let mut parts = split_exact(args, 2, kind)?.into_iter();
                Command::AddTeam {
                    name: parts.next().unwrap_or_default(),
                    owner: parts.next().unwrap_or_default(),
                }
            }
            Kind::AddRosterEntry => {
                // At most three parts: extra commas stay in the point value.
                let parts: Vec<String> =
                    args.splitn(3, ',').map(|p| p.trim().to_string()).collect();
                let [team, entry, points]: [String; 3] =
                    parts.try_into().map_err(|_| WrongArity(kind))?;
                Command::AddRosterEntry {
                    team,
                    entry,
                    points,
                }
            }
            Kind::ShowRoster => Command::ShowRoster {
                team: whole(args, kind)?,
            },
            Kind::ClearRoster => Command::ClearRoster {
                team: whole(args, kind)?,
            },
            Kind::ScheduleMatch => {
                let parts: [String; 5] = split_exact(args, 5, kind)?
                    .try_into()
                    .map_err(|_| WrongArity(kind))?;
                let [week, team, team_owner, opponent, opponent_owner] = parts;
                Command::ScheduleMatch {
                    week,
                    team,
                    team_owner,
                    opponent,
                    opponent_owner,
                }
            }
            Kind::ReportMatch => Command::ReportMatch(score_args(args, kind)?),
            Kind::RecordMatch => Command::RecordMatch(score_args(args, kind)?),
            // Blank searches reach the handler, which rejects them with a hint.
            Kind::ShowMatches => Command::ShowMatches {
                search: args.to_string(),
            },
        })
    }
}
