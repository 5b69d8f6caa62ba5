//! Fixed-width text tables for replies and terminal output.

use league_core::matches::Match;
use league_core::standings::StandingsRow;
use league_core::team::Team;

#[derive(Debug, Clone, Copy)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A column with a minimum width. Longer cells push the column out rather
/// than being cut; names are shortened with [`truncate`] before they get here.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
    pub align: Align,
}

const fn col(title: &'static str, width: usize, align: Align) -> Column {
    Column {
        title,
        width,
        align,
    }
}

const TEAM_WIDTH: usize = 19;
const ENTRY_WIDTH: usize = 18;

const TEAM_COLUMNS: [Column; 3] = [
    col("Team", TEAM_WIDTH, Align::Left),
    col("Owner", TEAM_WIDTH, Align::Left),
    col("Budget", 6, Align::Right),
];

const ROSTER_COLUMNS: [Column; 2] = [
    col("Entry", ENTRY_WIDTH, Align::Left),
    col("Point Value", 11, Align::Right),
];

const MATCH_COLUMNS: [Column; 4] = [
    col("Week", 4, Align::Left),
    col("Team", TEAM_WIDTH, Align::Left),
    col("Opponent", 20, Align::Left),
    col("Score", 5, Align::Left),
];

const STANDINGS_COLUMNS: [Column; 5] = [
    col("Team", TEAM_WIDTH, Align::Left),
    col("Wins", 4, Align::Center),
    col("Losses", 6, Align::Center),
    col("DNP", 3, Align::Center),
    col("Points", 6, Align::Center),
];

/// Shorten `name` to at most `width` characters, ending in "..." when cut.
pub fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut short: String = name.chars().take(keep).collect();
    short.push_str("...");
    short
}

fn cell(text: &str, column: &Column) -> String {
    let w = column.width;
    match column.align {
        Align::Left => format!("{text:<w$}"),
        Align::Right => format!("{text:>w$}"),
        Align::Center => format!("{text:^w$}"),
    }
}

/// Render a markdown-style table: header, separator, one line per row.
pub fn table(columns: &[Column], rows: Vec<Vec<String>>) -> String {
    let header: Vec<String> = columns
        .iter()
        .map(|c| format!("{:<w$}", c.title, w = c.width))
        .collect();
    let sep: Vec<String> = columns.iter().map(|c| "-".repeat(c.width + 2)).collect();

    let mut lines = vec![
        format!("| {} |", header.join(" | ")),
        format!("|{}|", sep.join("|")),
    ];
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(columns)
            .map(|(text, column)| cell(text, column))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines.join("\n")
}

/// Wrap a table in a fenced block so chat clients keep it monospaced.
pub fn fenced(body: &str) -> String {
    format!("```markdown\n{body}\n```")
}

pub fn teams_table(teams: &[Team]) -> String {
    let rows = teams
        .iter()
        .map(|t| {
            vec![
                truncate(&t.name, TEAM_WIDTH),
                truncate(t.owner.as_deref().unwrap_or("-"), TEAM_WIDTH),
                t.budget.to_string(),
            ]
        })
        .collect();
    table(&TEAM_COLUMNS, rows)
}

pub fn roster_table(team: &Team) -> String {
    let rows = team
        .roster
        .iter()
        .map(|e| vec![truncate(&e.name, ENTRY_WIDTH), e.points.to_string()])
        .collect();
    table(&ROSTER_COLUMNS, rows)
}

pub fn matches_table(matches: &[Match]) -> String {
    let rows = matches
        .iter()
        .map(|m| {
            vec![
                m.week.clone().unwrap_or_else(|| "-".to_string()),
                truncate(&m.team, TEAM_WIDTH),
                truncate(&m.opponent, 20),
                m.score_label(),
            ]
        })
        .collect();
    table(&MATCH_COLUMNS, rows)
}

pub fn standings_table(rows: &[StandingsRow]) -> String {
    let rows = rows
        .iter()
        .map(|r| {
            vec![
                truncate(&r.team, TEAM_WIDTH),
                r.wins.to_string(),
                r.losses.to_string(),
                r.draws.to_string(),
                r.points.to_string(),
            ]
        })
        .collect();
    table(&STANDINGS_COLUMNS, rows)
}

/// One-line summary used by the full match listing.
pub fn match_line(m: &Match) -> String {
    format!(
        "{} vs {} | Score: {} - {} | Winner: {}",
        m.team,
        m.opponent,
        m.team_score,
        m.opponent_score,
        m.outcome.winner()
    )
}
