use thiserror::Error;

/// Errors raised by league operations.
///
/// Business-rule rejections carry the text shown back to the chat user;
/// everything else is an internal fault.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("not initialized: run 'league init'")]
    NotInitialized,

    #[error("Team name and owner cannot be empty.")]
    TeamFieldsEmpty,

    #[error("Team '{name}' or user '{owner}' already exists in the league.")]
    TeamExists { name: String, owner: String },

    #[error("No team found with the name '{0}'.")]
    TeamNotFound(String),

    #[error("Team or user '{0}' not found. Please check the spelling and try again.")]
    TeamOrUserNotFound(String),

    #[error("Team name, entry name, and point value cannot be empty.")]
    RosterFieldsEmpty,

    #[error("Point value must be a non-negative integer, got '{0}'.")]
    InvalidPointValue(String),

    #[error("Scores must be integers, got '{0}'.")]
    InvalidScore(String),

    #[error("Scores must be non-negative integers.")]
    NegativeScore,

    #[error("Team names cannot be empty.")]
    TeamNamesEmpty,

    #[error("You cannot report a match against the same team.")]
    SelfMatch,

    #[error("Week, team names and owners cannot be empty.")]
    ScheduleFieldsEmpty,

    #[error(
        "Match not in schedule or is already reported. \
         Please ensure the match is scheduled and has not been reported yet."
    )]
    NotScheduled,

    #[error("Please provide a search term (week number, team name, or opponent team name).")]
    EmptySearch,

    #[error("store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LeagueError {
    /// True for rule violations caused by the caller's input, as opposed to
    /// storage or configuration faults.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            LeagueError::NotInitialized
                | LeagueError::Store(_)
                | LeagueError::Io(_)
                | LeagueError::Yaml(_)
                | LeagueError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
