pub mod config;
pub mod error;
pub mod io;
pub mod matches;
pub mod names;
pub mod paths;
pub mod standings;
pub mod store;
pub mod team;

pub use error::{LeagueError, Result};
