mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "league",
    about = "League bookkeeping bot: teams, rosters, schedules, results, and standings",
    version,
    propagate_version = true
)]
struct Cli {
    /// League root (default: auto-detect from .league/)
    #[arg(long, global = true, env = "LEAGUE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a league in the current directory
    Init {
        /// League name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Dispatch one chat line and print the reply
    Exec {
        /// Chat handle of the caller
        #[arg(long = "as", value_name = "HANDLE")]
        handle: String,
        /// Treat the caller as a league administrator
        #[arg(long)]
        admin: bool,
        /// The chat line, including the command prefix
        line: String,
    },

    /// Read chat lines from stdin and print each reply
    Chat {
        /// Chat handle of the caller
        #[arg(long = "as", value_name = "HANDLE")]
        handle: String,
        /// Treat the caller as a league administrator
        #[arg(long)]
        admin: bool,
    },

    /// Show the league table
    Standings,

    /// List teams with owner and budget
    Teams,

    /// Show a team's roster
    Roster { team: String },

    /// List matches, optionally filtered by week, team, or owner
    Matches { search: Option<String> },

    /// Inspect and validate the league configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Chat { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Exec {
            handle,
            admin,
            line,
        } => cmd::chat::exec(&root, &handle, admin, &line, cli.json),
        Commands::Chat { handle, admin } => cmd::chat::session(&root, &handle, admin),
        Commands::Standings => cmd::view::standings(&root, cli.json),
        Commands::Teams => cmd::view::teams(&root, cli.json),
        Commands::Roster { team } => cmd::view::roster(&root, &team, cli.json),
        Commands::Matches { search } => cmd::view::matches(&root, search.as_deref(), cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
