//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a new ladder repository
//! - `graph`: Classify every transition for a viewer
//! - `paths`: Expand a single position (or a viewer's current one)
//! - `layout`: Node coordinates and styled edges
//! - `reachable`: Positions reachable from a position
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! ladder graph --viewer u1
//! ladder paths junior-dev --viewer u1
//! ladder --json layout
//! ladder reachable junior-dev
//! ```

mod args;
mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    GraphArgs, InitArgs, LayoutArgs, MAX_ID_LENGTH, PathsArgs, ReachableArgs, validate_id,
};

/// Ladder - career path graph engine
///
/// Explore which career moves are open to you from the catalog stored in
/// `.ladder/`.
#[derive(Parser, Debug)]
#[command(name = "ladder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new ladder repository
    ///
    /// Creates the `.ladder/` directory with configuration and empty catalog
    /// files.
    Init(InitArgs),

    /// Show the whole career graph
    ///
    /// Lists positions by level and every transition, marked as recommended,
    /// partially available or blocked for the given viewer.
    Graph(GraphArgs),

    /// Show career options from one position
    ///
    /// Lists the direct transitions out of the position and every position
    /// reachable through any chain of transitions.
    Paths(PathsArgs),

    /// Show render coordinates
    ///
    /// Places positions in one column per level and styles each edge by its
    /// classification.
    Layout(LayoutArgs),

    /// Show positions reachable from a position
    Reachable(ReachableArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns a clap error if the arguments are invalid.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the command
    /// fails.
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Graph(args)) => {
                let app = open_app().await?;
                execute::execute_graph(&app, args, output_mode).await
            }
            Some(Commands::Paths(args)) => {
                let app = open_app().await?;
                execute::execute_paths(&app, args, output_mode).await
            }
            Some(Commands::Layout(args)) => {
                let app = open_app().await?;
                execute::execute_layout(&app, args, output_mode).await
            }
            Some(Commands::Reachable(args)) => {
                let app = open_app().await?;
                execute::execute_reachable(&app, args, output_mode).await
            }
            None => {
                println!("Ladder career path graph engine");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

/// Open the repository containing the working directory and report any
/// records skipped while loading it.
async fn open_app() -> Result<crate::app::App> {
    let app = crate::app::App::from_directory(&std::env::current_dir()?).await?;
    crate::output::print_load_warnings(app.warnings())?;
    Ok(app)
}
