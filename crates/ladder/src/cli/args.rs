//! CLI argument structs for all commands.

use clap::Parser;

/// Maximum accepted length of a catalog id on the command line
pub const MAX_ID_LENGTH: usize = 128;

/// Validate a position or viewer id given on the command line.
///
/// Ids are opaque, but they must be non-empty, reasonably short and free of
/// whitespace.
pub fn validate_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("ID cannot be empty".to_string());
    }
    if trimmed.len() > MAX_ID_LENGTH {
        return Err(format!("ID cannot exceed {MAX_ID_LENGTH} characters"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("ID cannot contain whitespace".to_string());
    }
    Ok(trimmed.to_string())
}

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Classify transitions for this viewer's skills
    ///
    /// Without a viewer, only transitions that require no skills are
    /// recommended.
    #[arg(short, long, value_parser = validate_id)]
    pub viewer: Option<String>,
}

/// Arguments for the `paths` command
#[derive(Parser, Debug, Clone)]
pub struct PathsArgs {
    /// Position to expand (defaults to the viewer's current position)
    #[arg(value_parser = validate_id, required_unless_present = "viewer")]
    pub position: Option<String>,

    /// Classify transitions for this viewer's skills
    #[arg(short, long, value_parser = validate_id)]
    pub viewer: Option<String>,
}

/// Arguments for the `layout` command
#[derive(Parser, Debug, Clone)]
pub struct LayoutArgs {
    /// Style edges for this viewer's skills
    #[arg(short, long, value_parser = validate_id)]
    pub viewer: Option<String>,
}

/// Arguments for the `reachable` command
#[derive(Parser, Debug, Clone)]
pub struct ReachableArgs {
    /// Position to start from
    #[arg(value_parser = validate_id)]
    pub position: String,
}
