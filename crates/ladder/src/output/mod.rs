//! Output formatting for CLI commands.
//!
//! Every view can be printed as human-readable text or as pretty JSON. JSON
//! output serializes the engine types directly, so its field names are the
//! wire names (`isRecommended`, `missingSkills`, `fromPositionId`, ...).
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)

pub mod color;

use crate::catalog::LoadWarning;
use crate::classify::ClassifiedTransition;
use crate::domain::{Position, PositionId};
use crate::engine::{GraphView, PositionPaths, RenderPlan};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};

use color::{bold, colored_achievability_icon, colorize_achievability, colorize_id, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `LADDER_MAX_WIDTH`: Maximum content width (default: 100)
    /// - `LADDER_ASCII`: Set to "1" or "true" for ASCII-only icons
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `LADDER_COLOR`: Set to "0" or "false" to disable colors
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("LADDER_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "LADDER_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match env::var("LADDER_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "LADDER_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("LADDER_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Effective wrap width: the terminal width capped by `max_width`.
    fn wrap_width(&self) -> usize {
        get_terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(usize::from(DEFAULT_TERMINAL_WIDTH), |(w, _)| usize::from(w.0))
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    textwrap::wrap(text, max_width.max(10))
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print any serializable value as pretty JSON.
///
/// # Errors
///
/// Returns an IO error if writing to stdout fails or serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn dispatch<T: Serialize>(
    value: &T,
    mode: OutputMode,
    text: impl FnOnce(&mut io::StdoutLock<'static>, &OutputConfig) -> io::Result<()>,
) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Json => write_json(&mut handle, value),
        OutputMode::Text => text(&mut handle, &OutputConfig::from_env()),
    }
}

/// Print the classified whole graph.
///
/// # Errors
///
/// Returns an IO error if writing to stdout fails.
pub fn print_graph(view: &GraphView, mode: OutputMode) -> io::Result<()> {
    dispatch(view, mode, |w, config| write_graph_text(w, view, config))
}

/// Print the expansion of a single position.
///
/// # Errors
///
/// Returns an IO error if writing to stdout fails.
pub fn print_paths(paths: &PositionPaths, mode: OutputMode) -> io::Result<()> {
    dispatch(paths, mode, |w, config| write_paths_text(w, paths, config))
}

/// Print node coordinates and styled edges.
///
/// # Errors
///
/// Returns an IO error if writing to stdout fails.
pub fn print_render_plan(plan: &RenderPlan, mode: OutputMode) -> io::Result<()> {
    dispatch(plan, mode, |w, config| write_render_plan_text(w, plan, config))
}

/// Print a set of reachable position ids.
///
/// # Errors
///
/// Returns an IO error if writing to stdout fails.
pub fn print_reachable(from: &PositionId, ids: &[PositionId], mode: OutputMode) -> io::Result<()> {
    dispatch(&ids, mode, |w, config| {
        write_reachable_text(w, from, ids, config)
    })
}

/// Report skipped catalog records on stderr.
///
/// # Errors
///
/// Returns an IO error if writing to stderr fails.
pub fn print_load_warnings(warnings: &[LoadWarning]) -> io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }
    let config = OutputConfig::from_env();
    let mut handle = io::stderr().lock();
    for item in warnings {
        writeln!(handle, "{} {item}", warning("warning:", &config))?;
    }
    Ok(())
}

// ============================================================================
// Text Formatting
// ============================================================================

fn position_line(position: &Position, config: &OutputConfig) -> String {
    format!(
        "{} {} {}",
        colorize_id(position.id.as_str(), config),
        bold(&position.title, config),
        dimmed(&format!("({})", position.department), config),
    )
}

fn missing_skill_names(classified: &ClassifiedTransition) -> Vec<&str> {
    classified
        .missing_skills
        .iter()
        .map(|id| {
            classified
                .transition
                .required_skills
                .iter()
                .find(|skill| &skill.id == id)
                .map_or(id.as_str(), |skill| skill.name.as_str())
        })
        .collect()
}

fn write_missing<W: Write>(
    w: &mut W,
    classified: &ClassifiedTransition,
    indent: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    let names = missing_skill_names(classified);
    if names.is_empty() || classified.is_recommended {
        return Ok(());
    }
    let text = format!("missing: {}", names.join(", "));
    let pad = " ".repeat(indent);
    for line in wrap_text(&text, config.wrap_width().saturating_sub(indent)) {
        writeln!(
            w,
            "{pad}{}",
            colorize_achievability(&line, classified.achievability(), config)
        )?;
    }
    Ok(())
}

fn write_graph_text<W: Write>(w: &mut W, view: &GraphView, config: &OutputConfig) -> io::Result<()> {
    if view.positions.is_empty() {
        writeln!(w, "No positions in catalog.")?;
        return Ok(());
    }

    let mut by_level: BTreeMap<i32, Vec<&Position>> = BTreeMap::new();
    for position in &view.positions {
        by_level.entry(position.level).or_default().push(position);
    }

    for (level, positions) in &by_level {
        writeln!(w, "{}", bold(&format!("Level {level}"), config))?;
        for position in positions {
            writeln!(w, "  {}", position_line(position, config))?;
        }
    }

    writeln!(w)?;
    writeln!(
        w,
        "{}",
        bold(&format!("Transitions ({})", view.transitions.len()), config)
    )?;
    for classified in &view.transitions {
        let transition = &classified.transition;
        writeln!(
            w,
            "  {} {} -> {} {}",
            colored_achievability_icon(classified.achievability(), config),
            colorize_id(transition.from_position_id.as_str(), config),
            colorize_id(transition.to_position_id.as_str(), config),
            dimmed(transition.transition_type.as_str(), config),
        )?;
        write_missing(w, classified, 6, config)?;
    }
    Ok(())
}

fn write_paths_text<W: Write>(
    w: &mut W,
    paths: &PositionPaths,
    config: &OutputConfig,
) -> io::Result<()> {
    let from = &paths.from_position;
    writeln!(
        w,
        "{} {} {}",
        bold("From:", config),
        position_line(from, config),
        dimmed(&format!("level {}", from.level), config),
    )?;

    writeln!(w)?;
    if paths.direct_transitions.is_empty() {
        writeln!(w, "No direct transitions.")?;
    } else {
        writeln!(w, "{}", bold("Direct transitions:", config))?;
        for direct in &paths.direct_transitions {
            let classified = &direct.classified;
            writeln!(
                w,
                "  {} {} -> {}",
                colored_achievability_icon(classified.achievability(), config),
                dimmed(classified.transition.transition_type.as_str(), config),
                position_line(&direct.to_position, config),
            )?;
            write_missing(w, classified, 6, config)?;
        }
    }

    writeln!(w)?;
    writeln!(
        w,
        "{}",
        bold(
            &format!("Reachable positions ({}):", paths.reachable_positions.len()),
            config
        )
    )?;
    for position in &paths.reachable_positions {
        writeln!(
            w,
            "  {} {}",
            dimmed(&format!("L{}", position.level), config),
            position_line(position, config)
        )?;
    }
    Ok(())
}

fn write_render_plan_text<W: Write>(
    w: &mut W,
    plan: &RenderPlan,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Nodes:", config))?;
    for placement in plan.nodes.iter() {
        writeln!(
            w,
            "  {} {}",
            colorize_id(placement.id.as_str(), config),
            dimmed(
                &format!("x={} y={}", placement.point.x, placement.point.y),
                config
            ),
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Edges:", config))?;
    for edge in &plan.edges {
        let dash = edge
            .style
            .dash
            .map(|d| format!(" dash={d}"))
            .unwrap_or_default();
        writeln!(
            w,
            "  {} -> {} {} {}",
            colorize_id(edge.source.as_str(), config),
            colorize_id(edge.target.as_str(), config),
            edge.style.label,
            dimmed(
                &format!("{} width={}{dash}", edge.style.color, edge.style.stroke_width),
                config
            ),
        )?;
    }
    Ok(())
}

fn write_reachable_text<W: Write>(
    w: &mut W,
    from: &PositionId,
    ids: &[PositionId],
    config: &OutputConfig,
) -> io::Result<()> {
    if ids.is_empty() {
        writeln!(
            w,
            "Nothing is reachable from {}.",
            colorize_id(from.as_str(), config)
        )?;
        return Ok(());
    }
    writeln!(
        w,
        "{} positions reachable from {}:",
        ids.len(),
        colorize_id(from.as_str(), config)
    )?;
    for id in ids {
        writeln!(w, "  {}", colorize_id(id.as_str(), config))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViewerSkillSet;
    use crate::engine::{compute_from_position, compute_graph, render_plan};
    use crate::graph::fixtures::{position, transition};
    use crate::layout::LayoutConfig;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample_view(held: &[&str]) -> GraphView {
        compute_graph(
            vec![position("jr", 1), position("mid", 2), position("sr", 3)],
            vec![
                transition("t1", "jr", "mid", &["a"]),
                transition("t2", "mid", "sr", &["a", "b"]),
            ],
            &held.iter().copied().collect::<ViewerSkillSet>(),
        )
        .unwrap()
    }

    #[test]
    fn graph_text_groups_levels_and_marks_transitions() {
        let view = sample_view(&["a"]);
        let out = render(|w| write_graph_text(w, &view, &plain()));

        assert!(out.contains("Level 1\n  jr"));
        assert!(out.contains("Level 3\n  sr"));
        assert!(out.contains("✓ jr -> mid VERTICAL"));
        assert!(out.contains("⚠ mid -> sr VERTICAL"));
        assert!(out.contains("      missing: B"));
    }

    #[test]
    fn graph_text_ascii_icons() {
        let view = sample_view(&[]);
        let config = OutputConfig::new(80, true, false);
        let out = render(|w| write_graph_text(w, &view, &config));

        assert!(out.contains("x jr -> mid"));
        assert!(out.contains("missing: A, B"));
    }

    #[test]
    fn empty_graph_text() {
        let view = compute_graph(vec![], vec![], &ViewerSkillSet::anonymous()).unwrap();
        let out = render(|w| write_graph_text(w, &view, &plain()));
        assert_eq!(out, "No positions in catalog.\n");
    }

    #[test]
    fn paths_text_lists_direct_and_reachable() {
        let paths = compute_from_position(
            vec![position("jr", 1), position("mid", 2), position("sr", 3)],
            vec![
                transition("t1", "jr", "mid", &["a"]),
                transition("t2", "mid", "sr", &[]),
            ],
            &"jr".into(),
            &ViewerSkillSet::anonymous(),
        )
        .unwrap();
        let out = render(|w| write_paths_text(w, &paths, &plain()));

        assert!(out.starts_with("From: jr"));
        assert!(out.contains("✗ VERTICAL -> mid"));
        assert!(out.contains("Reachable positions (2):"));
        assert!(out.contains("L3 sr"));
    }

    #[test]
    fn render_plan_text_shows_coordinates_and_styles() {
        let plan = render_plan(&sample_view(&["a"]), &LayoutConfig::default());
        let out = render(|w| write_render_plan_text(w, &plan, &plain()));

        assert!(out.contains("jr x=0 y=0"));
        assert!(out.contains("mid x=300 y=0"));
        assert!(out.contains("mid -> sr ⚠ VERTICAL #fbbf24 width=2.5 dash=5,5"));
    }

    #[test]
    fn reachable_text_handles_sinks() {
        let out = render(|w| write_reachable_text(w, &"sr".into(), &[], &plain()));
        assert_eq!(out, "Nothing is reachable from sr.\n");
    }

    #[test]
    fn json_uses_wire_names() {
        let view = sample_view(&["a"]);
        let out = render(|w| write_json(w, &view));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let second = &value["transitions"][1];
        assert_eq!(second["fromPositionId"], "mid");
        assert_eq!(second["isPartiallyAvailable"], true);
        assert_eq!(second["missingSkills"], serde_json::json!(["b"]));
        assert_eq!(second["type"], "VERTICAL");
    }
}
