//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Recommended:  green   (every required skill held)
//!   - Partial:      yellow  (some required skills held, missing skill lists)
//!   - Blocked:      red     (no required skill held)
//!   - Reference:    cyan    (position ids)
//!   - Muted:        dimmed  (levels, departments, coordinates)
//!   - Emphasis:     bold    (section headers, position titles)

use crate::classify::Achievability;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Colorize a position id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Plain icon for an achievability state, with ASCII fallback.
pub(crate) fn achievability_icon(achievability: Achievability, use_ascii: bool) -> &'static str {
    match (achievability, use_ascii) {
        (Achievability::Recommended, false) => "✓",
        (Achievability::PartiallyAvailable, false) => "⚠",
        (Achievability::Blocked, false) => "✗",
        (Achievability::Recommended, true) => "+",
        (Achievability::PartiallyAvailable, true) => "~",
        (Achievability::Blocked, true) => "x",
    }
}

/// Apply the achievability color to arbitrary text.
pub(crate) fn colorize_achievability(
    text: &str,
    achievability: Achievability,
    config: &OutputConfig,
) -> String {
    match achievability {
        Achievability::Recommended => success(text, config),
        Achievability::PartiallyAvailable => warning(text, config),
        Achievability::Blocked => error(text, config),
    }
}

/// Get a colored achievability icon, with ASCII fallback support.
pub(crate) fn colored_achievability_icon(
    achievability: Achievability,
    config: &OutputConfig,
) -> String {
    colorize_achievability(
        achievability_icon(achievability, config.use_ascii),
        achievability,
        config,
    )
}
