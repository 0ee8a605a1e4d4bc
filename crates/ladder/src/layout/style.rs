//! Edge presentation derived from transition type and classification.
//!
//! Classification flags always win over the type: a recommended edge is
//! drawn with the strongest emphasis whatever its type, a partially
//! available edge gets medium emphasis and a dashed stroke, and only the
//! remaining edges fall back to a per-type color.

use crate::classify::{Achievability, ClassifiedTransition};
use crate::domain::TransitionType;
use serde::Serialize;

/// Stroke color of recommended edges.
pub const RECOMMENDED_COLOR: &str = "#10b981";

/// Stroke color of partially available edges.
pub const PARTIAL_COLOR: &str = "#fbbf24";

/// Dash pattern of partially available edges.
pub const PARTIAL_DASH: &str = "5,5";

/// Rendering attributes of one edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    /// Stroke color as a hex string
    pub color: &'static str,
    /// Stroke width
    pub stroke_width: f32,
    /// SVG-style dash pattern, `None` for a solid stroke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
    /// Edge label, e.g. `"✓ VERTICAL"`
    pub label: String,
    /// Label font weight
    pub label_weight: u16,
    /// Label font size in pixels
    pub label_font_size: u8,
}

/// Stroke color for an unclassified edge of the given type.
#[must_use]
pub fn type_color(transition_type: TransitionType) -> &'static str {
    match transition_type {
        TransitionType::Vertical => "#10b981",
        TransitionType::Horizontal => "#3b82f6",
        TransitionType::Change => "#f97316",
    }
}

/// Derive the rendering attributes of a classified edge.
#[must_use]
pub fn edge_style(classified: &ClassifiedTransition) -> EdgeStyle {
    let kind = classified.transition.transition_type;
    match classified.achievability() {
        Achievability::Recommended => EdgeStyle {
            color: RECOMMENDED_COLOR,
            stroke_width: 3.0,
            dash: None,
            label: format!("✓ {kind}"),
            label_weight: 700,
            label_font_size: 12,
        },
        Achievability::PartiallyAvailable => EdgeStyle {
            color: PARTIAL_COLOR,
            stroke_width: 2.5,
            dash: Some(PARTIAL_DASH),
            label: format!("⚠ {kind}"),
            label_weight: 600,
            label_font_size: 11,
        },
        Achievability::Blocked => EdgeStyle {
            color: type_color(kind),
            stroke_width: 2.0,
            dash: None,
            label: kind.to_string(),
            label_weight: 600,
            label_font_size: 11,
        },
    }
}
