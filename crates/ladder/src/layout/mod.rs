//! Deterministic 2D layout of positions for rendering.
//!
//! Positions are arranged in vertical bands, one per distinct level:
//!
//! 1. Levels are sorted ascending; a level's band index is its rank among the
//!    distinct levels, so gaps between level values never leave empty bands.
//! 2. `x = band * horizontal_spacing`.
//! 3. Inside a band, positions keep their input order and are centered on
//!    `y = 0`: the i-th of n gets `y = (i - (n - 1) / 2) * vertical_spacing`.
//!
//! The layout depends only on positions and spacing; classification never
//! affects it. See [`style`] for the per-edge presentation mapping.

pub mod style;

use crate::domain::{Position, PositionId};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default distance between level bands.
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 300.0;

/// Default distance between positions sharing a level.
pub const DEFAULT_VERTICAL_SPACING: f64 = 200.0;

/// Spacing constants for [`layout`].
///
/// Changing them scales coordinates; relative ordering never changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LayoutConfig {
    /// Distance between consecutive level bands
    pub horizontal_spacing: f64,

    /// Distance between neighbours within a band
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
        }
    }
}

impl LayoutConfig {
    /// Reject spacings that would collapse or mirror the layout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for non-finite or non-positive spacing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_spacing("layout.horizontal-spacing", self.horizontal_spacing)?;
        check_spacing("layout.vertical-spacing", self.vertical_spacing)
    }
}

fn check_spacing(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

/// Render coordinates of one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate (level band)
    pub x: f64,
    /// Vertical coordinate (centered within the band)
    pub y: f64,
}

/// A position together with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Position being placed
    pub id: PositionId,
    /// Level the band was derived from
    pub level: i32,
    /// Computed coordinates
    #[serde(flatten)]
    pub point: Point,
}

/// Result of [`layout`]: a mapping from position id to coordinates.
///
/// Placements are kept in input order for stable iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    placements: Vec<Placement>,
    #[serde(skip)]
    index: HashMap<PositionId, usize>,
}

impl Layout {
    /// Coordinates of `id`, if it was part of the input.
    #[must_use]
    pub fn get(&self, id: &PositionId) -> Option<Point> {
        self.index.get(id).map(|&i| self.placements[i].point)
    }

    /// Placements in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    /// Number of placed positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Consume the layout into a plain id-to-point map.
    #[must_use]
    pub fn into_map(self) -> HashMap<PositionId, Point> {
        self.placements
            .into_iter()
            .map(|placement| (placement.id, placement.point))
            .collect()
    }
}

/// Assign coordinates to every position.
///
/// Deterministic: the same input list (including order) always produces the
/// same coordinates.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layout(positions: &[Position], config: &LayoutConfig) -> Layout {
    let mut by_level: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, position) in positions.iter().enumerate() {
        by_level.entry(position.level).or_default().push(i);
    }

    let mut points = vec![Point { x: 0.0, y: 0.0 }; positions.len()];
    for (band, members) in by_level.values().enumerate() {
        let x = band as f64 * config.horizontal_spacing;
        let center = (members.len() as f64 - 1.0) / 2.0;
        for (slot, &i) in members.iter().enumerate() {
            let y = (slot as f64 - center) * config.vertical_spacing;
            points[i] = Point { x, y };
        }
    }

    let mut index = HashMap::with_capacity(positions.len());
    let placements: Vec<Placement> = positions
        .iter()
        .zip(points)
        .enumerate()
        .map(|(i, (position, point))| {
            index.entry(position.id.clone()).or_insert(i);
            Placement {
                id: position.id.clone(),
                level: position.level,
                point,
            }
        })
        .collect();

    Layout { placements, index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::position;

    fn at(layout: &Layout, id: &str) -> (f64, f64) {
        let point = layout.get(&id.into()).unwrap();
        (point.x, point.y)
    }

    #[test]
    fn single_member_band_is_centered_on_zero() {
        let result = layout(&[position("a", 1)], &LayoutConfig::default());
        assert_eq!(at(&result, "a"), (0.0, 0.0));
    }

    #[test]
    fn bands_follow_level_rank_not_value() {
        let positions = [position("hi", 40), position("lo", 3), position("mid", 10)];
        let result = layout(&positions, &LayoutConfig::default());

        assert_eq!(at(&result, "lo").0, 0.0);
        assert_eq!(at(&result, "mid").0, 300.0);
        assert_eq!(at(&result, "hi").0, 600.0);
    }

    #[test]
    fn siblings_are_centered_in_input_order() {
        let positions = [
            position("a", 1),
            position("b", 1),
            position("c", 1),
            position("d", 2),
            position("e", 2),
        ];
        let result = layout(&positions, &LayoutConfig::default());

        assert_eq!(at(&result, "a"), (0.0, -200.0));
        assert_eq!(at(&result, "b"), (0.0, 0.0));
        assert_eq!(at(&result, "c"), (0.0, 200.0));
        assert_eq!(at(&result, "d"), (300.0, -100.0));
        assert_eq!(at(&result, "e"), (300.0, 100.0));
    }

    #[test]
    fn reordering_within_a_level_swaps_vertical_slots() {
        let forward = layout(
            &[position("a", 1), position("b", 1)],
            &LayoutConfig::default(),
        );
        let reversed = layout(
            &[position("b", 1), position("a", 1)],
            &LayoutConfig::default(),
        );

        assert_eq!(at(&forward, "a"), at(&reversed, "b"));
        assert_eq!(at(&forward, "b"), at(&reversed, "a"));
    }

    #[test]
    fn spacing_scales_without_reordering() {
        let positions = [position("a", 1), position("b", 1), position("c", 5)];
        let config = LayoutConfig {
            horizontal_spacing: 50.0,
            vertical_spacing: 10.0,
        };
        let result = layout(&positions, &config);

        assert_eq!(at(&result, "a"), (0.0, -5.0));
        assert_eq!(at(&result, "b"), (0.0, 5.0));
        assert_eq!(at(&result, "c"), (50.0, 0.0));
    }

    #[test]
    fn placements_keep_input_order() {
        let positions = [position("z", 3), position("y", 1)];
        let result = layout(&positions, &LayoutConfig::default());
        let order: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["z", "y"]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.into_map().len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        assert!(layout(&[], &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let config = LayoutConfig {
            horizontal_spacing: 0.0,
            ..LayoutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("horizontal-spacing"));

        let config = LayoutConfig {
            vertical_spacing: f64::NAN,
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(LayoutConfig::default().validate().is_ok());
    }
}
