//! Domain types for career path graphs.
//!
//! Positions are nodes, transitions are directed edges gated by required
//! skills, and viewers carry the skill set that transitions are classified
//! against. Every type here is a read-only snapshot value: the engine never
//! creates, mutates or deletes catalog entities.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Unique identifier for a position
    PositionId
);
string_id!(
    /// Unique identifier for a skill
    SkillId
);
string_id!(
    /// Unique identifier for a transition
    TransitionId
);
string_id!(
    /// Unique identifier for a viewer (the user a graph is classified for)
    ViewerId
);

/// A job role: one node of the career graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Unique identifier
    pub id: PositionId,

    /// Display name
    pub title: String,

    /// Hierarchical rank; values need not be contiguous
    pub level: i32,

    /// Category label
    pub department: String,
}

/// A capability that transitions require and viewers possess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Unique identifier
    pub id: SkillId,

    /// Display name
    pub name: String,

    /// Optional grouping, e.g. "Backend"
    #[serde(default)]
    pub category: Option<String>,
}

/// Kind of career move. A presentation hint only; traversal ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitionType {
    /// Promotion within the same track
    Vertical,

    /// Lateral move at a similar level
    Horizontal,

    /// Career change into another track
    Change,
}

impl TransitionType {
    /// Upper-case wire name, e.g. `"VERTICAL"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "VERTICAL",
            Self::Horizontal => "HORIZONTAL",
            Self::Change => "CHANGE",
        }
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge between two positions, optionally gated by skills.
///
/// Self-loops (`from_position_id == to_position_id`) are rejected by the
/// catalog before a transition ever reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Unique identifier
    pub id: TransitionId,

    /// Kind of move
    #[serde(rename = "type")]
    pub transition_type: TransitionType,

    /// Edge source
    pub from_position_id: PositionId,

    /// Edge target
    pub to_position_id: PositionId,

    /// Skills needed to take this transition, in catalog order.
    /// Empty means always traversable.
    #[serde(default)]
    pub required_skills: Vec<Skill>,
}

impl Transition {
    /// Ids of the required skills, preserving their order.
    pub fn required_skill_ids(&self) -> impl Iterator<Item = &SkillId> {
        self.required_skills.iter().map(|skill| &skill.id)
    }
}

/// A catalog user: their current position and possessed skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    /// Unique identifier
    pub id: ViewerId,

    /// Position the viewer currently holds, if any
    #[serde(default)]
    pub position_id: Option<PositionId>,

    /// Skills the viewer possesses
    #[serde(default)]
    pub skill_ids: Vec<SkillId>,
}

/// The skills possessed by the viewer a graph is classified for.
///
/// An empty set models an anonymous viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerSkillSet(HashSet<SkillId>);

impl ViewerSkillSet {
    /// Skill set of a viewer with no skills.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether the viewer possesses `skill`.
    #[must_use]
    pub fn contains(&self, skill: &SkillId) -> bool {
        self.0.contains(skill)
    }

    /// Number of distinct skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the viewer has no skills at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SkillId> for ViewerSkillSet {
    fn from_iter<I: IntoIterator<Item = SkillId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ViewerSkillSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(SkillId::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_serializes_with_wire_names() {
        let transition = Transition {
            id: TransitionId::new("t1"),
            transition_type: TransitionType::Vertical,
            from_position_id: PositionId::new("junior"),
            to_position_id: PositionId::new("middle"),
            required_skills: vec![],
        };

        let json = serde_json::to_value(&transition).unwrap();
        assert_eq!(json["type"], "VERTICAL");
        assert_eq!(json["fromPositionId"], "junior");
        assert_eq!(json["toPositionId"], "middle");
        assert!(json["requiredSkills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn skill_category_is_optional_on_input() {
        let skill: Skill = serde_json::from_str(r#"{"id":"ts","name":"TypeScript"}"#).unwrap();
        assert_eq!(skill.category, None);
    }

    #[test]
    fn viewer_skill_set_collects_distinct_ids() {
        let skills: ViewerSkillSet = ["a", "b", "a"].into_iter().collect();
        assert_eq!(skills.len(), 2);
        assert!(skills.contains(&SkillId::new("a")));
        assert!(!skills.contains(&SkillId::new("c")));
        assert!(ViewerSkillSet::anonymous().is_empty());
    }
}
