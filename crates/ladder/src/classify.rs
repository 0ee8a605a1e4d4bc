//! Skill-gap classification of transitions for a viewer.
//!
//! For a transition requiring skills R and a viewer holding skills S:
//!
//! | Condition              | recommended | partially available | missing  |
//! |------------------------|-------------|---------------------|----------|
//! | R empty                | yes         | no                  | `[]`     |
//! | R subset of S          | yes         | no                  | `[]`     |
//! | R and S overlap        | no          | yes                 | R \ S    |
//! | no overlap, R nonempty | no          | no                  | R        |
//!
//! `missing` keeps the order skills appear in R. The same function backs the
//! whole-graph export and the single-position expansion.

use crate::domain::{SkillId, Transition, ViewerSkillSet};
use serde::Serialize;
use std::fmt;

/// Achievability of a transition for a particular viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievability {
    /// Every required skill is held (or none are required)
    Recommended,

    /// Some, but not all, required skills are held
    PartiallyAvailable,

    /// None of the required skills are held
    Blocked,
}

impl fmt::Display for Achievability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommended => write!(f, "recommended"),
            Self::PartiallyAvailable => write!(f, "partially available"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

fn achievability_of(recommended: bool, partial: bool) -> Achievability {
    if recommended {
        Achievability::Recommended
    } else if partial {
        Achievability::PartiallyAvailable
    } else {
        Achievability::Blocked
    }
}

/// Classification flags, independent of the transition they describe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// All required skills are held
    pub is_recommended: bool,

    /// At least one but not all required skills are held
    pub is_partially_available: bool,

    /// Required skills the viewer lacks, in requirement order
    pub missing_skills: Vec<SkillId>,
}

impl Classification {
    /// Collapse the two flags into a single three-state value.
    #[must_use]
    pub fn achievability(&self) -> Achievability {
        achievability_of(self.is_recommended, self.is_partially_available)
    }
}

/// A transition annotated with its classification for one viewer.
///
/// Wraps the catalog record instead of extending it, so per-viewer state
/// never leaks into the shared snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedTransition {
    /// The unchanged catalog transition
    #[serde(flatten)]
    pub transition: Transition,

    /// All required skills are held
    pub is_recommended: bool,

    /// At least one but not all required skills are held
    pub is_partially_available: bool,

    /// Required skills the viewer lacks, in requirement order
    pub missing_skills: Vec<SkillId>,
}

impl ClassifiedTransition {
    /// Attach a precomputed classification to a transition.
    #[must_use]
    pub fn new(transition: Transition, classification: Classification) -> Self {
        Self {
            transition,
            is_recommended: classification.is_recommended,
            is_partially_available: classification.is_partially_available,
            missing_skills: classification.missing_skills,
        }
    }

    /// Three-state view of the flags.
    #[must_use]
    pub fn achievability(&self) -> Achievability {
        achievability_of(self.is_recommended, self.is_partially_available)
    }
}

/// Classify a list of required skill ids against a viewer's skills.
#[must_use]
pub fn classify_required(required: &[SkillId], viewer: &ViewerSkillSet) -> Classification {
    let missing_skills: Vec<SkillId> = required
        .iter()
        .filter(|skill| !viewer.contains(skill))
        .cloned()
        .collect();

    let is_recommended = missing_skills.is_empty();
    let is_partially_available = !is_recommended && missing_skills.len() < required.len();

    Classification {
        is_recommended,
        is_partially_available,
        missing_skills,
    }
}

/// Classify a transition for a viewer.
///
/// Pure and infallible. An anonymous viewer (empty skill set) gets only
/// zero-requirement transitions recommended.
#[must_use]
pub fn classify(transition: &Transition, viewer: &ViewerSkillSet) -> ClassifiedTransition {
    let required: Vec<SkillId> = transition.required_skill_ids().cloned().collect();
    ClassifiedTransition::new(transition.clone(), classify_required(&required, viewer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::transition;
    use rstest::rstest;

    fn skills(ids: &[&str]) -> ViewerSkillSet {
        ids.iter().copied().collect()
    }

    fn missing(classified: &ClassifiedTransition) -> Vec<&str> {
        classified.missing_skills.iter().map(SkillId::as_str).collect()
    }

    #[rstest]
    #[case::no_requirements_anonymous(&[], &[], Achievability::Recommended, &[])]
    #[case::no_requirements_skilled(&[], &["a"], Achievability::Recommended, &[])]
    #[case::all_held(&["a", "b"], &["b", "a", "c"], Achievability::Recommended, &[])]
    #[case::some_held(&["a", "b", "c"], &["b"], Achievability::PartiallyAvailable, &["a", "c"])]
    #[case::none_held(&["a", "b"], &["z"], Achievability::Blocked, &["a", "b"])]
    #[case::anonymous_blocked(&["a"], &[], Achievability::Blocked, &["a"])]
    fn classification_table(
        #[case] required: &[&str],
        #[case] held: &[&str],
        #[case] expected: Achievability,
        #[case] expected_missing: &[&str],
    ) {
        let classified = classify(&transition("t", "x", "y", required), &skills(held));

        assert_eq!(classified.achievability(), expected);
        assert_eq!(missing(&classified), expected_missing);
        assert!(!(classified.is_recommended && classified.is_partially_available));
    }

    #[test]
    fn missing_skills_follow_requirement_order() {
        let classified = classify(
            &transition("t", "x", "y", &["d", "c", "b", "a"]),
            &skills(&["c"]),
        );
        assert_eq!(missing(&classified), vec!["d", "b", "a"]);
    }

    #[test]
    fn classification_keeps_transition_unchanged() {
        let original = transition("t", "x", "y", &["a"]);
        let classified = classify(&original, &skills(&["a"]));
        assert_eq!(classified.transition, original);
    }

    #[test]
    fn classified_transition_serializes_flat() {
        let classified = classify(&transition("t", "x", "y", &["a", "b"]), &skills(&["a"]));
        let json = serde_json::to_value(&classified).unwrap();

        assert_eq!(json["id"], "t");
        assert_eq!(json["fromPositionId"], "x");
        assert_eq!(json["isRecommended"], false);
        assert_eq!(json["isPartiallyAvailable"], true);
        assert_eq!(json["missingSkills"], serde_json::json!(["b"]));
    }

    #[rstest]
    #[case::recommended(&["a"], &["a"], Achievability::Recommended)]
    #[case::partial(&["a", "b"], &["a"], Achievability::PartiallyAvailable)]
    #[case::blocked(&["a"], &[], Achievability::Blocked)]
    fn classification_achievability_matches_wrapper(
        #[case] required: &[&str],
        #[case] held: &[&str],
        #[case] expected: Achievability,
    ) {
        let t = transition("t", "x", "y", required);
        let required: Vec<SkillId> = required.iter().copied().map(SkillId::new).collect();
        let classification = classify_required(&required, &skills(held));

        assert_eq!(classification.achievability(), expected);
        assert_eq!(
            ClassifiedTransition::new(t, classification).achievability(),
            expected
        );
    }
}
