//! Catalog snapshots stored as a directory of JSONL files.
//!
//! Layout of a catalog directory (every file optional, missing means empty):
//!
//! ```text
//! positions.jsonl    {"id":"jr","title":"Junior Developer","level":1,"department":"Engineering"}
//! skills.jsonl       {"id":"ts","name":"TypeScript","category":"Programming"}
//! transitions.jsonl  {"id":"t1","type":"VERTICAL","fromPositionId":"jr","toPositionId":"mid","requiredSkillIds":["ts"]}
//! viewers.jsonl      {"id":"u1","positionId":"jr","skillIds":["ts"]}
//! ```
//!
//! Loading is resilient: bad records are skipped and reported as
//! [`LoadWarning`]s. Transitions whose endpoints are missing are *kept*, so
//! that building the graph fails fast instead of hiding the broken edge.

use super::InMemoryCatalog;
use crate::domain::{
    Position, PositionId, Skill, SkillId, Transition, TransitionId, TransitionType, Viewer,
};
use crate::error::Result;
use ladder_jsonl::{Warning as JsonlWarning, read_jsonl_resilient};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use tokio::fs;

/// Name of the positions file
pub const POSITIONS_FILE_NAME: &str = "positions.jsonl";

/// Name of the skills file
pub const SKILLS_FILE_NAME: &str = "skills.jsonl";

/// Name of the transitions file
pub const TRANSITIONS_FILE_NAME: &str = "transitions.jsonl";

/// Name of the viewers file
pub const VIEWERS_FILE_NAME: &str = "viewers.jsonl";

/// On-disk form of a transition: skills are referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    /// Unique identifier
    pub id: TransitionId,
    /// Kind of move
    #[serde(rename = "type")]
    pub transition_type: TransitionType,
    /// Edge source
    pub from_position_id: PositionId,
    /// Edge target
    pub to_position_id: PositionId,
    /// Required skills, by id
    #[serde(default)]
    pub required_skill_ids: Vec<SkillId>,
}

/// Non-fatal problems found while loading a catalog directory.
///
/// Each variant names what was skipped. Nothing reported here reaches the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A line could not be parsed into a record.
    MalformedRecord {
        /// File the line belongs to
        file: &'static str,
        /// 1-based line number
        line_number: usize,
        /// Parser message
        error: String,
    },

    /// A record reused an id already seen earlier in the same file; the later
    /// record was skipped.
    DuplicateId {
        /// File the record belongs to
        file: &'static str,
        /// The repeated id
        id: String,
    },

    /// A transition pointed from a position back to itself and was skipped.
    SelfLoop {
        /// Offending transition
        transition_id: TransitionId,
    },

    /// A transition required a skill missing from the skills file and was
    /// skipped.
    UnknownSkill {
        /// Offending transition
        transition_id: TransitionId,
        /// Skill id that could not be resolved
        skill_id: SkillId,
    },

    /// A transition listed the same required skill more than once and was
    /// skipped.
    DuplicateSkill {
        /// Offending transition
        transition_id: TransitionId,
        /// Skill id listed again
        skill_id: SkillId,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord {
                file,
                line_number,
                error,
            } => write!(f, "{file}:{line_number}: skipped record: {error}"),
            Self::DuplicateId { file, id } => write!(f, "{file}: skipped duplicate id {id}"),
            Self::SelfLoop { transition_id } => {
                write!(f, "transition {transition_id} loops back to its own position")
            }
            Self::UnknownSkill {
                transition_id,
                skill_id,
            } => write!(
                f,
                "transition {transition_id} requires unknown skill {skill_id}"
            ),
            Self::DuplicateSkill {
                transition_id,
                skill_id,
            } => write!(
                f,
                "transition {transition_id} lists skill {skill_id} more than once"
            ),
        }
    }
}

async fn read_records<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Vec<T>> {
    let path = dir.join(file);
    if !fs::try_exists(&path).await? {
        tracing::debug!(path = %path.display(), "Catalog file absent, treating as empty");
        return Ok(Vec::new());
    }

    let (records, jsonl_warnings) = read_jsonl_resilient::<T, _>(&path).await?;
    warnings.extend(
        jsonl_warnings
            .into_iter()
            .map(|warning| LoadWarning::MalformedRecord {
                file,
                line_number: warning.line_number(),
                error: match warning {
                    JsonlWarning::MalformedJson { error, .. } => error,
                    JsonlWarning::SkippedLine { reason, .. } => reason,
                },
            }),
    );
    Ok(records)
}

fn dedupe<T>(
    records: Vec<T>,
    file: &'static str,
    key: impl Fn(&T) -> &str,
    warnings: &mut Vec<LoadWarning>,
) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(key(&record).to_string()) {
            kept.push(record);
        } else {
            warnings.push(LoadWarning::DuplicateId {
                file,
                id: key(&record).to_string(),
            });
        }
    }
    kept
}

fn resolve_transition(
    record: TransitionRecord,
    skills: &HashMap<SkillId, Skill>,
) -> std::result::Result<Transition, LoadWarning> {
    if record.from_position_id == record.to_position_id {
        return Err(LoadWarning::SelfLoop {
            transition_id: record.id,
        });
    }

    let mut seen = HashSet::new();
    let mut required_skills = Vec::with_capacity(record.required_skill_ids.len());
    for skill_id in &record.required_skill_ids {
        if !seen.insert(skill_id) {
            return Err(LoadWarning::DuplicateSkill {
                transition_id: record.id,
                skill_id: skill_id.clone(),
            });
        }
        match skills.get(skill_id) {
            Some(skill) => required_skills.push(skill.clone()),
            None => {
                return Err(LoadWarning::UnknownSkill {
                    transition_id: record.id,
                    skill_id: skill_id.clone(),
                });
            }
        }
    }

    Ok(Transition {
        id: record.id,
        transition_type: record.transition_type,
        from_position_id: record.from_position_id,
        to_position_id: record.to_position_id,
        required_skills,
    })
}

/// Load a catalog snapshot from a directory of JSONL files.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::Jsonl` if a present file cannot be read. Malformed or
/// inconsistent records are skipped and reported in the returned warnings.
///
/// # Example
///
/// ```no_run
/// use ladder::catalog::load_catalog_from_dir;
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> ladder::error::Result<()> {
/// let (catalog, warnings) = load_catalog_from_dir(Path::new(".ladder")).await?;
/// for warning in &warnings {
///     eprintln!("warning: {warning}");
/// }
/// # let _ = catalog;
/// # Ok(())
/// # }
/// ```
pub async fn load_catalog_from_dir(dir: &Path) -> Result<(InMemoryCatalog, Vec<LoadWarning>)> {
    let mut warnings = Vec::new();

    let positions: Vec<Position> = read_records(dir, POSITIONS_FILE_NAME, &mut warnings).await?;
    let skills: Vec<Skill> = read_records(dir, SKILLS_FILE_NAME, &mut warnings).await?;
    let records: Vec<TransitionRecord> =
        read_records(dir, TRANSITIONS_FILE_NAME, &mut warnings).await?;
    let viewers: Vec<Viewer> = read_records(dir, VIEWERS_FILE_NAME, &mut warnings).await?;

    let positions = dedupe(positions, POSITIONS_FILE_NAME, |p| p.id.as_str(), &mut warnings);
    let skills = dedupe(skills, SKILLS_FILE_NAME, |s| s.id.as_str(), &mut warnings);
    let records = dedupe(records, TRANSITIONS_FILE_NAME, |t| t.id.as_str(), &mut warnings);
    let viewers = dedupe(viewers, VIEWERS_FILE_NAME, |v| v.id.as_str(), &mut warnings);

    let skill_index: HashMap<SkillId, Skill> = skills
        .iter()
        .map(|skill| (skill.id.clone(), skill.clone()))
        .collect();

    let mut transitions = Vec::with_capacity(records.len());
    for record in records {
        match resolve_transition(record, &skill_index) {
            Ok(transition) => transitions.push(transition),
            Err(warning) => warnings.push(warning),
        }
    }

    for warning in &warnings {
        tracing::warn!(%warning, "Catalog load warning");
    }
    tracing::debug!(
        dir = %dir.display(),
        positions = positions.len(),
        skills = skills.len(),
        transitions = transitions.len(),
        viewers = viewers.len(),
        "Loaded catalog"
    );

    Ok((
        InMemoryCatalog::from_parts(positions, skills, transitions, viewers),
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::skill;

    fn record(id: &str, from: &str, to: &str, skills: &[&str]) -> TransitionRecord {
        TransitionRecord {
            id: TransitionId::new(id),
            transition_type: TransitionType::Horizontal,
            from_position_id: from.into(),
            to_position_id: to.into(),
            required_skill_ids: skills.iter().map(|s| SkillId::new(*s)).collect(),
        }
    }

    fn index(ids: &[&str]) -> HashMap<SkillId, Skill> {
        ids.iter().map(|id| (SkillId::new(*id), skill(id))).collect()
    }

    #[test]
    fn resolves_skills_in_record_order() {
        let transition =
            resolve_transition(record("t", "a", "b", &["y", "x"]), &index(&["x", "y"])).unwrap();
        let names: Vec<&str> = transition
            .required_skills
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Y", "X"]);
    }

    #[test]
    fn self_loop_is_rejected() {
        let warning = resolve_transition(record("t", "a", "a", &[]), &index(&[])).unwrap_err();
        assert!(matches!(warning, LoadWarning::SelfLoop { .. }));
    }

    #[test]
    fn unknown_skill_is_rejected() {
        let warning = resolve_transition(record("t", "a", "b", &["nope"]), &index(&[])).unwrap_err();
        assert_eq!(
            warning.to_string(),
            "transition t requires unknown skill nope"
        );
    }

    #[test]
    fn repeated_skill_is_rejected() {
        let warning =
            resolve_transition(record("t", "a", "b", &["x", "y", "x"]), &index(&["x", "y"]))
                .unwrap_err();
        assert_eq!(
            warning,
            LoadWarning::DuplicateSkill {
                transition_id: TransitionId::new("t"),
                skill_id: SkillId::new("x"),
            }
        );
        assert_eq!(
            warning.to_string(),
            "transition t lists skill x more than once"
        );
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut warnings = Vec::new();
        let kept = dedupe(
            vec![("a", 1), ("b", 2), ("a", 3)],
            POSITIONS_FILE_NAME,
            |r| r.0,
            &mut warnings,
        );
        assert_eq!(kept, vec![("a", 1), ("b", 2)]);
        assert_eq!(
            warnings,
            vec![LoadWarning::DuplicateId {
                file: POSITIONS_FILE_NAME,
                id: "a".to_string()
            }]
        );
    }
}
