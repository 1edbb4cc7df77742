//! Stage data: static wall layouts
//!
//! Stages are loaded once and never mutated by the simulation. The JSON
//! layout is a map from stage name to its walls:
//!
//! ```json
//! { "dev": { "wall": [ { "rect": [0, 0, 800, 40] } ] } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::WallRect;

/// Stage loading failures
#[derive(Debug, Error)]
pub enum StageError {
    #[error("failed to parse stage data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown stage `{0}`")]
    Unknown(String),
    #[error("stage `{stage}` wall {index} has invalid extent {rect:?}")]
    InvalidWall {
        stage: String,
        index: usize,
        rect: WallRect,
    },
}

/// One wall entry as it appears in stage files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallEntry {
    pub rect: WallRect,
}

/// A single stage's static geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(rename = "wall", default)]
    entries: Vec<WallEntry>,
}

impl Stage {
    pub fn new(walls: impl IntoIterator<Item = WallRect>) -> Self {
        Self {
            entries: walls.into_iter().map(|rect| WallEntry { rect }).collect(),
        }
    }

    /// The development box: 800x600 bounded by 40-unit thick walls, inner
    /// faces at x = 40, x = 760, y = 40, y = 560
    pub fn dev() -> Self {
        Self::new([
            WallRect::new(0.0, 0.0, 800.0, 40.0),
            WallRect::new(0.0, 0.0, 40.0, 600.0),
            WallRect::new(0.0, 560.0, 800.0, 40.0),
            WallRect::new(760.0, 0.0, 40.0, 600.0),
        ])
    }

    /// Walls in load order
    pub fn walls(&self) -> impl ExactSizeIterator<Item = &WallRect> + Clone + '_ {
        self.entries.iter().map(|entry| &entry.rect)
    }

    pub fn wall_count(&self) -> usize {
        self.entries.len()
    }

    fn validate(&self, name: &str) -> Result<(), StageError> {
        for (index, rect) in self.walls().enumerate() {
            let finite = [rect.origin_x, rect.origin_y, rect.size_x, rect.size_y]
                .iter()
                .all(|v| v.is_finite());
            if !finite || rect.size_x < 0.0 || rect.size_y < 0.0 {
                return Err(StageError::InvalidWall {
                    stage: name.to_string(),
                    index,
                    rect: *rect,
                });
            }
        }
        Ok(())
    }
}

/// Named collection of stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageSet {
    stages: BTreeMap<String, Stage>,
}

impl StageSet {
    /// Stages compiled into the game
    pub fn builtin() -> Self {
        let mut stages = BTreeMap::new();
        stages.insert(crate::consts::DEFAULT_STAGE.to_string(), Stage::dev());
        Self { stages }
    }

    /// Parse and validate a stage file
    pub fn from_json(json: &str) -> Result<Self, StageError> {
        let set: StageSet = serde_json::from_str(json)?;
        for (name, stage) in &set.stages {
            stage.validate(name)?;
        }
        log::info!("Loaded {} stage(s)", set.stages.len());
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Result<&Stage, StageError> {
        self.stages
            .get(name)
            .ok_or_else(|| StageError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV_JSON: &str = r#"{
        "dev": {
            "wall": [
                { "rect": [0, 0, 800, 40] },
                { "rect": [0, 0, 40, 600] },
                { "rect": [0, 560, 800, 40] },
                { "rect": [760, 0, 40, 600] }
            ]
        }
    }"#;

    #[test]
    fn test_parse_matches_builtin() {
        let parsed = StageSet::from_json(DEV_JSON).unwrap();
        assert_eq!(parsed, StageSet::builtin());
        assert_eq!(parsed.get("dev").unwrap().wall_count(), 4);
    }

    #[test]
    fn test_unknown_stage() {
        let set = StageSet::builtin();
        assert!(matches!(set.get("boss"), Err(StageError::Unknown(name)) if name == "boss"));
    }

    #[test]
    fn test_negative_extent_rejected() {
        let json = r#"{ "bad": { "wall": [ { "rect": [0, 0, -5, 10] } ] } }"#;
        assert!(matches!(
            StageSet::from_json(json),
            Err(StageError::InvalidWall { index: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            StageSet::from_json(r#"{ "dev": { "wall": [ { "rect": [1, 2] } ] } }"#),
            Err(StageError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_stage_allowed() {
        let set = StageSet::from_json(r#"{ "open": {} }"#).unwrap();
        assert_eq!(set.get("open").unwrap().wall_count(), 0);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["open"]);
    }
}
