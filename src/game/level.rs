//! Level data and catalog
//!
//! Levels are RON files under `assets/levels/`, embedded at build time by
//! `build.rs`. The catalog is validated once at startup; after that, loading
//! a level is infallible.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use super::entity::{EnemyKind, Platform};
use super::geometry::Rect;

// Generated by build.rs: `BUILTIN_LEVELS: &[(&str, &str)]` of (file name, RON text)
include!(concat!(env!("OUT_DIR"), "/levels.rs"));

/// Space the level extends past the goal
const GOAL_RUNOUT: f32 = 200.0;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid level data: {0}")]
    Validation(String),
    #[error("no levels found")]
    Empty,
}

/// Visual theme of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Forest,
    Desert,
    Space,
}

/// Enemy variant as authored in level files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyType {
    Red,
    Purple,
    Pink,
}

impl EnemyType {
    /// The live variant with fresh per-variant state
    pub fn spawn_kind(self) -> EnemyKind {
        match self {
            EnemyType::Red => EnemyKind::Red,
            EnemyType::Purple => EnemyKind::Purple { pause: 0 },
            EnemyType::Pink => EnemyKind::Pink,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub rect: Rect,
    pub vel_x: f32,
    pub kind: EnemyType,
    /// Index of the platform this enemy patrols
    #[serde(default)]
    pub home: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub number: u32,
    #[serde(default)]
    pub theme: Theme,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub coins: Vec<Rect>,
    pub goal: Rect,
}

impl LevelData {
    /// Scrollable width: the rightmost platform edge or a runout past the
    /// goal, whichever is further
    pub fn width(&self) -> f32 {
        let platforms = self
            .platforms
            .iter()
            .map(|p| p.rect.right())
            .fold(0.0, f32::max);
        platforms.max(self.goal.right() + GOAL_RUNOUT)
    }

    /// Check geometry and references
    pub fn validate(&self) -> Result<(), LevelError> {
        let context = format!("level {}", self.number);

        if self.platforms.is_empty() {
            return Err(LevelError::Validation(format!("{}: no platforms", context)));
        }
        for (i, p) in self.platforms.iter().enumerate() {
            validate_rect(&p.rect, &format!("{} platform[{}]", context, i))?;
        }
        for (i, e) in self.enemies.iter().enumerate() {
            let what = format!("{} enemy[{}]", context, i);
            validate_rect(&e.rect, &what)?;
            if !e.vel_x.is_finite() {
                return Err(LevelError::Validation(format!("{}: invalid velocity {}", what, e.vel_x)));
            }
            if let Some(home) = e.home {
                if home >= self.platforms.len() {
                    return Err(LevelError::Validation(format!(
                        "{}: home platform {} out of range ({} platforms)",
                        what, home, self.platforms.len()
                    )));
                }
            }
        }
        for (i, c) in self.coins.iter().enumerate() {
            validate_rect(c, &format!("{} coin[{}]", context, i))?;
        }
        validate_rect(&self.goal, &format!("{} goal", context))?;
        Ok(())
    }
}

fn validate_rect(rect: &Rect, context: &str) -> Result<(), LevelError> {
    if !rect.is_finite() {
        return Err(LevelError::Validation(format!("{}: non-finite coordinates", context)));
    }
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return Err(LevelError::Validation(format!(
            "{}: non-positive size {}x{}", context, rect.w, rect.h
        )));
    }
    Ok(())
}

/// Parse one level file
pub fn parse_level(file: &str, source: &str) -> Result<LevelData, LevelError> {
    ron::from_str(source).map_err(|source| LevelError::Parse {
        file: file.to_string(),
        source,
    })
}

/// Ordered set of levels, numbered contiguously from 1
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelData>,
}

impl LevelCatalog {
    /// The levels embedded in the binary
    pub fn builtin() -> Result<Self, LevelError> {
        let levels = BUILTIN_LEVELS
            .iter()
            .map(|(file, source)| parse_level(file, source))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_levels(levels)
    }

    /// Build a catalog, sorting by number and validating every level
    pub fn from_levels(mut levels: Vec<LevelData>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        levels.sort_by_key(|l| l.number);

        for (i, level) in levels.iter().enumerate() {
            let expected = i as u32 + 1;
            if level.number != expected {
                return Err(LevelError::Validation(format!(
                    "level numbers must run 1..={} without gaps, found {} at position {}",
                    levels.len(), level.number, expected
                )));
            }
            level.validate()?;
        }

        Ok(Self { levels })
    }

    /// Level by number (1-indexed)
    pub fn get(&self, number: u32) -> Option<&LevelData> {
        let index = (number as usize).checked_sub(1)?;
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
