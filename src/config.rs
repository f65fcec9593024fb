//! Engine configuration: difficulty tier, RNG seed and an optional per-move
//! time budget. Values come from CLI flags, then `PIECOACH_*` environment
//! overrides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::search::SearchLimits;

pub const ENV_DIFFICULTY: &str = "PIECOACH_DIFFICULTY";
pub const ENV_SEED: &str = "PIECOACH_SEED";
pub const ENV_MOVETIME_MS: &str = "PIECOACH_MOVETIME_MS";

/// Strength tier of the computer opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Famous player the tier is dressed up as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub nickname: &'static str,
    pub era: &'static str,
    pub style: &'static str,
    pub emoji: &'static str,
}

const CAPABLANCA: Persona = Persona {
    name: "José Raúl Capablanca",
    nickname: "The Chess Machine",
    era: "1888-1942",
    style: "Positional genius, simple and elegant",
    emoji: "♟️",
};

const KASPAROV: Persona = Persona {
    name: "Garry Kasparov",
    nickname: "The Beast from Baku",
    era: "1963-present",
    style: "Aggressive and tactical brilliance",
    emoji: "⚡",
};

const CARLSEN: Persona = Persona {
    name: "Magnus Carlsen",
    nickname: "The Mozart of Chess",
    era: "1990-present",
    style: "Universal player, endgame master",
    emoji: "👑",
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Plies searched below each root move; easy does not search.
    pub fn search_depth(self) -> Option<u32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(3),
            Difficulty::Hard => Some(4),
        }
    }

    pub fn persona(self) -> &'static Persona {
        match self {
            Difficulty::Easy => &CAPABLANCA,
            Difficulty::Medium => &KASPAROV,
            Difficulty::Hard => &CARLSEN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Seeds the easy tier's move picker; entropy when absent.
    pub seed: Option<u64>,
    /// Per-move budget; a search that overruns it is abandoned.
    pub movetime_ms: Option<u64>,
}

impl EngineConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty, ..Default::default() }
    }

    /// Applies `PIECOACH_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from any key lookup; unset keys leave fields alone.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_DIFFICULTY) {
            self.difficulty = v.parse()?;
        }
        if let Some(v) = lookup(ENV_SEED) {
            self.seed = Some(parse_u64(ENV_SEED, &v)?);
        }
        if let Some(v) = lookup(ENV_MOVETIME_MS) {
            self.movetime_ms = Some(parse_u64(ENV_MOVETIME_MS, &v)?);
        }
        Ok(self)
    }

    pub fn movetime(&self) -> Option<Duration> {
        self.movetime_ms.map(Duration::from_millis)
    }

    /// Fresh limits for one search; the deadline starts counting now.
    pub fn limits(&self) -> SearchLimits {
        match self.movetime() {
            Some(d) => SearchLimits::with_movetime(d),
            None => SearchLimits::unbounded(),
        }
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| EngineError::InvalidEnv { var, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!(matches!("grandmaster".parse::<Difficulty>(), Err(EngineError::UnknownDifficulty(_))));
    }

    #[test]
    fn tier_depths() {
        assert_eq!(Difficulty::Easy.search_depth(), None);
        assert_eq!(Difficulty::Medium.search_depth(), Some(3));
        assert_eq!(Difficulty::Hard.search_depth(), Some(4));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn overrides_replace_fields() {
        let env: HashMap<&str, &str> =
            [(ENV_DIFFICULTY, "hard"), (ENV_SEED, "99"), (ENV_MOVETIME_MS, "250")].into_iter().collect();
        let cfg = EngineConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg, EngineConfig { difficulty: Difficulty::Hard, seed: Some(99), movetime_ms: Some(250) });
    }

    #[test]
    fn bad_override_is_reported() {
        let err = EngineConfig::default()
            .with_overrides(|k| (k == ENV_SEED).then(|| "lots".to_string()))
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidEnv { var: ENV_SEED, value: "lots".into() });
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"difficulty":"easy","seed":3}"#).unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Easy);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.movetime_ms, None);
    }
}
