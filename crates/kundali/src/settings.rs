//! Engine settings.
//!
//! Deserialized from the `[engine]`, `[ephemeris]` and `[rate_limit]` tables
//! of `kundali.toml`. Every field has a default so partial files work.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::vedic::ayanamsa::AyanamsaModel;
use crate::vedic::dashas::{DashaLevel, DEFAULT_HORIZON_YEARS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub ayanamsa: AyanamsaModel,
    /// Also place Uranus, Neptune and Pluto
    pub include_outer_bodies: bool,
    /// Fail the whole chart when any tracked body cannot be resolved
    pub strict_ephemeris: bool,
    pub dasha_horizon_years: f64,
    pub dasha_depth: DashaLevel,
    /// Forward-difference step for daily speed
    pub speed_step_minutes: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            ayanamsa: AyanamsaModel::Lahiri,
            include_outer_bodies: false,
            strict_ephemeris: false,
            dasha_horizon_years: DEFAULT_HORIZON_YEARS,
            dasha_depth: DashaLevel::Mahadasha,
            speed_step_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EphemerisConfig {
    /// Swiss Ephemeris data directory; falls back to `SWISS_EPHEMERIS_PATH`,
    /// then the default install location, then the built-in Moshier theory
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            max_requests: 30,
            window_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"ayanamsa":"raman","dasha_depth":"antardasha"}"#).unwrap();
        assert_eq!(settings.ayanamsa, AyanamsaModel::Raman);
        assert_eq!(settings.dasha_depth, DashaLevel::Antardasha);
        assert_eq!(settings.dasha_horizon_years, 100.0);
        assert_eq!(settings.speed_step_minutes, 60);
        assert!(!settings.strict_ephemeris);
    }

    #[test]
    fn test_ephemeris_path() {
        let config: EphemerisConfig = serde_json::from_str(r#"{"path":"/opt/ephe"}"#).unwrap();
        assert_eq!(config.path, Some(PathBuf::from("/opt/ephe")));
        let empty: EphemerisConfig = serde_json::from_str("{}").unwrap();
        assert!(empty.path.is_none());
    }
}
