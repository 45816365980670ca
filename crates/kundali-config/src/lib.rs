use kundali::vedic::dashas::MAX_HORIZON_YEARS;
use kundali::{EngineSettings, EphemerisConfig, RateLimitConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Fully resolved settings for the engine, its ephemeris and the request gate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KundaliConfig {
    pub engine: EngineSettings,
    pub ephemeris: EphemerisConfig,
    pub rate_limit: RateLimitConfig,
    /// File the settings were read from; `None` when running on defaults
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RootConfigToml {
    engine: EngineSettings,
    ephemeris: EphemerisConfig,
    rate_limit: RateLimitConfig,
}

/// Try common relative paths for `configs/kundali.toml`, from the workspace
/// root and from a crate directory.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["configs/kundali.toml", "../../configs/kundali.toml"];

/// Returns the text and path of the first config file found, if any.
pub fn read_config_toml_text() -> Option<(String, PathBuf)> {
    CONFIG_SEARCH_PATHS.iter().find_map(|p| {
        fs::read_to_string(p)
            .ok()
            .map(|text| (text, PathBuf::from(p)))
    })
}

/// Parse and check config text.
pub fn parse_config(text: &str) -> anyhow::Result<KundaliConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse kundali.toml: {e}"))?;
    let RootConfigToml {
        engine,
        mut ephemeris,
        rate_limit,
    } = root;

    let horizon = engine.dasha_horizon_years;
    if !horizon.is_finite() || horizon <= 0.0 || horizon > MAX_HORIZON_YEARS {
        anyhow::bail!(
            "engine.dasha_horizon_years must be in (0, {}], got {}",
            MAX_HORIZON_YEARS,
            horizon
        );
    }
    if engine.speed_step_minutes == 0 {
        anyhow::bail!("engine.speed_step_minutes must be at least 1");
    }
    if rate_limit.max_requests == 0 || rate_limit.window_secs == 0 {
        anyhow::bail!("rate_limit.max_requests and rate_limit.window_secs must be non-zero");
    }
    if ephemeris.path.is_none() {
        ephemeris.path = std::env::var_os("SWISS_EPHEMERIS_PATH").map(PathBuf::from);
    }

    Ok(KundaliConfig {
        engine,
        ephemeris,
        rate_limit,
        source: None,
    })
}

/// Load settings from `explicit` when given, otherwise from the first file
/// in [`CONFIG_SEARCH_PATHS`]. With no file at all the defaults apply.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<KundaliConfig> {
    let found = match explicit {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
            Some((text, path.to_path_buf()))
        }
        None => read_config_toml_text(),
    };

    match found {
        Some((text, path)) => {
            let mut config = parse_config(&text)
                .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
            config.source = Some(path);
            Ok(config)
        }
        None => parse_config(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali::vedic::{AyanamsaModel, DashaLevel};

    #[test]
    fn test_empty_text_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.engine, EngineSettings::default());
        assert_eq!(config.rate_limit, RateLimitConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let text = r#"
            [engine]
            ayanamsa = "krishnamurti"
            include_outer_bodies = true
            dasha_depth = "pratyantardasha"
            dasha_horizon_years = 120.0

            [ephemeris]
            path = "/opt/ephe"

            [rate_limit]
            max_requests = 5
            window_secs = 10
        "#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.engine.ayanamsa, AyanamsaModel::Krishnamurti);
        assert!(config.engine.include_outer_bodies);
        assert_eq!(config.engine.dasha_depth, DashaLevel::Pratyantardasha);
        assert_eq!(config.engine.dasha_horizon_years, 120.0);
        assert_eq!(config.ephemeris.path, Some(PathBuf::from("/opt/ephe")));
        assert_eq!(config.rate_limit.max_requests, 5);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_config("[engine]\ndasha_horizon_years = -5.0").is_err());
        assert!(parse_config("[engine]\ndasha_horizon_years = 500000.0").is_err());
        assert!(parse_config("[engine]\ndasha_horizon_years = 1000.0").is_ok());
        assert!(parse_config("[engine]\nspeed_step_minutes = 0").is_err());
        assert!(parse_config("[rate_limit]\nmax_requests = 0").is_err());
        assert!(parse_config("[engine]\nayanamsa = \"tropical\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/kundali.toml"))).is_err());
    }
}
