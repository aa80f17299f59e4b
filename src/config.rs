use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::domain::booking::MAXIMUM_PLACES_PER_CLUB;

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub clubs_file: PathBuf,
    pub competitions_file: PathBuf,
    /// Places a club may buy for a single competition
    pub max_places_per_club: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    key: String,
    value: String,
    reason: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key-value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "GUDLFT_PORT", "5000")?,
            clubs_file: try_load(&lookup, "GUDLFT_CLUBS_FILE", "data/clubs.json")?,
            competitions_file: try_load(
                &lookup,
                "GUDLFT_COMPETITIONS_FILE",
                "data/competitions.json",
            )?,
            max_places_per_club: try_load(
                &lookup,
                "GUDLFT_MAX_PLACES",
                &MAXIMUM_PLACES_PER_CLUB.to_string(),
            )?,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            reason: e.to_string(),
            value,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use speculoos::prelude::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let res = Config::from_lookup(lookup(&[]));

        assert_that!(res).is_ok().matches(|config| {
            config.port == 5000
                && config.clubs_file == PathBuf::from("data/clubs.json")
                && config.competitions_file == PathBuf::from("data/competitions.json")
                && config.max_places_per_club == 12
        });
    }

    #[test]
    fn test_overrides() {
        let res = Config::from_lookup(lookup(&[
            ("GUDLFT_PORT", "8080"),
            ("GUDLFT_CLUBS_FILE", "/srv/clubs.json"),
            ("GUDLFT_MAX_PLACES", "4"),
        ]));

        assert_that!(res).is_ok().matches(|config| {
            config.port == 8080
                && config.clubs_file == PathBuf::from("/srv/clubs.json")
                && config.max_places_per_club == 4
        });
    }

    #[rstest]
    #[case("GUDLFT_PORT", "http")]
    #[case("GUDLFT_PORT", "70000")]
    #[case("GUDLFT_MAX_PLACES", "-1")]
    fn test_invalid(#[case] key: &str, #[case] value: &str) {
        let res = Config::from_lookup(lookup(&[(key, value)]));

        assert_that!(res)
            .is_err()
            .matches(|err| err.to_string().contains(key));
    }
}
