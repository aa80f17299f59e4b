//! Seed data loaded once at startup
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::info;

use crate::domain::{Club, Competition};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed seed file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct ClubsFile {
    clubs: Vec<Club>,
}

#[derive(Deserialize)]
struct CompetitionsFile {
    competitions: Vec<Competition>,
}

pub fn load_clubs(path: impl AsRef<Path>) -> Result<Vec<Club>, LoadError> {
    let file: ClubsFile = read_json(path.as_ref())?;
    info!(count = file.clubs.len(), "Loaded clubs");
    Ok(file.clubs)
}

/// Load competitions, failing on any date that does not follow the seed format
pub fn load_competitions(path: impl AsRef<Path>) -> Result<Vec<Competition>, LoadError> {
    let file: CompetitionsFile = read_json(path.as_ref())?;
    info!(count = file.competitions.len(), "Loaded competitions");
    Ok(file.competitions)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
