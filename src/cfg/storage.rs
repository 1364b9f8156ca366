use std::{
    fs::OpenOptions,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use directories::ProjectDirs;
use thiserror::Error;

use super::Config;

static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("io.github", "solar-system-demo", "solar_system_demo"));

/// `config.toml` in the platform config directory, if the platform has one.
pub fn default_path() -> Option<PathBuf> {
    PROJECT_DIRS
        .as_ref()
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no reasonable config directory was found")]
    NoSaveDirectory,
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not create config directory: {0}")]
    CreateConfigDir(#[source] io::Error),
    #[error("could not open temporary file: {0}")]
    OpenTmpFile(#[source] io::Error),
    #[error("could not write config: {0}")]
    Write(#[source] io::Error),
    #[error("could not move config into place: {0}")]
    Rename(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {path}: {source}")]
    OpenFile { path: PathBuf, source: io::Error },
    #[error("could not read {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("malformed config in {path}: {source}")]
    Deserialize {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Reads a config file. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Config, LoadError> {
    let mut file = match OpenOptions::new().read(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(LoadError::OpenFile {
                path: path.to_owned(),
                source,
            });
        }
    };

    let mut string = String::new();
    file.read_to_string(&mut string)
        .map_err(|source| LoadError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
    drop(file);

    toml::from_str(&string).map_err(|source| LoadError::Deserialize {
        path: path.to_owned(),
        source,
    })
}

/// Loads `path`, or the default location when `path` is `None`.
///
/// Any failure is logged and the defaults are used instead.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_path) else {
        tracing::warn!("no config directory available, using defaults");
        return Config::default();
    };

    match load(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("{e}; using defaults");
            Config::default()
        }
    }
}

/// Writes `config` to `path` through a temporary file and a rename, so a
/// crash never leaves a half-written config behind.
pub fn save(config: &Config, path: Option<&Path>) -> Result<PathBuf, SaveError> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(default_path)
        .ok_or(SaveError::NoSaveDirectory)?;
    let tmp_path = path.with_extension("toml.tmp");

    let text = toml::to_string_pretty(config)?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(SaveError::CreateConfigDir)?;
    }

    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)
        .map_err(SaveError::OpenTmpFile)?;

    tmp_file
        .write_all(text.as_bytes())
        .map_err(SaveError::Write)?;
    tmp_file.flush().map_err(SaveError::Write)?;
    drop(tmp_file);

    std::fs::rename(&tmp_path, &path).map_err(SaveError::Rename)?;
    tracing::info!(path = %path.display(), "config saved");

    Ok(path)
}
