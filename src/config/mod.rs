use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(alias = "api_url")]
    pub base_url: Option<String>,
    pub page_size: Option<u32>,
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    pub years: Option<Vec<String>>,
    pub format: Option<String>,
    pub no_color: Option<bool>,
}

/// Overrides the directory holding `config.yml`.
pub const CONFIG_DIR_ENV: &str = "NUTRIBROWSE_HOME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config path, use --config")]
    NoConfigPath,

    #[error("config file not found '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write config '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn config_dir(override_dir: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match override_dir.filter(|d| !d.is_empty()) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home.map(|h| h.join(".nutribrowse")),
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir(env::var_os(CONFIG_DIR_ENV), home_dir()).map(|d| d.join("config.yml"))
}

fn expand_tilde_in(path: &str, home: Option<&Path>) -> PathBuf {
    let rest = match path {
        "~" => Some(""),
        _ => path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")),
    };
    match (rest, home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_in(path, home_dir().as_deref())
}

/// Reads and parses `path`. A missing file is only an error when
/// `allow_missing` is false.
pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if allow_missing {
                return Ok(ConfigFile::default());
            }
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    parse_config(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
    // an all-comment file deserializes as unit, not as a mapping
    if contents
        .lines()
        .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'))
    {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents)
}

fn default_config_yaml() -> String {
    r#"# Nutribrowse config
#
# Location (default):
#   ~/.nutribrowse/config.yml
#   $NUTRIBROWSE_HOME/config.yml when that variable is set

# Foods API
base_url: http://localhost:8000/api/v1
timeout: 10
# proxy: http://127.0.0.1:8080

# Search
page_size: 12
years:
  - "2020"
  - "2021"
  - "2022"
  - "2023"
  - "2024"
  - "2025"

# Output styling
format: text
no_color: false
"#
    .to_string()
}

/// Writes the default config to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn ensure_default_config_file(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, default_config_yaml()).map_err(write_err)?;
    Ok(true)
}
