//! User configuration
//!
//! A flat `key = "value"` TOML file at `~/.config/liftplan/config.toml`.
//! The database location is resolved with the following priority
//! (highest to lowest):
//! 1. `--db` flag
//! 2. `LIFTPLAN_DB` environment variable
//! 3. `db_path` key in the config file
//! 4. `./liftplan.db`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DB_PATH_KEY: &str = "db_path";
pub const DB_ENV: &str = "LIFTPLAN_DB";
pub const DEFAULT_DB_PATH: &str = "./liftplan.db";

/// Keys liftplan reads. Others are stored but ignored.
pub const KNOWN_KEYS: &[&str] = &[DB_PATH_KEY];

pub fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    pub map: BTreeMap<String, String>,
}

impl Config {
    /// `~/.config/liftplan/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("liftplan").join("config.toml"))
    }

    /// Load from `path`; a missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config `{}`", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config `{}`", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory `{}`", parent.display()))?;
        }
        let content = toml::to_string(self).context("serializing config")?;
        fs::write(path, content).with_context(|| format!("writing config `{}`", path.display()))
    }

    /// Database path after applying flag, env and file overrides. Blank
    /// values at any layer are skipped.
    pub fn db_path(&self, flag: Option<&str>, env: Option<&str>) -> String {
        self.db_layer(flag, env)
            .map_or(DEFAULT_DB_PATH, |(path, _)| path)
            .to_string()
    }

    /// Which layer [`Config::db_path`] took its answer from.
    pub fn db_path_origin(&self, flag: Option<&str>, env: Option<&str>) -> &'static str {
        self.db_layer(flag, env).map_or("default", |(_, origin)| origin)
    }

    fn db_layer<'a>(
        &'a self,
        flag: Option<&'a str>,
        env: Option<&'a str>,
    ) -> Option<(&'a str, &'static str)> {
        let file = self.map.get(DB_PATH_KEY).map(String::as_str);
        [(flag, "--db flag"), (env, DB_ENV), (file, "config file")]
            .into_iter()
            .find_map(|(v, origin)| v.filter(|p| !p.trim().is_empty()).map(|p| (p, origin)))
    }
}
