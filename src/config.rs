use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "taskboard";
const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "taskboard.db";

/// Environment variable overriding [`BoardConfig::database_path`].
pub const DB_ENV: &str = "TASKBOARD_DB";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// SQLite file holding the board. Defaults to the user data directory.
    pub database_path: Option<PathBuf>,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_filter: "taskboard=info,board=info".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load configuration from the user's config directory, then apply the
    /// environment override.
    ///
    /// A missing file yields defaults. A file that cannot be read or parsed
    /// also yields defaults, and the error comes back alongside so the caller
    /// can report it once logging is up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        let env_db = std::env::var_os(DB_ENV).map(PathBuf::from);
        match get_config_path() {
            Ok(path) => Self::load_or_default(&path, env_db),
            Err(e) => (Self::default().with_env_override(env_db), Some(e)),
        }
    }

    /// Config from `path`, falling back to defaults on failure. The
    /// `database_path` override applies either way.
    pub fn load_or_default(
        path: &Path,
        database_path: Option<PathBuf>,
    ) -> (Self, Option<anyhow::Error>) {
        let (config, error) = match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        (config.with_env_override(database_path), error)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn with_env_override(mut self, database_path: Option<PathBuf>) -> Self {
        if database_path.is_some() {
            self.database_path = database_path;
        }
        self
    }

    /// The configured database file, or the default location.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

fn get_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

fn default_database_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join(DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BoardConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"database_path": "/tmp/board.db"}"#).unwrap();

        let config = BoardConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/board.db")));
        assert_eq!(config.log_filter, "taskboard=info,board=info");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").unwrap();
        assert!(BoardConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_malformed_file_still_honours_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").unwrap();

        let (config, error) =
            BoardConfig::load_or_default(&path, Some(PathBuf::from("/tmp/env.db")));
        assert!(error.is_some());
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/env.db"));
        assert_eq!(config.log_filter, BoardConfig::default().log_filter);
    }

    #[test]
    fn test_default_filter_covers_library_and_binary() {
        let filter = BoardConfig::default().log_filter;
        let targets: Vec<&str> = filter
            .split(',')
            .filter_map(|directive| directive.split('=').next())
            .collect();
        assert!(targets.contains(&"taskboard"));
        assert!(targets.contains(&"board"));
    }

    #[test]
    fn test_env_override_wins() {
        let config = BoardConfig {
            database_path: Some(PathBuf::from("a.db")),
            ..BoardConfig::default()
        }
        .with_env_override(Some(PathBuf::from("b.db")));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("b.db"));

        let unchanged = BoardConfig::default().with_env_override(None);
        assert_eq!(unchanged.database_path, None);
    }
}
