//! Runtime configuration
//!
//! Flags win over environment variables, which may come from a `.env` file.

use std::path::PathBuf;

use treesync_core::logging_facility::Profile;

pub const ENV_DB: &str = "TREESYNC_DB";
pub const ENV_LOG: &str = "TREESYNC_LOG";
pub const DEFAULT_DB_PATH: &str = ".treesync/store.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_profile: Profile,
}

impl Config {
    pub fn load(db_flag: Option<PathBuf>) -> Self {
        // A missing .env file is normal
        dotenvy::dotenv().ok();
        Self::resolve(
            db_flag,
            std::env::var(ENV_DB).ok(),
            std::env::var(ENV_LOG).ok(),
        )
    }

    fn resolve(db_flag: Option<PathBuf>, db_env: Option<String>, log_env: Option<String>) -> Self {
        let db_path = db_flag
            .or_else(|| db_env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let log_profile = log_env
            .as_deref()
            .and_then(Profile::from_name)
            .unwrap_or(Profile::Production);

        Self {
            db_path,
            log_profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_beats_env() {
        let config = Config::resolve(
            Some(PathBuf::from("flag.db")),
            Some("env.db".to_string()),
            None,
        );
        assert_eq!(config.db_path, PathBuf::from("flag.db"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(None, Some("  ".to_string()), Some("loud".to_string()));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.log_profile, Profile::Production);

        let config = Config::resolve(None, Some("env.db".to_string()), Some("dev".to_string()));
        assert_eq!(config.db_path, PathBuf::from("env.db"));
        assert_eq!(config.log_profile, Profile::Development);
    }
}
