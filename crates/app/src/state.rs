//! Application state management

use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use quorum_core::{AppConfig, Database, Error, Result, SessionStore};

/// Main application state
pub struct AppState {
    pub db: Mutex<Database>,
    pub session: Mutex<SessionStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config = AppConfig::load()?;
        let db_path = Self::data_path()?.join("quorum.db");

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path)?;

        Ok(Self {
            db: Mutex::new(db),
            session: Mutex::new(SessionStore::with_config(&config)),
            config,
        })
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "quorum", "quorum").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }
}
