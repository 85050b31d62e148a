//! Application state management

use std::path::{Path, PathBuf};

use cafe_core::{
    CafeDirectory, ConfigError, Database, DirectoryConfig, MemoryDirectory, SystemClock,
};
use directories::ProjectDirs;

/// The directory as the binary runs it: cafes in memory, cooldowns in SQLite
pub type Directory = CafeDirectory<MemoryDirectory, Database, SystemClock>;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Core(#[from] cafe_core::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not determine the {0} directory")]
    NoProjectDirs(&'static str),
}

/// Main application state
pub struct AppState {
    pub directory: Directory,
    data_dir: PathBuf,
    config_path: PathBuf,
}

impl AppState {
    pub fn new(
        data_dir: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Result<Self, StartupError> {
        let dirs = ProjectDirs::from("dev", "studycafes", "cafe-directory");

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs
                .as_ref()
                .map(|d| d.data_dir().to_path_buf())
                .ok_or(StartupError::NoProjectDirs("data"))?,
        };
        let config_path = match config_path {
            Some(path) => path,
            None => dirs
                .as_ref()
                .map(|d| d.config_dir().join("cafes.toml"))
                .ok_or(StartupError::NoProjectDirs("config"))?,
        };

        std::fs::create_dir_all(&data_dir).map_err(cafe_core::Error::from)?;

        let config = DirectoryConfig::load(&config_path)?;
        let db = Database::open(data_dir.join("cafes.db"))?;
        let directory =
            CafeDirectory::from_config(MemoryDirectory::new(), db, SystemClock, &config)?;

        tracing::info!(
            data_dir = %data_dir.display(),
            config = %config_path.display(),
            "Directory ready"
        );

        Ok(Self {
            directory,
            data_dir,
            config_path,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
