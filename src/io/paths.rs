use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Error type for directory resolution
#[derive(Debug, thiserror::Error)]
pub enum PathsError {
    #[error("could not determine a home directory for this user")]
    NoHome,
}

/// Resolved data and config locations.
#[derive(Debug, Clone)]
pub struct FocusDirs {
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl FocusDirs {
    /// Resolve the per-user directories, or use `data_dir` for both when an
    /// override is given (`--data-dir`).
    pub fn resolve(data_dir: Option<&Path>) -> Result<FocusDirs, PathsError> {
        if let Some(dir) = data_dir {
            return Ok(FocusDirs {
                data_dir: dir.to_path_buf(),
                config_dir: dir.to_path_buf(),
            });
        }
        let dirs = ProjectDirs::from("", "", "focus").ok_or(PathsError::NoHome)?;
        Ok(FocusDirs {
            data_dir: dirs.data_dir().to_path_buf(),
            config_dir: dirs.config_dir().to_path_buf(),
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}
