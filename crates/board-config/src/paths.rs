use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found, set $HOME environment variable")]
    HomeNotFound,
}

/// Path construction for the `~/.board/` directory layout.
///
/// Use `resolve()` in production code and `from_dir()` in tests.
#[derive(Debug, Clone)]
pub struct BoardPaths {
    board_dir: PathBuf,
}

impl BoardPaths {
    /// Resolve paths from the user's home directory (`~/.board`).
    pub fn resolve() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            board_dir: home.join(".board"),
        })
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(board_dir: PathBuf) -> Self {
        Self { board_dir }
    }

    pub fn board_dir(&self) -> &Path {
        &self.board_dir
    }

    pub fn user_config(&self) -> PathBuf {
        self.board_dir.join("config.toml")
    }

    /// `<project_root>/.board/config.toml`
    pub fn project_config(project_root: &Path) -> PathBuf {
        project_root.join(".board").join("config.toml")
    }
}
