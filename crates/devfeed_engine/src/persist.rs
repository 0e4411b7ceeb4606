use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use devfeed_core::ThemeId;
use feed_logging::feed_warn;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

pub const PREFERENCES_FILE: &str = "preferences.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory missing or not writable: {0}")]
    StateDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("ron error: {0}")]
    Ron(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Option<String>,
}

/// Create the state directory if missing.
pub fn ensure_state_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::StateDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
    }
    Ok(())
}

/// Theme preference stored as a small RON file in the state directory.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    dir: PathBuf,
}

impl ThemeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }

    /// The stored theme id, unvalidated. A missing or corrupt file reads as
    /// no preference.
    pub fn load(&self) -> Option<String> {
        let path = self.path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                feed_warn!("cannot read {}: {}", path.display(), err);
                return None;
            }
        };
        match ron::from_str::<Preferences>(&text) {
            Ok(prefs) => prefs.theme,
            Err(err) => {
                feed_warn!("ignoring corrupt {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Writes through a temp file and rename so readers never see a torn file.
    pub fn save(&self, theme: ThemeId) -> Result<PathBuf, PersistError> {
        ensure_state_dir(&self.dir)?;
        let prefs = Preferences {
            theme: Some(theme.as_str().to_string()),
        };
        let text = ron::ser::to_string_pretty(&prefs, ron::ser::PrettyConfig::default())
            .map_err(|e| PersistError::Ron(e.to_string()))?;

        let target = self.path();
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
