use crate::error::DirectoryError;
use marquee_core::{Screen, ScreenId};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// External collaborator supplying the configured fleet. The core reads it at
/// startup and for snapshot construction; it never writes back.
pub trait ScreenDirectory: Send + Sync {
    /// Configured screens in display order.
    fn list(&self) -> Vec<Screen>;
}

/// Directory backed by a screens.json file. Loaded once; updates happen
/// through the admin surface, outside this process's runtime.
pub struct FileScreenDirectory {
    screens: Vec<Screen>,
}

impl FileScreenDirectory {
    /// Load the directory file. A missing file falls back to the default
    /// fleet; an unreadable or malformed one is a startup error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(raw) => {
                let screens: Vec<Screen> = serde_json::from_str(&raw)?;
                info!(path = %path.display(), count = screens.len(), "loaded screen directory");
                Ok(Self { screens })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "screens file not found, using default fleet");
                Ok(Self::default_fleet())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn default_fleet() -> Self {
        let screens = vec![
            Screen::new(ScreenId(1), "Station 1"),
            Screen::new(ScreenId(2), "Station 2"),
            Screen::new(ScreenId(3), "Station 3"),
            Screen::new(ScreenId(4), "Screen 2"),
            Screen::new(ScreenId(5), "Screen 3"),
            Screen::new(ScreenId(6), "Main Screen"),
        ];

        Self { screens }
    }

    pub fn from_screens(screens: Vec<Screen>) -> Self {
        Self { screens }
    }
}

impl ScreenDirectory for FileScreenDirectory {
    fn list(&self) -> Vec<Screen> {
        self.screens.clone()
    }
}
