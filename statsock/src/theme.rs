//! Light/dark theme choice, persisted in the config file on every change.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

use crate::config::{load_config_from, save_config_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub struct ThemeState {
    theme: Theme,
    path: PathBuf,
}

impl ThemeState {
    /// Initialise from the persisted choice at `path`, defaulting to light.
    pub fn load(path: PathBuf) -> Self {
        let theme = load_config_from(&path).theme;
        Self { theme, path }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) -> io::Result<()> {
        self.theme = theme;
        // re-read so profile edits made since startup are not clobbered
        let mut cfg = load_config_from(&self.path);
        cfg.theme = theme;
        save_config_to(&self.path, &cfg)
    }

    pub fn toggle(&mut self) -> io::Result<Theme> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFile, ProfileEntry};

    #[test]
    fn defaults_to_light_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = ThemeState::load(dir.path().join("config.json"));
        assert_eq!(state.theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists_and_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut cfg = ConfigFile::default();
        cfg.profiles.insert(
            "lab".into(),
            ProfileEntry {
                url: "http://lab:8000".into(),
                ..Default::default()
            },
        );
        save_config_to(&path, &cfg).unwrap();

        let mut state = ThemeState::load(path.clone());
        assert_eq!(state.toggle().unwrap(), Theme::Dark);
        let reloaded = ThemeState::load(path.clone());
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert!(load_config_from(&path).profiles.contains_key("lab"));

        state.toggle().unwrap();
        assert_eq!(ThemeState::load(path).theme(), Theme::Light);
    }

    #[test]
    fn serialized_as_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
