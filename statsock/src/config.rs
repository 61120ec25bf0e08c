//! Persistent client config: saved dashboard profiles and the theme.
//! Stored as JSON under $XDG_CONFIG_HOME/statsock/config.json (fallback: the
//! platform config dir from dirs-next).

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    /// Dashboard address or explicit stream URL.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("statsock")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("statsock")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Missing or unreadable files yield the defaults.
pub fn load_config_from(path: &Path) -> ConfigFile {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config {}: {e}", path.display());
            ConfigFile::default()
        }),
        Err(_) => ConfigFile::default(),
    }
}

pub fn save_config_to(path: &Path, cfg: &ConfigFile) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(cfg).map_err(io::Error::other)?;
    fs::write(path, data)
}

pub fn load_config() -> ConfigFile {
    load_config_from(&config_path())
}

pub fn save_config(cfg: &ConfigFile) -> io::Result<()> {
    save_config_to(&config_path(), cfg)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveProfile {
    /// Use the runtime inputs as given (the caller may persist them).
    Direct(ProfileEntry),
    /// Taken from an existing profile.
    Loaded(ProfileEntry),
    /// Ask the user to pick one of these profile names.
    PromptSelect(Vec<String>),
    /// Ask the user for the details of a new profile with this name.
    PromptCreate(String),
    /// Nothing given and nothing saved.
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub tls_ca: Option<String>,
    pub history: Option<usize>,
}

impl ProfileRequest {
    pub fn resolve(self, cfg: &ConfigFile) -> ResolveProfile {
        match (self.profile_name, self.url) {
            (Some(name), None) => match cfg.profiles.get(&name) {
                Some(entry) => {
                    let mut entry = entry.clone();
                    // runtime flags win over the saved values
                    if self.tls_ca.is_some() {
                        entry.tls_ca = self.tls_ca;
                    }
                    if self.history.is_some() {
                        entry.history = self.history;
                    }
                    ResolveProfile::Loaded(entry)
                }
                None => ResolveProfile::PromptCreate(name),
            },
            (_, Some(url)) => ResolveProfile::Direct(ProfileEntry {
                url,
                tls_ca: self.tls_ca,
                history: self.history,
            }),
            (None, None) if cfg.profiles.is_empty() => ResolveProfile::None,
            (None, None) => ResolveProfile::PromptSelect(cfg.profiles.keys().cloned().collect()),
        }
    }
}
