use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tauri::AppHandle;
use tauri::Manager;

use crate::error::BrowserResult;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SearchEngine {
    DuckDuckGo,
    Google,
    Bing,
    Brave,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::DuckDuckGo
    }
}

impl SearchEngine {
    pub fn query_url(&self, query: &str) -> String {
        let q = urlencoding::encode(query);
        match self {
            Self::DuckDuckGo => format!("https://duckduckgo.com/?q={}", q),
            Self::Google => format!("https://google.com/search?q={}", q),
            Self::Bing => format!("https://bing.com/search?q={}", q),
            Self::Brave => format!("https://search.brave.com/search?q={}", q),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub search_engine: SearchEngine,
    pub fullscreen: bool,
    /// Logical height reserved for the nav bar and tab strip.
    pub toolbar_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_engine: SearchEngine::default(),
            fullscreen: true,
            toolbar_height: 84.0,
        }
    }
}

impl Settings {
    pub fn get_path(app: &AppHandle) -> Option<PathBuf> {
        app.path()
            .app_config_dir()
            .ok()
            .map(|dir| dir.join(SETTINGS_FILE))
    }

    /// Loads settings, falling back to defaults when the file is absent or bad.
    pub fn load(app: &AppHandle) -> Self {
        let Some(path) = Self::get_path(app) else {
            log::warn!("[Settings] No config dir available, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(settings)) => {
                log::info!("[Settings] Loaded {:?}", path);
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("[Settings] Failed to load {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// `Ok(None)` when there is no file at `path`.
    pub fn load_from(path: &Path) -> BrowserResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
