// Shared state managed by Tauri.
// Commands and webview callbacks all go through the single browser lock.

use std::sync::{Mutex, MutexGuard, RwLock};

use crate::error::{BrowserError, BrowserResult};
use crate::modules::browser::Browser;
use crate::modules::navigation::HomePage;
use crate::settings::Settings;
use crate::webview::TauriEngine;

pub struct AppState {
    pub browser: Mutex<Browser<TauriEngine>>,
    pub settings: RwLock<Settings>,
    /// Read once at startup; `None` leaves the chrome unstyled.
    pub stylesheet: Option<String>,
}

impl AppState {
    pub fn new(home: HomePage, settings: Settings, stylesheet: Option<String>) -> Self {
        Self {
            browser: Mutex::new(Browser::new(home)),
            settings: RwLock::new(settings),
            stylesheet,
        }
    }

    pub fn lock_browser(&self) -> BrowserResult<MutexGuard<'_, Browser<TauriEngine>>> {
        self.browser.lock().map_err(|_| BrowserError::Poisoned)
    }

    pub fn settings(&self) -> BrowserResult<Settings> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|_| BrowserError::Poisoned)
    }
}
