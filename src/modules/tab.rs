// A single browser tab: one engine instance plus the state the window
// needs to label it and to fill the address bar when it becomes active.

use url::Url;

use super::engine::{EngineEvent, WebEngine};
use super::navigation::{HomePage, HOME_TITLE};

pub type TabId = u64;

const LOADING_TITLE: &str = "Loading...";
const UNTITLED: &str = "New Tab";

/// What a tab republishes to the window after handling an engine event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabNotice {
    UrlChanged(Url),
    TitleChanged(String),
}

pub struct Tab<E> {
    id: TabId,
    engine: E,
    home: HomePage,
    title: String,
    url: Option<Url>,
}

impl<E: WebEngine> Tab<E> {
    pub fn new(id: TabId, engine: E, home: HomePage) -> Self {
        Self {
            id,
            engine,
            home,
            title: LOADING_TITLE.to_string(),
            url: None,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Label for the tab strip.
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Last location reported by or requested from the engine.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn is_home(&self) -> bool {
        self.url.as_ref().is_some_and(|u| self.home.matches(u))
    }

    /// Address-bar text for this tab.
    pub fn display_address(&self) -> String {
        self.home.display(self.url.as_ref())
    }

    pub fn navigate_home(&mut self) -> Vec<TabNotice> {
        let home = self.home.url().clone();
        self.load(&home)
    }

    /// Hands `url` to the engine. On refusal the tab falls back to whatever
    /// the engine still reports as current.
    pub fn load(&mut self, url: &Url) -> Vec<TabNotice> {
        match self.engine.load(url) {
            Ok(()) => self.on_url_changed(url.clone()),
            Err(e) => {
                log::warn!("[Tabs] Tab {} failed to load {}: {}", self.id, url, e);
                match self.engine.url() {
                    Some(current) => self.on_url_changed(current),
                    None => Vec::new(),
                }
            }
        }
    }

    pub fn on_engine_event(&mut self, event: EngineEvent) -> Vec<TabNotice> {
        match event {
            EngineEvent::UrlChanged(url) => self.on_url_changed(url),
            EngineEvent::TitleChanged(title) => {
                let title = if self.is_home() {
                    HOME_TITLE.to_string()
                } else {
                    title
                };
                self.title = title.clone();
                vec![TabNotice::TitleChanged(title)]
            }
            EngineEvent::LoadFinished { ok, url } => {
                if ok {
                    log::info!("[Tabs] Page loaded successfully: {}", url);
                } else {
                    log::warn!("[Tabs] Error loading page: {}", url);
                }
                self.on_url_changed(url)
            }
        }
    }

    fn on_url_changed(&mut self, url: Url) -> Vec<TabNotice> {
        let is_home = self.home.matches(&url);
        self.url = Some(url.clone());

        let mut notices = vec![TabNotice::UrlChanged(url)];
        if is_home {
            self.title = HOME_TITLE.to_string();
            notices.push(TabNotice::TitleChanged(HOME_TITLE.to_string()));
        }
        notices
    }
}
