// Seam between the window model and the embedded web engine.
// The production implementor lives in crate::webview; tests use the fake below.

use url::Url;

use crate::error::BrowserResult;

/// The operations a tab needs from its engine instance.
pub trait WebEngine {
    fn load(&mut self, url: &Url) -> BrowserResult<()>;
    fn back(&mut self) -> BrowserResult<()>;
    fn forward(&mut self) -> BrowserResult<()>;
    fn reload(&mut self) -> BrowserResult<()>;
    /// What the engine currently reports as its location, if anything.
    fn url(&self) -> Option<Url>;
    fn set_visible(&mut self, visible: bool) -> BrowserResult<()>;
    /// Releases the engine. Later notifications from it are ignored.
    fn close(&mut self) -> BrowserResult<()>;
}

/// Raw notifications coming out of an engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UrlChanged(Url),
    TitleChanged(String),
    LoadFinished { ok: bool, url: Url },
}

/// Initial destination of a freshly opened tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Home,
    Url(Url),
}
