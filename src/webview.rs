// Tauri side of the engine seam: one child webview per tab, laid out under
// the chrome webview that hosts the nav bar and tab strip.

use tauri::webview::{PageLoadEvent, PageLoadPayload};
use tauri::{
    AppHandle, Manager, PhysicalPosition, PhysicalSize, Position, Rect, Size, Url, Webview,
    WebviewBuilder, WebviewUrl, Window, WindowEvent,
};

use crate::commands;
use crate::error::{BrowserError, BrowserResult};
use crate::modules::engine::{EngineEvent, WebEngine};
use crate::modules::tab::TabId;
use crate::state::AppState;

const BLANK_PAGE: &str = "about:blank";
const MIN_CONTENT_HEIGHT: u32 = 100;

pub struct TauriEngine {
    webview: Webview,
}

impl TauriEngine {
    pub fn webview(&self) -> &Webview {
        &self.webview
    }

    fn eval(&self, script: &str) -> BrowserResult<()> {
        self.webview.eval(script).map_err(BrowserError::from)
    }
}

impl WebEngine for TauriEngine {
    fn load(&mut self, url: &Url) -> BrowserResult<()> {
        self.webview.navigate(url.clone()).map_err(BrowserError::from)
    }

    // History lives inside the webview; drive it from script.
    fn back(&mut self) -> BrowserResult<()> {
        self.eval("window.history.back()")
    }

    fn forward(&mut self) -> BrowserResult<()> {
        self.eval("window.history.forward()")
    }

    fn reload(&mut self) -> BrowserResult<()> {
        self.eval("window.location.reload()")
    }

    fn url(&self) -> Option<Url> {
        self.webview.url().ok()
    }

    fn set_visible(&mut self, visible: bool) -> BrowserResult<()> {
        let result = if visible {
            self.webview.show()
        } else {
            self.webview.hide()
        };
        result.map_err(BrowserError::from)
    }

    fn close(&mut self) -> BrowserResult<()> {
        self.webview.close().map_err(BrowserError::from)
    }
}

/// Creates the content webview for tab `id` and wires its notifications
/// back into the browser state.
pub fn spawn_content_webview(
    app: &AppHandle,
    window: &Window,
    id: TabId,
    toolbar_height: f64,
) -> BrowserResult<TauriEngine> {
    let blank = Url::parse(BLANK_PAGE).map_err(|e| BrowserError::invalid_url(BLANK_PAGE, e))?;

    let handle_for_load = app.clone();
    let handle_for_title = app.clone();
    let builder = WebviewBuilder::new(format!("tab-{}", id), WebviewUrl::External(blank))
        .on_page_load(move |_webview, payload| {
            if let Some(event) = page_load_event(&payload) {
                deliver(&handle_for_load, id, event);
            }
        })
        .on_document_title_changed(move |_webview, title| {
            deliver(&handle_for_title, id, EngineEvent::TitleChanged(title));
        });

    let bounds = content_bounds(window, toolbar_height)?;
    let webview = window.add_child(builder, bounds.position, bounds.size)?;
    log::debug!("[Tabs] Created webview '{}'", webview.label());

    Ok(TauriEngine { webview })
}

// The placeholder document every webview starts on is not worth reporting.
fn page_load_event(payload: &PageLoadPayload<'_>) -> Option<EngineEvent> {
    let url = payload.url().clone();
    if url.scheme() == "about" {
        return None;
    }
    Some(match payload.event() {
        PageLoadEvent::Started => EngineEvent::UrlChanged(url),
        PageLoadEvent::Finished => EngineEvent::LoadFinished { ok: true, url },
    })
}

fn deliver(app: &AppHandle, id: TabId, event: EngineEvent) {
    let state = app.state::<AppState>();
    let result = commands::update(app, &state, |browser| browser.deliver(id, event));
    if let Err(e) = result {
        log::error!("[Tabs] Failed to deliver engine event for tab {}: {}", id, e);
    }
}

/// Keeps every tab's webview filling the area below the toolbar.
pub fn watch_resizes(app: &AppHandle, window: &Window) {
    let handle = app.clone();
    let window_clone = window.clone();
    window.on_window_event(move |event| {
        if let WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } = event {
            if let Err(e) = layout_tabs(&handle, &window_clone) {
                log::warn!("[Tabs] Failed to lay out tabs: {}", e);
            }
        }
    });
}

fn layout_tabs(app: &AppHandle, window: &Window) -> BrowserResult<()> {
    let state = app.state::<AppState>();
    let toolbar_height = state.settings()?.toolbar_height;
    let bounds = content_bounds(window, toolbar_height)?;

    let browser = state.lock_browser()?;
    for tab in browser.tabs() {
        tab.engine().webview().set_bounds(bounds)?;
    }
    Ok(())
}

fn content_bounds(window: &Window, toolbar_height: f64) -> BrowserResult<Rect> {
    let physical_size = window.inner_size()?;
    let scale_factor = window.scale_factor()?;
    let (y, width, height) = content_area(
        physical_size.width,
        physical_size.height,
        scale_factor,
        toolbar_height,
    );
    Ok(Rect {
        position: Position::Physical(PhysicalPosition::new(0, y)),
        size: Size::Physical(PhysicalSize::new(width, height)),
    })
}

/// Physical `(y, width, height)` of the content area for a window of the
/// given physical size.
fn content_area(width: u32, height: u32, scale_factor: f64, toolbar_height: f64) -> (i32, u32, u32) {
    let toolbar_physical = (toolbar_height * scale_factor) as u32;
    let content_height = height.saturating_sub(toolbar_physical).max(MIN_CONTENT_HEIGHT);
    (toolbar_physical as i32, width, content_height)
}
