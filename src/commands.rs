// Tauri commands invoked by the chrome UI (nav bar + tab strip).
// Each one locks the browser, applies one action and re-broadcasts state.

use tauri::{AppHandle, Emitter, Manager, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::error::{BrowserError, BrowserResult};
use crate::modules::browser::{Browser, BrowserSnapshot, CloseRequest};
use crate::modules::engine::Target;
use crate::modules::navigation::resolve_target;
use crate::modules::tab::TabId;
use crate::state::AppState;
use crate::webview::{self, TauriEngine};

pub const MAIN_WINDOW: &str = "main";
pub const BROWSER_STATE_EVENT: &str = "browser-state";

/// Runs `f` under the browser lock, then pushes the new state to the chrome.
pub fn update<T>(
    app: &AppHandle,
    state: &AppState,
    f: impl FnOnce(&mut Browser<TauriEngine>) -> T,
) -> BrowserResult<T> {
    let (out, snapshot) = {
        let mut browser = state.lock_browser()?;
        let out = f(&mut browser);
        (out, browser.snapshot())
    };
    emit_snapshot(app, &snapshot);
    Ok(out)
}

fn emit_snapshot(app: &AppHandle, snapshot: &BrowserSnapshot) {
    if let Err(e) = app.emit_to(MAIN_WINDOW, BROWSER_STATE_EVENT, snapshot) {
        log::warn!("[Tabs] Failed to emit {}: {}", BROWSER_STATE_EVENT, e);
    }
}

/// Creates a webview for a new tab and opens it at `target`.
pub fn open_tab(app: &AppHandle, target: Target) -> BrowserResult<usize> {
    let state = app.state::<AppState>();
    let window = app
        .get_window(MAIN_WINDOW)
        .ok_or_else(|| BrowserError::WindowMissing(MAIN_WINDOW.to_string()))?;
    let toolbar_height = state.settings()?.toolbar_height;

    let id = state.lock_browser()?.allocate_id();
    // Built outside the lock; the webview may report back while we wait.
    let engine = webview::spawn_content_webview(app, &window, id, toolbar_height)?;
    update(app, &state, |browser| browser.open_tab(id, engine, target))
}

fn prompt_close_last(app: &AppHandle) {
    let handle = app.clone();
    app.dialog()
        .message("This is the last tab. Do you want to close the browser?")
        .title("Close Browser")
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::YesNo)
        .show(move |accepted| {
            let app = handle.clone();
            if let Err(e) = handle.run_on_main_thread(move || finish_close_last(&app, accepted)) {
                log::error!("[Tabs] Failed to schedule last-tab close: {}", e);
            }
        });
}

fn finish_close_last(app: &AppHandle, accepted: bool) {
    let state = app.state::<AppState>();
    match update(app, &state, |browser| browser.confirm_close_last(accepted)) {
        Ok(true) => {
            log::info!("[Tabs] Last tab closed, closing the browser");
            if let Some(window) = app.get_window(MAIN_WINDOW) {
                if let Err(e) = window.close() {
                    log::error!("[Tabs] Failed to close main window: {}", e);
                }
            }
        }
        Ok(false) => log::info!("[Tabs] Keeping the last tab open"),
        Err(e) => log::error!("[Tabs] Failed to close last tab: {}", e),
    }
}

#[tauri::command]
pub fn nav_back(app: AppHandle, state: State<AppState>) -> BrowserResult<bool> {
    update(&app, &state, |browser| browser.back())
}

#[tauri::command]
pub fn nav_forward(app: AppHandle, state: State<AppState>) -> BrowserResult<bool> {
    update(&app, &state, |browser| browser.forward())
}

#[tauri::command]
pub fn nav_reload(app: AppHandle, state: State<AppState>) -> BrowserResult<bool> {
    update(&app, &state, |browser| browser.reload())
}

#[tauri::command]
pub fn nav_home(app: AppHandle, state: State<AppState>) -> BrowserResult<bool> {
    update(&app, &state, |browser| browser.home_page())
}

#[tauri::command]
pub fn submit_address(app: AppHandle, state: State<AppState>, text: String) -> BrowserResult<bool> {
    let settings = state.settings()?;
    update(&app, &state, |browser| browser.submit_address(&text, &settings))?
}

#[tauri::command]
pub fn new_tab(app: AppHandle, state: State<AppState>, url: Option<String>) -> BrowserResult<usize> {
    let settings = state.settings()?;
    let target = resolve_target(url.as_deref(), &settings)?;
    open_tab(&app, target)
}

#[tauri::command]
pub fn close_tab(app: AppHandle, state: State<AppState>, index: usize) -> BrowserResult<()> {
    match update(&app, &state, |browser| browser.request_close(index))? {
        CloseRequest::ConfirmLast => prompt_close_last(&app),
        CloseRequest::Closed(id) => log::debug!("[Tabs] Tab {} closed from the tab strip", id),
        CloseRequest::Ignored => log::debug!("[Tabs] Ignoring close for index {}", index),
    }
    Ok(())
}

#[tauri::command]
pub fn select_tab(app: AppHandle, state: State<AppState>, index: usize) -> BrowserResult<bool> {
    update(&app, &state, |browser| browser.activate(index))
}

#[tauri::command]
pub fn reorder_tabs(
    app: AppHandle,
    state: State<AppState>,
    new_order: Vec<TabId>,
) -> BrowserResult<bool> {
    log::debug!("[Tabs] Reorder requested: {:?}", new_order);
    update(&app, &state, |browser| browser.reorder(&new_order))
}

#[tauri::command]
pub fn get_browser_state(state: State<AppState>) -> BrowserResult<BrowserSnapshot> {
    Ok(state.lock_browser()?.snapshot())
}

#[tauri::command]
pub fn get_stylesheet(state: State<AppState>) -> Option<String> {
    state.stylesheet.clone()
}
