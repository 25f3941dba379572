// Window model - pure logic, no Tauri imports.
// Owns the ordered tabs, the active-tab index and the address-bar text, and
// routes every nav-bar action to whichever tab is active at call time.

use serde::Serialize;
use std::collections::HashMap;

use super::engine::{EngineEvent, Target, WebEngine};
use super::navigation::{parse_destination, resolve_input, Destination, HomePage};
use super::tab::{Tab, TabId, TabNotice};
use crate::error::BrowserResult;
use crate::settings::Settings;

/// Outcome of a close request from the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    Closed(TabId),
    /// Closing the last tab closes the browser, so the user must agree first.
    ConfirmLast,
    Ignored,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabSummary {
    pub id: TabId,
    pub title: String,
    pub address: String,
}

/// Everything the chrome UI renders.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSnapshot {
    pub tabs: Vec<TabSummary>,
    pub active_index: Option<usize>,
    pub address: String,
}

pub struct Browser<E> {
    tabs: Vec<Tab<E>>,
    active: Option<usize>,
    address: String,
    home: HomePage,
    next_id: TabId,
}

impl<E: WebEngine> Browser<E> {
    pub fn new(home: HomePage) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            address: String::new(),
            home,
            next_id: 1,
        }
    }

    pub fn home(&self) -> &HomePage {
        &self.home
    }

    pub fn tabs(&self) -> &[Tab<E>] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab<E>> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == id)
    }

    /// Reserves an id before the engine exists, so engine callbacks can be
    /// wired to the tab they belong to.
    pub fn allocate_id(&mut self) -> TabId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends a tab, points it at `target` and makes it active.
    pub fn open_tab(&mut self, id: TabId, engine: E, target: Target) -> usize {
        self.tabs.push(Tab::new(id, engine, self.home.clone()));
        let index = self.tabs.len() - 1;

        let tab = &mut self.tabs[index];
        let notices = match target {
            Target::Home => tab.navigate_home(),
            Target::Url(url) => tab.load(&url),
        };
        self.apply_notices(index, notices);

        self.activate(index);
        log::info!("[Tabs] Opened tab {} at index {}", id, index);
        index
    }

    /// Makes the tab at `index` active and refreshes the address bar from it.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }

        if let Some(previous) = self.active.filter(|&p| p != index) {
            if let Some(tab) = self.tabs.get_mut(previous) {
                if let Err(e) = tab.engine_mut().set_visible(false) {
                    log::warn!("[Tabs] Failed to hide tab {}: {}", tab.id(), e);
                }
            }
        }

        let tab = &mut self.tabs[index];
        if let Err(e) = tab.engine_mut().set_visible(true) {
            log::warn!("[Tabs] Failed to show tab {}: {}", tab.id(), e);
        }
        self.address = tab.display_address();
        self.active = Some(index);
        true
    }

    pub fn back(&mut self) -> bool {
        self.with_active_engine("back", |e| e.back())
    }

    pub fn forward(&mut self) -> bool {
        self.with_active_engine("forward", |e| e.forward())
    }

    pub fn reload(&mut self) -> bool {
        self.with_active_engine("reload", |e| e.reload())
    }

    pub fn home_page(&mut self) -> bool {
        let Some(index) = self.active else {
            return false;
        };
        let notices = self.tabs[index].navigate_home();
        self.apply_notices(index, notices);
        true
    }

    /// Handles Enter / Go in the address bar. `Ok(false)` when no tab is active.
    pub fn submit_address(&mut self, text: &str, settings: &Settings) -> BrowserResult<bool> {
        let Some(index) = self.active else {
            return Ok(false);
        };
        self.address = text.to_string();

        let notices = match resolve_input(text, settings) {
            Destination::Home => self.tabs[index].navigate_home(),
            Destination::Direct(raw) | Destination::Search(raw) => {
                let url = parse_destination(&raw).map_err(|e| {
                    log::warn!("[Nav] {}", e);
                    e
                })?;
                log::info!("[Nav] Global navigating to: {}", url);
                self.tabs[index].load(&url)
            }
        };
        self.apply_notices(index, notices);
        Ok(true)
    }

    /// Routes an engine notification to its tab. Notifications from tabs
    /// that have been closed are dropped.
    pub fn deliver(&mut self, id: TabId, event: EngineEvent) -> bool {
        let Some(index) = self.position(id) else {
            log::debug!("[Tabs] Dropping {:?} for closed tab {}", event, id);
            return false;
        };
        let notices = self.tabs[index].on_engine_event(event);
        self.apply_notices(index, notices);
        true
    }

    pub fn request_close(&mut self, index: usize) -> CloseRequest {
        if index >= self.tabs.len() {
            return CloseRequest::Ignored;
        }
        if self.tabs.len() == 1 {
            return CloseRequest::ConfirmLast;
        }

        let id = self.remove(index);
        match self.active {
            Some(active) if active == index => {
                self.active = None;
                self.activate(index.min(self.tabs.len() - 1));
            }
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }
        CloseRequest::Closed(id)
    }

    /// Answer to the last-tab prompt. Returns true when the last tab was
    /// closed and the window should go with it.
    pub fn confirm_close_last(&mut self, accepted: bool) -> bool {
        if !accepted || self.tabs.len() != 1 {
            return false;
        }
        self.remove(0);
        self.active = None;
        self.address.clear();
        true
    }

    /// Rebuilds the tab order from the ids the tab strip reports after a drag.
    /// Returns true if the order changed. The active tab stays the same tab.
    ///
    /// Algorithm:
    /// 1. Map existing tabs by ID for O(1) lookup
    /// 2. Rebuild vector based on new_order
    /// 3. Append any missing tabs (prevents losing tabs on racing updates)
    pub fn reorder(&mut self, new_order: &[TabId]) -> bool {
        if self.tabs.is_empty() || new_order.is_empty() {
            return false;
        }

        let old_order: Vec<TabId> = self.tabs.iter().map(|t| t.id()).collect();
        let active_id = self.active_tab().map(|t| t.id());

        let mut tab_map: HashMap<TabId, Tab<E>> =
            self.tabs.drain(..).map(|t| (t.id(), t)).collect();

        let mut reordered = Vec::with_capacity(old_order.len());
        for id in new_order {
            if let Some(tab) = tab_map.remove(id) {
                reordered.push(tab);
            }
        }
        // Leftovers keep their previous relative order.
        for id in &old_order {
            if let Some(tab) = tab_map.remove(id) {
                reordered.push(tab);
            }
        }

        self.tabs = reordered;
        self.active = active_id.and_then(|id| self.position(id));

        let new_order_actual: Vec<TabId> = self.tabs.iter().map(|t| t.id()).collect();
        old_order != new_order_actual
    }

    pub fn snapshot(&self) -> BrowserSnapshot {
        BrowserSnapshot {
            tabs: self
                .tabs
                .iter()
                .map(|t| TabSummary {
                    id: t.id(),
                    title: t.title().to_string(),
                    address: t.display_address(),
                })
                .collect(),
            active_index: self.active,
            address: self.address.clone(),
        }
    }

    fn remove(&mut self, index: usize) -> TabId {
        let mut tab = self.tabs.remove(index);
        if let Err(e) = tab.engine_mut().close() {
            log::warn!("[Tabs] Failed to release tab {}: {}", tab.id(), e);
        }
        log::info!("[Tabs] Closed tab {} at index {}", tab.id(), index);
        tab.id()
    }

    fn with_active_engine(
        &mut self,
        action: &str,
        op: impl FnOnce(&mut E) -> BrowserResult<()>,
    ) -> bool {
        let Some(tab) = self.active.and_then(|i| self.tabs.get_mut(i)) else {
            return false;
        };
        if let Err(e) = op(tab.engine_mut()) {
            log::warn!("[Nav] {} failed on tab {}: {}", action, tab.id(), e);
        }
        true
    }

    // The active check happens here, at delivery, not when the engine fired.
    fn apply_notices(&mut self, index: usize, notices: Vec<TabNotice>) {
        if self.active != Some(index) {
            return;
        }
        for notice in notices {
            if let TabNotice::UrlChanged(url) = notice {
                self.address = self.home.display(Some(&url));
            }
        }
    }
}
