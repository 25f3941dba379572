// Monkey-Point library entry point.
// Exposes all modules so they can be used by main.rs and tested independently.

use tauri::{AppHandle, Manager};

pub mod commands;
pub mod error;
pub mod settings;
pub mod state;
pub mod stylesheet;
pub mod webview;

// Pure logic modules (no Tauri imports)
pub mod modules;

use crate::commands::MAIN_WINDOW;
use crate::error::{BrowserError, BrowserResult};
use crate::modules::engine::Target;
use crate::modules::navigation::{launch_argument, resolve_target, HomePage};
use crate::settings::Settings;
use crate::state::AppState;

const ASSETS_DIR: &str = "assets";
const HOME_PAGE_FILE: &str = "welcome.html";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let log_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, argv, _cwd| {
            open_from_second_instance(app, &argv);
        }))
        .plugin(tauri_plugin_log::Builder::default().level(log_level).build())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            setup(app.handle())?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::nav_back,
            commands::nav_forward,
            commands::nav_reload,
            commands::nav_home,
            commands::submit_address,
            commands::new_tab,
            commands::close_tab,
            commands::select_tab,
            commands::reorder_tabs,
            commands::get_browser_state,
            commands::get_stylesheet,
        ])
        .build(tauri::generate_context!());

    let code = match app {
        Ok(app) => app.run_return(|_app, _event| {}),
        Err(e) => {
            eprintln!("Failed to start Monkey-Point: {}", e);
            1
        }
    };
    std::process::exit(code);
}

fn setup(app: &AppHandle) -> BrowserResult<()> {
    let settings = Settings::load(app);

    let assets = app.path().resource_dir()?.join(ASSETS_DIR);
    let home = HomePage::from_path(assets.join(HOME_PAGE_FILE))?;
    log::info!("[Tabs] Home page at {:?}", home.path());
    let stylesheet = stylesheet::load(&assets.join(stylesheet::STYLESHEET_FILE));

    let window = app
        .get_window(MAIN_WINDOW)
        .ok_or_else(|| BrowserError::WindowMissing(MAIN_WINDOW.to_string()))?;
    window.set_fullscreen(settings.fullscreen)?;

    let args: Vec<String> = std::env::args().collect();
    let initial = launch_target(launch_argument(&args), &settings);

    app.manage(AppState::new(home, settings, stylesheet));
    webview::watch_resizes(app, &window);
    commands::open_tab(app, initial)?;
    Ok(())
}

// A bad argument should not keep the browser from starting.
fn launch_target(arg: Option<&str>, settings: &Settings) -> Target {
    resolve_target(arg, settings).unwrap_or_else(|e| {
        log::warn!("[Nav] Ignoring launch argument: {}", e);
        Target::Home
    })
}

fn open_from_second_instance(app: &AppHandle, argv: &[String]) {
    if let Some(window) = app.get_window(MAIN_WINDOW) {
        let _ = window.set_focus();
    }
    let Some(arg) = launch_argument(argv) else {
        return;
    };

    let settings = match app.state::<AppState>().settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("[Tabs] {}", e);
            return;
        }
    };
    let target = launch_target(Some(arg), &settings);
    if let Err(e) = commands::open_tab(app, target) {
        log::error!("[Tabs] Failed to open tab for second instance: {}", e);
    }
}
