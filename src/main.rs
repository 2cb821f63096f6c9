// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! SplitMark - Main Entry Point
//!
//! A single-window markdown editor with a document list, live preview and
//! full-text search. Built with Rust and egui.

mod app;
mod config;
mod documents;
mod error;
mod files;
mod markdown;
mod reorder;
mod search;
mod state;
mod storage;
mod theme;
mod ui;

use app::SplitMarkApp;
use config::load_settings;
use log::{info, warn};
use storage::{FileStore, KeyValueStore, MemoryStore};
use ui::APP_NAME;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    match FileStore::open_default() {
        Ok(store) => {
            info!("Storing data in {}", store.root().display());
            run(store)
        }
        Err(e) => {
            warn!("{}. Changes will not be kept after exit.", e);
            run(MemoryStore::new())
        }
    }
}

fn run<S>(store: S) -> eframe::Result<()>
where
    S: KeyValueStore + Clone + 'static,
{
    // Load settings to get window configuration
    let settings = load_settings(&store);
    let window_size = &settings.window_size;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([640.0, 400.0]);

    // Apply position if saved
    if let (Some(x), Some(y)) = (window_size.x, window_size.y) {
        viewport = viewport.with_position([x, y]);
    }

    // Apply maximized state
    if window_size.maximized {
        viewport = viewport.with_maximized(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        // Report OS theme changes; the app reapplies its own visuals on top
        follow_system_theme: true,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(SplitMarkApp::new(cc, store)))),
    )
}
