//! Coin Runner: a 2D side-scrolling platformer
//!
//! Run right, jump between platforms, grab coins and reach the flag:
//! - Patrol enemies (steady red, pausing purple, fast pink)
//! - Coyote-time jumping and eased camera follow
//! - Particle bursts, screen shake and chip-style sound effects
//! - Three themed levels embedded at build time

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod assets;
mod audio;
mod config;
mod game;
mod input;
mod ui;

use macroquad::prelude::*;
use app::App;
use assets::Assets;
use audio::SfxEngine;
use config::{GameConfig, CONFIG_PATH};
use game::LevelCatalog;
use input::InputState;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Coin Runner v{}", VERSION),
        window_width: 1000,
        window_height: 500,
        window_resizable: true,
        high_dpi: true,
        // Start windowed on all platforms (WASM: browser handles sizing)
        #[cfg(not(target_arch = "wasm32"))]
        fullscreen: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load_or_default(CONFIG_PATH).await;

    let catalog = match LevelCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Built-in levels are invalid: {}", e);
            return;
        }
    };
    log::info!("Loaded {} levels", catalog.len());

    let assets = Assets::load(&config.assets).await;
    let audio = SfxEngine::new(config.audio.volume, config.audio.muted);

    let seed = config
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64);
    log::info!("RNG seed {}", seed);
    macroquad::rand::srand(seed);

    let mut app = App::new(&config, catalog, assets, Box::new(audio), seed);
    let mut input = InputState::new();
    if input.has_gamepad() {
        log::info!("Gamepad detected");
    }

    log::info!("=== Coin Runner v{} ===", VERSION);

    loop {
        let frame = input.sample();
        app.frame(frame, get_frame_time() as f64);

        clear_background(BLACK);
        app.draw(screen_width(), screen_height(), get_fps());

        next_frame().await;
    }
}
