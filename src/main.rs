//! INVISIBLE RUNNER: a floating island toy
//!
//! An articulated runner jogs in place on a slowly spinning island. Switch to
//! plan & design mode to decorate the island with props; the layout is saved
//! between sessions.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod camera;
mod editor;
mod math;
mod render;
mod runner;
mod scene;
mod storage;
mod ui;
mod world;

use app::AppState;
use macroquad::conf::Conf;
use macroquad::logging::info;
use macroquad::prelude::*;
use render::{DRAW_CALL_INDEX_CAPACITY, DRAW_CALL_VERTEX_CAPACITY};
use storage::Storage;

fn window_conf() -> Conf {
    Conf {
        miniquad_conf: macroquad::miniquad::conf::Conf {
            window_title: format!("Invisible Runner v{}", VERSION),
            window_width: 1280,
            window_height: 800,
            window_resizable: true,
            high_dpi: true,
            sample_count: 4,
            ..Default::default()
        },
        // Mesh batches submit whole chunks per draw call
        draw_call_vertex_capacity: DRAW_CALL_VERTEX_CAPACITY,
        draw_call_index_capacity: DRAW_CALL_INDEX_CAPACITY,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    // Seed object ids and scenery from the clock
    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    rand::srand(seed);

    info!("Invisible Runner v{}", VERSION);
    let storage = Storage::new();
    info!("Scene storage: {}", storage.describe());

    let mut app = AppState::new(storage, seed as u32);

    loop {
        app.frame();
        next_frame().await;
    }
}
