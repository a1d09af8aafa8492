//! Immediate-mode UI for the HUD
//!
//! Design principles:
//! - Immediate mode (no retained state, rebuilt each frame)
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering

mod actions;
mod hud;
mod input;
mod rect;
pub mod theme;
mod widgets;

pub use actions::*;
pub use hud::{draw_hud, HudCommand, HudLayout, HudState};
pub use input::*;
pub use rect::*;
pub use widgets::draw_tooltip;
