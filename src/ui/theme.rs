//! HUD theme: shared colors and sizes
//!
//! Dark glassy panels over the 3D view, cyan accent in simulation, white in
//! design.

use macroquad::color::Color;

// =============================================================================
// Panels
// =============================================================================

/// Translucent panel background
pub const PANEL_BG: Color = Color::new(0.0, 0.0, 0.0, 0.6);

/// Lighter panel background (mode switcher, hint strip)
pub const PANEL_BG_LIGHT: Color = Color::new(0.0, 0.0, 0.0, 0.4);

/// Hairline border
pub const PANEL_BORDER: Color = Color::new(1.0, 1.0, 1.0, 0.1);

/// Hover wash
pub const HOVER_BG: Color = Color::new(1.0, 1.0, 1.0, 0.1);

/// Modal backdrop
pub const SCRIM: Color = Color::new(0.0, 0.0, 0.0, 0.55);

// =============================================================================
// Text
// =============================================================================

pub const TEXT_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const TEXT_MUTED: Color = Color::new(1.0, 1.0, 1.0, 0.7);
pub const TEXT_DIM: Color = Color::new(1.0, 1.0, 1.0, 0.5);
pub const TEXT_FAINT: Color = Color::new(1.0, 1.0, 1.0, 0.3);
/// Text on a bright button
pub const TEXT_ON_ACCENT: Color = Color::new(0.0, 0.0, 0.0, 1.0);

// =============================================================================
// Accents
// =============================================================================

/// cyan-500: active simulation mode
pub const ACCENT_SIM: Color = Color::new(0.024, 0.714, 0.831, 1.0);

/// cyan-400: title dot
pub const ACCENT_DOT: Color = Color::new(0.133, 0.827, 0.933, 1.0);

/// Active design mode and selected camera view
pub const ACCENT_DESIGN: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// green-500 at 20% with green-300 text: snap on
pub const SNAP_BG: Color = Color::new(0.133, 0.773, 0.369, 0.2);
pub const SNAP_TEXT: Color = Color::new(0.525, 0.937, 0.675, 1.0);

/// red-500 at 20% with red-200 text: destructive buttons
pub const DANGER_BG: Color = Color::new(0.937, 0.267, 0.267, 0.2);
pub const DANGER_TEXT: Color = Color::new(0.996, 0.792, 0.792, 1.0);

/// blue-900 at 50% with blue-200 text: rain on
pub const RAIN_BG: Color = Color::new(0.118, 0.227, 0.541, 0.5);
pub const RAIN_TEXT: Color = Color::new(0.749, 0.859, 0.996, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

pub const FONT_SIZE_TITLE: f32 = 36.0;
pub const FONT_SIZE_BUTTON: f32 = 14.0;
pub const FONT_SIZE_SMALL: f32 = 12.0;
pub const FONT_SIZE_TINY: f32 = 11.0;
