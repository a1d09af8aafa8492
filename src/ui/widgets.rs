//! Basic UI widgets

use super::{theme, Rect, UiContext};
use macroquad::prelude::*;

/// Which way a toolbar grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Simple toolbar layout helper
///
/// Hands out consecutive slots along one axis. Layout only, so the same
/// rects can be used for hit-testing before anything is drawn.
#[derive(Debug, Clone)]
pub struct Toolbar {
    origin: Rect,
    axis: Axis,
    cursor: f32,
    spacing: f32,
}

impl Toolbar {
    /// Row starting at (x, y) with fixed height `h`
    pub fn horizontal(x: f32, y: f32, h: f32, spacing: f32) -> Self {
        Self {
            origin: Rect::new(x, y, 0.0, h),
            axis: Axis::Horizontal,
            cursor: x,
            spacing,
        }
    }

    /// Column starting at (x, y) with fixed width `w`
    pub fn vertical(x: f32, y: f32, w: f32, spacing: f32) -> Self {
        Self {
            origin: Rect::new(x, y, w, 0.0),
            axis: Axis::Vertical,
            cursor: y,
            spacing,
        }
    }

    /// Next slot of the given length along the axis
    pub fn next(&mut self, length: f32) -> Rect {
        let rect = match self.axis {
            Axis::Horizontal => Rect::new(self.cursor, self.origin.y, length, self.origin.h),
            Axis::Vertical => Rect::new(self.origin.x, self.cursor, self.origin.w, length),
        };
        self.cursor += length + self.spacing;
        rect
    }

    /// Reserve a divider; returns its line as a zero-thickness rect
    pub fn separator(&mut self) -> Rect {
        self.cursor += self.spacing;
        let line = match self.axis {
            Axis::Horizontal => Rect::new(self.cursor, self.origin.y + 4.0, 0.0, self.origin.h - 8.0),
            Axis::Vertical => Rect::new(self.origin.x + 4.0, self.cursor, self.origin.w - 8.0, 0.0),
        };
        self.cursor += self.spacing * 2.0;
        line
    }

    /// Length used so far, without the trailing gap
    pub fn extent(&self) -> f32 {
        let start = match self.axis {
            Axis::Horizontal => self.origin.x,
            Axis::Vertical => self.origin.y,
        };
        (self.cursor - self.spacing - start).max(0.0)
    }

    /// Total length of `lengths` laid out with `spacing` between them
    pub fn measure(lengths: &[f32], spacing: f32) -> f32 {
        let gaps = lengths.len().saturating_sub(1) as f32;
        lengths.iter().sum::<f32>() + gaps * spacing
    }
}

/// Fill, text and optional border of a button in one state
#[derive(Debug, Clone, Copy)]
pub struct ButtonLook {
    pub fill: Color,
    pub text: Color,
    pub border: Option<Color>,
}

impl ButtonLook {
    /// Transparent until hovered
    pub const FLAT: ButtonLook = ButtonLook {
        fill: Color::new(0.0, 0.0, 0.0, 0.0),
        text: theme::TEXT_MUTED,
        border: None,
    };

    pub const fn filled(fill: Color, text: Color) -> Self {
        Self { fill, text, border: None }
    }

    pub const fn outlined(fill: Color, text: Color, border: Color) -> Self {
        Self { fill, text, border: Some(border) }
    }
}

/// Draw a rounded text button, returns true if clicked
pub fn text_button(
    ctx: &mut UiContext,
    rect: Rect,
    label: &str,
    look: ButtonLook,
    enabled: bool,
    tooltip: &str,
) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    if hovered && !tooltip.is_empty() {
        ctx.set_tooltip(tooltip, ctx.mouse.x, ctx.mouse.y);
    }

    let radius = (rect.h * 0.25).min(8.0);
    if look.fill.a > 0.0 {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, radius, look.fill);
    }
    if enabled && hovered {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, radius, theme::HOVER_BG);
    }
    if let Some(border) = look.border {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);
    }

    let mut text = look.text;
    if !enabled {
        text.a *= 0.3;
    }
    draw_text_centered(label, &rect, theme::FONT_SIZE_BUTTON, text);

    enabled && ctx.mouse.clicked(&rect)
}

/// Palette tile: color swatch above a caption
pub fn swatch_button(ctx: &UiContext, rect: Rect, label: &str, swatch: Color, active: bool) -> bool {
    let hovered = ctx.mouse.inside(&rect);

    if active {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 8.0, WHITE);
    } else if hovered {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 8.0, theme::HOVER_BG);
    }

    let dot = 28.0;
    let cx = rect.center_x();
    let cy = rect.y + rect.h * 0.4;
    draw_rounded_rect(cx - dot * 0.5, cy - dot * 0.5, dot, dot, 6.0, swatch);
    if active {
        draw_rectangle_lines(cx - dot * 0.5, cy - dot * 0.5, dot, dot, 1.0, Color::new(0.0, 0.0, 0.0, 0.2));
    }

    let caption = if active { theme::TEXT_ON_ACCENT } else { theme::TEXT_DIM };
    let label_rect = Rect::new(rect.x, rect.bottom() - 22.0, rect.w, 16.0);
    draw_text_centered(label, &label_rect, theme::FONT_SIZE_TINY, caption);

    ctx.mouse.clicked(&rect)
}

/// Draw text centered in a rect
pub fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    // Round to integer pixels for crisp rendering
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.center_y() + dims.offset_y * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Draw text with its right edge at `right`
pub fn draw_text_right(text: &str, right: f32, baseline: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (right - dims.width).round(), baseline.round(), font_size, color);
}

/// Draw the frame's tooltip near the cursor, kept on screen
pub fn draw_tooltip(ctx: &UiContext) {
    let Some((text, mx, my)) = ctx.tooltip() else {
        return;
    };
    let dims = measure_text(text, None, theme::FONT_SIZE_SMALL as u16, 1.0);
    let w = dims.width + 12.0;
    let h = 22.0;
    let x = (mx - w - 8.0).max(4.0);
    let y = (my - h * 0.5).clamp(4.0, (screen_height() - h - 4.0).max(4.0));
    draw_rounded_rect(x, y, w, h, 4.0, theme::PANEL_BG);
    draw_text_centered(text, &Rect::new(x, y, w, h), theme::FONT_SIZE_SMALL, theme::TEXT_COLOR);
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w * 0.5).min(h * 0.5);
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, r, h - r * 2.0, color);
    draw_rectangle(x + w - r, y + r, r, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}
