//! Heads-up display over the 3D view
//!
//! Layout is computed up front (`HudLayout`) so the app can tell whether the
//! pointer is over the HUD before routing it to the scene. Drawing returns the
//! commands clicked this frame; button commands are action ids so the HUD and
//! the keyboard go through the same dispatch.

use super::widgets::{draw_rounded_rect, draw_text_centered, draw_text_right, swatch_button, text_button, ButtonLook, Toolbar};
use super::{theme, ActionContext, ActionRegistry, Rect, UiContext};
use crate::camera::CameraView;
use crate::editor::{Mode, TOOL_ACTIONS};
use crate::scene::PropKind;
use crate::world::Weather;
use macroquad::prelude::*;

const MARGIN: f32 = 24.0;
const MODE_BUTTON_W: f32 = 140.0;
const MODE_BUTTON_H: f32 = 36.0;
const PILL_PAD: f32 = 4.0;
const VIEW_BUTTON: f32 = 40.0;
const VIEW_GAP: f32 = 8.0;
const TOOL_W: f32 = 72.0;
const TOOL_H: f32 = 80.0;
const TOOL_GAP: f32 = 8.0;
const PALETTE_PAD: f32 = 12.0;
const BAR_H: f32 = 30.0;
const BAR_GAP: f32 = 8.0;
const HINTS_H: f32 = 28.0;
const MODAL_W: f32 = 440.0;
const MODAL_H: f32 = 170.0;

pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the entire scene?";
pub const CLEAR_WARNING: &str = "This cannot be undone.";

/// Something the user clicked in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudCommand {
    SetMode(Mode),
    SetView(CameraView),
    /// A registered action, dispatched like its shortcut
    Action(&'static str),
}

/// Everything the HUD displays
#[derive(Debug, Clone, Copy)]
pub struct HudState {
    pub mode: Mode,
    pub view: CameraView,
    pub weather: Weather,
    pub tool: PropKind,
    pub snap: bool,
    pub has_selection: bool,
    pub entity_count: usize,
    pub confirm_open: bool,
}

/// Design-mode toolbar rects
#[derive(Debug, Clone)]
pub struct DesignLayout {
    pub undo: Rect,
    pub clear: Rect,
    pub divider: Rect,
    pub snap: Rect,
    pub delete: Option<Rect>,
    pub palette: Rect,
    pub tools: [Rect; 7],
    pub hints: Rect,
}

#[derive(Debug, Clone)]
pub struct ModalLayout {
    pub panel: Rect,
    pub cancel: Rect,
    pub confirm: Rect,
}

/// Screen rects for one frame of HUD
#[derive(Debug, Clone)]
pub struct HudLayout {
    pub title: Rect,
    pub mode_pill: Rect,
    pub mode_sim: Rect,
    pub mode_design: Rect,
    pub camera_column: Rect,
    pub views: [Rect; 4],
    pub weather_divider: Rect,
    pub weather: Rect,
    pub design: Option<DesignLayout>,
    pub stats: Rect,
    pub modal: Option<ModalLayout>,
}

impl HudLayout {
    pub fn compute(screen_w: f32, screen_h: f32, state: &HudState) -> Self {
        let title = Rect::new(MARGIN, MARGIN, 360.0, 64.0);

        // Mode switcher, top right
        let pill_w = MODE_BUTTON_W * 2.0 + PILL_PAD * 3.0;
        let mode_pill = Rect::new(screen_w - MARGIN - pill_w, MARGIN, pill_w, MODE_BUTTON_H + PILL_PAD * 2.0);
        let mut modes = Toolbar::horizontal(mode_pill.x + PILL_PAD, mode_pill.y + PILL_PAD, MODE_BUTTON_H, PILL_PAD);
        let mode_sim = modes.next(MODE_BUTTON_W);
        let mode_design = modes.next(MODE_BUTTON_W);

        // Camera column, right edge, vertically centered
        let column_h = VIEW_BUTTON * 5.0 + VIEW_GAP * 7.0;
        let column_top = (screen_h * 0.5 - column_h * 0.5).max(mode_pill.bottom() + MARGIN);
        let mut column = Toolbar::vertical(screen_w - MARGIN - VIEW_BUTTON, column_top, VIEW_BUTTON, VIEW_GAP);
        let views = [
            column.next(VIEW_BUTTON),
            column.next(VIEW_BUTTON),
            column.next(VIEW_BUTTON),
            column.next(VIEW_BUTTON),
        ];
        let weather_divider = column.separator();
        let weather = column.next(VIEW_BUTTON);
        let camera_column = Rect::new(
            screen_w - MARGIN - VIEW_BUTTON,
            column_top,
            VIEW_BUTTON,
            column.extent(),
        )
        .expand(PILL_PAD);

        let stats = Rect::new(screen_w - MARGIN - 180.0, screen_h - MARGIN - 64.0, 180.0, 64.0);

        let design = state.mode.is_design().then(|| design_layout(screen_w, screen_h, state.has_selection));

        let modal = state.confirm_open.then(|| {
            let panel = Rect::centered_at(screen_w * 0.5, screen_h * 0.5, MODAL_W, MODAL_H);
            let mut buttons = Toolbar::horizontal(panel.right() - 24.0 - 110.0 * 2.0 - 12.0, panel.bottom() - 24.0 - 36.0, 36.0, 12.0);
            let cancel = buttons.next(110.0);
            let confirm = buttons.next(110.0);
            ModalLayout { panel, cancel, confirm }
        });

        Self {
            title,
            mode_pill,
            mode_sim,
            mode_design,
            camera_column,
            views,
            weather_divider,
            weather,
            design,
            stats,
            modal,
        }
    }

    /// True when the pointer at (x, y) belongs to the HUD rather than the scene
    pub fn blocks(&self, x: f32, y: f32) -> bool {
        if self.modal.is_some() {
            return true;
        }
        if self.mode_pill.contains(x, y) || self.camera_column.contains(x, y) {
            return true;
        }
        if let Some(design) = &self.design {
            let mut hit = design.undo.contains(x, y)
                || design.clear.contains(x, y)
                || design.snap.contains(x, y)
                || design.palette.contains(x, y)
                || design.hints.contains(x, y);
            if let Some(delete) = design.delete {
                hit |= delete.contains(x, y);
            }
            return hit;
        }
        false
    }
}

fn design_layout(screen_w: f32, screen_h: f32, has_selection: bool) -> DesignLayout {
    let center = screen_w * 0.5;

    let hints = Rect::centered_at(center, screen_h - MARGIN - HINTS_H * 0.5, 440.0, HINTS_H);

    let tool_widths = [TOOL_W; 7];
    let palette_w = Toolbar::measure(&tool_widths, TOOL_GAP) + PALETTE_PAD * 2.0;
    let palette_h = TOOL_H + PALETTE_PAD * 2.0;
    let palette = Rect::new(center - palette_w * 0.5, hints.y - 16.0 - palette_h, palette_w, palette_h);
    let mut row = Toolbar::horizontal(palette.x + PALETTE_PAD, palette.y + PALETTE_PAD, TOOL_H, TOOL_GAP);
    let tools = tool_widths.map(|w| row.next(w));

    // Action bar centered above the palette; the divider takes 3 gaps
    let mut widths = vec![110.0, 120.0, 110.0];
    if has_selection {
        widths.push(140.0);
    }
    let bar_w = Toolbar::measure(&widths, BAR_GAP) + BAR_GAP * 3.0;
    let mut bar = Toolbar::horizontal(center - bar_w * 0.5, palette.y - 16.0 - BAR_H, BAR_H, BAR_GAP);
    let undo = bar.next(110.0);
    let clear = bar.next(120.0);
    let divider = bar.separator();
    let snap = bar.next(110.0);
    let delete = has_selection.then(|| bar.next(140.0));

    DesignLayout {
        undo,
        clear,
        divider,
        snap,
        delete,
        palette,
        tools,
        hints,
    }
}

/// Draw the HUD and collect clicks
pub fn draw_hud(
    ctx: &mut UiContext,
    layout: &HudLayout,
    state: &HudState,
    actions: &ActionRegistry,
    action_ctx: &ActionContext,
) -> Vec<HudCommand> {
    let mut commands = Vec::new();
    // While the dialog is up only its own buttons respond
    let live = !state.confirm_open;

    draw_title(layout, state.mode);
    draw_mode_switcher(ctx, layout, state, live, &mut commands);
    draw_camera_column(ctx, layout, state, actions, action_ctx, live, &mut commands);

    if let Some(design) = &layout.design {
        draw_design_bar(ctx, design, state, actions, action_ctx, live, &mut commands);
    }

    draw_stats(layout, state);

    if let Some(modal) = &layout.modal {
        draw_confirm_modal(ctx, modal, actions, action_ctx, &mut commands);
    }

    commands
}

fn draw_title(layout: &HudLayout, mode: Mode) {
    let r = layout.title;
    draw_circle(r.x + 4.0, r.y + 8.0, 4.0, theme::ACCENT_DOT);
    draw_text("MACROQUAD", r.x + 14.0, r.y + 12.0, theme::FONT_SIZE_SMALL, theme::TEXT_DIM);
    draw_text("INVISIBLE RUNNER", r.x, r.y + 48.0, theme::FONT_SIZE_TITLE, theme::TEXT_COLOR);
    let subtitle = match mode {
        Mode::Simulation => "Watching the run",
        Mode::Design => "Editing the island",
    };
    draw_text(subtitle, r.x, r.y + 66.0, theme::FONT_SIZE_SMALL, theme::TEXT_FAINT);
}

fn draw_mode_switcher(ctx: &mut UiContext, layout: &HudLayout, state: &HudState, live: bool, commands: &mut Vec<HudCommand>) {
    let pill = layout.mode_pill;
    draw_rounded_rect(pill.x, pill.y, pill.w, pill.h, pill.h * 0.5, theme::PANEL_BG_LIGHT);

    let sim_look = if state.mode == Mode::Simulation {
        ButtonLook::filled(theme::ACCENT_SIM, theme::TEXT_ON_ACCENT)
    } else {
        ButtonLook::FLAT
    };
    if text_button(ctx, layout.mode_sim, "SIMULATION", sim_look, live, "") {
        commands.push(HudCommand::SetMode(Mode::Simulation));
    }

    let design_look = if state.mode == Mode::Design {
        ButtonLook::filled(theme::ACCENT_DESIGN, theme::TEXT_ON_ACCENT)
    } else {
        ButtonLook::FLAT
    };
    if text_button(ctx, layout.mode_design, "PLAN & DESIGN", design_look, live, "") {
        commands.push(HudCommand::SetMode(Mode::Design));
    }
}

fn draw_camera_column(
    ctx: &mut UiContext,
    layout: &HudLayout,
    state: &HudState,
    actions: &ActionRegistry,
    action_ctx: &ActionContext,
    live: bool,
    commands: &mut Vec<HudCommand>,
) {
    let col = layout.camera_column;
    draw_rounded_rect(col.x, col.y, col.w, col.h, 10.0, theme::PANEL_BG);
    draw_text_centered("CAMERA", &Rect::new(col.x, col.y - 18.0, col.w, 14.0), theme::FONT_SIZE_TINY, theme::TEXT_DIM);

    for (view, rect) in CameraView::ALL.iter().zip(layout.views.iter()) {
        let look = if *view == state.view {
            ButtonLook::filled(theme::ACCENT_DESIGN, theme::TEXT_ON_ACCENT)
        } else {
            ButtonLook::FLAT
        };
        if text_button(ctx, *rect, view.label(), look, live, view.name()) {
            commands.push(HudCommand::SetView(*view));
        }
    }

    let d = layout.weather_divider;
    draw_line(d.x, d.y, d.right(), d.y, 1.0, theme::PANEL_BORDER);

    let look = if state.weather.is_raining() {
        ButtonLook::filled(theme::RAIN_BG, theme::RAIN_TEXT)
    } else {
        ButtonLook::FLAT
    };
    let caption = if state.weather.is_raining() { "Rain" } else { "Sun" };
    let tooltip = actions.tooltip("weather.toggle");
    let enabled = live && actions.is_enabled("weather.toggle", action_ctx);
    if text_button(ctx, layout.weather, caption, look, enabled, &tooltip) {
        commands.push(HudCommand::Action("weather.toggle"));
    }
}

fn draw_design_bar(
    ctx: &mut UiContext,
    design: &DesignLayout,
    state: &HudState,
    actions: &ActionRegistry,
    action_ctx: &ActionContext,
    live: bool,
    commands: &mut Vec<HudCommand>,
) {
    let mut action_button = |ctx: &mut UiContext, rect: Rect, id: &'static str, label: &str, look: ButtonLook| {
        let enabled = live && actions.is_enabled(id, action_ctx);
        let tooltip = actions.tooltip(id);
        if text_button(ctx, rect, label, look, enabled, &tooltip) {
            commands.push(HudCommand::Action(id));
        }
    };

    let neutral = ButtonLook::outlined(theme::PANEL_BG, theme::TEXT_COLOR, theme::PANEL_BORDER);
    let danger = ButtonLook::filled(theme::DANGER_BG, theme::DANGER_TEXT);

    action_button(ctx, design.undo, "edit.undo", "Undo Last", neutral);
    action_button(ctx, design.clear, "scene.clear", "Clear Scene", danger);

    let d = design.divider;
    draw_line(d.x, d.y, d.x, d.bottom(), 1.0, theme::PANEL_BORDER);

    let (snap_label, snap_look) = if state.snap {
        ("Snap: ON", ButtonLook::filled(theme::SNAP_BG, theme::SNAP_TEXT))
    } else {
        ("Snap: OFF", neutral)
    };
    action_button(ctx, design.snap, "snap.toggle", snap_label, snap_look);

    if let Some(delete) = design.delete {
        action_button(ctx, delete, "edit.delete", "Delete Selected", danger);
    }

    let p = design.palette;
    draw_rounded_rect(p.x, p.y, p.w, p.h, 16.0, theme::PANEL_BG);
    for ((kind, rect), id) in PropKind::ALL.iter().zip(design.tools.iter()).zip(TOOL_ACTIONS) {
        let clicked = swatch_button(ctx, *rect, kind.label(), kind.swatch(), *kind == state.tool);
        if clicked && live {
            commands.push(HudCommand::Action(id));
        }
    }

    let h = design.hints;
    draw_rounded_rect(h.x, h.y, h.w, h.h, h.h * 0.5, theme::PANEL_BG_LIGHT);
    let hints = "Click to place  |  Wheel to Rotate  |  Shift + Wheel Scale";
    draw_text_centered(hints, &h, theme::FONT_SIZE_TINY, theme::TEXT_DIM);
}

fn draw_stats(layout: &HudLayout, state: &HudState) {
    let s = layout.stats;
    let lines = [
        format!("MODE: {}", state.mode.label()),
        format!("VIEW: {}", state.view.name()),
        format!("WEATHER: {}", state.weather.label()),
        format!("ENTITIES: {}", state.entity_count),
    ];
    for (i, line) in lines.iter().enumerate() {
        let baseline = s.y + 14.0 + i as f32 * 16.0;
        draw_text_right(line, s.right(), baseline, theme::FONT_SIZE_SMALL, theme::TEXT_FAINT);
    }
}

fn draw_confirm_modal(
    ctx: &mut UiContext,
    modal: &ModalLayout,
    actions: &ActionRegistry,
    action_ctx: &ActionContext,
    commands: &mut Vec<HudCommand>,
) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), theme::SCRIM);

    let p = modal.panel;
    draw_rounded_rect(p.x, p.y, p.w, p.h, 12.0, Color::new(0.08, 0.08, 0.09, 0.95));
    draw_rectangle_lines(p.x, p.y, p.w, p.h, 1.0, theme::PANEL_BORDER);
    draw_text("Clear Scene", p.x + 24.0, p.y + 38.0, 22.0, theme::TEXT_COLOR);
    draw_text(CLEAR_PROMPT, p.x + 24.0, p.y + 68.0, theme::FONT_SIZE_BUTTON, theme::TEXT_MUTED);
    draw_text(CLEAR_WARNING, p.x + 24.0, p.y + 88.0, theme::FONT_SIZE_BUTTON, theme::TEXT_MUTED);

    let cancel_look = ButtonLook::outlined(theme::PANEL_BG, theme::TEXT_COLOR, theme::PANEL_BORDER);
    if text_button(ctx, modal.cancel, "Cancel", cancel_look, actions.is_enabled("dialog.cancel", action_ctx), "") {
        commands.push(HudCommand::Action("dialog.cancel"));
    }
    let confirm_look = ButtonLook::filled(Color::new(0.863, 0.149, 0.149, 1.0), theme::TEXT_COLOR);
    if text_button(ctx, modal.confirm, "Clear Scene", confirm_look, actions.is_enabled("dialog.confirm", action_ctx), "") {
        commands.push(HudCommand::Action("dialog.confirm"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(mode: Mode) -> HudState {
        HudState {
            mode,
            view: CameraView::Default,
            weather: Weather::Clear,
            tool: PropKind::Tree,
            snap: false,
            has_selection: false,
            entity_count: 0,
            confirm_open: false,
        }
    }

    #[test]
    fn test_simulation_has_no_design_bar() {
        let layout = HudLayout::compute(1280.0, 720.0, &state(Mode::Simulation));
        assert!(layout.design.is_none());
        assert!(layout.modal.is_none());
        // Mid-screen belongs to the scene
        assert!(!layout.blocks(640.0, 360.0));
        assert!(!layout.blocks(640.0, 700.0));
    }

    #[test]
    fn test_hud_panels_block_pointer() {
        let layout = HudLayout::compute(1280.0, 720.0, &state(Mode::Design));
        let design = layout.design.as_ref().map(|d| d.tools[0]);
        let tool = design.unwrap_or_default();
        assert!(layout.blocks(tool.center_x(), tool.center_y()));
        assert!(layout.blocks(layout.views[2].center_x(), layout.views[2].center_y()));
        assert!(layout.blocks(layout.mode_design.center_x(), layout.mode_design.center_y()));
        assert!(!layout.blocks(640.0, 300.0));
    }

    #[test]
    fn test_delete_button_needs_selection() {
        let mut s = state(Mode::Design);
        let layout = HudLayout::compute(1280.0, 720.0, &s);
        assert!(layout.design.as_ref().is_some_and(|d| d.delete.is_none()));
        s.has_selection = true;
        let layout = HudLayout::compute(1280.0, 720.0, &s);
        let design = layout.design.as_ref();
        assert!(design.is_some_and(|d| d.delete.is_some()));
        // Bar stays centered
        let d = design.map(|d| (d.undo.x, d.delete.map(|r| r.right()).unwrap_or(0.0)));
        let (left, right) = d.unwrap_or_default();
        assert!(((left + right) * 0.5 - 640.0).abs() < 1.0);
    }

    #[test]
    fn test_modal_blocks_everything() {
        let mut s = state(Mode::Design);
        s.confirm_open = true;
        let layout = HudLayout::compute(1280.0, 720.0, &s);
        assert!(layout.blocks(640.0, 300.0));
        assert!(layout.blocks(1.0, 1.0));
        let modal = layout.modal.as_ref().map(|m| m.panel).unwrap_or_default();
        assert!(modal.contains(640.0, 360.0));
    }

    #[test]
    fn test_palette_holds_every_tool() {
        let layout = HudLayout::compute(1280.0, 720.0, &state(Mode::Design));
        let design = layout.design.as_ref().map(|d| (d.palette, d.tools));
        let (palette, tools) = design.unwrap_or_default();
        for tool in tools {
            assert!(palette.contains(tool.x, tool.y));
            assert!(tool.right() <= palette.right());
        }
        assert!(palette.bottom() < 720.0);
    }

    #[test]
    fn test_camera_column_clears_mode_switcher() {
        // Short window pushes the column below the switcher
        let layout = HudLayout::compute(1280.0, 300.0, &state(Mode::Simulation));
        assert!(layout.camera_column.y >= layout.mode_pill.bottom());
    }
}
