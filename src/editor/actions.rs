//! Editor action definitions
//!
//! Shortcuts and HUD buttons for placing, removing and toggling things.

use crate::scene::PropKind;
use crate::ui::{Action, ActionContext, ActionRegistry, Shortcut};
use macroquad::input::KeyCode;

/// Custom flags for editor-specific conditions
pub mod flags {
    /// Grid snapping is on
    pub const SNAP_ON: u32 = 1 << 0;
    /// Rain is falling
    pub const RAINING: u32 = 1 << 1;
}

/// Tool actions in palette order, matching `PropKind::ALL`
pub const TOOL_ACTIONS: [&str; 7] = ["tool.1", "tool.2", "tool.3", "tool.4", "tool.5", "tool.6", "tool.7"];

const TOOL_KEYS: [KeyCode; 7] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
];

/// Tool picked by a `tool.N` action
pub fn tool_for_action(id: &str) -> Option<PropKind> {
    let index = TOOL_ACTIONS.iter().position(|a| *a == id)?;
    PropKind::from_index(index)
}

pub fn create_editor_actions() -> ActionRegistry {
    let mut registry = ActionRegistry::new();

    // ========================================================================
    // Edit
    // ========================================================================
    registry.register(
        Action::new("edit.undo")
            .label("Undo Last")
            .shortcut(Shortcut::ctrl(KeyCode::Z))
            .status_tip("Remove the most recently placed prop")
            .category("Edit")
            .enabled_when(|ctx| ctx.design_mode && ctx.can_undo),
    );

    registry.register(
        Action::new("edit.delete")
            .label("Delete Selected")
            .shortcut(Shortcut::key(KeyCode::Delete))
            .shortcut(Shortcut::key(KeyCode::Backspace))
            .status_tip("Remove the selected prop")
            .category("Edit")
            .enabled_when(|ctx| ctx.design_mode && ctx.has_selection),
    );

    registry.register(
        Action::new("scene.clear")
            .label("Clear Scene")
            .status_tip("Remove every placed prop")
            .category("Edit")
            .enabled_when(|ctx| ctx.design_mode && ctx.can_undo),
    );

    registry.register(
        Action::new("selection.clear")
            .label("Deselect")
            .shortcut(Shortcut::key(KeyCode::Escape))
            .category("Edit")
            .enabled_when(|ctx| ctx.has_selection),
    );

    // ========================================================================
    // Placement
    // ========================================================================
    registry.register(
        Action::new("snap.toggle")
            .label("Snap")
            .shortcut(Shortcut::key(KeyCode::G))
            .status_tip("Snap placements to a half-unit grid")
            .category("Placement")
            .enabled_when(|ctx| ctx.design_mode)
            .checked_when(|ctx| ctx.has_flag(flags::SNAP_ON)),
    );

    registry.register(
        Action::new("placement.reset")
            .label("Reset Rotation/Scale")
            .shortcut(Shortcut::key(KeyCode::R))
            .category("Placement")
            .enabled_when(|ctx| ctx.design_mode),
    );

    for (id, (kind, key)) in TOOL_ACTIONS.into_iter().zip(PropKind::ALL.iter().zip(TOOL_KEYS)) {
        registry.register(
            Action::new(id)
                .label(kind.label())
                .shortcut(Shortcut::key(key))
                .category("Tools")
                .enabled_when(|ctx| ctx.design_mode),
        );
    }

    // ========================================================================
    // View
    // ========================================================================
    registry.register(
        Action::new("mode.toggle")
            .label("Switch Mode")
            .shortcut(Shortcut::key(KeyCode::Tab))
            .status_tip("Toggle between simulation and plan & design")
            .category("View"),
    );

    registry.register(
        Action::new("weather.toggle")
            .label("Weather")
            .category("View")
            .checked_when(|ctx| ctx.has_flag(flags::RAINING)),
    );

    // ========================================================================
    // Confirm dialog
    // ========================================================================
    registry.register(
        Action::new("dialog.confirm")
            .label("Clear Everything")
            .shortcut(Shortcut::key(KeyCode::Enter))
            .category("Dialog")
            .modal_safe()
            .enabled_when(|ctx| ctx.modal_open),
    );

    registry.register(
        Action::new("dialog.cancel")
            .label("Cancel")
            .shortcut(Shortcut::key(KeyCode::Escape))
            .category("Dialog")
            .modal_safe()
            .enabled_when(|ctx| ctx.modal_open),
    );

    registry
}

/// Build an ActionContext from the current session state
pub fn build_context(
    design_mode: bool,
    object_count: usize,
    has_selection: bool,
    modal_open: bool,
    flags: u32,
) -> ActionContext {
    ActionContext {
        design_mode,
        can_undo: object_count > 0,
        has_selection,
        modal_open,
        flags,
    }
}
