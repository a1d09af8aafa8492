//! Plan & design editing
//!
//! - `placement`: surface projection, grid snap, pending rotation/scale
//! - `session`: tool, snap flag and ghost preview driven by pointer events
//! - `actions`: shortcut and button definitions

mod actions;
mod placement;
mod session;

pub use actions::{build_context, create_editor_actions, flags, tool_for_action, TOOL_ACTIONS};
pub use session::{EditorSession, PressOutcome};

/// Top-level interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Runner animates, island spins, editing disabled
    #[default]
    Simulation,
    /// Runner paused, island frozen, placement active
    Design,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Mode::Simulation => Mode::Design,
            Mode::Design => Mode::Simulation,
        }
    }

    /// Short name for the stats readout
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Simulation => "SIM",
            Mode::Design => "DESIGN",
        }
    }

    pub fn is_design(&self) -> bool {
        *self == Mode::Design
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::default(), Mode::Simulation);
        assert_eq!(Mode::Simulation.toggle(), Mode::Design);
        assert!(Mode::Simulation.toggle().is_design());
        assert_eq!(Mode::Design.toggle(), Mode::Simulation);
    }
}
