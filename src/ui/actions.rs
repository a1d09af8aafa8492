//! Action registry
//!
//! Every keyboard shortcut and HUD button maps to a named action with an
//! enable condition, so the keyboard and the buttons share one gate.
//!
//! ```ignore
//! let mut registry = ActionRegistry::new();
//! registry.register(Action::new("edit.undo")
//!     .label("Undo Last")
//!     .shortcut(Shortcut::ctrl(KeyCode::Z))
//!     .enabled_when(|ctx| ctx.design_mode && ctx.can_undo));
//!
//! for id in registry.process_triggers(&ctx) {
//!     // dispatch on id
//! }
//! ```

use macroquad::input::{get_keys_pressed, is_key_down, KeyCode};
use std::collections::HashMap;

/// Modifier keys held alongside a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool, // Cmd on Mac
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn current() -> Self {
        Self {
            ctrl: is_key_down(KeyCode::LeftControl)
                || is_key_down(KeyCode::RightControl)
                || is_key_down(KeyCode::LeftSuper)
                || is_key_down(KeyCode::RightSuper),
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            alt: is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt),
        }
    }
}

/// A keyboard shortcut (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: KeyCode,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Shortcut {
    pub fn key(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    /// Ctrl/Cmd + key
    pub fn ctrl(key: KeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::key(key)
        }
    }

    /// Whether a key press with these modifiers fires the shortcut
    pub fn matches(&self, key: KeyCode, mods: Modifiers) -> bool {
        self.key == key && self.ctrl == mods.ctrl && self.shift == mods.shift && self.alt == mods.alt
    }

    /// Format for display (e.g. "Ctrl+Z")
    pub fn display(&self) -> String {
        let mut out = String::new();
        if self.ctrl {
            out.push_str(if cfg!(target_os = "macos") { "Cmd+" } else { "Ctrl+" });
        }
        if self.shift {
            out.push_str("Shift+");
        }
        if self.alt {
            out.push_str("Alt+");
        }
        out.push_str(key_name(self.key));
        out
    }
}

fn key_name(key: KeyCode) -> &'static str {
    match key {
        KeyCode::G => "G",
        KeyCode::R => "R",
        KeyCode::Z => "Z",
        KeyCode::Key1 => "1",
        KeyCode::Key2 => "2",
        KeyCode::Key3 => "3",
        KeyCode::Key4 => "4",
        KeyCode::Key5 => "5",
        KeyCode::Key6 => "6",
        KeyCode::Key7 => "7",
        KeyCode::Escape => "Esc",
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Del",
        _ => "?",
    }
}

/// State the enable conditions look at
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    /// Plan & design mode is active
    pub design_mode: bool,
    /// Registry has at least one prop
    pub can_undo: bool,
    pub has_selection: bool,
    /// A modal dialog owns the keyboard
    pub modal_open: bool,
    /// Custom flags for app-specific conditions
    pub flags: u32,
}

impl ActionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags & flag) != 0
    }
}

type EnableFn = fn(&ActionContext) -> bool;
type CheckedFn = fn(&ActionContext) -> bool;

fn always_enabled(_: &ActionContext) -> bool {
    true
}

#[derive(Clone)]
pub struct Action {
    /// Unique identifier (e.g. "edit.undo")
    pub id: &'static str,
    pub label: &'static str,
    pub shortcuts: Vec<Shortcut>,
    pub status_tip: &'static str,
    enabled_fn: EnableFn,
    checked_fn: Option<CheckedFn>,
    /// Still fires while a modal is open
    modal_safe: bool,
    pub category: &'static str,
}

impl Action {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            label: "",
            shortcuts: Vec::new(),
            status_tip: "",
            enabled_fn: always_enabled,
            checked_fn: None,
            modal_safe: false,
            category: "General",
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Add a shortcut; an action may have several
    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcuts.push(shortcut);
        self
    }

    pub fn status_tip(mut self, tip: &'static str) -> Self {
        self.status_tip = tip;
        self
    }

    pub fn category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }

    pub fn enabled_when(mut self, f: EnableFn) -> Self {
        self.enabled_fn = f;
        self
    }

    pub fn checked_when(mut self, f: CheckedFn) -> Self {
        self.checked_fn = Some(f);
        self
    }

    pub fn modal_safe(mut self) -> Self {
        self.modal_safe = true;
        self
    }

    pub fn is_enabled(&self, ctx: &ActionContext) -> bool {
        if ctx.modal_open && !self.modal_safe {
            return false;
        }
        (self.enabled_fn)(ctx)
    }

    pub fn is_checked(&self, ctx: &ActionContext) -> bool {
        self.checked_fn.is_some_and(|f| f(ctx))
    }

    /// Whether a key press fires this action
    pub fn responds_to(&self, key: KeyCode, mods: Modifiers, ctx: &ActionContext) -> bool {
        self.is_enabled(ctx) && self.shortcuts.iter().any(|s| s.matches(key, mods))
    }

    /// Tooltip with the first shortcut as a hint
    pub fn tooltip(&self) -> String {
        let text = if self.status_tip.is_empty() {
            self.label
        } else {
            self.status_tip
        };
        match self.shortcuts.first() {
            Some(shortcut) => format!("{} ({})", text, shortcut.display()),
            None => text.to_string(),
        }
    }
}

/// Central registry for all actions
pub struct ActionRegistry {
    actions: HashMap<&'static str, Action>,
    /// Registration order, so triggers dispatch deterministically
    order: Vec<&'static str>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, action: Action) {
        if !self.actions.contains_key(action.id) {
            self.order.push(action.id);
        }
        self.actions.insert(action.id, action);
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_enabled(&self, id: &str, ctx: &ActionContext) -> bool {
        self.actions.get(id).is_some_and(|a| a.is_enabled(ctx))
    }

    pub fn is_checked(&self, id: &str, ctx: &ActionContext) -> bool {
        self.actions.get(id).is_some_and(|a| a.is_checked(ctx))
    }

    pub fn tooltip(&self, id: &str) -> String {
        self.actions.get(id).map_or_else(String::new, |a| a.tooltip())
    }

    fn in_order(&self) -> impl Iterator<Item = &Action> {
        self.order.iter().filter_map(|id| self.actions.get(id))
    }

    /// Actions fired by a key press, in registration order
    pub fn triggers_for(&self, key: KeyCode, mods: Modifiers, ctx: &ActionContext) -> Vec<&'static str> {
        self.in_order()
            .filter(|a| a.responds_to(key, mods, ctx))
            .map(|a| a.id)
            .collect()
    }

    /// Actions fired by every key pressed this frame
    pub fn process_triggers(&self, ctx: &ActionContext) -> Vec<&'static str> {
        let mods = Modifiers::current();
        let mut fired = Vec::new();
        for key in get_keys_pressed() {
            fired.extend(self.triggers_for(key, mods, ctx));
        }
        fired
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
