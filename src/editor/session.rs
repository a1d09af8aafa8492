//! Editing session: tool, snap flag, pending rotation/scale and ghost
//!
//! Pointer rays arrive in world space together with the surface's world
//! transform. Outside design mode every event is ignored and the ghost is
//! dropped.

use super::placement::{place, project_world_hit, surface_hit, GhostPlacement, PendingPlacement};
use super::Mode;
use crate::math::Ray;
use crate::scene::{pick_object, ObjectId, PropKind, PropLibrary, SceneRegistry};
use macroquad::math::Mat4;

/// What a pointer press did to the scene
#[derive(Debug, Clone, PartialEq)]
pub enum PressOutcome {
    Ignored,
    /// Selection toggled on an existing prop
    Toggled(ObjectId),
    /// New prop appended
    Placed(ObjectId),
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    pub tool: PropKind,
    pub snap: bool,
    pub pending: PendingPlacement,
    ghost: Option<GhostPlacement>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            tool: PropKind::Tree,
            snap: false,
            pending: PendingPlacement::default(),
            ghost: None,
        }
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ghost(&self) -> Option<&GhostPlacement> {
        self.ghost.as_ref()
    }

    /// Recompute the ghost from the world-space pointer ray
    ///
    /// `None` means the pointer is off the canvas or over the UI.
    pub fn pointer_moved(&mut self, mode: Mode, ray: Option<&Ray>, surface: &Mat4) {
        if mode != Mode::Design {
            self.ghost = None;
            return;
        }
        self.ghost = ray.and_then(|ray| surface_hit(ray, surface)).map(|hit| {
            let position = project_world_hit(hit, surface, self.snap);
            GhostPlacement::new(self.tool, position, &self.pending)
        });
    }

    /// Press on the scene: toggle selection on a hit prop, else place one
    pub fn pointer_pressed(
        &mut self,
        mode: Mode,
        ray: &Ray,
        surface: &Mat4,
        registry: &mut SceneRegistry,
        library: &PropLibrary,
    ) -> PressOutcome {
        if mode != Mode::Design {
            return PressOutcome::Ignored;
        }
        let local = ray.transformed(&surface.inverse());
        if let Some(hit) = pick_object(registry.objects(), library, &local) {
            let id = hit.id.clone();
            registry.toggle_selection(&id);
            return PressOutcome::Toggled(id);
        }
        match surface_hit(ray, surface) {
            Some(hit) => {
                let position = project_world_hit(hit, surface, self.snap);
                let object = place(registry, self.tool, position, &self.pending);
                PressOutcome::Placed(object.id)
            }
            None => PressOutcome::Ignored,
        }
    }

    /// Wheel tick; `delta_y` is scroll-down-positive
    pub fn wheel(&mut self, mode: Mode, delta_y: f32, modifier: bool) {
        if mode != Mode::Design || delta_y == 0.0 {
            return;
        }
        self.pending.apply_wheel(delta_y, modifier);
        self.refresh_ghost();
    }

    pub fn reset_pending(&mut self) {
        self.pending.reset();
        self.refresh_ghost();
    }

    pub fn set_tool(&mut self, tool: PropKind) {
        self.tool = tool;
        self.refresh_ghost();
    }

    pub fn toggle_snap(&mut self) {
        self.snap = !self.snap;
    }

    /// Leaving or entering design mode drops the ghost and the selection
    pub fn mode_changed(&mut self, registry: &mut SceneRegistry) {
        self.ghost = None;
        registry.clear_selection();
    }

    fn refresh_ghost(&mut self) {
        if let Some(ghost) = &mut self.ghost {
            *ghost = GhostPlacement::new(self.tool, ghost.position, &self.pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::SURFACE_HEIGHT;
    use macroquad::math::{Mat4, Vec3};

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    #[test]
    fn test_ghost_follows_pointer_in_design() {
        let mut session = EditorSession::new();
        session.pointer_moved(Mode::Design, Some(&down_at(1.0, -0.3)), &Mat4::IDENTITY);
        let ghost = session.ghost().unwrap();
        assert_eq!(ghost.kind, PropKind::Tree);
        assert!((ghost.position - Vec3::new(1.0, SURFACE_HEIGHT, -0.3)).length() < 1e-5);

        session.pointer_moved(Mode::Design, Some(&down_at(5.0, 5.0)), &Mat4::IDENTITY);
        assert!(session.ghost().is_none());

        session.pointer_moved(Mode::Design, Some(&down_at(0.0, 0.0)), &Mat4::IDENTITY);
        session.pointer_moved(Mode::Design, None, &Mat4::IDENTITY);
        assert!(session.ghost().is_none());
    }

    #[test]
    fn test_no_ghost_in_simulation() {
        let mut session = EditorSession::new();
        session.pointer_moved(Mode::Simulation, Some(&down_at(0.0, 0.0)), &Mat4::IDENTITY);
        assert!(session.ghost().is_none());
    }

    #[test]
    fn test_ghost_snaps() {
        let mut session = EditorSession::new();
        session.toggle_snap();
        session.pointer_moved(Mode::Design, Some(&down_at(1.23, 0.77)), &Mat4::IDENTITY);
        let ghost = session.ghost().unwrap();
        assert_eq!(ghost.position.x, 1.0);
        assert_eq!(ghost.position.z, 1.0);
    }

    #[test]
    fn test_wheel_updates_ghost() {
        let mut session = EditorSession::new();
        session.pointer_moved(Mode::Design, Some(&down_at(0.0, 0.0)), &Mat4::IDENTITY);
        session.wheel(Mode::Design, 1.0, false);
        session.wheel(Mode::Design, -1.0, true);
        let ghost = session.ghost().unwrap();
        assert!((ghost.rotation - 0.2).abs() < 1e-6);
        assert!((ghost.scale - 1.1).abs() < 1e-6);

        session.wheel(Mode::Simulation, 1.0, false);
        assert!((session.pending.rotation - 0.2).abs() < 1e-6);

        session.set_tool(PropKind::Lamp);
        assert_eq!(session.ghost().unwrap().kind, PropKind::Lamp);
    }

    #[test]
    fn test_press_places_then_toggles() {
        let library = PropLibrary::new();
        let mut registry = SceneRegistry::new();
        let mut session = EditorSession::new();
        session.set_tool(PropKind::Rock);

        let outcome = session.pointer_pressed(Mode::Design, &down_at(1.0, 1.0), &Mat4::IDENTITY, &mut registry, &library);
        let id = match outcome {
            PressOutcome::Placed(id) => id,
            other => panic!("expected placement, got {:?}", other),
        };
        assert_eq!(registry.len(), 1);

        // Pressing the same spot hits the rock instead of placing another
        let outcome = session.pointer_pressed(Mode::Design, &down_at(1.0, 1.0), &Mat4::IDENTITY, &mut registry, &library);
        assert_eq!(outcome, PressOutcome::Toggled(id.clone()));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_selected(&id));

        session.pointer_pressed(Mode::Design, &down_at(1.0, 1.0), &Mat4::IDENTITY, &mut registry, &library);
        assert!(registry.selection().is_none());
    }

    #[test]
    fn test_press_beside_tall_prop_places() {
        let library = PropLibrary::new();
        let mut registry = SceneRegistry::new();
        let mut session = EditorSession::new();

        let tree = match session.pointer_pressed(Mode::Design, &down_at(0.0, 0.0), &Mat4::IDENTITY, &mut registry, &library) {
            PressOutcome::Placed(id) => id,
            other => panic!("expected placement, got {:?}", other),
        };

        // Bare ground under the tree's reach still places
        let outcome = session.pointer_pressed(Mode::Design, &down_at(-1.2, 1.2), &Mat4::IDENTITY, &mut registry, &library);
        assert!(matches!(outcome, PressOutcome::Placed(_)));
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_selected(&tree));
    }

    #[test]
    fn test_press_ignored_outside_design() {
        let library = PropLibrary::new();
        let mut registry = SceneRegistry::new();
        let mut session = EditorSession::new();
        let outcome = session.pointer_pressed(Mode::Simulation, &down_at(0.0, 0.0), &Mat4::IDENTITY, &mut registry, &library);
        assert_eq!(outcome, PressOutcome::Ignored);
        assert!(registry.is_empty());

        let miss = session.pointer_pressed(Mode::Design, &down_at(9.0, 9.0), &Mat4::IDENTITY, &mut registry, &library);
        assert_eq!(miss, PressOutcome::Ignored);
    }

    #[test]
    fn test_mode_change_clears_ghost_and_selection() {
        let library = PropLibrary::new();
        let mut registry = SceneRegistry::new();
        let mut session = EditorSession::new();
        session.pointer_pressed(Mode::Design, &down_at(-1.0, 0.5), &Mat4::IDENTITY, &mut registry, &library);
        session.pointer_pressed(Mode::Design, &down_at(-1.0, 0.5), &Mat4::IDENTITY, &mut registry, &library);
        assert!(registry.selection().is_some());
        session.pointer_moved(Mode::Design, Some(&down_at(0.0, 0.0)), &Mat4::IDENTITY);

        session.mode_changed(&mut registry);
        assert!(session.ghost().is_none());
        assert!(registry.selection().is_none());
    }

    #[test]
    fn test_press_on_spun_island_stores_local_position() {
        let library = PropLibrary::new();
        let mut registry = SceneRegistry::new();
        let mut session = EditorSession::new();
        session.set_tool(PropKind::Rock);
        let surface = Mat4::from_translation(Vec3::new(0.0, -3.0, 0.0))
            * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);

        // World -Z is island-local +X after a quarter turn
        let ray = Ray::new(Vec3::new(0.0, 5.0, -1.5), Vec3::NEG_Y);
        session.pointer_moved(Mode::Design, Some(&ray), &surface);
        let ghost = session.ghost().unwrap().position;
        assert!((ghost - Vec3::new(1.5, SURFACE_HEIGHT, 0.0)).length() < 1e-4);

        assert!(matches!(
            session.pointer_pressed(Mode::Design, &ray, &surface, &mut registry, &library),
            PressOutcome::Placed(_)
        ));
        let placed = registry.objects()[0].position;
        assert!((placed[0] - 1.5).abs() < 1e-4 && placed[2].abs() < 1e-4);

        // The same world ray now hits the rock
        assert!(matches!(
            session.pointer_pressed(Mode::Design, &ray, &surface, &mut registry, &library),
            PressOutcome::Toggled(_)
        ));
    }

    #[test]
    fn test_reset_pending_keeps_ghost() {
        let mut session = EditorSession::new();
        session.pointer_moved(Mode::Design, Some(&down_at(0.5, 0.5)), &Mat4::IDENTITY);
        session.wheel(Mode::Design, 1.0, false);
        session.reset_pending();
        assert_eq!(session.pending, PendingPlacement::default());
        assert_eq!(session.ghost().unwrap().rotation, 0.0);
    }
}
