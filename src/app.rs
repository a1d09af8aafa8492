//! Application state and per-frame orchestration
//!
//! One `AppState` owns the session (mode, view, weather, editing session),
//! the world, and the persisted registry. Keyboard shortcuts and HUD clicks
//! both end up in `dispatch`.

use crate::camera::{CameraRig, CameraView};
use crate::editor::{build_context, create_editor_actions, flags, tool_for_action, EditorSession, Mode, PressOutcome};
use crate::math::{screen_to_ray, Ray};
use crate::render::{Light, Lighting, Material, MeshBatch};
use crate::runner::{animate, Pose, RunnerFigure};
use crate::scene::{collect_scene_lights, load_scene, PropLibrary, SceneRegistry, SceneSaver, SELECTION_COLOR, SNAP_COLOR};
use crate::storage::Storage;
use crate::ui::{draw_hud, draw_tooltip, ActionContext, ActionRegistry, HudCommand, HudLayout, HudState, MouseState, UiContext};
use crate::world::{DebrisField, Island, RainPool, Weather};
use macroquad::logging::{debug, info};
use macroquad::prelude::*;

/// Helper light under a glowing ghost (lamp, crystal)
const GHOST_LIGHT_HEIGHT: f32 = 0.5;
const GHOST_LIGHT_RANGE: f32 = 3.0;
const GHOST_OPACITY: f32 = 0.5;
const GHOST_RING_OPACITY: f32 = 0.3;
/// Rings float just above the surface to avoid z-fighting
const SELECTION_RING_LIFT: f32 = 0.05;
const GHOST_RING_LIFT: f32 = 0.02;

pub struct AppState {
    pub mode: Mode,
    pub view: CameraView,
    pub weather: Weather,
    pub session: EditorSession,
    pub registry: SceneRegistry,
    /// Clear Scene dialog is showing
    pub confirm_clear: bool,
    library: PropLibrary,
    storage: Storage,
    saver: SceneSaver,
    island: Island,
    debris: DebrisField,
    rain: RainPool,
    figure: RunnerFigure,
    pose: Pose,
    rig: CameraRig,
    actions: ActionRegistry,
    ui: UiContext,
    batch: MeshBatch,
    /// Seconds since start
    time: f32,
}

impl AppState {
    /// Load the saved scene from `storage` and build the world
    pub fn new(storage: Storage, seed: u32) -> Self {
        let registry = SceneRegistry::with_objects(load_scene(&storage));
        let saver = SceneSaver::new(&registry);
        Self {
            mode: Mode::default(),
            view: CameraView::default(),
            weather: Weather::default(),
            session: EditorSession::new(),
            registry,
            confirm_clear: false,
            library: PropLibrary::new(),
            storage,
            saver,
            island: Island::new(seed),
            debris: DebrisField::new(seed.wrapping_add(1)),
            rain: RainPool::new(seed.wrapping_add(2)),
            figure: RunnerFigure::new(),
            pose: animate(0.0, false, Pose::default()),
            rig: CameraRig::new(),
            actions: create_editor_actions(),
            ui: UiContext::new(),
            batch: MeshBatch::new(),
            time: 0.0,
        }
    }

    pub fn action_context(&self) -> ActionContext {
        let mut bits = 0;
        if self.session.snap {
            bits |= flags::SNAP_ON;
        }
        if self.weather.is_raining() {
            bits |= flags::RAINING;
        }
        build_context(
            self.mode.is_design(),
            self.registry.len(),
            self.registry.selection().is_some(),
            self.confirm_clear,
            bits,
        )
    }

    fn hud_state(&self) -> HudState {
        HudState {
            mode: self.mode,
            view: self.view,
            weather: self.weather,
            tool: self.session.tool,
            snap: self.session.snap,
            has_selection: self.registry.selection().is_some(),
            entity_count: self.registry.len(),
            confirm_open: self.confirm_clear,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.session.mode_changed(&mut self.registry);
        debug!("Mode: {}", mode.label());
    }

    /// Run an action if it is enabled right now
    pub fn dispatch(&mut self, id: &str) {
        if !self.actions.is_enabled(id, &self.action_context()) {
            return;
        }
        match id {
            "edit.undo" => {
                self.registry.undo_last();
            }
            "edit.delete" => {
                if let Some(selected) = self.registry.selection().cloned() {
                    self.registry.remove_by_id(&selected);
                }
            }
            "scene.clear" => self.confirm_clear = true,
            "selection.clear" => self.registry.clear_selection(),
            "snap.toggle" => self.session.toggle_snap(),
            "placement.reset" => self.session.reset_pending(),
            "mode.toggle" => self.set_mode(self.mode.toggle()),
            "weather.toggle" => self.weather = self.weather.toggle(),
            "dialog.confirm" => {
                self.registry.clear();
                self.confirm_clear = false;
                info!("Scene cleared");
            }
            "dialog.cancel" => self.confirm_clear = false,
            _ => {
                if let Some(kind) = tool_for_action(id) {
                    self.session.set_tool(kind);
                }
            }
        }
    }

    /// Route a world-space pointer ray (`None` off-canvas or over the HUD)
    pub fn pointer(&mut self, ray: Option<&Ray>, pressed: bool) -> PressOutcome {
        let surface = self.island.world_matrix();
        self.session.pointer_moved(self.mode, ray, &surface);
        match ray {
            Some(ray) if pressed => {
                self.session
                    .pointer_pressed(self.mode, ray, &surface, &mut self.registry, &self.library)
            }
            _ => PressOutcome::Ignored,
        }
    }

    /// Advance clocks: pose, island spin, particles, camera
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        let t = self.time;
        let simulating = !self.mode.is_design();

        self.pose = animate(t, !simulating, self.pose);
        self.island.update(t, simulating);
        self.debris.update(t);
        if self.weather.is_raining() {
            self.rain.update(dt);
        }
        self.rig.update(self.view, self.mode, dt);
    }

    /// Write the registry back if it changed
    pub fn persist(&mut self) {
        self.saver.sync(&self.registry, &self.storage);
    }

    /// One full frame: input, update, save, draw
    pub fn frame(&mut self) {
        let dt = get_frame_time();
        let (sw, sh) = (screen_width(), screen_height());
        let mouse = MouseState::capture();
        self.ui.begin_frame(mouse);

        // Keyboard
        for id in self.actions.process_triggers(&self.action_context()) {
            self.dispatch(id);
        }

        // Pointer and wheel, unless the HUD owns them
        let layout = HudLayout::compute(sw, sh, &self.hud_state());
        let over_hud = layout.blocks(mouse.x, mouse.y);
        let ray = if over_hud { None } else { self.pointer_ray(vec2(mouse.x, mouse.y), vec2(sw, sh)) };
        match self.pointer(ray.as_ref(), mouse.left_pressed) {
            PressOutcome::Placed(id) => debug!("Placed {}", id),
            PressOutcome::Toggled(id) => debug!("Toggled selection of {}", id),
            PressOutcome::Ignored => {}
        }
        if !over_hud {
            self.session.wheel(self.mode, mouse.wheel, mouse.shift);
        }

        self.update(dt);
        self.persist();

        self.draw_world(sw / sh.max(1.0));

        // HUD reflects this frame's state; its clicks apply next frame's view
        set_default_camera();
        let state = self.hud_state();
        let layout = HudLayout::compute(sw, sh, &state);
        let action_ctx = self.action_context();
        let commands = draw_hud(&mut self.ui, &layout, &state, &self.actions, &action_ctx);
        draw_tooltip(&self.ui);
        for command in commands {
            match command {
                HudCommand::SetMode(mode) => self.set_mode(mode),
                HudCommand::SetView(view) => self.view = view,
                HudCommand::Action(id) => self.dispatch(id),
            }
        }
    }

    /// Pointer ray in island space
    fn pointer_ray(&self, screen: Vec2, size: Vec2) -> Option<Ray> {
        let aspect = size.x / size.y.max(1.0);
        let inverse_view_proj = self.rig.view_projection(aspect).inverse();
        screen_to_ray(screen, size, &inverse_view_proj)
    }

    fn draw_world(&mut self, aspect: f32) {
        let atmosphere = self.weather.atmosphere();
        clear_background(atmosphere.background);
        let mut camera = self.rig.camera3d();
        camera.aspect = Some(aspect);
        set_camera(&camera);

        let island = self.island.world_matrix();
        let mut extra = collect_scene_lights(self.registry.objects(), &self.library, &island);
        if let Some(ghost) = self.session.ghost() {
            if PropLibrary::ghost_lit(ghost.kind) {
                let at = island.transform_point3(ghost.position + Vec3::Y * GHOST_LIGHT_HEIGHT);
                extra.push(Light::point(at, GHOST_LIGHT_RANGE, 1.0, WHITE));
            }
        }
        let lighting = atmosphere.lighting(self.rig.position, extra);

        self.island.draw(&mut self.batch, &lighting);
        self.debris.draw(&island, &mut self.batch, &lighting);
        self.draw_props(&island, &lighting);
        self.figure.draw(&self.pose, &Island::scene_matrix(), &mut self.batch, &lighting);
        self.batch.draw();

        if self.weather.is_raining() {
            self.rain.draw();
        }
    }

    fn draw_props(&mut self, island: &Mat4, lighting: &Lighting) {
        for object in self.registry.objects() {
            let world = *island * object.to_matrix();
            self.batch
                .push_assembly(self.library.get(object.kind), &world, 1.0, lighting);

            if self.registry.is_selected(&object.id) {
                let ring = *island
                    * Mat4::from_scale_rotation_translation(
                        Vec3::splat(object.scale),
                        Quat::IDENTITY,
                        Vec3::from_array(object.position) + Vec3::Y * SELECTION_RING_LIFT,
                    );
                self.batch
                    .push(&self.library.selection_ring, &ring, &Material::unlit(SELECTION_COLOR), lighting);
            }
        }

        let Some(ghost) = self.session.ghost() else {
            return;
        };
        let world = *island * ghost.to_matrix();
        self.batch
            .push_assembly(self.library.get(ghost.kind), &world, GHOST_OPACITY, lighting);

        let ring_color = if self.session.snap { SNAP_COLOR } else { WHITE };
        let ring = *island
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(ghost.scale),
                Quat::IDENTITY,
                ghost.position + Vec3::Y * GHOST_RING_LIFT,
            );
        let ring_material = Material::unlit(ring_color).translucent(GHOST_RING_OPACITY);
        self.batch.push(&self.library.ghost_ring, &ring, &ring_material, lighting);

        if self.session.snap {
            let marker = *island * Mat4::from_translation(ghost.position);
            self.batch
                .push(&self.library.snap_marker, &marker, &Material::unlit(SNAP_COLOR), lighting);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PropKind;
    use crate::world::SURFACE_HEIGHT;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> AppState {
        AppState::new(Storage::with_base_dir(dir.path()), 7)
    }

    /// World ray straight down onto island-local (x, z)
    fn down_at(app: &AppState, x: f32, z: f32) -> Ray {
        let island = app.island.world_matrix();
        Ray::new(
            island.transform_point3(Vec3::new(x, 5.0, z)),
            island.transform_vector3(Vec3::NEG_Y),
        )
    }

    #[test]
    fn test_starts_in_simulation_with_empty_scene() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        assert_eq!(app.mode, Mode::Simulation);
        assert_eq!(app.view, CameraView::Default);
        assert!(app.registry.is_empty());
    }

    #[test]
    fn test_placement_only_in_design() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let ray = down_at(&app, 1.0, -0.3);
        assert_eq!(app.pointer(Some(&ray), true), PressOutcome::Ignored);
        assert!(app.registry.is_empty());

        app.dispatch("mode.toggle");
        assert!(matches!(app.pointer(Some(&ray), true), PressOutcome::Placed(_)));
        assert_eq!(app.registry.len(), 1);
        let placed = &app.registry.objects()[0];
        assert_eq!(placed.kind, PropKind::Tree);
        assert!((placed.position[1] - SURFACE_HEIGHT).abs() < 1e-5);
    }

    #[test]
    fn test_tool_and_snap_shortcuts() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        // Disabled outside design
        app.dispatch("tool.2");
        assert_eq!(app.session.tool, PropKind::Tree);

        app.set_mode(Mode::Design);
        app.dispatch("tool.2");
        app.dispatch("snap.toggle");
        let ray = down_at(&app, 1.23, 0.77);
        app.pointer(Some(&ray), true);
        let placed = &app.registry.objects()[0];
        assert_eq!(placed.kind, PropKind::Rock);
        assert_eq!((placed.position[0], placed.position[2]), (1.0, 1.0));
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.set_mode(Mode::Design);
        app.dispatch("tool.2");
        let ray = down_at(&app, -2.0, 0.0);
        app.pointer(Some(&ray), true);
        let ray = down_at(&app, 2.0, 0.0);
        app.pointer(Some(&ray), true);

        app.dispatch("scene.clear");
        assert!(app.confirm_clear);
        // Other actions are blocked while the dialog is up
        app.dispatch("edit.undo");
        assert_eq!(app.registry.len(), 2);

        app.dispatch("dialog.cancel");
        assert!(!app.confirm_clear);
        assert_eq!(app.registry.len(), 2);

        app.dispatch("scene.clear");
        app.dispatch("dialog.confirm");
        assert!(!app.confirm_clear);
        assert!(app.registry.is_empty());
    }

    #[test]
    fn test_mode_switch_drops_selection_and_ghost() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.set_mode(Mode::Design);
        let ray = down_at(&app, 1.0, 1.0);
        app.pointer(Some(&ray), true);
        // Pressing the placed prop selects it
        assert!(matches!(app.pointer(Some(&ray), true), PressOutcome::Toggled(_)));
        assert!(app.registry.selection().is_some());
        assert!(app.session.ghost().is_some());

        app.dispatch("mode.toggle");
        assert!(app.registry.selection().is_none());
        assert!(app.session.ghost().is_none());
    }

    #[test]
    fn test_delete_removes_selected() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.set_mode(Mode::Design);
        app.dispatch("tool.2");
        let ray = down_at(&app, -2.0, 0.0);
        app.pointer(Some(&ray), true);
        let ray = down_at(&app, 2.0, 0.0);
        app.pointer(Some(&ray), true);
        app.pointer(Some(&ray), true);
        app.dispatch("edit.delete");
        assert_eq!(app.registry.len(), 1);
        assert!(app.registry.selection().is_none());
        assert_eq!(app.registry.objects()[0].position[0], -2.0);
    }

    #[test]
    fn test_changes_persist_across_restart() {
        let dir = TempDir::new().unwrap();
        {
            let mut app = app(&dir);
            app.set_mode(Mode::Design);
            let ray = down_at(&app, 0.5, 0.5);
        app.pointer(Some(&ray), true);
            app.persist();
        }
        let app = app(&dir);
        assert_eq!(app.registry.len(), 1);
        assert_eq!(app.registry.objects()[0].position[0], 0.5);
    }

    #[test]
    fn test_update_pauses_runner_in_design() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.update(0.1);
        let running = app.pose;
        app.set_mode(Mode::Design);
        app.update(0.1);
        assert_eq!(app.pose, running);
        app.set_mode(Mode::Simulation);
        app.update(0.1);
        assert_ne!(app.pose, running);
    }

    #[test]
    fn test_weather_toggle_sets_flag() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(!app.action_context().has_flag(flags::RAINING));
        app.dispatch("weather.toggle");
        assert!(app.weather.is_raining());
        assert!(app.action_context().has_flag(flags::RAINING));
    }
}
