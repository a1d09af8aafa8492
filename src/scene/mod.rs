//! Placed props on the island
//!
//! - `object`: the persisted record and its kind tag
//! - `registry`: ordered list + selection + change revision
//! - `archetype`: per-kind geometry
//! - `persist`: JSON slot load/save

mod archetype;
mod object;
mod persist;
mod registry;

pub use archetype::{tree, PropLibrary, SELECTION_COLOR, SNAP_COLOR};
pub use object::{ObjectId, PropKind, SceneObject};
pub use persist::{load_scene, SceneSaver};
pub use registry::SceneRegistry;

use crate::math::{ray_sphere_intersection, Ray};
use crate::render::Light;
use crate::storage::StorageError;
use macroquad::math::Mat4;
use std::fmt;

/// Errors from loading or saving the scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Text is not valid JSON of the expected shape
    Json(String),
    /// A record parsed but cannot be placed
    InvalidEntry(String),
    /// The storage slot could not be read or written
    Storage(StorageError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Json(msg) => write!(f, "malformed scene data: {}", msg),
            SceneError::InvalidEntry(msg) => write!(f, "invalid object: {}", msg),
            SceneError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::Json(e.to_string())
    }
}

impl From<StorageError> for SceneError {
    fn from(e: StorageError) -> Self {
        SceneError::Storage(e)
    }
}

/// Collect point lights from all placed props
///
/// `island` is the island-to-world matrix the objects are placed under.
pub fn collect_scene_lights(objects: &[SceneObject], library: &PropLibrary, island: &Mat4) -> Vec<Light> {
    objects
        .iter()
        .flat_map(|obj| {
            let world = *island * obj.to_matrix();
            library.get(obj.kind).world_lights(&world).collect::<Vec<_>>()
        })
        .collect()
}

/// Nearest placed object whose geometry the ray hits
///
/// The ray must be in island space. The bounding sphere rejects misses
/// before the triangles are tested.
pub fn pick_object<'a>(
    objects: &'a [SceneObject],
    library: &PropLibrary,
    ray: &Ray,
) -> Option<&'a SceneObject> {
    objects
        .iter()
        .filter_map(|obj| {
            let (center, radius) = library.get(obj.kind).bounding_sphere();
            if radius <= 0.0 {
                return None;
            }
            let placement = obj.to_matrix();
            let world_center = placement.transform_point3(center);
            ray_sphere_intersection(ray, world_center, radius * obj.scale)?;
            let local = ray.transformed(&placement.inverse());
            library.get(obj.kind).ray_hit(&local).map(|t| (t, obj))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, obj)| obj)
}
