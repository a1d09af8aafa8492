//! Scene persistence: the registry as a JSON array in one storage slot

use super::{SceneError, SceneObject, SceneRegistry};
use crate::storage::Storage;
use macroquad::logging::{error, info, warn};
use std::collections::HashSet;

/// Storage slot holding the placed objects
pub const STORAGE_KEY: &str = "invisible-runner-scene-v1";

/// Outcome of parsing a stored scene
#[derive(Debug, Default)]
pub struct LoadReport {
    pub objects: Vec<SceneObject>,
    /// Entries that were skipped, by array index
    pub rejected: Vec<(usize, SceneError)>,
}

pub fn serialize_scene(objects: &[SceneObject]) -> Result<String, SceneError> {
    Ok(serde_json::to_string(objects)?)
}

/// Parse stored text, keeping every entry that is individually valid
///
/// Fails only when the text is not a JSON array at all.
pub fn parse_scene(text: &str) -> Result<LoadReport, SceneError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(text)?;
    let mut report = LoadReport::default();
    let mut seen = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let object = match serde_json::from_value::<SceneObject>(entry) {
            Ok(object) => object,
            Err(e) => {
                report.rejected.push((index, SceneError::from(e)));
                continue;
            }
        };
        if let Err(e) = object.validate() {
            report.rejected.push((index, e));
            continue;
        }
        if !seen.insert(object.id.clone()) {
            report
                .rejected
                .push((index, SceneError::InvalidEntry(format!("duplicate id {}", object.id))));
            continue;
        }
        report.objects.push(object);
    }
    Ok(report)
}

/// Read the stored scene
///
/// Never fails: a missing slot is an empty scene, unreadable data is logged
/// and treated as empty.
pub fn load_scene(storage: &Storage) -> Vec<SceneObject> {
    let text = match storage.read_slot(STORAGE_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => {
            info!("No saved scene in {}", storage.describe());
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read saved scene: {}", e);
            return Vec::new();
        }
    };

    match parse_scene(&text) {
        Ok(report) => {
            for (index, reason) in &report.rejected {
                warn!("Skipping saved object #{}: {}", index, reason);
            }
            info!("Loaded {} objects from {}", report.objects.len(), storage.describe());
            report.objects
        }
        Err(e) => {
            warn!("Failed to load scene: {}", e);
            Vec::new()
        }
    }
}

/// Writes the registry back whenever its revision moves
#[derive(Debug)]
pub struct SceneSaver {
    saved_revision: u64,
}

impl SceneSaver {
    /// Saver that considers the registry's current state already stored
    pub fn new(registry: &SceneRegistry) -> Self {
        Self {
            saved_revision: registry.revision(),
        }
    }

    pub fn is_dirty(&self, registry: &SceneRegistry) -> bool {
        registry.revision() != self.saved_revision
    }

    /// Save if the registry changed since the last attempt
    ///
    /// Failures are logged once per change, not retried every frame.
    pub fn sync(&mut self, registry: &SceneRegistry, storage: &Storage) {
        if !self.is_dirty(registry) {
            return;
        }
        self.saved_revision = registry.revision();

        let result = serialize_scene(registry.objects())
            .and_then(|text| storage.write_slot(STORAGE_KEY, &text).map_err(SceneError::from));
        if let Err(e) = result {
            error!("Failed to save scene: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObjectId, PropKind};
    use macroquad::math::Vec3;
    use tempfile::TempDir;

    fn sample() -> Vec<SceneObject> {
        vec![
            SceneObject::new(ObjectId::new("aaaaaaaaa"), PropKind::Tree, Vec3::new(1.0, 0.2, -0.3), 0.0, 1.0),
            SceneObject::new(ObjectId::new("bbbbbbbbb"), PropKind::Lamp, Vec3::new(-1.5, 0.2, 0.5), 0.6, 2.3),
            SceneObject::new(ObjectId::new("ccccccccc"), PropKind::Fence, Vec3::new(0.0, 0.2, 2.0), -0.4, 0.2),
        ]
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let objects = sample();
        let text = serialize_scene(&objects).unwrap();
        let report = parse_scene(&text).unwrap();
        assert_eq!(report.objects, objects);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(parse_scene("{not json"), Err(SceneError::Json(_))));
        assert!(matches!(parse_scene("{\"id\":1}"), Err(SceneError::Json(_))));
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let text = r#"[
            {"id":"good","type":"ROCK","position":[0,0.2,0],"rotation":[0,0,0],"scale":1},
            {"id":"zero","type":"ROCK","position":[0,0.2,0],"rotation":[0,0,0],"scale":0},
            {"id":"neg","type":"ROCK","position":[0,0.2,0],"rotation":[0,0,0],"scale":-2},
            {"id":"short","type":"ROCK","position":[0,0.2],"rotation":[0,0,0],"scale":1},
            "garbage",
            {"id":"good","type":"BUSH","position":[1,0.2,0],"rotation":[0,0,0],"scale":1}
        ]"#;
        let report = parse_scene(text).unwrap();
        assert_eq!(report.objects.len(), 1);
        assert_eq!(report.objects[0].id.as_str(), "good");
        let rejected: Vec<usize> = report.rejected.iter().map(|(i, _)| *i).collect();
        assert_eq!(rejected, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unknown_type_survives_load() {
        let text = r#"[{"id":"x1","type":"WINDMILL","position":[0,0.2,0],"rotation":[0,0,0],"scale":1}]"#;
        let report = parse_scene(text).unwrap();
        assert_eq!(report.objects[0].kind, PropKind::Unknown);
    }

    #[test]
    fn test_load_missing_and_malformed_slot() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::with_base_dir(dir.path());
        assert!(load_scene(&storage).is_empty());

        storage.write_slot(STORAGE_KEY, "][ definitely not json").unwrap();
        assert!(load_scene(&storage).is_empty());
    }

    #[test]
    fn test_saver_writes_on_revision_change() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::with_base_dir(dir.path());
        let mut registry = SceneRegistry::new();
        let mut saver = SceneSaver::new(&registry);

        saver.sync(&registry, &storage);
        assert_eq!(storage.read_slot(STORAGE_KEY).unwrap(), None);

        for object in sample() {
            registry.add(object);
        }
        assert!(saver.is_dirty(&registry));
        saver.sync(&registry, &storage);
        assert!(!saver.is_dirty(&registry));
        assert_eq!(load_scene(&storage), sample());

        registry.undo_last();
        saver.sync(&registry, &storage);
        assert_eq!(load_scene(&storage).len(), 2);
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::with_base_dir(dir.path());
        let mut registry = SceneRegistry::with_objects(sample());
        let mut saver = SceneSaver::new(&registry);

        registry.clear();
        saver.sync(&registry, &storage);
        assert_eq!(storage.read_slot(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }
}
