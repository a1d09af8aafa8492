//! Ordered collection of placed objects plus the current selection

use super::{ObjectId, SceneObject};

/// Placed props in placement order
///
/// Every mutation bumps `revision`, which the persistence layer watches.
/// Operations on absent ids are no-ops, never errors.
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
    selection: Option<ObjectId>,
    revision: u64,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with loaded objects (revision 0)
    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            selection: None,
            revision: 0,
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.iter().any(|o| &o.id == id)
    }

    /// Random id not used by any current object
    pub fn fresh_id(&self) -> ObjectId {
        loop {
            let id = ObjectId::random();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Append an object
    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
        self.touch();
    }

    /// Remove the object with `id`, if present
    pub fn remove_by_id(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| &o.id == id)?;
        let removed = self.objects.remove(index);
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
        self.touch();
        Some(removed)
    }

    /// Pop the most recently added object
    pub fn undo_last(&mut self) -> Option<SceneObject> {
        let removed = self.objects.pop()?;
        if self.selection.as_ref() == Some(&removed.id) {
            self.selection = None;
        }
        self.touch();
        Some(removed)
    }

    /// Remove everything, selection included
    pub fn clear(&mut self) {
        self.selection = None;
        if self.objects.is_empty() {
            return;
        }
        self.objects.clear();
        self.touch();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────

    pub fn selection(&self) -> Option<&ObjectId> {
        self.selection.as_ref()
    }

    pub fn is_selected(&self, id: &ObjectId) -> bool {
        self.selection.as_ref() == Some(id)
    }

    /// Select `id`; ignored if no such object exists
    pub fn select(&mut self, id: &ObjectId) {
        if self.contains(id) {
            self.selection = Some(id.clone());
        }
    }

    /// Select `id`, or deselect it if it is already selected
    pub fn toggle_selection(&mut self, id: &ObjectId) {
        if self.is_selected(id) {
            self.selection = None;
        } else {
            self.select(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}
