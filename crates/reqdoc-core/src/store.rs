//! In-memory project storage.
//!
//! The store is an ordinary value: the host constructs one at startup and hands out references.
//! Access is not synchronized; hosts that share a store across requests must serialize access.

use crate::model::{InsertProject, Project, ProjectPatch};
use indexmap::IndexMap;

pub trait ProjectStorage {
    fn get(&self, id: &str) -> Option<Project>;
    /// Stores a new project under a freshly assigned id.
    fn create(&mut self, insert: InsertProject) -> Project;
    /// Merges `patch` into an existing project. Returns `None` for unknown ids.
    fn update(&mut self, id: &str, patch: ProjectPatch) -> Option<Project>;
    /// All projects in creation order.
    fn list_all(&self) -> Vec<Project>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProjectStore {
    projects: IndexMap<String, Project>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn next_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if !self.projects.contains_key(&id) {
                return id;
            }
        }
    }
}

impl ProjectStorage for MemoryProjectStore {
    fn get(&self, id: &str) -> Option<Project> {
        self.projects.get(id).cloned()
    }

    fn create(&mut self, insert: InsertProject) -> Project {
        let id = self.next_id();
        let project = Project::from_insert(id.clone(), insert);
        tracing::debug!(project_id = %id, name = %project.name, "project created");
        self.projects.insert(id, project.clone());
        project
    }

    fn update(&mut self, id: &str, patch: ProjectPatch) -> Option<Project> {
        let project = self.projects.get_mut(id)?;
        project.apply_patch(patch);
        tracing::debug!(project_id = %id, "project updated");
        Some(project.clone())
    }

    fn list_all(&self) -> Vec<Project> {
        self.projects.values().cloned().collect()
    }
}
