//! The project store: owner and sole mutation authority for all projects.
//!
//! # Core Concepts
//!
//! All domain state lives in one [`ProjectStore`], constructed once at
//! session start. Callers pass fully-formed input structs in, receive owned
//! copies or shared borrows back, and never mutate entities directly.
//! Every mutation rewrites the on-disk snapshot in full and notifies
//! subscribers; reads are pure.
//!
//! The store is synchronous and single-owner: mutations take `&mut self`,
//! reads take `&self`. There is no locking and no async runtime.

mod event;
mod snapshot;

pub use event::StoreEvent;
pub use snapshot::seed_projects;

use std::path::PathBuf;
use std::sync::mpsc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::*;

/// File name of the snapshot inside the platform data directory.
const SNAPSHOT_FILE: &str = "projects.json";

/// Owns the project collection and persists it as a whole after every
/// mutation.
///
/// Missing mutation targets are reported through `Ok(None)` / `Ok(false)`
/// rather than errors, so callers can tell a miss from a persistence
/// failure. When a snapshot write fails the in-memory change is kept and
/// the error returned: the session degrades to memory-only and every later
/// mutation retries the write.
pub struct ProjectStore {
    projects: Vec<Project>,
    snapshot_path: Option<PathBuf>,
    subscribers: Vec<mpsc::Sender<StoreEvent>>,
}

impl ProjectStore {
    /// Open a store backed by the snapshot file at `path`.
    ///
    /// An absent or unreadable snapshot seeds the store with the built-in
    /// example projects instead of failing.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let projects = snapshot::load_or_seed(&path);
        Ok(Self {
            projects,
            snapshot_path: Some(path),
            subscribers: Vec::new(),
        })
    }

    /// Open a store backed by a snapshot in the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs =
            directories::ProjectDirs::from("", "", "workbench").ok_or(StoreError::NoDataDir)?;
        let path = dirs.data_dir().join(SNAPSHOT_FILE);
        Self::open(path)
    }

    /// Open an empty store with no persistence. Intended for tests and
    /// previews.
    pub fn open_memory() -> Self {
        Self {
            projects: Vec::new(),
            snapshot_path: None,
            subscribers: Vec::new(),
        }
    }

    /// Open a store preloaded with `projects`, with no persistence.
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self {
            projects,
            snapshot_path: None,
            subscribers: Vec::new(),
        }
    }

    // ============================================================
    // Project operations
    // ============================================================

    /// The full collection, in insertion order.
    pub fn get_all_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn create_project(&mut self, input: CreateProjectInput) -> Result<Project, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let status = input.status.unwrap_or(ProjectStatus::Planning);

        let project = Project {
            id,
            title: input.title,
            description: input.description,
            category: input.category,
            difficulty: input.difficulty,
            estimated_hours: input.estimated_hours,
            status,
            start_date: input.start_date,
            end_date: input.end_date,
            budget: input.budget,
            actual_cost: input.actual_cost,
            image_url: input.image_url,
            tutorial_url: input.tutorial_url,
            notes: input.notes,
            materials: Vec::new(),
            steps: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.projects.push(project.clone());
        self.commit(StoreEvent::ProjectCreated { project_id: id })?;

        Ok(project)
    }

    /// Merge the provided fields into the project. Optional fields that are
    /// `None` in the input keep their current values; an update cannot
    /// clear a field.
    pub fn update_project(
        &mut self,
        id: Uuid,
        input: UpdateProjectInput,
    ) -> Result<Option<Project>, StoreError> {
        let Some(idx) = self.projects.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let existing = self.projects[idx].clone();
        let now = Utc::now();

        let updated = Project {
            id,
            title: input.title.unwrap_or(existing.title),
            description: input.description.unwrap_or(existing.description),
            category: input.category.unwrap_or(existing.category),
            difficulty: input.difficulty.unwrap_or(existing.difficulty),
            estimated_hours: input.estimated_hours.unwrap_or(existing.estimated_hours),
            status: input.status.unwrap_or(existing.status),
            start_date: input.start_date.or(existing.start_date),
            end_date: input.end_date.or(existing.end_date),
            budget: input.budget.or(existing.budget),
            actual_cost: input.actual_cost.or(existing.actual_cost),
            image_url: input.image_url.or(existing.image_url),
            tutorial_url: input.tutorial_url.or(existing.tutorial_url),
            notes: input.notes.or(existing.notes),
            materials: existing.materials,
            steps: existing.steps,
            created_at: existing.created_at,
            updated_at: now,
        };

        self.projects[idx] = updated.clone();
        self.commit(StoreEvent::ProjectUpdated { project_id: id })?;

        Ok(Some(updated))
    }

    /// Remove the project together with its materials and steps.
    pub fn delete_project(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Ok(false);
        }

        self.commit(StoreEvent::ProjectDeleted { project_id: id })?;
        Ok(true)
    }

    // ============================================================
    // Material operations
    // ============================================================

    /// Add a material to the project's shopping list. Returns `Ok(None)`
    /// if the project does not exist.
    pub fn create_material(
        &mut self,
        project_id: Uuid,
        input: CreateMaterialInput,
    ) -> Result<Option<Material>, StoreError> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };

        let material = Material {
            id: Uuid::new_v4(),
            name: input.name,
            quantity: input.quantity,
            unit: input.unit,
            cost: input.cost,
            purchased: input.purchased,
            category: input.category,
            notes: input.notes,
        };

        project.materials.push(material.clone());
        project.updated_at = Utc::now();
        self.commit(StoreEvent::ProjectUpdated { project_id })?;

        Ok(Some(material))
    }

    pub fn update_material(
        &mut self,
        project_id: Uuid,
        material_id: Uuid,
        input: UpdateMaterialInput,
    ) -> Result<Option<Material>, StoreError> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };
        let Some(idx) = project.materials.iter().position(|m| m.id == material_id) else {
            return Ok(None);
        };
        let existing = project.materials[idx].clone();

        let updated = Material {
            id: material_id,
            name: input.name.unwrap_or(existing.name),
            quantity: input.quantity.unwrap_or(existing.quantity),
            unit: input.unit.unwrap_or(existing.unit),
            cost: input.cost.or(existing.cost),
            purchased: input.purchased.unwrap_or(existing.purchased),
            category: input.category.unwrap_or(existing.category),
            notes: input.notes.or(existing.notes),
        };

        project.materials[idx] = updated.clone();
        project.updated_at = Utc::now();
        self.commit(StoreEvent::ProjectUpdated { project_id })?;

        Ok(Some(updated))
    }

    /// Remove a material. A repeat call for the same id returns `Ok(false)`
    /// and changes nothing.
    pub fn delete_material(
        &mut self,
        project_id: Uuid,
        material_id: Uuid,
    ) -> Result<bool, StoreError> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(false);
        };

        let before = project.materials.len();
        project.materials.retain(|m| m.id != material_id);
        if project.materials.len() == before {
            return Ok(false);
        }

        project.updated_at = Utc::now();
        self.commit(StoreEvent::ProjectUpdated { project_id })?;
        Ok(true)
    }

    // ============================================================
    // Step operations
    // ============================================================

    /// Add a step to the project's build plan. Returns `Ok(None)` if the
    /// project does not exist.
    pub fn create_step(
        &mut self,
        project_id: Uuid,
        input: CreateStepInput,
    ) -> Result<Option<Step>, StoreError> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };

        let step = Step {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            duration_minutes: input.duration_minutes,
            completed: input.completed,
            tools: input.tools,
            order: input.order,
        };

        project.steps.push(step.clone());
        project.updated_at = Utc::now();
        self.commit(StoreEvent::ProjectUpdated { project_id })?;

        Ok(Some(step))
    }

    pub fn update_step(
        &mut self,
        project_id: Uuid,
        step_id: Uuid,
        input: UpdateStepInput,
    ) -> Result<Option<Step>, StoreError> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };
        let Some(idx) = project.steps.iter().position(|s| s.id == step_id) else {
            return Ok(None);
        };
        let existing = project.steps[idx].clone();

        let updated = Step {
            id: step_id,
            title: input.title.unwrap_or(existing.title),
            description: input.description.unwrap_or(existing.description),
            duration_minutes: input.duration_minutes.unwrap_or(existing.duration_minutes),
            completed: input.completed.unwrap_or(existing.completed),
            tools: input.tools.unwrap_or(existing.tools),
            order: input.order.unwrap_or(existing.order),
        };

        project.steps[idx] = updated.clone();
        project.updated_at = Utc::now();
        self.commit(StoreEvent::ProjectUpdated { project_id })?;

        Ok(Some(updated))
    }

    pub fn delete_step(&mut self, project_id: Uuid, step_id: Uuid) -> Result<bool, StoreError> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(false);
        };

        let before = project.steps.len();
        project.steps.retain(|s| s.id != step_id);
        if project.steps.len() == before {
            return Ok(false);
        }

        project.updated_at = Utc::now();
        self.commit(StoreEvent::ProjectUpdated { project_id })?;
        Ok(true)
    }

    /// Flip a step between done and not done, returning the step as stored.
    pub fn toggle_step_completion(
        &mut self,
        project_id: Uuid,
        step_id: Uuid,
    ) -> Result<Option<Step>, StoreError> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };
        let Some(step) = project.steps.iter_mut().find(|s| s.id == step_id) else {
            return Ok(None);
        };

        step.completed = !step.completed;
        let toggled = step.clone();
        project.updated_at = Utc::now();
        self.commit(StoreEvent::ProjectUpdated { project_id })?;

        Ok(Some(toggled))
    }

    // ============================================================
    // Queries
    // ============================================================

    /// Projects matching the filter, in insertion order.
    pub fn find_matching(&self, filter: &ProjectFilter) -> Vec<&Project> {
        self.projects.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Headline figures for the dashboard, computed fresh on every call.
    pub fn dashboard_summary(&self) -> DashboardSummary {
        DashboardSummary {
            total_projects: self.projects.len(),
            in_progress: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::InProgress)
                .count(),
            completed: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count(),
            total_budget: self.projects.iter().map(|p| p.budget.unwrap_or(0.0)).sum(),
        }
    }

    // ============================================================
    // Change subscriptions
    // ============================================================

    /// Register for change notifications. Every mutation sends one
    /// [`StoreEvent`] to each live receiver; dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: StoreEvent) {
        // Disconnected receivers are pruned on the way through.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    // ============================================================
    // Persistence
    // ============================================================

    /// Rewrite the snapshot from current state. A no-op `Ok` for memory
    /// stores. Call this at session end; mutations persist on their own.
    pub fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        snapshot::save(path, &self.projects)
    }

    /// Publish the event, then persist. The in-memory mutation has already
    /// happened when this runs, so a failed write leaves the session
    /// working from memory and surfaces as the operation's error.
    fn commit(&mut self, event: StoreEvent) -> Result<(), StoreError> {
        self.publish(event);

        if let Err(e) = self.flush() {
            tracing::warn!("Snapshot write failed, continuing in memory: {}", e);
            return Err(e);
        }
        Ok(())
    }
}

/// Criteria for narrowing the project list. Present criteria must all
/// match; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring match against title and description.
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub category: Option<ProjectCategory>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = project.title.to_lowercase().contains(&needle)
                || project.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if &project.category != category {
                return false;
            }
        }

        true
    }
}

/// Headline figures for the dashboard: project counts by activity and the
/// combined budget across all projects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Sum of project budgets, counting a missing budget as zero.
    pub total_budget: f64,
}
