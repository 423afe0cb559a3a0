use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of work on a project's build plan.
///
/// Steps belong exclusively to one project and are removed along with it.
/// `order` drives display sequencing only: values do not have to be
/// contiguous or unique, and ties keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Estimated working time in minutes.
    pub duration_minutes: u32,
    pub completed: bool,
    /// Names of the tools this step calls for. Duplicates are the caller's
    /// concern; the store keeps the list as given.
    pub tools: Vec<String>,
    /// Display position within the project.
    pub order: i32,
}

/// Input for adding a step to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStepInput {
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tools: Vec<String>,
    pub order: i32,
}

/// Input for updating an existing step. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStepInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<u32>,
    pub completed: Option<bool>,
    pub tools: Option<Vec<String>>,
    pub order: Option<i32>,
}
