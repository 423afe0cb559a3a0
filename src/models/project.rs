use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Material, Step};

/// A DIY home-improvement undertaking.
///
/// Projects are the top-level unit users plan, shop for, and build. Each
/// project owns its materials (the shopping list) and steps (the build
/// plan); both live and die with the project. Derived figures such as
/// completion percentage and cost totals are computed on demand from this
/// struct and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    pub difficulty: Difficulty,
    /// Estimated total effort in hours.
    pub estimated_hours: u32,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub image_url: Option<String>,
    pub tutorial_url: Option<String>,
    pub notes: Option<String>,
    /// Owned shopping list, in insertion order.
    pub materials: Vec<Material>,
    /// Owned build plan, in insertion order. Use [`Project::steps_in_order`]
    /// for display.
    pub steps: Vec<Step>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Fraction of steps completed, as a percentage in `0.0..=100.0`.
    /// A project with no steps counts as 0% complete.
    pub fn completion_percent(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.completed_step_count() as f64 / self.steps.len() as f64 * 100.0
    }

    pub fn completed_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Sum of material costs. Materials without a cost count as zero.
    pub fn total_material_cost(&self) -> f64 {
        self.materials.iter().map(|m| m.cost.unwrap_or(0.0)).sum()
    }

    /// Sum of costs over purchased materials only.
    pub fn purchased_material_cost(&self) -> f64 {
        self.materials
            .iter()
            .filter(|m| m.purchased)
            .map(|m| m.cost.unwrap_or(0.0))
            .sum()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn purchased_material_count(&self) -> usize {
        self.materials.iter().filter(|m| m.purchased).count()
    }

    /// Estimated minutes across all steps.
    pub fn total_step_minutes(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_minutes).sum()
    }

    /// Estimated minutes across completed steps.
    pub fn completed_step_minutes(&self) -> u32 {
        self.steps
            .iter()
            .filter(|s| s.completed)
            .map(|s| s.duration_minutes)
            .sum()
    }

    /// Budget left after the full material list. A missing budget counts
    /// as zero, so this goes negative once materials cost anything.
    pub fn remaining_budget(&self) -> f64 {
        self.budget.unwrap_or(0.0) - self.total_material_cost()
    }

    /// Steps sorted by `order` for display. Ties keep insertion order.
    pub fn steps_in_order(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }

    /// Default `order` for the next step appended to this project.
    pub fn next_step_order(&self) -> i32 {
        self.steps.len() as i32 + 1
    }
}

/// Where a project stands in its lifecycle.
///
/// - `Planning`: Scoping and shopping, no work started yet
/// - `InProgress`: Actively being built
/// - `Completed`: All work finished
/// - `Paused`: On hold, waiting on time, parts, or weather
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planning" => Some(Self::Planning),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "paused" => Some(Self::Paused),
            _ => None,
        }
    }
}

/// How much skill a project calls for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Kind of work a project involves.
///
/// An open set: [`ProjectCategory::SUGGESTED`] lists the values the UI
/// offers, but any label is accepted and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectCategory(String);

impl ProjectCategory {
    pub const SUGGESTED: &'static [&'static str] =
        &["furniture", "renovation", "outdoor", "repair", "craft", "other"];

    /// Builds a normalized category: trimmed and lowercased.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_suggested(&self) -> bool {
        Self::SUGGESTED.contains(&self.0.as_str())
    }
}

/// Input for creating a new project. Materials and steps are added through
/// their own operations after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    pub difficulty: Difficulty,
    pub estimated_hours: u32,
    /// Initial status. Defaults to `Planning` if not specified.
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub image_url: Option<String>,
    pub tutorial_url: Option<String>,
    pub notes: Option<String>,
}

/// Input for updating an existing project. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProjectCategory>,
    pub difficulty: Option<Difficulty>,
    pub estimated_hours: Option<u32>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub image_url: Option<String>,
    pub tutorial_url: Option<String>,
    pub notes: Option<String>,
}
