use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable item on a project's shopping list.
///
/// Materials belong exclusively to one project: they are created, updated,
/// and deleted through the store's material operations and removed along
/// with the owning project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    /// Amount needed, measured in `unit`. Not validated by the store.
    pub quantity: f64,
    pub unit: Unit,
    /// Price for the full quantity. `None` counts as zero in cost totals.
    pub cost: Option<f64>,
    pub purchased: bool,
    pub category: MaterialCategory,
    pub notes: Option<String>,
}

/// Shopping-list bucket for a material.
///
/// An open set: [`MaterialCategory::SUGGESTED`] lists the values the UI
/// offers, but any label is accepted and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCategory(String);

impl MaterialCategory {
    pub const SUGGESTED: &'static [&'static str] =
        &["lumber", "hardware", "tools", "materials", "other"];

    /// Builds a normalized category: surrounding whitespace is trimmed and
    /// the label lowercased, so "Lumber " and "lumber" are the same value.
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

/// Measurement unit for a material quantity.
///
/// An open set like [`MaterialCategory`]: the suggested values cover common
/// hardware-store units, but any label is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    pub const SUGGESTED: &'static [&'static str] = &[
        "pieces", "feet", "inches", "yards", "pounds", "gallons", "quarts", "boxes", "packs",
    ];

    /// Builds a normalized unit: trimmed and lowercased.
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

/// Input for adding a material to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterialInput {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub cost: Option<f64>,
    #[serde(default)]
    pub purchased: bool,
    pub category: MaterialCategory,
    pub notes: Option<String>,
}

/// Input for updating an existing material. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMaterialInput {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<Unit>,
    pub cost: Option<f64>,
    pub purchased: Option<bool>,
    pub category: Option<MaterialCategory>,
    pub notes: Option<String>,
}
