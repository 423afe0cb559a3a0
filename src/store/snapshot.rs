use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::*;

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk snapshot document: the whole project collection under a format
/// version. Rewritten in full on every mutation; there is no diffing.
#[derive(Debug, Deserialize)]
struct Snapshot {
    version: u32,
    projects: Vec<Project>,
}

/// Borrowed view of [`Snapshot`] so saving never clones the collection.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    projects: &'a [Project],
}

/// Load the project collection from `path`, falling back to the built-in
/// seed projects when the snapshot is absent, unreadable, or from an
/// unsupported format version. Never fails: a session always starts with
/// a usable collection.
pub fn load_or_seed(path: &Path) -> Vec<Project> {
    match try_load(path) {
        Ok(Some(snapshot)) if snapshot.version == SNAPSHOT_VERSION => snapshot.projects,
        Ok(Some(snapshot)) => {
            tracing::warn!(
                "Snapshot version {} at {} is not supported, seeding example projects",
                snapshot.version,
                path.display()
            );
            seed_projects()
        }
        Ok(None) => {
            tracing::info!("No snapshot at {}, seeding example projects", path.display());
            seed_projects()
        }
        Err(e) => {
            tracing::warn!(
                "Discarding unreadable snapshot at {}: {}",
                path.display(),
                e
            );
            seed_projects()
        }
    }
}

fn try_load(path: &Path) -> Result<Option<Snapshot>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&content)?;

    Ok(Some(snapshot))
}

/// Serialize the full collection and replace the snapshot at `path`.
pub fn save(path: &Path, projects: &[Project]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(&SnapshotRef {
        version: SNAPSHOT_VERSION,
        projects,
    })?;
    fs::write(path, content)?;

    Ok(())
}

/// The starter collection a fresh install sees: one renovation mid-build
/// and one outdoor project still in planning. Ids and timestamps are
/// generated at seed time.
pub fn seed_projects() -> Vec<Project> {
    let now = Utc::now();

    vec![
        Project {
            id: Uuid::new_v4(),
            title: "Kitchen Cabinet Renovation".to_string(),
            description:
                "Complete kitchen cabinet makeover with new doors, hardware, and paint finish."
                    .to_string(),
            category: ProjectCategory::new("renovation"),
            difficulty: Difficulty::Intermediate,
            estimated_hours: 24,
            status: ProjectStatus::InProgress,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            end_date: None,
            budget: Some(800.0),
            actual_cost: Some(650.0),
            image_url: Some(
                "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=800".to_string(),
            ),
            tutorial_url: Some("https://example.com/cabinet-renovation".to_string()),
            notes: Some("Need to match existing countertop color".to_string()),
            materials: vec![
                Material {
                    id: Uuid::new_v4(),
                    name: "Cabinet Paint".to_string(),
                    quantity: 2.0,
                    unit: Unit::new("gallons"),
                    cost: Some(120.0),
                    purchased: true,
                    category: MaterialCategory::new("materials"),
                    notes: Some("Semi-gloss white finish".to_string()),
                },
                Material {
                    id: Uuid::new_v4(),
                    name: "Cabinet Hinges".to_string(),
                    quantity: 20.0,
                    unit: Unit::new("pieces"),
                    cost: Some(80.0),
                    purchased: true,
                    category: MaterialCategory::new("hardware"),
                    notes: None,
                },
            ],
            steps: vec![
                Step {
                    id: Uuid::new_v4(),
                    title: "Remove cabinet doors".to_string(),
                    description: "Carefully remove all cabinet doors and label them for reassembly"
                        .to_string(),
                    duration_minutes: 120,
                    completed: true,
                    tools: vec!["screwdriver".to_string(), "label maker".to_string()],
                    order: 1,
                },
                Step {
                    id: Uuid::new_v4(),
                    title: "Sand surfaces".to_string(),
                    description: "Sand all cabinet surfaces to prepare for painting".to_string(),
                    duration_minutes: 240,
                    completed: true,
                    tools: vec!["orbital sander".to_string(), "sandpaper".to_string()],
                    order: 2,
                },
            ],
            created_at: now,
            updated_at: now,
        },
        Project {
            id: Uuid::new_v4(),
            title: "Garden Planter Box".to_string(),
            description: "Build a raised garden planter box for herbs and vegetables.".to_string(),
            category: ProjectCategory::new("outdoor"),
            difficulty: Difficulty::Beginner,
            estimated_hours: 6,
            status: ProjectStatus::Planning,
            start_date: None,
            end_date: None,
            budget: Some(150.0),
            actual_cost: None,
            image_url: Some(
                "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?w=800".to_string(),
            ),
            tutorial_url: None,
            notes: None,
            materials: vec![Material {
                id: Uuid::new_v4(),
                name: "Cedar boards 2x8".to_string(),
                quantity: 4.0,
                unit: Unit::new("pieces"),
                cost: Some(60.0),
                purchased: false,
                category: MaterialCategory::new("lumber"),
                notes: None,
            }],
            steps: vec![Step {
                id: Uuid::new_v4(),
                title: "Cut lumber to size".to_string(),
                description: "Cut all boards to the required dimensions".to_string(),
                duration_minutes: 45,
                completed: false,
                tools: vec!["circular saw".to_string(), "measuring tape".to_string()],
                order: 1,
            }],
            created_at: now,
            updated_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_cover_a_renovation_and_an_outdoor_build() {
        let seeds = seed_projects();

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].title, "Kitchen Cabinet Renovation");
        assert_eq!(seeds[0].status, ProjectStatus::InProgress);
        assert_eq!(seeds[0].materials.len(), 2);
        assert_eq!(seeds[0].completion_percent(), 100.0);
        assert_eq!(seeds[1].title, "Garden Planter Box");
        assert_eq!(seeds[1].status, ProjectStatus::Planning);
        assert_ne!(seeds[0].id, seeds[1].id);
    }

    #[test]
    fn test_seed_ids_are_fresh_each_time() {
        let first = seed_projects();
        let second = seed_projects();
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_snapshot_document_round_trips() {
        let projects = seed_projects();
        let content = serde_json::to_string_pretty(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            projects: &projects,
        })
        .unwrap();

        let parsed: Snapshot = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed.version, SNAPSHOT_VERSION);
        assert_eq!(parsed.projects, projects);
    }

    #[test]
    fn test_snapshot_parses_known_document() {
        let content = r#"{
            "version": 1,
            "projects": [
                {
                    "id": "4bcb3384-45b4-4a58-8b3c-52ab0d5f4d0c",
                    "title": "Fence Repair",
                    "description": "Replace two rotten posts",
                    "category": "repair",
                    "difficulty": "beginner",
                    "estimated_hours": 3,
                    "status": "in-progress",
                    "start_date": "2024-03-02",
                    "end_date": null,
                    "budget": 90.0,
                    "actual_cost": null,
                    "image_url": null,
                    "tutorial_url": null,
                    "notes": null,
                    "materials": [
                        {
                            "id": "9a6429a5-70c5-4a3b-a873-0a47a1e64b52",
                            "name": "Fence post",
                            "quantity": 2.0,
                            "unit": "pieces",
                            "cost": 38.0,
                            "purchased": false,
                            "category": "lumber",
                            "notes": null
                        }
                    ],
                    "steps": [
                        {
                            "id": "6a24ad9e-5a53-4c5e-9a14-174a1c71f7a7",
                            "title": "Dig out old posts",
                            "description": "",
                            "duration_minutes": 60,
                            "completed": false,
                            "tools": ["shovel"],
                            "order": 1
                        }
                    ],
                    "created_at": "2024-03-01T09:00:00Z",
                    "updated_at": "2024-03-01T09:00:00Z"
                }
            ]
        }"#;

        let parsed: Snapshot = serde_json::from_str(content).unwrap();
        let project = &parsed.projects[0];

        assert_eq!(project.title, "Fence Repair");
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.category.as_str(), "repair");
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(project.materials[0].unit.as_str(), "pieces");
        assert_eq!(project.steps[0].duration_minutes, 60);
    }
}
