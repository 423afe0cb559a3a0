use speculate2::speculate;
use tempfile::TempDir;
use workbench::models::*;
use workbench::store::ProjectStore;

fn create_test_project(store: &mut ProjectStore) -> Project {
    store
        .create_project(CreateProjectInput {
            title: "Closet Organizer".to_string(),
            description: "Shelving and rods for the hall closet".to_string(),
            category: ProjectCategory::new("renovation"),
            difficulty: Difficulty::Intermediate,
            estimated_hours: 8,
            status: None,
            start_date: None,
            end_date: None,
            budget: Some(200.0),
            actual_cost: None,
            image_url: None,
            tutorial_url: None,
            notes: None,
        })
        .expect("Failed to create project")
}

speculate! {
    before {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("projects.json");
    }

    describe "opening" {
        it "seeds example projects when no snapshot exists" {
            let store = ProjectStore::open(path.clone()).expect("Failed to open store");

            let titles: Vec<&str> = store
                .get_all_projects()
                .iter()
                .map(|p| p.title.as_str())
                .collect();
            assert_eq!(titles, vec!["Kitchen Cabinet Renovation", "Garden Planter Box"]);
            // Seeding alone writes nothing; the first mutation does.
            assert!(!path.exists());
        }

        it "seeds when the snapshot is corrupt" {
            std::fs::write(&path, "not json{{{").expect("Failed to write snapshot");

            let store = ProjectStore::open(path.clone()).expect("Failed to open store");

            assert_eq!(store.get_all_projects().len(), 2);
            let on_disk = std::fs::read_to_string(&path).expect("Failed to read snapshot");
            assert_eq!(on_disk, "not json{{{");
        }

        it "seeds when the snapshot version is unknown" {
            std::fs::write(&path, r#"{"version": 99, "projects": []}"#)
                .expect("Failed to write snapshot");

            let store = ProjectStore::open(path.clone()).expect("Failed to open store");

            assert_eq!(store.get_all_projects().len(), 2);
        }

        it "loads an empty project list without seeding" {
            std::fs::write(&path, r#"{"version": 1, "projects": []}"#)
                .expect("Failed to write snapshot");

            let store = ProjectStore::open(path.clone()).expect("Failed to open store");

            assert!(store.get_all_projects().is_empty());
        }
    }

    describe "round trips" {
        it "persists every mutation" {
            let mut store = ProjectStore::open(path.clone()).expect("Failed to open store");

            create_test_project(&mut store);

            let raw = std::fs::read_to_string(&path).expect("Failed to read snapshot");
            let value: serde_json::Value =
                serde_json::from_str(&raw).expect("Failed to parse snapshot");
            assert_eq!(value["version"], 1);
            assert_eq!(
                value["projects"].as_array().expect("Expected an array").len(),
                3
            );
        }

        it "reloads exactly what was stored" {
            let mut store = ProjectStore::open(path.clone()).expect("Failed to open store");
            let project = create_test_project(&mut store);
            store
                .create_material(project.id, CreateMaterialInput {
                    name: "Closet rod".to_string(),
                    quantity: 2.0,
                    unit: Unit::new("pieces"),
                    cost: Some(24.0),
                    purchased: false,
                    category: MaterialCategory::new("hardware"),
                    notes: None,
                })
                .expect("Failed to create material");
            let step = store
                .create_step(project.id, CreateStepInput {
                    title: "Demo old shelf".to_string(),
                    description: String::new(),
                    duration_minutes: 60,
                    completed: false,
                    tools: vec!["pry bar".to_string()],
                    order: 1,
                })
                .expect("Failed to create step")
                .expect("Project not found");
            store
                .toggle_step_completion(project.id, step.id)
                .expect("Failed to toggle step");

            let before: Vec<Project> = store.get_all_projects().to_vec();
            drop(store);

            let reopened = ProjectStore::open(path.clone()).expect("Failed to reopen store");
            assert_eq!(reopened.get_all_projects(), before.as_slice());
        }

        it "writes the current state on flush" {
            let store = ProjectStore::open(path.clone()).expect("Failed to open store");
            assert!(!path.exists());

            store.flush().expect("Failed to flush");

            let raw = std::fs::read_to_string(&path).expect("Failed to read snapshot");
            let value: serde_json::Value =
                serde_json::from_str(&raw).expect("Failed to parse snapshot");
            assert_eq!(
                value["projects"].as_array().expect("Expected an array").len(),
                2
            );
        }
    }

    describe "write failures" {
        it "keeps the in-memory change and reports the error" {
            // A directory at the snapshot path makes every read and write fail.
            std::fs::create_dir_all(&path).expect("Failed to create blocking dir");
            let mut store = ProjectStore::open(path.clone()).expect("Failed to open store");
            assert_eq!(store.get_all_projects().len(), 2);
            let rx = store.subscribe();

            let result = store.create_project(CreateProjectInput {
                title: "Unsaveable".to_string(),
                description: String::new(),
                category: ProjectCategory::new("other"),
                difficulty: Difficulty::Beginner,
                estimated_hours: 1,
                status: None,
                start_date: None,
                end_date: None,
                budget: None,
                actual_cost: None,
                image_url: None,
                tutorial_url: None,
                notes: None,
            });

            assert!(result.is_err());
            assert_eq!(store.get_all_projects().len(), 3);
            assert!(rx.try_recv().is_ok());
        }
    }

    describe "memory stores" {
        it "never touches the filesystem" {
            let mut store = ProjectStore::open_memory();

            create_test_project(&mut store);
            store.flush().expect("Failed to flush");

            assert!(!path.exists());
            let entries = std::fs::read_dir(dir.path()).expect("Failed to list dir");
            assert_eq!(entries.count(), 0);
        }
    }
}
