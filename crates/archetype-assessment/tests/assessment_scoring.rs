use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use archetype_assessment::assessment::{
    AssessmentService, AssessmentSubmission, CatalogError, CategoryDefinition, CategoryId,
    CategoryProvider, ResistanceBand, Response, ScoringEngine, StaticCatalog,
};
use serde_json::json;

fn two_archetype_definition() -> serde_json::Value {
    json!({
        "id": "pair",
        "name": "Pair",
        "archetypes": [
            { "id": "a", "name": "Archetype A" },
            { "id": "b", "name": "Archetype B" }
        ],
        "direct": [
            { "id": "q-a", "kind": "direct", "text": "A statement", "loading": { "primary": "a" } }
        ],
        "forced_choice": [
            { "id": "fc-1", "statements": [
                { "archetype": "b", "text": "B statement" },
                { "archetype": "unscored", "label": "Distractor" }
            ] }
        ]
    })
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "archetype-assessment-{name}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

#[test]
fn two_archetype_scenario_from_json_definition() {
    let category: CategoryDefinition =
        serde_json::from_value(two_archetype_definition()).expect("definition parses");
    let responses: Vec<Response> = serde_json::from_value(json!([
        { "id": "q-a", "kind": "direct", "value": 5 },
        { "id": "fc-1", "kind": "forced_choice",
          "value": { "most_like_me": "b", "least_like_me": "unscored" } }
    ]))
    .expect("responses parse");

    let result = ScoringEngine::default()
        .score(&category, &responses)
        .expect("scores");

    assert_eq!(result.dominant_archetype.id.as_str(), "a");
    assert_eq!(result.secondary_archetype.id.as_str(), "b");
    assert_eq!(result.archetype_scores[0].rank, 1);
    assert_eq!(result.archetype_scores[1].raw_score, 2.0);
    assert_eq!(result.archetype_scores[1].percentage, 0);
    assert_eq!(result.resistance_percentage, 5);
    assert_eq!(result.resistance_level, ResistanceBand::Low);
    assert!(!result.has_high_resistance_archetype);

    let serialized = serde_json::to_value(&result).expect("result serializes");
    assert_eq!(serialized["archetype_scores"][0]["resistance_level"], "low");
    assert!(serialized.get("balancing_index").is_none());
}

#[test]
fn directory_catalog_loads_definitions_by_file_stem() {
    let dir = scratch_dir("catalog");
    fs::write(
        dir.join("pair.json"),
        serde_json::to_vec_pretty(&two_archetype_definition()).expect("serializes"),
    )
    .expect("write definition");
    fs::write(dir.join("broken.json"), b"{ \"id\": ").expect("write broken");
    fs::write(dir.join("notes.txt"), b"ignored").expect("write notes");

    let catalog = StaticCatalog::from_dir(&dir).expect("directory registers");
    let ids: Vec<String> = catalog
        .categories()
        .into_iter()
        .map(|summary| summary.id.0)
        .collect();
    assert_eq!(ids, vec!["broken", "pair"]);

    let pair = catalog.load(&CategoryId::new("pair")).expect("pair loads");
    assert_eq!(pair.archetypes.len(), 2);

    let err = catalog
        .load(&CategoryId::new("broken"))
        .expect_err("broken definition fails");
    assert!(matches!(err, CatalogError::Parse { .. }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_is_reported() {
    let err = StaticCatalog::from_dir("/definitely/not/a/catalog")
        .err()
        .expect("missing directory fails");
    assert!(matches!(err, CatalogError::Io { .. }));
}

mod memory {
    use archetype_assessment::assessment::{
        AssessmentId, AssessmentRecord, AssessmentRepository, RepositoryError,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct Repository(pub Mutex<Vec<AssessmentRecord>>);

    impl AssessmentRepository for Repository {
        fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
            self.0.lock().expect("mutex").push(record.clone());
            Ok(record)
        }

        fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
            Ok(self
                .0
                .lock()
                .expect("mutex")
                .iter()
                .find(|record| &record.id == id)
                .cloned())
        }

        fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
            Ok(self
                .0
                .lock()
                .expect("mutex")
                .iter()
                .rev()
                .take(limit)
                .cloned()
                .collect())
        }
    }
}

#[test]
fn service_submission_against_bundled_leadership() {
    let service = AssessmentService::new(
        Arc::new(StaticCatalog::bundled()),
        Arc::new(memory::Repository::default()),
        ScoringEngine::default(),
    );

    let submission: AssessmentSubmission = serde_json::from_value(json!({
        "category_id": "leadership",
        "responses": [
            { "id": "ld-d1", "kind": "direct", "value": 5 },
            { "id": "ld-o1", "kind": "oblique", "value": 5 },
            { "id": "ld-s1", "kind": "scenario", "value": { "option_id": "ld-s1-4" } },
            { "id": "ld-fc1", "kind": "forced_choice",
              "value": { "most_like_me": "controller", "least_like_me": "skeptic" } },
            { "id": "ld-fc3", "kind": "forced_choice",
              "value": { "most_like_me": "controller", "least_like_me": "lone_wolf" } },
            { "id": "ld-b1", "kind": "balancing", "value": 2 }
        ]
    }))
    .expect("submission parses");

    let record = service.submit(submission).expect("submission scores");
    let controller = &record.result.archetype_scores[0];

    // 5 + 5 + 5 + 2 + 2 + 4 = 23 -> 95%, balancing index 75 -> -3.
    assert_eq!(controller.archetype_id.as_str(), "controller");
    assert_eq!(controller.raw_score, 23.0);
    assert_eq!(record.result.balancing_index, Some(75));
    assert_eq!(controller.percentage, 92);
    assert_eq!(record.result.dominant_archetype.name, "The Controller");
    assert!(record.result.has_high_resistance_archetype);

    let fetched = service.get(&record.id).expect("stored");
    assert_eq!(fetched.result, record.result);
}

#[test]
fn camel_case_forced_choice_answer_is_scored() {
    let category = StaticCatalog::bundled()
        .load(&CategoryId::new("leadership"))
        .expect("bundled category loads");
    let responses: Vec<Response> = serde_json::from_value(json!([
        { "id": "ld-fc1", "kind": "forcedChoice",
          "value": { "mostLikeMe": "controller", "leastLikeMe": "skeptic" } }
    ]))
    .expect("responses parse");

    let result = ScoringEngine::default()
        .score(&category, &responses)
        .expect("scores");

    let raw = |id: &str| {
        result
            .archetype_scores
            .iter()
            .find(|score| score.archetype_id.as_str() == id)
            .map(|score| score.raw_score)
    };
    assert_eq!(raw("controller"), Some(2.0));
    assert_eq!(raw("skeptic"), Some(-1.0));
}
