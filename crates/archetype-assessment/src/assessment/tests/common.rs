use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response as HttpResponse;
use serde_json::Value;

use crate::assessment::catalog::StaticCatalog;
use crate::assessment::domain::{
    Archetype, ArchetypeId, ArchetypeLoading, CategoryDefinition, CategoryId, ForcedChoiceBlock,
    ForcedChoiceStatement, Question, QuestionKind, QuestionOption, Response, ResponseKind,
};
use crate::assessment::repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, RepositoryError,
};
use crate::assessment::scoring::ScoringEngine;
use crate::assessment::service::AssessmentService;
use crate::assessment::{assessment_router, AssessmentSubmission};

pub(super) fn id(value: &str) -> ArchetypeId {
    ArchetypeId::new(value)
}

fn archetype(value: &str, name: &str) -> Archetype {
    Archetype {
        id: id(value),
        name: name.to_string(),
    }
}

pub(super) fn question(
    question_id: &str,
    kind: QuestionKind,
    loading: Option<ArchetypeLoading>,
    reverse_coded: bool,
) -> Question {
    Question {
        id: question_id.to_string(),
        kind,
        text: format!("Statement for {question_id}"),
        loading,
        reverse_coded,
        options: Vec::new(),
    }
}

pub(super) fn primary(value: &str) -> Option<ArchetypeLoading> {
    Some(ArchetypeLoading::Primary(id(value)))
}

fn empty_category(category_id: &str, archetypes: Vec<Archetype>) -> CategoryDefinition {
    CategoryDefinition {
        id: CategoryId::new(category_id),
        name: category_id.to_string(),
        archetypes,
        direct: Vec::new(),
        oblique: Vec::new(),
        scenario: Vec::new(),
        forced_choice: Vec::new(),
        balancing: Vec::new(),
    }
}

/// Two archetypes: `a` with one direct item, `b` with one forced-choice block.
pub(super) fn pair_category() -> CategoryDefinition {
    let mut category = empty_category(
        "pair",
        vec![archetype("a", "Archetype A"), archetype("b", "Archetype B")],
    );
    category.direct = vec![question("q-a", QuestionKind::Direct, primary("a"), false)];
    category.forced_choice = vec![ForcedChoiceBlock {
        id: "fc-b".to_string(),
        statements: vec![
            ForcedChoiceStatement {
                archetype: id("b"),
                text: "I recognise myself in B.".to_string(),
            },
            ForcedChoiceStatement {
                archetype: id("filler"),
                text: "An unscored distractor.".to_string(),
            },
        ],
    }];
    category
}

/// Three archetypes exercising every scoring rule.
pub(super) fn rich_category() -> CategoryDefinition {
    let mut category = empty_category(
        "rich",
        vec![
            archetype("a", "Archetype A"),
            archetype("b", "Archetype B"),
            archetype("c", "Archetype C"),
        ],
    );

    category.direct = vec![
        question("d-a", QuestionKind::Direct, primary("a"), false),
        question("d-a-rev", QuestionKind::Direct, primary("a"), true),
        question("d-b", QuestionKind::Direct, primary("b"), false),
        question("d-stray", QuestionKind::Direct, primary("nobody"), false),
    ];

    let mut weights = BTreeMap::new();
    weights.insert(id("a"), 1.0);
    weights.insert(id("b"), 0.5);
    category.oblique = vec![question(
        "o-ab",
        QuestionKind::Oblique,
        Some(ArchetypeLoading::Weighted(weights)),
        false,
    )];

    let mut with_options = question("s-c", QuestionKind::Scenario, primary("c"), false);
    with_options.options = (1..=5)
        .map(|score| QuestionOption {
            id: format!("s-c-{score}"),
            text: format!("Option worth {score}"),
            score,
        })
        .collect();
    with_options.options.push(QuestionOption {
        id: "s-c-off-scale".to_string(),
        text: "Authored outside the scale".to_string(),
        score: 9,
    });
    let mut reversed_options = with_options.clone();
    reversed_options.id = "s-c-rev".to_string();
    reversed_options.reverse_coded = true;
    category.scenario = vec![with_options, reversed_options];

    category.forced_choice = vec![ForcedChoiceBlock {
        id: "fc-1".to_string(),
        statements: ["a", "b", "c"]
            .iter()
            .map(|value| ForcedChoiceStatement {
                archetype: id(value),
                text: format!("Statement for {value}"),
            })
            .collect(),
    }];

    // Flag left false on purpose: balancing items are reversed regardless.
    category.balancing = (1..=5)
        .map(|index| question(&format!("bal-{index}"), QuestionKind::Balancing, primary("c"), false))
        .collect();

    category
}

pub(super) fn solo_category() -> CategoryDefinition {
    empty_category("solo", vec![archetype("a", "Archetype A")])
}

pub(super) fn scale(question_id: &str, kind: ResponseKind, value: i64) -> Response {
    Response::scale(question_id, kind, value)
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) fn catalog() -> StaticCatalog {
    StaticCatalog::builder()
        .register(CategoryId::new("pair"), "Pair", || Ok(pair_category()))
        .register(CategoryId::new("rich"), "Rich", || Ok(rich_category()))
        .register(CategoryId::new("solo"), "Solo", || Ok(solo_category()))
        .build()
}

pub(super) fn pair_submission() -> AssessmentSubmission {
    AssessmentSubmission {
        category_id: CategoryId::new("pair"),
        respondent: Some("respondent-17".to_string()),
        responses: vec![
            scale("q-a", ResponseKind::Direct, 5),
            Response::forced_choice("fc-b", id("b"), id("filler")),
        ],
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    AssessmentService<StaticCatalog, MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(Arc::new(catalog()), repository.clone(), engine());
    (service, repository)
}

pub(super) fn router_with_service(
    service: AssessmentService<StaticCatalog, MemoryRepository>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: HttpResponse) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
