use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::{CatalogError, CategoryProvider, CategorySummary};
use super::domain::{CategoryDefinition, CategoryId, Response};
use super::repository::{AssessmentId, AssessmentRecord, AssessmentRepository, RepositoryError};
use super::scoring::{AssessmentResult, ScoringEngine, ScoringError};

/// Payload accepted when a respondent completes an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,
    pub responses: Vec<Response>,
}

/// Service composing the category provider, repository and scoring engine.
pub struct AssessmentService<C, R> {
    catalog: Arc<C>,
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

impl<C, R> AssessmentService<C, R>
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    pub fn new(catalog: Arc<C>, repository: Arc<R>, engine: ScoringEngine) -> Self {
        Self {
            catalog,
            repository,
            engine: Arc::new(engine),
        }
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        self.catalog.categories()
    }

    pub fn category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Arc<CategoryDefinition>, AssessmentServiceError> {
        Ok(self.catalog.load(category_id)?)
    }

    /// Score a response set without persisting anything.
    pub fn score(
        &self,
        category_id: &CategoryId,
        responses: &[Response],
    ) -> Result<AssessmentResult, AssessmentServiceError> {
        let category = self.catalog.load(category_id)?;
        Ok(self.engine.score(&category, responses)?)
    }

    /// Score a completed submission and persist the outcome.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let result = self.score(&submission.category_id, &submission.responses)?;

        let record = AssessmentRecord {
            id: next_assessment_id(),
            category_id: submission.category_id,
            respondent: submission.respondent,
            result,
            completed_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            assessment_id = %stored.id,
            category = %stored.category_id,
            dominant = %stored.result.dominant_archetype.id,
            level = stored.result.resistance_level.label(),
            "assessment recorded"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.recent(limit)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
