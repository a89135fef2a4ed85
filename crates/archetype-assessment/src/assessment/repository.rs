use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::CategoryId;
use super::narrative::{select_narrative, NarrativeSelection};
use super::scoring::AssessmentResult;

/// Identifier wrapper for persisted assessment runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable shape of a completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,
    pub result: AssessmentResult,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn view(&self) -> AssessmentView {
        AssessmentView {
            assessment_id: self.id.clone(),
            category_id: self.category_id.clone(),
            completed_at: self.completed_at,
            narrative: select_narrative(&self.result),
            result: self.result.clone(),
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Most recent records first.
    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// API-facing representation of a stored assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub assessment_id: AssessmentId,
    pub category_id: CategoryId,
    pub completed_at: DateTime<Utc>,
    pub narrative: NarrativeSelection,
    pub result: AssessmentResult,
}
