//! Archetype resistance assessments: category reference data, response scoring, and the
//! service and HTTP surface around them.

pub mod catalog;
pub mod domain;
pub mod import;
pub mod narrative;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CategoryProvider, CategorySummary, StaticCatalog};
pub use domain::{
    Archetype, ArchetypeId, ArchetypeLoading, CategoryDefinition, CategoryId, ForcedChoiceBlock,
    ForcedChoiceStatement, Question, QuestionKind, QuestionOption, Response, ResponseKind,
    ResponsePayload,
};
pub use import::{ResponseImportError, ResponseImporter};
pub use narrative::{select_narrative, FallbackNarrative, NarrativeSelection};
pub use repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentView, RepositoryError,
};
pub use router::{assessment_router, RecentQuery, ScoreRequest, ScoreView};
pub use scoring::{
    ArchetypeScore, ArchetypeSummary, AssessmentResult, ResistanceBand, ScoringEngine,
    ScoringError, ScoringRubric,
};
pub use service::{AssessmentService, AssessmentServiceError, AssessmentSubmission};
