mod dispatch;
mod normalize;
mod rank;
mod rubric;

pub use rubric::ScoringRubric;

use super::domain::{ArchetypeId, CategoryDefinition, CategoryId, Response};
use rank::ScoredArchetype;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless engine turning a category definition and a response list into a ranked profile.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rubric: ScoringRubric,
}

impl ScoringEngine {
    pub fn new(rubric: ScoringRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &ScoringRubric {
        &self.rubric
    }

    /// Score a complete response set.
    ///
    /// Malformed or unresolvable responses contribute nothing. The only failure is a
    /// category that cannot yield both a dominant and a secondary archetype.
    pub fn score(
        &self,
        category: &CategoryDefinition,
        responses: &[Response],
    ) -> Result<AssessmentResult, ScoringError> {
        if category.archetypes.len() < 2 {
            return Err(ScoringError::InsufficientArchetypes {
                category: category.id.clone(),
                count: category.archetypes.len(),
            });
        }

        let tally = dispatch::tally_responses(category, responses, &self.rubric);
        let balancing_index = normalize::balancing_index(&tally.balancing_scores);
        let adjustment = normalize::balancing_adjustment(balancing_index, &self.rubric);

        debug!(
            category = %category.id,
            responses = responses.len(),
            balancing_items = tally.balancing_scores.len(),
            ?balancing_index,
            adjustment,
            "scored response set"
        );

        let scored = category
            .archetypes
            .iter()
            .zip(tally.raw_scores)
            .map(|(archetype, raw_score)| {
                let percentage = normalize::adjust(
                    normalize::raw_percentage(raw_score, &self.rubric),
                    adjustment,
                );
                ScoredArchetype {
                    archetype,
                    raw_score,
                    percentage,
                    band: normalize::band_for(percentage, &self.rubric),
                }
            })
            .collect();

        Ok(rank::assemble(
            category,
            scored,
            balancing_index.map(normalize::whole_percent),
        ))
    }
}

/// Categorical resistance bucket derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceBand {
    Low,
    Moderate,
    High,
}

impl ResistanceBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Per-archetype engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeScore {
    pub archetype_id: ArchetypeId,
    pub archetype_name: String,
    pub raw_score: f64,
    pub percentage: u8,
    pub resistance_level: ResistanceBand,
    /// 1 is the highest percentage.
    pub rank: usize,
}

/// Identity of a ranked archetype, as surfaced in the result header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeSummary {
    pub id: ArchetypeId,
    pub name: String,
}

impl From<&ArchetypeScore> for ArchetypeSummary {
    fn from(score: &ArchetypeScore) -> Self {
        Self {
            id: score.archetype_id.clone(),
            name: score.archetype_name.clone(),
        }
    }
}

/// Ranked profile for one completed assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub category_id: CategoryId,
    /// Sorted by rank.
    pub archetype_scores: Vec<ArchetypeScore>,
    pub dominant_archetype: ArchetypeSummary,
    pub secondary_archetype: ArchetypeSummary,
    pub resistance_level: ResistanceBand,
    pub resistance_percentage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balancing_index: Option<u8>,
    pub has_high_resistance_archetype: bool,
}

impl AssessmentResult {
    pub fn score_for(&self, archetype: &ArchetypeId) -> Option<&ArchetypeScore> {
        self.archetype_scores
            .iter()
            .find(|score| &score.archetype_id == archetype)
    }
}

/// Configuration defect in the category being scored.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("category '{category}' defines {count} archetype(s); at least two are required")]
    InsufficientArchetypes { category: CategoryId, count: usize },
}
