use serde::Serialize;

use super::domain::ArchetypeId;
use super::scoring::{AssessmentResult, ResistanceBand};

const FALLBACK_WINDOW: usize = 3;

/// Which narrative the presenter should render for a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NarrativeSelection {
    /// Detailed write-up keyed by the dominant archetype.
    Archetype(ArchetypeId),
    Fallback(FallbackNarrative),
}

/// Generic write-ups used when no archetype reaches the high band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackNarrative {
    AllLow,
    AllModerate,
    Mixed,
}

pub fn select_narrative(result: &AssessmentResult) -> NarrativeSelection {
    if result.has_high_resistance_archetype {
        return NarrativeSelection::Archetype(result.dominant_archetype.id.clone());
    }

    let top = result.archetype_scores.iter().take(FALLBACK_WINDOW);
    let fallback = if top.clone().all(|score| score.resistance_level == ResistanceBand::Low) {
        FallbackNarrative::AllLow
    } else if top.clone().all(|score| score.resistance_level == ResistanceBand::Moderate) {
        FallbackNarrative::AllModerate
    } else {
        FallbackNarrative::Mixed
    };

    NarrativeSelection::Fallback(fallback)
}
