use super::super::domain::{Archetype, CategoryDefinition};
use super::normalize::whole_percent;
use super::{ArchetypeScore, ArchetypeSummary, AssessmentResult, ResistanceBand};

/// Unranked per-archetype figures, in category definition order.
pub(crate) struct ScoredArchetype<'a> {
    pub archetype: &'a Archetype,
    pub raw_score: f64,
    /// Adjusted and clamped, not yet rounded.
    pub percentage: f64,
    pub band: ResistanceBand,
}

/// Sorts by percentage (stable, so ties keep definition order) and builds the result.
///
/// Callers guarantee at least two archetypes.
pub(crate) fn assemble(
    category: &CategoryDefinition,
    mut scored: Vec<ScoredArchetype<'_>>,
    balancing_index: Option<u8>,
) -> AssessmentResult {
    scored.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    let archetype_scores: Vec<ArchetypeScore> = scored
        .into_iter()
        .enumerate()
        .map(|(position, entry)| ArchetypeScore {
            archetype_id: entry.archetype.id.clone(),
            archetype_name: entry.archetype.name.clone(),
            raw_score: entry.raw_score,
            percentage: whole_percent(entry.percentage),
            resistance_level: entry.band,
            rank: position + 1,
        })
        .collect();

    let dominant = &archetype_scores[0];
    let secondary = &archetype_scores[1];
    let has_high_resistance_archetype = archetype_scores
        .iter()
        .any(|score| score.resistance_level == ResistanceBand::High);

    AssessmentResult {
        category_id: category.id.clone(),
        dominant_archetype: ArchetypeSummary::from(dominant),
        secondary_archetype: ArchetypeSummary::from(secondary),
        resistance_level: dominant.resistance_level,
        resistance_percentage: dominant.percentage,
        balancing_index,
        has_high_resistance_archetype,
        archetype_scores,
    }
}
