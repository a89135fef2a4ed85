use std::collections::HashMap;

use tracing::debug;

use super::super::domain::{
    ArchetypeId, ArchetypeLoading, CategoryDefinition, Question, Response, ResponseKind,
    ResponsePayload,
};
use super::rubric::ScoringRubric;

const SCALE_MIN: i64 = 1;
const SCALE_MAX: i64 = 5;
const REVERSE_PIVOT: i64 = SCALE_MIN + SCALE_MAX;

/// Raw per-archetype totals plus the transformed balancing scores seen during dispatch.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawTally {
    /// Aligned with `CategoryDefinition::archetypes`.
    pub raw_scores: Vec<f64>,
    pub balancing_scores: Vec<i64>,
}

impl RawTally {
    fn zeroed(archetypes: usize) -> Self {
        Self {
            raw_scores: vec![0.0; archetypes],
            balancing_scores: Vec::new(),
        }
    }
}

struct Dispatcher<'a> {
    category: &'a CategoryDefinition,
    rubric: &'a ScoringRubric,
    archetypes: HashMap<&'a ArchetypeId, usize>,
    questions: HashMap<&'a str, &'a Question>,
    tally: RawTally,
}

pub(crate) fn tally_responses(
    category: &CategoryDefinition,
    responses: &[Response],
    rubric: &ScoringRubric,
) -> RawTally {
    let mut dispatcher = Dispatcher::new(category, rubric);
    for response in responses {
        dispatcher.apply(response);
    }
    dispatcher.tally
}

impl<'a> Dispatcher<'a> {
    fn new(category: &'a CategoryDefinition, rubric: &'a ScoringRubric) -> Self {
        let archetypes = category
            .archetypes
            .iter()
            .enumerate()
            .map(|(index, archetype)| (&archetype.id, index))
            .collect();

        let mut questions = HashMap::new();
        for question in category.likert_items() {
            questions.entry(question.id.as_str()).or_insert(question);
        }

        Self {
            category,
            rubric,
            archetypes,
            questions,
            tally: RawTally::zeroed(category.archetypes.len()),
        }
    }

    fn apply(&mut self, response: &Response) {
        match response.kind {
            ResponseKind::Direct | ResponseKind::Oblique | ResponseKind::Scenario => {
                self.apply_likert(response)
            }
            ResponseKind::Balancing => self.apply_balancing(response),
            ResponseKind::ForcedChoice => self.apply_forced_choice(response),
        }
    }

    fn apply_likert(&mut self, response: &Response) {
        let Some((question, value)) = self.resolve_likert(response) else {
            return;
        };

        let score = if question.reverse_coded {
            reverse(value)
        } else {
            value
        };
        self.credit_loading(response, question, score);
    }

    fn apply_balancing(&mut self, response: &Response) {
        let Some((question, value)) = self.resolve_likert(response) else {
            return;
        };

        // Balancing items are reverse-coded by construction, whatever the item flag says.
        let score = reverse(value);
        self.credit_loading(response, question, score);
        self.tally.balancing_scores.push(score);
    }

    fn apply_forced_choice(&mut self, response: &Response) {
        if self.category.block(&response.id).is_none() {
            skip(response, "unknown forced-choice block");
            return;
        }

        let (most_like_me, least_like_me) = match &response.value {
            Some(ResponsePayload::Pair {
                most_like_me: Some(most),
                least_like_me: Some(least),
            }) => (most, least),
            _ => {
                skip(response, "forced-choice payload needs most and least selections");
                return;
            }
        };

        self.credit(response, most_like_me, self.rubric.most_like_me_points);
        self.credit(response, least_like_me, self.rubric.least_like_me_points);
    }

    fn resolve_likert(&self, response: &Response) -> Option<(&'a Question, i64)> {
        let Some(question) = self.questions.get(response.id.as_str()).copied() else {
            skip(response, "unknown question id");
            return None;
        };

        let value = match &response.value {
            Some(ResponsePayload::Scale(value)) => Some(*value),
            Some(ResponsePayload::Choice { option_id }) => {
                question.option(option_id).map(|option| option.score)
            }
            _ => None,
        };

        match value {
            Some(value) if (SCALE_MIN..=SCALE_MAX).contains(&value) => Some((question, value)),
            _ => {
                skip(response, "payload is not a 1-5 scale value");
                None
            }
        }
    }

    fn credit_loading(&mut self, response: &Response, question: &Question, score: i64) {
        match &question.loading {
            Some(ArchetypeLoading::Primary(archetype)) => {
                self.credit(response, archetype, score as f64);
            }
            Some(ArchetypeLoading::Weighted(weights)) => {
                for (archetype, weight) in weights {
                    self.credit(response, archetype, score as f64 * weight);
                }
            }
            None => {}
        }
    }

    fn credit(&mut self, response: &Response, archetype: &ArchetypeId, points: f64) {
        match self.archetypes.get(archetype) {
            Some(&index) => self.tally.raw_scores[index] += points,
            None => debug!(
                response_id = %response.id,
                archetype = %archetype,
                "ignoring contribution to archetype outside the category"
            ),
        }
    }
}

fn reverse(value: i64) -> i64 {
    REVERSE_PIVOT - value
}

fn skip(response: &Response, reason: &'static str) {
    debug!(
        response_id = %response.id,
        kind = response.kind.label(),
        reason,
        "skipping response"
    );
}
