use crate::infra::{open_catalog, InMemoryAssessmentRepository};
use archetype_assessment::assessment::{
    select_narrative, AssessmentResult, AssessmentService, CategoryDefinition, CategoryId,
    CategoryProvider, FallbackNarrative, NarrativeSelection, QuestionKind, Response,
    ResponseImporter, ResponseKind, ResponsePayload, ScoreView, ScoringEngine, StaticCatalog,
};
use archetype_assessment::config::AppConfig;
use archetype_assessment::error::AppError;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Category the responses were collected for
    #[arg(long)]
    pub(crate) category: String,
    /// Response file: a JSON array of responses or a CSV export
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Print the scored result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Category to run the synthetic respondent through
    #[arg(long, default_value = "leadership")]
    pub(crate) category: String,
    /// Likert answer given to every item (1 = strongly disagree, 5 = strongly agree)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(i64).range(1..=5))]
    pub(crate) answer: i64,
}

type CliService = AssessmentService<StaticCatalog, InMemoryAssessmentRepository>;

fn cli_service() -> Result<CliService, AppError> {
    let config = AppConfig::load()?;
    let catalog = open_catalog(&config.catalog)?;
    Ok(AssessmentService::new(
        Arc::new(catalog),
        Arc::new(InMemoryAssessmentRepository::default()),
        ScoringEngine::default(),
    ))
}

pub(crate) fn run_categories() -> Result<(), AppError> {
    let service = cli_service()?;
    println!("Assessment categories");
    for summary in service.categories() {
        let category = service.category(&summary.id)?;
        println!(
            "- {:<20} {} ({} archetypes, {} items)",
            summary.id.as_str(),
            summary.name,
            category.archetypes.len(),
            category.question_count()
        );
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        category,
        responses,
        json,
    } = args;

    let service = cli_service()?;
    let category_id = CategoryId::new(category);
    let responses = load_responses(&responses)?;
    let result = service.score(&category_id, &responses)?;

    if json {
        let view = ScoreView {
            category_id,
            narrative: select_narrative(&result),
            result,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let definition = service.category(&category_id)?;
        render_profile(&definition.name, responses.len(), &result);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let category_id = CategoryId::new(args.category);
    let definition = service.category(&category_id)?;
    let responses = synthetic_responses(&definition, args.answer);

    println!(
        "Synthetic respondent answering {} to every item",
        args.answer
    );
    let result = service.score(&category_id, &responses)?;
    render_profile(&definition.name, responses.len(), &result);
    Ok(())
}

fn load_responses(path: &Path) -> Result<Vec<Response>, AppError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Ok(ResponseImporter::from_path(path)?)
    } else {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Every Likert item answered with `answer`; scenario items take the option
/// scored closest to it. Each forced-choice block marks its first statement
/// most like me and its last statement least like me.
fn synthetic_responses(category: &CategoryDefinition, answer: i64) -> Vec<Response> {
    let mut responses = Vec::with_capacity(category.question_count());

    for question in category.likert_items() {
        let kind = match question.kind {
            QuestionKind::Direct => ResponseKind::Direct,
            QuestionKind::Oblique => ResponseKind::Oblique,
            QuestionKind::Scenario => ResponseKind::Scenario,
            QuestionKind::Balancing => ResponseKind::Balancing,
        };

        let value = if question.options.is_empty() {
            Some(ResponsePayload::Scale(answer))
        } else {
            question
                .options
                .iter()
                .min_by_key(|option| (option.score - answer).abs())
                .map(|option| ResponsePayload::Choice {
                    option_id: option.id.clone(),
                })
        };

        responses.push(Response {
            id: question.id.clone(),
            kind,
            value,
        });
    }

    for block in &category.forced_choice {
        if let (Some(first), Some(last)) = (block.statements.first(), block.statements.last()) {
            responses.push(Response::forced_choice(
                block.id.clone(),
                first.archetype.clone(),
                last.archetype.clone(),
            ));
        }
    }

    responses
}

fn render_profile(category_name: &str, answered: usize, result: &AssessmentResult) {
    println!("\n{category_name} resistance profile ({answered} responses)");
    println!(
        "  Dominant: {} | Secondary: {}",
        result.dominant_archetype.name, result.secondary_archetype.name
    );
    println!(
        "  Overall resistance: {}% ({})",
        result.resistance_percentage,
        result.resistance_level.label()
    );
    match result.balancing_index {
        Some(index) => println!("  Balancing index: {index}"),
        None => println!("  Balancing index: n/a"),
    }

    println!("\n  Rank  Archetype                 Raw     %  Level");
    for score in &result.archetype_scores {
        println!(
            "  {:>4}  {:<24} {:>5.1} {:>4}  {}",
            score.rank,
            score.archetype_name,
            score.raw_score,
            score.percentage,
            score.resistance_level.label()
        );
    }

    let narrative = match select_narrative(result) {
        NarrativeSelection::Archetype(_) => {
            format!("detailed write-up for {}", result.dominant_archetype.name)
        }
        NarrativeSelection::Fallback(FallbackNarrative::AllLow) => {
            "low resistance across the leading archetypes".to_string()
        }
        NarrativeSelection::Fallback(FallbackNarrative::AllModerate) => {
            "moderate resistance across the leading archetypes".to_string()
        }
        NarrativeSelection::Fallback(FallbackNarrative::Mixed) => {
            "mixed, no single high-resistance pattern".to_string()
        }
    };
    println!("\n  Narrative: {narrative}");
}
