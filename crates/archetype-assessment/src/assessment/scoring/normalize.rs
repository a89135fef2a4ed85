use super::rubric::ScoringRubric;
use super::ResistanceBand;

const PERCENT_MAX: f64 = 100.0;

/// Rescales summed balancing scores from `[count, count * 5]` onto `[0, 100]`.
///
/// Returns `None` when no balancing items were answered. The value is left unrounded so
/// the adjustment thresholds see the exact index.
pub(crate) fn balancing_index(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }

    let count = scores.len() as f64;
    let sum: i64 = scores.iter().sum();
    let floor = count * 1.0;
    let ceiling = count * 5.0;
    // Scale before dividing so whole-number indices such as 55 come out exact.
    Some((sum as f64 - floor) * 100.0 / (ceiling - floor))
}

/// Maps a raw archetype total into the rubric's fixed `[floor, ceiling]` window.
pub(crate) fn raw_percentage(raw: f64, rubric: &ScoringRubric) -> f64 {
    let span = rubric.raw_ceiling - rubric.raw_floor;
    clamp_percent((raw - rubric.raw_floor) * 100.0 / span)
}

/// Global shift applied to every archetype once the balancing index is known.
pub(crate) fn balancing_adjustment(index: Option<f64>, rubric: &ScoringRubric) -> f64 {
    match index {
        Some(index) if index >= f64::from(rubric.balancing_high_threshold) => {
            f64::from(rubric.balancing_high_adjustment)
        }
        Some(index) if index <= f64::from(rubric.balancing_low_threshold) => {
            f64::from(rubric.balancing_low_adjustment)
        }
        _ => 0.0,
    }
}

pub(crate) fn adjust(percentage: f64, adjustment: f64) -> f64 {
    clamp_percent(percentage + adjustment)
}

pub(crate) fn band_for(percentage: f64, rubric: &ScoringRubric) -> ResistanceBand {
    if percentage <= f64::from(rubric.low_band_ceiling) {
        ResistanceBand::Low
    } else if percentage <= f64::from(rubric.moderate_band_ceiling) {
        ResistanceBand::Moderate
    } else {
        ResistanceBand::High
    }
}

/// Whole-number form reported in results.
pub(crate) fn whole_percent(value: f64) -> u8 {
    clamp_percent(value).round() as u8
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, PERCENT_MAX)
}
