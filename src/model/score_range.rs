use crate::{error::ScoreError, model::constants::MAX_SCORE};

/// Achievable score bounds for the given judgement counts.
///
/// With `unit = 10_000_000 / notes`, the lower bound is
/// `floor(unit * pure + 0.5 * unit * far)` and the upper bound adds one
/// point per pure (every pure may be shiny). The floor is taken over the
/// exact rational value, so the whole computation stays in scaled integer
/// arithmetic rather than rounded decimal division.
pub fn achievable_score_range(notes: i32, pure: i32, far: i32) -> Result<(i64, i64), ScoreError> {
    let lower = weighted_judgement_score(notes, pure, far)?;
    Ok((lower, lower + pure as i64))
}

/// Count of pures scored at full value: `score - floor(unit * pure + 0.5 * unit * far)`.
///
/// Not clamped. A negative result means the score does not match the
/// judgement counts and is returned as-is so callers can surface it.
pub fn shiny_pure(notes: i32, score: i32, pure: i32, far: i32) -> Result<i64, ScoreError> {
    if score < 0 {
        return Err(ScoreError::InvalidScore(score as i64));
    }

    let lower = weighted_judgement_score(notes, pure, far)?;
    Ok(score as i64 - lower)
}

/// `floor(10^7 * (2 * pure + far) / (2 * notes))`, the exact integer form of
/// `floor(unit * pure + 0.5 * unit * far)`. All terms are non-negative, so
/// integer division is already a floor toward negative infinity.
fn weighted_judgement_score(notes: i32, pure: i32, far: i32) -> Result<i64, ScoreError> {
    if notes <= 0 {
        return Err(ScoreError::InvalidChart(notes as i64));
    }
    if pure < 0 {
        return Err(ScoreError::InvalidScore(pure as i64));
    }
    if far < 0 {
        return Err(ScoreError::InvalidScore(far as i64));
    }

    let numerator = (MAX_SCORE as i64) * (2 * pure as i64 + far as i64);
    Ok(numerator / (2 * notes as i64))
}
