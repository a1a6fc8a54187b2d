use crate::{
    error::ScoreError,
    model::constants::{AA_MIN_SCORE, EX_MIN_SCORE, MAX_SCORE}
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// # Score modifier
///
/// The piecewise score→modifier mapping, see
/// <https://arcaea.fandom.com/wiki/Potential#Score_Modifier>.
///
/// All arithmetic is exact decimal. The thresholds are compared at exact
/// integer boundaries, so binary floating point must never be involved here.
///
/// The result is uncapped and may be negative; capping to zero happens in
/// [`play_rating`] only. Other consumers (the constant range solver) rely on
/// the raw value.
pub fn score_modifier(score: i32) -> Result<Decimal, ScoreError> {
    if score < 0 {
        return Err(ScoreError::InvalidScore(score as i64));
    }

    if score >= MAX_SCORE {
        return Ok(dec!(2));
    }

    if score >= EX_MIN_SCORE {
        return Ok(Decimal::ONE + Decimal::from(score - EX_MIN_SCORE) / dec!(200000));
    }

    Ok(Decimal::from(score - AA_MIN_SCORE) / dec!(300000))
}

/// # Play rating
///
/// `max(0, constant / 10 + score_modifier(score))`, see
/// <https://arcaea.fandom.com/wiki/Potential#Play_Rating>.
///
/// `constant` is the chart constant in fixed point ×10,
/// e.g. 120 for Testify [BYD].
pub fn play_rating(score: i32, constant: i32) -> Result<Decimal, ScoreError> {
    if constant < 0 {
        return Err(ScoreError::InvalidRating(Decimal::from(constant)));
    }

    let modifier = score_modifier(score)?;
    Ok((Decimal::from(constant) / dec!(10) + modifier).max(Decimal::ZERO))
}
