use crate::{error::ScoreError, model::structures::records::WorldStepResult};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

const STEP_RATING_FACTOR: Decimal = dec!(2.45);
const STEP_RATING_OFFSET: Decimal = dec!(2.5);
const STEP_BASE_DIVISOR: Decimal = dec!(50);

/// Additive and multiplicative step modifiers granted by a partner.
///
/// The default is the identity bonus (add 0, multiply by 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartnerBonus {
    pub step_bonus: Decimal,
    pub multiplier: Decimal
}

impl Default for PartnerBonus {
    fn default() -> Self {
        PartnerBonus {
            step_bonus: Decimal::ZERO,
            multiplier: Decimal::ONE
        }
    }
}

impl PartnerBonus {
    pub fn step_bonus(step_bonus: Decimal) -> Self {
        PartnerBonus {
            step_bonus,
            ..Default::default()
        }
    }

    pub fn multiplier(multiplier: Decimal) -> Self {
        PartnerBonus {
            multiplier,
            ..Default::default()
        }
    }
}

// Fixed per-character bonuses
pub const AWAKENED_ILITH_BONUS: PartnerBonus = PartnerBonus {
    step_bonus: dec!(6.0),
    multiplier: Decimal::ONE
};
pub const AWAKENED_ETO_BONUS: PartnerBonus = PartnerBonus {
    step_bonus: dec!(7.0),
    multiplier: Decimal::ONE
};
pub const AWAKENED_LUNA_BONUS: PartnerBonus = PartnerBonus {
    step_bonus: dec!(7.0),
    multiplier: Decimal::ONE
};
pub const AMANE_BELOW_EX_BONUS: PartnerBonus = PartnerBonus {
    step_bonus: Decimal::ZERO,
    multiplier: dec!(0.5)
};
pub const MAYA_BONUS: PartnerBonus = PartnerBonus {
    step_bonus: Decimal::ZERO,
    multiplier: dec!(2.0)
};

/// Legacy chapter play booster: stamina multiplied by an optional
/// fragment multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyMapBooster {
    stamina: i32,
    fragments: Option<i32>
}

impl LegacyMapBooster {
    pub fn new(stamina: i32, fragments: Option<i32>) -> Result<Self, ScoreError> {
        if ![2, 4, 6].contains(&stamina) {
            return Err(ScoreError::InvalidBooster(format!(
                "stamina can only be one of [2, 4, 6], got {stamina}"
            )));
        }
        if let Some(f) = fragments {
            if ![100, 250, 500].contains(&f) {
                return Err(ScoreError::InvalidBooster(format!(
                    "fragments can only be one of [100, 250, 500], got {f}"
                )));
            }
        }

        Ok(LegacyMapBooster { stamina, fragments })
    }

    pub fn final_value(&self) -> Decimal {
        let fragments_multiplier = match self.fragments {
            Some(100) => dec!(1.1),
            Some(250) => dec!(1.25),
            Some(500) => dec!(1.5),
            _ => Decimal::ONE
        };

        Decimal::from(self.stamina) * fragments_multiplier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBooster {
    LegacyMap(LegacyMapBooster),
    Memories
}

impl StepBooster {
    pub fn final_value(&self) -> Decimal {
        match self {
            StepBooster::LegacyMap(booster) => booster.final_value(),
            StepBooster::Memories => dec!(4.0)
        }
    }
}

/// # World step
///
/// `(2.45 * sqrt(play_rating) + 2.5) * (partner_step_base / 50)`, then the
/// partner step bonus is added, then the partner multiplier and the booster
/// multiplier are applied, in that order. The order matters for the inverse.
///
/// This is the unrounded value; [`step`] derives the in-game one.
pub fn step_original(
    play_rating: Decimal,
    partner_step_base: Decimal,
    partner_bonus: Option<PartnerBonus>,
    step_booster: Option<StepBooster>
) -> Result<Decimal, ScoreError> {
    if play_rating < Decimal::ZERO {
        return Err(ScoreError::InvalidRating(play_rating));
    }

    let rating_sqrt = play_rating
        .sqrt()
        .ok_or_else(|| ScoreError::ArithmeticDomain(format!("sqrt undefined for {play_rating}")))?;
    let bonus = partner_bonus.unwrap_or_default();

    let mut result = (STEP_RATING_FACTOR * rating_sqrt + STEP_RATING_OFFSET) * (partner_step_base / STEP_BASE_DIVISOR);
    result += bonus.step_bonus;
    result *= bonus.multiplier;
    if let Some(booster) = step_booster {
        result *= booster.final_value();
    }

    Ok(result)
}

/// The public step value: [`step_original`] rounded half-up to one decimal
/// place. The unrounded value stays available on the result for verification.
pub fn step(
    play_rating: Decimal,
    partner_step_base: Decimal,
    partner_bonus: Option<PartnerBonus>,
    step_booster: Option<StepBooster>
) -> Result<WorldStepResult, ScoreError> {
    let step_original = step_original(play_rating, partner_step_base, partner_bonus, step_booster)?;

    Ok(WorldStepResult {
        step: step_original.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        step_original
    })
}

/// Algebraic inverse of [`step_original`]: undoes the modifiers in reverse
/// order, then solves for the play rating.
///
/// The sign of the solved square root term is preserved through squaring
/// rather than discarded, so an impossible (too small) step maps to a
/// negative play rating instead of a spurious positive one.
pub fn play_rating_from_step(
    step: Decimal,
    partner_step_base: Decimal,
    partner_bonus: Option<PartnerBonus>,
    step_booster: Option<StepBooster>
) -> Result<Decimal, ScoreError> {
    if partner_step_base.is_zero() {
        return Err(ScoreError::ArithmeticDomain(
            "partner step base must be non-zero".to_string()
        ));
    }

    let bonus = partner_bonus.unwrap_or_default();
    let mut step = step;

    // A zero multiplier is skipped rather than divided by, matching the
    // long-standing forward-calculator behavior.
    if !bonus.multiplier.is_zero() {
        step /= bonus.multiplier;
    }
    if let Some(booster) = step_booster {
        step /= booster.final_value();
    }
    step -= bonus.step_bonus;

    let rating_sqrt =
        (STEP_BASE_DIVISOR * step - STEP_RATING_OFFSET * partner_step_base) / (STEP_RATING_FACTOR * partner_step_base);
    let squared = rating_sqrt
        .checked_mul(rating_sqrt)
        .ok_or_else(|| ScoreError::ArithmeticDomain(format!("square overflow for {rating_sqrt}")))?;

    if rating_sqrt >= Decimal::ZERO {
        Ok(squared)
    } else {
        Ok(-squared)
    }
}
