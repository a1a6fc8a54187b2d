use crate::model::constants::{
    A_MIN_SCORE, AA_MIN_SCORE, B_MIN_SCORE, C_MIN_SCORE, D_MIN_SCORE, EX_MIN_SCORE, EX_PLUS_MIN_SCORE
};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Letter grade of a single play, selected by absolute score floor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Grade {
    ExPlus,
    Ex,
    AA,
    A,
    B,
    C,
    D
}

impl Grade {
    /// Inclusive lower score bound of this grade.
    pub const fn min_score(&self) -> i32 {
        match self {
            Grade::ExPlus => EX_PLUS_MIN_SCORE,
            Grade::Ex => EX_MIN_SCORE,
            Grade::AA => AA_MIN_SCORE,
            Grade::A => A_MIN_SCORE,
            Grade::B => B_MIN_SCORE,
            Grade::C => C_MIN_SCORE,
            Grade::D => D_MIN_SCORE
        }
    }

    /// Selects the grade whose floor the score clears first, walking
    /// the grades from EX+ downwards. Scores below every floor are D.
    pub fn from_score(score: i32) -> Grade {
        Grade::iter().find(|g| score >= g.min_score()).unwrap_or(Grade::D)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Grade::ExPlus => "EX+",
            Grade::Ex => "EX",
            Grade::AA => "AA",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D"
        };
        write!(f, "{}", text)
    }
}
