use crate::{
    error::ScoreError,
    model::{
        constants::{A_MIN_SCORE, AA_MIN_SCORE, B_MIN_SCORE, C_MIN_SCORE, EX_MIN_SCORE, EX_PLUS_MIN_SCORE, MAX_SCORE},
        potential::score_modifier,
        structures::grade::Grade
    }
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Chart constant range (real constant value, not ×10 fixed point)
/// that can produce a target play rating within one grade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConstantRange {
    pub grade: Grade,
    pub lower: Decimal,
    pub upper: Decimal
}

/// (grade, highest score of the grade, lowest score of the grade)
const GRADE_BOUNDARY_SCORES: [(Grade, i32, i32); 6] = [
    (Grade::ExPlus, MAX_SCORE, EX_PLUS_MIN_SCORE),
    (Grade::Ex, EX_PLUS_MIN_SCORE - 1, EX_MIN_SCORE),
    (Grade::AA, EX_MIN_SCORE - 1, AA_MIN_SCORE),
    (Grade::A, AA_MIN_SCORE - 1, A_MIN_SCORE),
    (Grade::B, A_MIN_SCORE - 1, B_MIN_SCORE),
    (Grade::C, B_MIN_SCORE - 1, C_MIN_SCORE)
];

/// Inverse of the play rating formula: for each grade from EX+ down to C,
/// the range of chart constants on which a play within that grade can reach
/// `play_rating`.
///
/// A higher score needs a lower constant, so the grade's highest boundary
/// score yields the range's lower end. Uses the uncapped [`score_modifier`].
pub fn constant_ranges_from_play_rating(play_rating: Decimal) -> Result<Vec<ConstantRange>, ScoreError> {
    let mut ranges = Vec::with_capacity(GRADE_BOUNDARY_SCORES.len());

    for (grade, highest_score, lowest_score) in GRADE_BOUNDARY_SCORES {
        let highest_modifier = score_modifier(highest_score)?;
        let lowest_modifier = score_modifier(lowest_score)?;

        ranges.push(ConstantRange {
            grade,
            lower: play_rating - highest_modifier,
            upper: play_rating - lowest_modifier
        });
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use crate::model::{constant_range::*, structures::grade::Grade};
    use rust_decimal_macros::dec;

    #[test]
    fn test_grade_order_and_count() {
        let ranges = constant_ranges_from_play_rating(dec!(12.5)).unwrap();
        let grades = ranges.iter().map(|r| r.grade).collect::<Vec<_>>();
        assert_eq!(
            grades,
            vec![Grade::ExPlus, Grade::Ex, Grade::AA, Grade::A, Grade::B, Grade::C]
        );
    }

    #[test]
    fn test_lower_never_exceeds_upper() {
        for play_rating in [dec!(0), dec!(7.05), dec!(11.299), dec!(14)] {
            let ranges = constant_ranges_from_play_rating(play_rating).unwrap();
            for range in ranges {
                assert!(
                    range.lower <= range.upper,
                    "{:?} range inverted for play rating {play_rating}",
                    range.grade
                );
            }
        }
    }

    #[test]
    fn test_ex_plus_range() {
        // EX+ spans modifiers 1.5 (at 9_900_000) through 2.0 (at max score)
        let ranges = constant_ranges_from_play_rating(dec!(10)).unwrap();
        assert_eq!(ranges[0].grade, Grade::ExPlus);
        assert_eq!(ranges[0].lower, dec!(8.0));
        assert_eq!(ranges[0].upper, dec!(8.5));
    }

    #[test]
    fn test_ex_range() {
        let ranges = constant_ranges_from_play_rating(dec!(10)).unwrap();
        assert_eq!(ranges[1].grade, Grade::Ex);
        // modifier(9_899_999) = 1 + 99_999 / 200_000
        assert_eq!(ranges[1].lower, dec!(10) - (dec!(1) + dec!(99999) / dec!(200000)));
        assert_eq!(ranges[1].upper, dec!(9.0));
    }
}
