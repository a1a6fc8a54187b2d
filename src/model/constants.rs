// Score constants
pub const MAX_SCORE: i32 = 10_000_000;

// Inclusive grade score floors
pub const EX_PLUS_MIN_SCORE: i32 = 9_900_000;
pub const EX_MIN_SCORE: i32 = 9_800_000;
pub const AA_MIN_SCORE: i32 = 9_500_000;
pub const A_MIN_SCORE: i32 = 9_200_000;
pub const B_MIN_SCORE: i32 = 8_900_000;
pub const C_MIN_SCORE: i32 = 8_600_000;
pub const D_MIN_SCORE: i32 = 0;

// Ranking aggregation sizes
pub const BEST_COUNT: usize = 30;
pub const RECENT_COUNT: usize = 10;
