use crate::model::structures::{
    rating_class::RatingClass,
    records::{CalculatedPlayRecord, ChartRecord, PlayRecord}
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

pub fn generate_chart(song_id: &str, rating_class: RatingClass, constant: i32, notes: i32) -> ChartRecord {
    ChartRecord {
        song_id: song_id.to_string(),
        rating_class,
        constant,
        notes
    }
}

pub fn generate_play(
    song_id: &str,
    rating_class: RatingClass,
    score: i32,
    pure: i32,
    far: i32,
    lost: i32,
    timestamp: i64
) -> PlayRecord {
    PlayRecord {
        song_id: song_id.to_string(),
        rating_class,
        score,
        pure,
        far,
        lost,
        timestamp
    }
}

/// A calculated record with the given potential and otherwise plausible but
/// fixed fields, for aggregation tests that only care about potential,
/// identity and timestamp.
pub fn generate_calculated(
    song_id: &str,
    rating_class: RatingClass,
    potential: Decimal,
    timestamp: i64
) -> CalculatedPlayRecord {
    CalculatedPlayRecord {
        song_id: song_id.to_string(),
        rating_class,
        score: 9_900_000,
        pure: 990,
        shiny_pure: 900,
        far: 8,
        lost: 2,
        timestamp,
        constant: 100,
        notes: 1000,
        potential
    }
}

/// A deterministic pseudo-random play history over the given charts.
/// Timestamps are strictly increasing, so every play occupies its own
/// recency slot.
pub fn generate_play_history(charts: &[ChartRecord], plays_per_chart: usize, seed: u64) -> Vec<PlayRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut plays = Vec::with_capacity(charts.len() * plays_per_chart);
    let mut timestamp = 1_600_000_000i64;

    for chart in charts {
        for _ in 0..plays_per_chart {
            let far = rng.random_range(0..=(chart.notes / 20).max(1));
            let lost = rng.random_range(0..=(chart.notes / 50).max(1));
            let pure = (chart.notes - far - lost).max(0);
            let unit = 10_000_000i64 / chart.notes as i64;
            let base = unit * pure as i64 + unit / 2 * far as i64;
            let shiny = rng.random_range(0..=pure) as i64;

            timestamp += rng.random_range(60..86_400);
            plays.push(PlayRecord {
                song_id: chart.song_id.clone(),
                rating_class: chart.rating_class,
                score: (base + shiny).min(10_002_000) as i32,
                pure,
                far,
                lost,
                timestamp
            });
        }
    }

    plays
}
