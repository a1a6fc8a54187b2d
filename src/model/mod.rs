use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    error::ScoreError,
    model::{
        constants::{BEST_COUNT, RECENT_COUNT},
        structures::records::{BestRecord, CalculatedPlayRecord, ChartId, ChartRecord, PlayRecord, RankingSet}
    }
};

pub mod constant_range;
pub mod constants;
pub mod potential;
pub mod score_range;
pub mod structures;
pub mod world;

/// Joins a play with its chart and derives potential and shiny pure.
///
/// Pure and deterministic: identical inputs always produce a bit-identical
/// record.
pub fn calculate_play_record(chart: &ChartRecord, play: &PlayRecord) -> Result<CalculatedPlayRecord, ScoreError> {
    if chart.chart_id() != play.chart_id() {
        return Err(ScoreError::ChartMismatch {
            chart: chart.chart_id(),
            play: play.chart_id()
        });
    }

    let shiny_pure = score_range::shiny_pure(chart.notes, play.score, play.pure, play.far)?;
    let potential = potential::play_rating(play.score, chart.constant)?;

    Ok(CalculatedPlayRecord {
        song_id: play.song_id.clone(),
        rating_class: play.rating_class,
        score: play.score,
        pure: play.pure,
        shiny_pure,
        far: play.far,
        lost: play.lost,
        timestamp: play.timestamp,
        constant: chart.constant,
        notes: chart.notes,
        potential
    })
}

/// Batch form of [`calculate_play_record`]. The per-play mapping is
/// embarrassingly parallel; everything downstream of it is a sequential
/// reduction.
pub fn calculate_play_records(
    charts: &[ChartRecord],
    plays: &[PlayRecord]
) -> Result<Vec<CalculatedPlayRecord>, ScoreError> {
    let chart_lookup: HashMap<ChartId, &ChartRecord> = charts.iter().map(|c| (c.chart_id(), c)).collect();

    plays
        .par_iter()
        .map(|play| {
            let chart = chart_lookup
                .get(&play.chart_id())
                .ok_or_else(|| ScoreError::ChartNotFound(play.chart_id()))?;

            calculate_play_record(chart, play)
        })
        .collect()
}

/// Collapses a play history into one [`BestRecord`] per chart, scanning in
/// input order.
///
/// A stored record is replaced only when the challenger's potential is
/// strictly greater. On an exact potential tie the first-encountered record
/// for the chart is kept; this tie-break is load-bearing and locked in
/// by tests.
pub fn best_per_chart(records: &[CalculatedPlayRecord]) -> IndexMap<ChartId, BestRecord> {
    let mut bests: IndexMap<ChartId, BestRecord> = IndexMap::new();

    for record in records {
        match bests.get_mut(&record.chart_id()) {
            Some(stored) => {
                if record.potential > stored.potential {
                    *stored = record.clone();
                }
            }
            None => {
                bests.insert(record.chart_id(), record.clone());
            }
        }
    }

    debug!("Collapsed {} plays into {} best records", records.len(), bests.len());
    bests
}

/// The `n` highest-potential records, descending. The sort is stable, so
/// records of equal potential keep their input order.
pub fn top_n_by_potential(records: &[BestRecord], n: usize) -> Vec<BestRecord> {
    records
        .iter()
        .cloned()
        .sorted_by(|a, b| b.potential.cmp(&a.potential))
        .take(n)
        .collect()
}

/// Records within the window of the `n` latest distinct timestamps,
/// collapsed to the best potential per chart and ordered by potential
/// descending.
///
/// The window is over distinct timestamps, not over plays; a burst of plays
/// sharing a timestamp occupies a single slot.
pub fn recent_n_by_time(records: &[CalculatedPlayRecord], n: usize) -> Vec<CalculatedPlayRecord> {
    let window: HashSet<i64> = records
        .iter()
        .map(|r| r.timestamp)
        .sorted_by(|a, b| b.cmp(a))
        .dedup()
        .take(n)
        .collect();

    let windowed: Vec<CalculatedPlayRecord> = records
        .iter()
        .filter(|r| window.contains(&r.timestamp))
        .cloned()
        .collect();

    debug!(
        "Recency window of {} timestamps covers {} of {} plays",
        window.len(),
        windowed.len(),
        records.len()
    );

    best_per_chart(&windowed)
        .into_values()
        .sorted_by(|a, b| b.potential.cmp(&a.potential))
        .collect()
}

/// Mean potential. Empty input is not an error and yields zero.
pub fn mean(records: &[CalculatedPlayRecord]) -> Decimal {
    if records.is_empty() {
        return Decimal::ZERO;
    }

    let sum: Decimal = records.iter().map(|r| r.potential).sum();
    sum / Decimal::from(records.len() as u64)
}

/// Combined weighted mean over the best-30 and recent-10 selections.
///
/// A chart appearing in both selections is counted twice. The double
/// counting is intentional, long-standing behavior and must not be
/// deduplicated.
pub fn combined_potential(best30: &[BestRecord], recent10: &[CalculatedPlayRecord]) -> Decimal {
    let count = best30.len() + recent10.len();
    if count == 0 {
        return Decimal::ZERO;
    }

    let sum: Decimal = best30.iter().chain(recent10.iter()).map(|r| r.potential).sum();
    sum / Decimal::from(count as u64)
}

/// Builds the full [`RankingSet`] from a calculated play history.
pub fn ranking_set(records: &[CalculatedPlayRecord]) -> RankingSet {
    let bests: Vec<BestRecord> = best_per_chart(records).into_values().collect();
    let best30 = top_n_by_potential(&bests, BEST_COUNT);
    let recent10 = recent_n_by_time(records, RECENT_COUNT);
    let potential = combined_potential(&best30, &recent10);

    debug!(
        "Ranking set: {} best, {} recent, potential {}",
        best30.len(),
        recent10.len(),
        potential
    );

    RankingSet {
        best30,
        recent10,
        potential
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::ScoreError,
        model::{
            best_per_chart, calculate_play_record, calculate_play_records, combined_potential, mean, ranking_set,
            recent_n_by_time,
            structures::{rating_class::RatingClass, records::ChartId},
            top_n_by_potential
        },
        utils::test_utils::*
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_play_record() {
        let chart = generate_chart("testify", RatingClass::Beyond, 120, 1000);
        let play = generate_play("testify", RatingClass::Beyond, 10_000_917, 1000, 0, 0, 1);

        let record = calculate_play_record(&chart, &play).unwrap();

        assert_eq!(record.potential, dec!(14.0));
        assert_eq!(record.shiny_pure, 917);
        assert_eq!(record.constant, 120);
        assert_eq!(record.notes, 1000);
    }

    #[test]
    fn test_calculate_play_record_chart_mismatch() {
        let chart = generate_chart("testify", RatingClass::Beyond, 120, 1000);
        let play = generate_play("testify", RatingClass::Future, 10_000_917, 1000, 0, 0, 1);

        assert!(matches!(
            calculate_play_record(&chart, &play),
            Err(ScoreError::ChartMismatch { .. })
        ));
    }

    #[test]
    fn test_calculate_play_records() {
        let charts = vec![
            generate_chart("fracture_ray", RatingClass::Future, 113, 1278),
            generate_chart("grievous_lady", RatingClass::Future, 113, 1450),
        ];
        let plays = vec![
            generate_play("fracture_ray", RatingClass::Future, 9_912_345, 1270, 6, 2, 10),
            generate_play("grievous_lady", RatingClass::Future, 9_800_000, 1400, 40, 10, 20),
            generate_play("fracture_ray", RatingClass::Future, 10_001_278, 1278, 0, 0, 30),
        ];

        let records = calculate_play_records(&charts, &plays).unwrap();

        assert_eq!(records.len(), 3);
        // Output order matches input order regardless of parallel mapping
        assert_eq!(records[0].timestamp, 10);
        assert_eq!(records[2].potential, dec!(13.3));
    }

    #[test]
    fn test_calculate_play_records_unknown_chart() {
        let charts = vec![generate_chart("fracture_ray", RatingClass::Future, 113, 1278)];
        let plays = vec![generate_play("vicious_heroism", RatingClass::Future, 9_912_345, 1100, 6, 2, 10)];

        let result = calculate_play_records(&charts, &plays);

        assert_eq!(
            result,
            Err(ScoreError::ChartNotFound(ChartId {
                song_id: "vicious_heroism".to_string(),
                rating_class: RatingClass::Future
            }))
        );
    }

    #[test]
    fn test_best_per_chart_keeps_maximum() {
        let records = vec![
            generate_calculated("sayonara_hatsukoi", RatingClass::Future, dec!(9.5), 1),
            generate_calculated("sayonara_hatsukoi", RatingClass::Future, dec!(10.2), 2),
            generate_calculated("sayonara_hatsukoi", RatingClass::Future, dec!(9.8), 3),
            generate_calculated("dreamin_attraction", RatingClass::Future, dec!(11.1), 4),
        ];

        let bests = best_per_chart(&records);

        assert_eq!(bests.len(), 2);
        let best = &bests[&records[0].chart_id()];
        assert_eq!(best.potential, dec!(10.2));
        assert_eq!(best.timestamp, 2);
    }

    #[test]
    fn test_best_per_chart_tie_keeps_first() {
        // Strictly-greater comparison: an exact tie must not replace the
        // earlier record.
        let records = vec![
            generate_calculated("axium_crisis", RatingClass::Future, dec!(10.7), 1),
            generate_calculated("axium_crisis", RatingClass::Future, dec!(10.7), 2),
        ];

        let bests = best_per_chart(&records);

        assert_eq!(bests.len(), 1);
        assert_eq!(bests[&records[0].chart_id()].timestamp, 1);
    }

    #[test]
    fn test_best_per_chart_distinguishes_rating_classes() {
        let records = vec![
            generate_calculated("ringed_genesis", RatingClass::Future, dec!(11.0), 1),
            generate_calculated("ringed_genesis", RatingClass::Beyond, dec!(11.5), 2),
        ];

        assert_eq!(best_per_chart(&records).len(), 2);
    }

    #[test]
    fn test_top_n_by_potential() {
        let records = vec![
            generate_calculated("a", RatingClass::Future, dec!(9.0), 1),
            generate_calculated("b", RatingClass::Future, dec!(11.0), 2),
            generate_calculated("c", RatingClass::Future, dec!(10.0), 3),
        ];

        let top2 = top_n_by_potential(&records, 2);

        assert_eq!(top2.len(), 2);
        assert_eq!(top2[0].song_id, "b");
        assert_eq!(top2[1].song_id, "c");
    }

    #[test]
    fn test_top_n_stable_for_ties() {
        let records = vec![
            generate_calculated("a", RatingClass::Future, dec!(10.0), 1),
            generate_calculated("b", RatingClass::Future, dec!(10.0), 2),
            generate_calculated("c", RatingClass::Future, dec!(10.0), 3),
        ];

        let top = top_n_by_potential(&records, 3);
        let order = top.iter().map(|r| r.song_id.as_str()).collect::<Vec<_>>();

        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_recent_n_window_is_distinct_timestamps() {
        // Four plays over three distinct timestamps; a window of 2 keeps
        // timestamps 30 and 20 and drops timestamp 10 entirely.
        let records = vec![
            generate_calculated("a", RatingClass::Future, dec!(12.0), 10),
            generate_calculated("b", RatingClass::Future, dec!(9.0), 20),
            generate_calculated("c", RatingClass::Future, dec!(10.0), 30),
            generate_calculated("d", RatingClass::Future, dec!(11.0), 30),
        ];

        let recent = recent_n_by_time(&records, 2);
        let order = recent.iter().map(|r| r.song_id.as_str()).collect::<Vec<_>>();

        // Ordered by potential descending, not by time
        assert_eq!(order, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_recent_n_collapses_charts_within_window() {
        let records = vec![
            generate_calculated("a", RatingClass::Future, dec!(10.0), 10),
            generate_calculated("a", RatingClass::Future, dec!(9.0), 20),
        ];

        let recent = recent_n_by_time(&records, 10);

        // Both timestamps are in the window; the chart still collapses to
        // its maximal-potential record, not its latest.
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].potential, dec!(10.0));
    }

    #[test]
    fn test_mean() {
        let records = vec![
            generate_calculated("a", RatingClass::Future, dec!(10.0), 1),
            generate_calculated("b", RatingClass::Future, dec!(11.0), 2),
        ];

        assert_eq!(mean(&records), dec!(10.5));
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_combined_potential_empty_is_zero() {
        assert_eq!(combined_potential(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn test_combined_potential_double_counts_shared_charts() {
        let best_a = generate_calculated("a", RatingClass::Future, dec!(10.0), 1);
        let best_b = generate_calculated("b", RatingClass::Future, dec!(12.0), 2);

        // Chart b appears in both selections and must be counted twice:
        // (10 + 12 + 12) / 3, not (10 + 12) / 2.
        let combined = combined_potential(&[best_a, best_b.clone()], &[best_b]);

        assert_eq!(combined, dec!(34) / dec!(3));
    }

    #[test]
    fn test_ranking_set() {
        let charts = vec![
            generate_chart("fracture_ray", RatingClass::Future, 113, 1278),
            generate_chart("grievous_lady", RatingClass::Future, 113, 1450),
        ];
        let plays = vec![
            generate_play("fracture_ray", RatingClass::Future, 9_912_345, 1270, 6, 2, 10),
            generate_play("fracture_ray", RatingClass::Future, 10_001_278, 1278, 0, 0, 20),
            generate_play("grievous_lady", RatingClass::Future, 9_800_000, 1400, 40, 10, 30),
        ];

        let records = calculate_play_records(&charts, &plays).unwrap();
        let set = ranking_set(&records);

        assert_eq!(set.best30.len(), 2);
        assert_eq!(set.recent10.len(), 2);
        assert_eq!(set.best30[0].potential, dec!(13.3));
        // fracture_ray bests: 13.3; grievous_lady: 12.3
        // recent10 covers both timestamps, same two records
        assert_eq!(set.potential, (dec!(13.3) + dec!(12.3) + dec!(13.3) + dec!(12.3)) / dec!(4));
    }

    #[test]
    fn test_ranking_set_empty() {
        let set = ranking_set(&[]);

        assert!(set.best30.is_empty());
        assert!(set.recent10.is_empty());
        assert_eq!(set.potential, Decimal::ZERO);
    }

    #[test]
    fn test_recalculation_is_bit_identical() {
        let chart = generate_chart("fracture_ray", RatingClass::Future, 113, 1278);
        let play = generate_play("fracture_ray", RatingClass::Future, 9_912_345, 1270, 6, 2, 10);

        let first = calculate_play_record(&chart, &play).unwrap();
        let second = calculate_play_record(&chart, &play).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.potential.serialize(), second.potential.serialize());
    }
}
