use crate::model::structures::rating_class::RatingClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique chart identity. No two charts share the same
/// (song id, rating class) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChartId {
    pub song_id: String,
    pub rating_class: RatingClass
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.song_id, self.rating_class.abbreviation())
    }
}

/// Immutable chart reference data, supplied by storage/import collaborators.
/// `constant` is the real chart constant stored as fixed point ×10,
/// e.g. 120 for an 12.0 chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    pub song_id: String,
    pub rating_class: RatingClass,
    pub constant: i32,
    pub notes: i32
}

impl ChartRecord {
    pub fn chart_id(&self) -> ChartId {
        ChartId {
            song_id: self.song_id.clone(),
            rating_class: self.rating_class
        }
    }
}

/// A single play of a chart. One chart may have many of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecord {
    pub song_id: String,
    pub rating_class: RatingClass,
    pub score: i32,
    pub pure: i32,
    pub far: i32,
    pub lost: i32,
    pub timestamp: i64
}

impl PlayRecord {
    pub fn chart_id(&self) -> ChartId {
        ChartId {
            song_id: self.song_id.clone(),
            rating_class: self.rating_class
        }
    }
}

/// A play joined with its chart, plus the derived fields.
/// Pure function of its inputs; recomputing from identical inputs
/// yields bit-identical output.
///
/// `shiny_pure` is intentionally unclamped. A negative value signals
/// internally inconsistent judgement counts and is surfaced as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPlayRecord {
    pub song_id: String,
    pub rating_class: RatingClass,
    pub score: i32,
    pub pure: i32,
    pub shiny_pure: i64,
    pub far: i32,
    pub lost: i32,
    pub timestamp: i64,
    pub constant: i32,
    pub notes: i32,
    pub potential: Decimal
}

impl CalculatedPlayRecord {
    pub fn chart_id(&self) -> ChartId {
        ChartId {
            song_id: self.song_id.clone(),
            rating_class: self.rating_class
        }
    }
}

/// The maximal-potential play of a chart.
pub type BestRecord = CalculatedPlayRecord;

/// Best-30 and recent-10 selections alongside their combined mean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingSet {
    pub best30: Vec<BestRecord>,
    pub recent10: Vec<CalculatedPlayRecord>,
    pub potential: Decimal
}

/// World-Mode progression result. `step` is the public value rounded
/// half-up to one decimal place, `step_original` the unrounded one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldStepResult {
    pub step: Decimal,
    pub step_original: Decimal
}
