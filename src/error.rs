use crate::model::structures::records::ChartId;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoreError {
    #[error("Score and judgement counts cannot be negative, got {0}")]
    InvalidScore(i64),

    #[error("Chart note count must be positive, got {0}")]
    InvalidChart(i64),

    #[error("Rating inputs cannot be negative, got {0}")]
    InvalidRating(Decimal),

    #[error("Arithmetic domain error: {0}")]
    ArithmeticDomain(String),

    #[error("Play record for {play} does not belong to chart {chart}")]
    ChartMismatch { chart: ChartId, play: ChartId },

    #[error("No chart record found for {0}")]
    ChartNotFound(ChartId),

    #[error("Invalid step booster: {0}")]
    InvalidBooster(String)
}
