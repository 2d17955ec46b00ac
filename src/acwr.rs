//! Acute:Chronic Workload Ratio (ACWR)
//!
//! ACWR = acute / max(chronic, 1). The floor keeps the ratio finite when there is
//! no chronic baseline yet.

use crate::models::{DailyLoad, StatusColor};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lower bound of the optimal band (inclusive)
pub const OPTIMAL_LOWER: Decimal = dec!(0.8);

/// Upper bound of the optimal band (inclusive)
pub const OPTIMAL_UPPER: Decimal = dec!(1.3);

/// Ratios above this are high load
pub const HIGH_LOAD_THRESHOLD: Decimal = dec!(1.5);

/// Entries summed per point of the ratio trend
const TREND_WINDOW: usize = 7;

/// ACWR risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Optimal,
    HighLoad,
    ElevatedRisk,
    LowStimulation,
}

impl RiskBand {
    /// Classify a ratio. The optimal band is tested first, so exactly 1.3 is optimal.
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio >= OPTIMAL_LOWER && ratio <= OPTIMAL_UPPER {
            RiskBand::Optimal
        } else if ratio > HIGH_LOAD_THRESHOLD {
            RiskBand::HighLoad
        } else if ratio > OPTIMAL_UPPER {
            RiskBand::ElevatedRisk
        } else {
            RiskBand::LowStimulation
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            RiskBand::Optimal => StatusColor::Green,
            RiskBand::HighLoad => StatusColor::Red,
            RiskBand::ElevatedRisk => StatusColor::Yellow,
            RiskBand::LowStimulation => StatusColor::Blue,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Optimal => "Optimal",
            RiskBand::HighLoad => "High load",
            RiskBand::ElevatedRisk => "Elevated risk",
            RiskBand::LowStimulation => "Low stimulation",
        }
    }
}

/// Classified workload ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioClassification {
    pub acute: Decimal,
    pub chronic: Decimal,
    pub ratio: Decimal,
    pub band: RiskBand,
    pub color: StatusColor,
    pub label: String,
}

/// One point of the daily ratio trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioPoint {
    pub date: NaiveDate,
    pub ratio: Decimal,
}

/// Divide acute by the floored chronic baseline and classify the result
pub fn classify_ratio(acute: Decimal, chronic: Decimal) -> RatioClassification {
    let ratio = acute / chronic.max(Decimal::ONE);
    let band = RiskBand::from_ratio(ratio);

    debug!(%acute, %chronic, %ratio, ?band, "Classified workload ratio");

    RatioClassification {
        acute,
        chronic,
        ratio,
        band,
        color: band.color(),
        label: band.label().to_string(),
    }
}

/// A ratio is only meaningful once some chronic load exists
pub fn is_chronic_reliable(chronic: Decimal) -> bool {
    chronic > Decimal::ZERO
}

/// Ratio per entry of the daily series: trailing 7-entry sum over the floored
/// chronic baseline. The first six entries have no full window and report zero.
pub fn ratio_trend(daily: &[DailyLoad], chronic: Decimal) -> Vec<RatioPoint> {
    let divisor = chronic.max(Decimal::ONE);

    daily
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let ratio = if index + 1 < TREND_WINDOW {
                Decimal::ZERO
            } else {
                let window_sum: Decimal = daily[index + 1 - TREND_WINDOW..=index]
                    .iter()
                    .map(|p| p.load)
                    .sum();
                window_sum / divisor
            };
            RatioPoint {
                date: point.date,
                ratio,
            }
        })
        .collect()
}

/// Ratio with two decimals
pub fn format_ratio(ratio: Decimal) -> String {
    format!(
        "{:.2}",
        ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Chronic baseline with one decimal, or "No base" when there is none
pub fn format_chronic(chronic: Decimal) -> String {
    if chronic.is_zero() {
        return "No base".to_string();
    }
    format!(
        "{:.1}",
        chronic.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}
