//! Readiness trend from subjective recovery samples

use crate::models::{ReadinessSample, StatusColor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Number of most recent samples averaged
pub const RECENT_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
    High,
    Medium,
    Low,
}

impl ReadinessBand {
    pub fn from_value(value: Decimal) -> Self {
        if value >= dec!(7) {
            ReadinessBand::High
        } else if value >= dec!(4) {
            ReadinessBand::Medium
        } else {
            ReadinessBand::Low
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            ReadinessBand::High => StatusColor::Green,
            ReadinessBand::Medium => StatusColor::Yellow,
            ReadinessBand::Low => StatusColor::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessBand::High => "High readiness",
            ReadinessBand::Medium => "Medium readiness",
            ReadinessBand::Low => "Low readiness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    /// Mean of the most recent samples
    pub value: Decimal,
    pub band: ReadinessBand,
    pub color: StatusColor,
    pub label: String,
    /// How many samples went into the mean (1..=3)
    pub sample_count: usize,
}

/// Mean of the latest (by date) up-to-3 samples; `None` without samples
pub fn recent_average(samples: &[ReadinessSample]) -> Option<Decimal> {
    let recent = latest(samples);
    if recent.is_empty() {
        return None;
    }

    let total: Decimal = recent.iter().map(|sample| sample.value).sum();
    Some(total / Decimal::from(recent.len()))
}

pub fn summarize(samples: &[ReadinessSample]) -> Option<ReadinessSummary> {
    let value = recent_average(samples)?;
    let band = ReadinessBand::from_value(value);

    Some(ReadinessSummary {
        value,
        band,
        color: band.color(),
        label: band.label().to_string(),
        sample_count: samples.len().min(RECENT_SAMPLES),
    })
}

fn latest(samples: &[ReadinessSample]) -> Vec<&ReadinessSample> {
    let mut sorted: Vec<&ReadinessSample> = samples.iter().collect();
    sorted.sort_by_key(|sample| sample.date);
    let skip = sorted.len().saturating_sub(RECENT_SAMPLES);
    sorted.split_off(skip)
}
