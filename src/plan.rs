//! Plan realization: how much of the planned week was actually completed

use crate::models::{Activity, ActivityCategory, ActivityStatus, StatusColor};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which activity categories count toward plan completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub countable: Vec<ActivityCategory>,
}

impl Default for PlanConfig {
    /// Every category the activity catalog marks as counting toward completion
    fn default() -> Self {
        PlanConfig {
            countable: ActivityCategory::ALL
                .into_iter()
                .filter(|category| category.config().counts_toward_completion)
                .collect(),
        }
    }
}

/// Completion counts for a date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRealization {
    /// done / planned, clamped to [0, 1]
    pub percent: Decimal,
    pub done_count: u32,
    /// Activities that were planned or done
    pub planned_count: u32,
    /// All countable activities in the window, canceled included
    pub total_count: u32,
}

/// Qualitative completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Excellent, // 90% and above
    Good,      // 70% to 90%
    Fair,      // 50% to 70%
    Poor,      // Below 50%
}

impl PlanStatus {
    pub fn from_percent(percent: Decimal) -> Self {
        if percent >= dec!(0.9) {
            PlanStatus::Excellent
        } else if percent >= dec!(0.7) {
            PlanStatus::Good
        } else if percent >= dec!(0.5) {
            PlanStatus::Fair
        } else {
            PlanStatus::Poor
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            PlanStatus::Excellent => StatusColor::Green,
            PlanStatus::Good => StatusColor::Yellow,
            PlanStatus::Fair => StatusColor::Orange,
            PlanStatus::Poor => StatusColor::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanStatus::Excellent => "Excellent completion",
            PlanStatus::Good => "Good completion",
            PlanStatus::Fair => "Fair completion",
            PlanStatus::Poor => "Poor completion",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanCalculator {
    config: PlanConfig,
}

impl PlanCalculator {
    pub fn new() -> Self {
        PlanCalculator {
            config: PlanConfig::default(),
        }
    }

    pub fn with_config(config: PlanConfig) -> Self {
        PlanCalculator { config }
    }

    pub fn is_countable(&self, category: ActivityCategory) -> bool {
        self.config.countable.contains(&category)
    }

    /// Completion of countable activities dated within `[start, end]`
    pub fn realization(
        &self,
        activities: &[Activity],
        start: NaiveDate,
        end: NaiveDate,
    ) -> PlanRealization {
        let relevant = activities.iter().filter(|activity| {
            activity.date >= start && activity.date <= end && self.is_countable(activity.category)
        });

        let mut done_count = 0u32;
        let mut planned_count = 0u32;
        let mut total_count = 0u32;

        for activity in relevant {
            total_count += 1;
            match activity.status {
                ActivityStatus::Done => {
                    done_count += 1;
                    planned_count += 1;
                }
                ActivityStatus::Planned => planned_count += 1,
                ActivityStatus::Canceled => {}
            }
        }

        let percent = if planned_count > 0 {
            Decimal::from(done_count) / Decimal::from(planned_count)
        } else {
            Decimal::ZERO
        };

        debug!(%start, %end, done_count, planned_count, total_count, "Plan realization");

        PlanRealization {
            percent: percent.min(Decimal::ONE),
            done_count,
            planned_count,
            total_count,
        }
    }
}

/// Fraction as a whole percentage, e.g. `0.75` → `"75%"`
pub fn format_percent(percent: Decimal) -> String {
    let whole = (percent * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", whole.normalize())
}
