//! One full metrics pass for the weekly dashboard
//!
//! Combines load aggregation, ratio classification, plan realization, readiness
//! and recommendations from a single input bundle.

use crate::acwr::{self, RatioClassification, RatioPoint};
use crate::config::AppConfig;
use crate::load::{LoadCalculator, LoadMetrics};
use crate::models::{Activity, ChronicMethod, DailyLoad, ReadinessSample};
use crate::plan::{PlanCalculator, PlanRealization, PlanStatus};
use crate::readiness::{self, ReadinessSummary};
use crate::recommendations::{generate_recommendations, Recommendation, RecommendationInputs};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything the data layer supplies for one dashboard refresh.
///
/// Dates are local calendar dates already resolved in the user's timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInputs {
    #[serde(alias = "weekStart")]
    pub week_start: NaiveDate,
    #[serde(alias = "weekEnd")]
    pub week_end: NaiveDate,
    pub today: NaiveDate,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub readiness: Vec<ReadinessSample>,
    #[serde(default, alias = "historyAU")]
    pub history: Vec<DailyLoad>,
    /// Overrides the configured chronic method
    #[serde(default, alias = "acwrMethod")]
    pub method: Option<ChronicMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub load: LoadMetrics,
    pub ratio: RatioClassification,
    pub plan: PlanRealization,
    pub plan_status: PlanStatus,
    pub readiness: Option<ReadinessSummary>,
    /// Acute sum of the seven days before the current acute window
    pub previous_acute: Decimal,
    pub ratio_trend: Vec<RatioPoint>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardEngine {
    load: LoadCalculator,
    plan: PlanCalculator,
}

impl DashboardEngine {
    pub fn new() -> Self {
        DashboardEngine::default()
    }

    pub fn from_config(config: &AppConfig) -> Self {
        DashboardEngine {
            load: LoadCalculator::with_config(config.load.clone()),
            plan: PlanCalculator::with_config(config.plan.clone()),
        }
    }

    #[tracing::instrument(skip_all, fields(today = %inputs.today, activities = inputs.activities.len()))]
    pub fn compute(&self, inputs: &DashboardInputs) -> DashboardMetrics {
        let method = inputs.method.unwrap_or(self.load.config().chronic_method);
        let load = self.load.calculate_with_method(
            &inputs.activities,
            &inputs.history,
            inputs.today,
            method,
        );

        let ratio = acwr::classify_ratio(load.acute, load.chronic);
        let plan = self
            .plan
            .realization(&inputs.activities, inputs.week_start, inputs.week_end);
        let readiness = readiness::summarize(&inputs.readiness);

        let previous_acute = self.previous_acute(&load.daily, inputs.today);

        let recommendations = generate_recommendations(&RecommendationInputs {
            ratio: ratio.ratio,
            chronic: load.chronic,
            acute: load.acute,
            readiness: readiness.as_ref().map(|summary| summary.value),
            plan_percent: plan.percent,
            has_data: !inputs.history.is_empty(),
            previous_acute: Some(previous_acute),
        });

        let ratio_trend = acwr::ratio_trend(&load.daily, load.chronic);

        info!(
            acute = %load.acute,
            chronic = %load.chronic,
            ratio = %ratio.ratio,
            band = ?ratio.band,
            recommendations = recommendations.len(),
            "Dashboard metrics computed"
        );

        DashboardMetrics {
            plan_status: PlanStatus::from_percent(plan.percent),
            load,
            ratio,
            plan,
            readiness,
            previous_acute,
            ratio_trend,
            recommendations,
        }
    }

    /// Acute sum anchored one acute window before `today`
    fn previous_acute(&self, daily: &[DailyLoad], today: NaiveDate) -> Decimal {
        let offset = u64::from(self.load.config().acute_window_days);
        match today.checked_sub_days(Days::new(offset)) {
            Some(previous_today) => self.load.acute_sum(daily, previous_today),
            None => Decimal::ZERO,
        }
    }
}
