//! Session-RPE load aggregation and rolling acute/chronic windows
//!
//! Load is measured in arbitrary units (AU): session rating (0-10) multiplied by
//! duration in minutes. Daily totals feed a 7-day acute sum and a 28-day chronic
//! baseline, both anchored on a caller-supplied "today".

use crate::models::{Activity, ChronicMethod, DailyLoad};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Rolling window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Acute window length in days, today included (default: 7)
    pub acute_window_days: u16,

    /// Chronic window length in days, today included (default: 28)
    pub chronic_window_days: u16,

    /// EWMA span N used for λ = 2 / (N + 1) (default: 28)
    pub ewma_span_days: u16,

    /// Chronic baseline method used when the caller doesn't choose one
    pub chronic_method: ChronicMethod,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            acute_window_days: 7,
            chronic_window_days: 28,
            ewma_span_days: 28,
            chronic_method: ChronicMethod::TrailingAvg,
        }
    }
}

/// Load aggregates for a single "today"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadMetrics {
    /// Date the windows are anchored on
    pub today: NaiveDate,

    /// Sum of daily load over the acute window
    pub acute: Decimal,

    /// Chronic baseline over the chronic window
    pub chronic: Decimal,

    /// Method used for the chronic baseline
    pub method: ChronicMethod,

    /// Merged daily series, ascending by date
    pub daily: Vec<DailyLoad>,
}

/// Core load calculation engine
#[derive(Debug, Clone, Default)]
pub struct LoadCalculator {
    config: LoadConfig,
}

impl LoadCalculator {
    /// Create new load calculator with default windows
    pub fn new() -> Self {
        LoadCalculator {
            config: LoadConfig::default(),
        }
    }

    /// Create new load calculator with custom windows
    pub fn with_config(config: LoadConfig) -> Self {
        LoadCalculator { config }
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Load contributed by one activity.
    ///
    /// Zero unless the activity is done, rated and of a load-bearing category.
    pub fn activity_load(activity: &Activity) -> Decimal {
        match activity.rating {
            Some(rating) if activity.is_done() && activity.category.is_load_bearing() => {
                rating * Decimal::from(activity.duration_min)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Sum activity loads per calendar date.
    ///
    /// Every date that has an activity gets an entry, even when its total is zero.
    pub fn aggregate_activities(&self, activities: &[Activity]) -> BTreeMap<NaiveDate, Decimal> {
        let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

        for activity in activities {
            *daily.entry(activity.date).or_insert(Decimal::ZERO) += Self::activity_load(activity);
        }

        daily
    }

    /// Merge computed daily load with an external history series.
    ///
    /// History is inserted first so computed values overwrite it on shared dates.
    pub fn daily_load(&self, activities: &[Activity], history: &[DailyLoad]) -> Vec<DailyLoad> {
        let computed = self.aggregate_activities(activities);

        let mut merged: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        merged.extend(history.iter().map(|point| (point.date, point.load)));
        let overwritten = computed.keys().filter(|date| merged.contains_key(date)).count();
        merged.extend(computed);

        debug!(
            activities = activities.len(),
            history = history.len(),
            days = merged.len(),
            overwritten,
            "Merged daily load series"
        );

        merged
            .into_iter()
            .map(|(date, load)| DailyLoad { date, load })
            .collect()
    }

    /// Sum of daily load over the acute window ending at `today`
    pub fn acute_sum(&self, series: &[DailyLoad], today: NaiveDate) -> Decimal {
        Self::window(series, today, self.config.acute_window_days)
            .iter()
            .map(|point| point.load)
            .sum()
    }

    /// Chronic baseline over the chronic window ending at `today`
    pub fn chronic_baseline(
        &self,
        series: &[DailyLoad],
        today: NaiveDate,
        method: ChronicMethod,
    ) -> Decimal {
        let window = Self::window(series, today, self.config.chronic_window_days);

        let chronic = match method {
            ChronicMethod::TrailingAvg => Self::trailing_average(&window),
            ChronicMethod::Ewma => Self::ewma(&window, self.ewma_lambda()),
        };

        trace!(%today, %method, points = window.len(), %chronic, "Chronic baseline");
        chronic
    }

    /// EWMA smoothing factor λ = 2 / (N + 1)
    pub fn ewma_lambda(&self) -> Decimal {
        Decimal::TWO / Decimal::from(u32::from(self.config.ewma_span_days) + 1)
    }

    /// Compute the merged series and both aggregates using the configured method
    pub fn calculate(
        &self,
        activities: &[Activity],
        history: &[DailyLoad],
        today: NaiveDate,
    ) -> LoadMetrics {
        self.calculate_with_method(activities, history, today, self.config.chronic_method)
    }

    pub fn calculate_with_method(
        &self,
        activities: &[Activity],
        history: &[DailyLoad],
        today: NaiveDate,
        method: ChronicMethod,
    ) -> LoadMetrics {
        let daily = self.daily_load(activities, history);
        let acute = self.acute_sum(&daily, today);
        let chronic = self.chronic_baseline(&daily, today, method);

        LoadMetrics {
            today,
            acute,
            chronic,
            method,
            daily,
        }
    }

    /// Points inside the inclusive window `[today - (days - 1), today]`, ascending
    fn window(series: &[DailyLoad], today: NaiveDate, days: u16) -> Vec<&DailyLoad> {
        let lookback = u64::from(days.max(1) - 1);
        let start = today
            .checked_sub_days(Days::new(lookback))
            .unwrap_or(NaiveDate::MIN);

        let mut window: Vec<&DailyLoad> = series
            .iter()
            .filter(|point| point.date >= start && point.date <= today)
            .collect();
        window.sort_by_key(|point| point.date);
        window
    }

    fn trailing_average(window: &[&DailyLoad]) -> Decimal {
        if window.is_empty() {
            return Decimal::ZERO;
        }

        let total: Decimal = window.iter().map(|point| point.load).sum();
        total / Decimal::from(window.len())
    }

    fn ewma(window: &[&DailyLoad], lambda: Decimal) -> Decimal {
        let Some((first, rest)) = window.split_first() else {
            return Decimal::ZERO;
        };

        rest.iter().fold(first.load, |ewma, point| {
            lambda * point.load + (Decimal::ONE - lambda) * ewma
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCategory, ActivityStatus};
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn done(id: &str, date: NaiveDate, minutes: u32, rating: Decimal) -> Activity {
        Activity::new(id, date, ActivityCategory::Training, minutes, ActivityStatus::Done)
            .with_rating(rating)
    }

    fn series(points: &[(u32, Decimal)]) -> Vec<DailyLoad> {
        points
            .iter()
            .map(|(day, load)| DailyLoad::new(date(*day), *load))
            .collect()
    }

    #[test]
    fn test_activity_load() {
        let activity = done("a", date(15), 90, dec!(7));
        assert_eq!(LoadCalculator::activity_load(&activity), dec!(630));
    }

    #[test]
    fn test_activity_load_requires_done_and_rating() {
        let planned = Activity::new("p", date(15), ActivityCategory::Match, 90, ActivityStatus::Planned)
            .with_rating(dec!(8));
        let unrated = Activity::new("u", date(15), ActivityCategory::Match, 90, ActivityStatus::Done);
        let canceled = Activity::new("c", date(15), ActivityCategory::Gym, 60, ActivityStatus::Canceled)
            .with_rating(dec!(5));

        assert_eq!(LoadCalculator::activity_load(&planned), Decimal::ZERO);
        assert_eq!(LoadCalculator::activity_load(&unrated), Decimal::ZERO);
        assert_eq!(LoadCalculator::activity_load(&canceled), Decimal::ZERO);
    }

    #[test]
    fn test_watching_a_match_carries_no_load() {
        let activity =
            Activity::new("w", date(15), ActivityCategory::WatchMatch, 120, ActivityStatus::Done)
                .with_rating(dec!(3));
        assert_eq!(LoadCalculator::activity_load(&activity), Decimal::ZERO);
    }

    #[test]
    fn test_daily_aggregation_sums_same_day() {
        let calculator = LoadCalculator::new();
        let activities = vec![
            done("a", date(15), 60, dec!(5)),
            done("b", date(15), 30, dec!(8)),
            Activity::new("c", date(16), ActivityCategory::Training, 60, ActivityStatus::Planned),
        ];

        let daily = calculator.aggregate_activities(&activities);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[&date(15)], dec!(540));
        assert_eq!(daily[&date(16)], Decimal::ZERO);
    }

    #[test]
    fn test_merge_prefers_computed_values() {
        let calculator = LoadCalculator::new();
        let history = series(&[(14, dec!(300)), (15, dec!(999))]);
        let activities = vec![done("a", date(15), 90, dec!(7))];

        let merged = calculator.daily_load(&activities, &history);

        assert_eq!(merged, series(&[(14, dec!(300)), (15, dec!(630))]));
    }

    #[test]
    fn test_merge_sorts_ascending() {
        let calculator = LoadCalculator::new();
        let history = series(&[(20, dec!(1)), (3, dec!(2)), (11, dec!(3))]);

        let merged = calculator.daily_load(&[], &history);
        let dates: Vec<NaiveDate> = merged.iter().map(|p| p.date).collect();

        assert_eq!(dates, vec![date(3), date(11), date(20)]);
    }

    #[test]
    fn test_empty_inputs() {
        let calculator = LoadCalculator::new();
        let merged = calculator.daily_load(&[], &[]);

        assert!(merged.is_empty());
        assert_eq!(calculator.acute_sum(&merged, date(18)), Decimal::ZERO);
        assert_eq!(
            calculator.chronic_baseline(&merged, date(18), ChronicMethod::TrailingAvg),
            Decimal::ZERO
        );
        assert_eq!(
            calculator.chronic_baseline(&merged, date(18), ChronicMethod::Ewma),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_acute_window_is_inclusive_seven_days() {
        let calculator = LoadCalculator::new();
        // Day 11 is just outside [12, 18]; day 19 is in the future
        let daily = series(&[
            (11, dec!(1000)),
            (12, dec!(10)),
            (15, dec!(20)),
            (18, dec!(30)),
            (19, dec!(5000)),
        ]);

        assert_eq!(calculator.acute_sum(&daily, date(18)), dec!(60));
    }

    #[test]
    fn test_trailing_average_divides_by_points_present() {
        let calculator = LoadCalculator::new();
        let daily = series(&[(10, dec!(100)), (12, dec!(200)), (18, dec!(600))]);

        let chronic = calculator.chronic_baseline(&daily, date(18), ChronicMethod::TrailingAvg);

        assert_eq!(chronic, dec!(300));
    }

    #[test]
    fn test_chronic_window_excludes_day_28_back() {
        let calculator = LoadCalculator::new();
        let today = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let daily = vec![
            // today - 28: outside
            DailyLoad::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(), dec!(10000)),
            // today - 27: inside
            DailyLoad::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), dec!(100)),
            DailyLoad::new(today, dec!(300)),
        ];

        let chronic = calculator.chronic_baseline(&daily, today, ChronicMethod::TrailingAvg);

        assert_eq!(chronic, dec!(200));
    }

    #[test]
    fn test_ewma_seeds_with_first_point() {
        let calculator = LoadCalculator::new();
        let single = series(&[(18, dec!(450))]);
        assert_eq!(
            calculator.chronic_baseline(&single, date(18), ChronicMethod::Ewma),
            dec!(450)
        );

        // 100 then 200: 100 + λ·(200 - 100) with λ = 2/29
        let two = series(&[(17, dec!(100)), (18, dec!(200))]);
        let ewma = calculator.chronic_baseline(&two, date(18), ChronicMethod::Ewma);
        let expected = dec!(100) + dec!(200) / dec!(29);
        assert!((ewma - expected).abs() < dec!(0.000001), "ewma = {}", ewma);
    }

    #[test]
    fn test_ewma_ignores_input_order() {
        let calculator = LoadCalculator::new();
        let ordered = series(&[(5, dec!(300)), (9, dec!(120)), (14, dec!(480)), (18, dec!(60))]);
        let mut shuffled = ordered.clone();
        shuffled.reverse();
        shuffled.swap(0, 2);

        assert_eq!(
            calculator.chronic_baseline(&ordered, date(18), ChronicMethod::Ewma),
            calculator.chronic_baseline(&shuffled, date(18), ChronicMethod::Ewma)
        );
    }

    #[test]
    fn test_ewma_lambda() {
        let calculator = LoadCalculator::new();
        let lambda = calculator.ewma_lambda();
        assert!((lambda - dec!(0.06897)).abs() < dec!(0.00001));
    }

    #[test]
    fn test_custom_config() {
        let calculator = LoadCalculator::with_config(LoadConfig {
            acute_window_days: 3,
            chronic_window_days: 5,
            ..LoadConfig::default()
        });
        let daily = series(&[(12, dec!(100)), (14, dec!(10)), (16, dec!(20)), (18, dec!(30))]);

        assert_eq!(calculator.acute_sum(&daily, date(18)), dec!(50));
        assert_eq!(
            calculator.chronic_baseline(&daily, date(18), ChronicMethod::TrailingAvg),
            dec!(20)
        );
    }

    #[test]
    fn test_calculate_uses_configured_method() {
        let calculator = LoadCalculator::with_config(LoadConfig {
            chronic_method: ChronicMethod::Ewma,
            ..LoadConfig::default()
        });
        let activities = vec![done("a", date(18), 60, dec!(5))];

        let metrics = calculator.calculate(&activities, &[], date(18));

        assert_eq!(metrics.method, ChronicMethod::Ewma);
        assert_eq!(metrics.acute, dec!(300));
        assert_eq!(metrics.chronic, dec!(300));
        assert_eq!(metrics.daily.len(), 1);
    }
}
