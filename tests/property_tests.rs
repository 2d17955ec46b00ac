use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use trainload::acwr::{classify_ratio, RiskBand, HIGH_LOAD_THRESHOLD, OPTIMAL_LOWER, OPTIMAL_UPPER};
use trainload::load::LoadCalculator;
use trainload::models::{Activity, ActivityCategory, ActivityStatus, ChronicMethod, DailyLoad};
use trainload::recommendations::{generate_recommendations, RecommendationInputs};

const TODAY_OFFSET: u64 = 40;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base_date() + Days::new(offset)
}

fn today() -> NaiveDate {
    day(TODAY_OFFSET)
}

fn series(loads: &BTreeMap<u64, u32>) -> Vec<DailyLoad> {
    loads
        .iter()
        .map(|(offset, load)| DailyLoad::new(day(*offset), Decimal::from(*load)))
        .collect()
}

fn loads_strategy() -> impl Strategy<Value = BTreeMap<u64, u32>> {
    prop::collection::btree_map(0u64..60, 0u32..2000, 0..40)
}

proptest! {
    #[test]
    fn test_acute_sum_matches_window(loads in loads_strategy()) {
        let calculator = LoadCalculator::new();
        let expected: u32 = loads
            .iter()
            .filter(|(offset, _)| (TODAY_OFFSET - 6..=TODAY_OFFSET).contains(*offset))
            .map(|(_, load)| *load)
            .sum();

        prop_assert_eq!(calculator.acute_sum(&series(&loads), today()), Decimal::from(expected));
    }

    #[test]
    fn test_trailing_average_matches_window(loads in loads_strategy()) {
        let calculator = LoadCalculator::new();
        let in_window: Vec<u32> = loads
            .iter()
            .filter(|(offset, _)| (TODAY_OFFSET - 27..=TODAY_OFFSET).contains(*offset))
            .map(|(_, load)| *load)
            .collect();

        let expected = if in_window.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(in_window.iter().sum::<u32>()) / Decimal::from(in_window.len())
        };

        prop_assert_eq!(
            calculator.chronic_baseline(&series(&loads), today(), ChronicMethod::TrailingAvg),
            expected
        );
    }

    #[test]
    fn test_ewma_ignores_input_order(
        shuffled in loads_strategy().prop_flat_map(|loads| {
            let sorted = series(&loads);
            (Just(sorted.clone()), Just(sorted).prop_shuffle())
        })
    ) {
        let (sorted, shuffled) = shuffled;
        let calculator = LoadCalculator::new();

        prop_assert_eq!(
            calculator.chronic_baseline(&sorted, today(), ChronicMethod::Ewma),
            calculator.chronic_baseline(&shuffled, today(), ChronicMethod::Ewma)
        );
    }

    #[test]
    fn test_computed_load_wins_merge(
        history in loads_strategy(),
        done_days in prop::collection::btree_set(0u64..60, 0..10),
    ) {
        let calculator = LoadCalculator::new();
        let activities: Vec<Activity> = done_days
            .iter()
            .map(|offset| {
                Activity::new(
                    offset.to_string(),
                    day(*offset),
                    ActivityCategory::Training,
                    10,
                    ActivityStatus::Done,
                )
                .with_rating(Decimal::ONE)
            })
            .collect();

        let merged = calculator.daily_load(&activities, &series(&history));

        let mut seen = std::collections::BTreeSet::new();
        for point in &merged {
            prop_assert!(seen.insert(point.date), "duplicate date {}", point.date);
        }
        prop_assert!(merged.windows(2).all(|pair| pair[0].date < pair[1].date));

        for point in &merged {
            let offset = (point.date - base_date()).num_days() as u64;
            if done_days.contains(&offset) {
                prop_assert_eq!(point.load, Decimal::from(10));
            } else {
                prop_assert_eq!(Some(point.load), history.get(&offset).map(|l| Decimal::from(*l)));
            }
        }
    }

    #[test]
    fn test_classification_follows_thresholds(acute in 0u32..5000, chronic in 0u32..3000) {
        let classification = classify_ratio(Decimal::from(acute), Decimal::from(chronic));
        let ratio = classification.ratio;

        prop_assert_eq!(ratio, Decimal::from(acute) / Decimal::from(chronic.max(1)));

        let expected = if ratio >= OPTIMAL_LOWER && ratio <= OPTIMAL_UPPER {
            RiskBand::Optimal
        } else if ratio > HIGH_LOAD_THRESHOLD {
            RiskBand::HighLoad
        } else if ratio > OPTIMAL_UPPER {
            RiskBand::ElevatedRisk
        } else {
            RiskBand::LowStimulation
        };
        prop_assert_eq!(classification.band, expected);
    }

    #[test]
    fn test_recommendations_sorted_and_non_empty(
        acute in 0u32..5000,
        chronic in 0u32..3000,
        readiness in prop::option::of(0u32..=10),
        plan_tenths in 0u32..=10,
        has_data in any::<bool>(),
        previous in prop::option::of(0u32..5000),
    ) {
        let classification = classify_ratio(Decimal::from(acute), Decimal::from(chronic));
        let recommendations = generate_recommendations(&RecommendationInputs {
            ratio: classification.ratio,
            chronic: Decimal::from(chronic),
            acute: Decimal::from(acute),
            readiness: readiness.map(Decimal::from),
            plan_percent: Decimal::new(i64::from(plan_tenths), 1),
            has_data,
            previous_acute: previous.map(Decimal::from),
        });

        prop_assert!(!recommendations.is_empty());
        prop_assert!(recommendations
            .windows(2)
            .all(|pair| pair[0].priority.weight() >= pair[1].priority.weight()));
        if !has_data || chronic == 0 {
            prop_assert_eq!(recommendations.len(), 1);
        }
    }
}
