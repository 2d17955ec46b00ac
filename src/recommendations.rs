//! Rule-based coaching recommendations
//!
//! Rules are evaluated in table order and several may fire in one pass. A rule
//! marked terminal ends evaluation when it fires. The result is sorted by
//! priority, keeping rule order among equal priorities.

use crate::acwr::{HIGH_LOAD_THRESHOLD, OPTIMAL_LOWER, OPTIMAL_UPPER};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

/// Chronic load below which low stimulation is a medium-priority concern
const LOW_CHRONIC_THRESHOLD: Decimal = dec!(50);

/// Week-over-week acute growth (percent) that triggers a warning
const GROWTH_WARNING_PERCENT: Decimal = dec!(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Display color tag for priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityColor {
    Danger,
    Warning,
    Success,
}

impl Priority {
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn color(&self) -> PriorityColor {
        match self {
            Priority::High => PriorityColor::Danger,
            Priority::Medium => PriorityColor::Warning,
            Priority::Low => PriorityColor::Success,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Load,
    Readiness,
    Plan,
    General,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Load => "Load",
            Category::Readiness => "Readiness",
            Category::Plan => "Plan",
            Category::General => "General",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub priority: Priority,
    pub category: Category,
}

impl Recommendation {
    pub fn new(text: impl Into<String>, priority: Priority, category: Category) -> Self {
        Recommendation {
            text: text.into(),
            priority,
            category,
        }
    }
}

/// Metrics the rules look at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationInputs {
    pub ratio: Decimal,
    pub chronic: Decimal,
    pub acute: Decimal,
    /// Pre-averaged readiness; `None` when no samples exist
    pub readiness: Option<Decimal>,
    pub plan_percent: Decimal,
    pub has_data: bool,
    /// Acute sum of the previous period, when known
    pub previous_acute: Option<Decimal>,
}

struct Rule {
    name: &'static str,
    terminal: bool,
    evaluate: fn(&RecommendationInputs) -> Option<Recommendation>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "no_data",
        terminal: true,
        evaluate: |inputs| {
            (!inputs.has_data).then(|| {
                Recommendation::new(
                    "No data for this period - start logging your activities",
                    Priority::Low,
                    Category::General,
                )
            })
        },
    },
    Rule {
        name: "no_training_base",
        terminal: true,
        evaluate: |inputs| {
            inputs.chronic.is_zero().then(|| {
                Recommendation::new(
                    "No training base (C=0) - build up load gradually",
                    Priority::High,
                    Category::Load,
                )
            })
        },
    },
    Rule {
        name: "high_load",
        terminal: false,
        evaluate: |inputs| {
            (inputs.ratio > HIGH_LOAD_THRESHOLD).then(|| {
                Recommendation::new(
                    "High load - consider 1-2 recovery days",
                    Priority::High,
                    Category::Load,
                )
            })
        },
    },
    Rule {
        name: "elevated_risk",
        terminal: false,
        evaluate: |inputs| {
            (inputs.ratio >= OPTIMAL_UPPER && inputs.ratio <= HIGH_LOAD_THRESHOLD).then(|| {
                Recommendation::new(
                    "Elevated risk - monitor symptoms and reduce intensity",
                    Priority::Medium,
                    Category::Load,
                )
            })
        },
    },
    Rule {
        name: "low_stimulation",
        terminal: false,
        evaluate: |inputs| {
            (inputs.ratio < OPTIMAL_LOWER).then(|| {
                let priority = if inputs.chronic < LOW_CHRONIC_THRESHOLD {
                    Priority::Medium
                } else {
                    Priority::Low
                };
                Recommendation::new(
                    "Low stimulation - increase training stimulus or volume",
                    priority,
                    Category::Load,
                )
            })
        },
    },
    Rule {
        name: "low_readiness",
        terminal: false,
        evaluate: |inputs| {
            inputs.readiness.filter(|r| *r < dec!(4)).map(|_| {
                Recommendation::new(
                    "Low readiness - focus on recovery and light technical work",
                    Priority::High,
                    Category::Readiness,
                )
            })
        },
    },
    Rule {
        name: "medium_readiness",
        terminal: false,
        evaluate: |inputs| {
            inputs
                .readiness
                .filter(|r| *r >= dec!(4) && *r < dec!(7))
                .map(|_| {
                    Recommendation::new(
                        "Medium readiness - adjust intensity to how you feel",
                        Priority::Medium,
                        Category::Readiness,
                    )
                })
        },
    },
    Rule {
        name: "load_growth",
        terminal: false,
        evaluate: |inputs| {
            let previous = inputs.previous_acute.filter(|p| *p > Decimal::ZERO)?;
            let growth = (inputs.acute - previous) / previous * Decimal::ONE_HUNDRED;
            (growth > GROWTH_WARNING_PERCENT).then(|| {
                let rounded =
                    growth.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                Recommendation::new(
                    format!(
                        "Warning: load increased by {}% - consider reducing it",
                        rounded.normalize()
                    ),
                    Priority::Medium,
                    Category::Load,
                )
            })
        },
    },
    Rule {
        name: "low_plan_completion",
        terminal: false,
        evaluate: |inputs| {
            (inputs.plan_percent < dec!(0.5)).then(|| {
                Recommendation::new(
                    "Low plan completion - review the causes and adjust your goals",
                    Priority::Medium,
                    Category::Plan,
                )
            })
        },
    },
    Rule {
        name: "excellent_plan_completion",
        terminal: false,
        evaluate: |inputs| {
            (inputs.plan_percent > dec!(0.9)).then(|| {
                Recommendation::new(
                    "Excellent plan completion - keep up the current pace",
                    Priority::Low,
                    Category::Plan,
                )
            })
        },
    },
];

fn fallback() -> Recommendation {
    Recommendation::new(
        "All metrics within normal range - continue your current training plan",
        Priority::Low,
        Category::General,
    )
}

/// Evaluate the rule table and return recommendations, highest priority first
pub fn generate_recommendations(inputs: &RecommendationInputs) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for rule in RULES {
        if let Some(recommendation) = (rule.evaluate)(inputs) {
            debug!(rule = rule.name, priority = ?recommendation.priority, "Recommendation rule fired");
            recommendations.push(recommendation);
            if rule.terminal {
                return recommendations;
            }
        }
    }

    if recommendations.is_empty() {
        recommendations.push(fallback());
    }

    // sort_by_key is stable, so rule order survives among equal priorities
    recommendations.sort_by_key(|r| Reverse(r.priority.weight()));
    recommendations
}
