//! Activity type catalog
//!
//! Static metadata per [`ActivityCategory`]: which group it belongs to, whether it
//! produces training load, whether it counts toward plan completion, its default
//! duration and whether scheduling it needs a trainer's approval.

use serde::{Deserialize, Serialize};

use crate::models::ActivityCategory;

/// Coarse grouping used by the calendar legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityGroup {
    Training,
    Competition,
    Recovery,
    Other,
}

/// Status assigned to a freshly scheduled activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Scheduled,
    PendingApproval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityTypeConfig {
    pub category: ActivityCategory,
    pub label: &'static str,
    pub group: ActivityGroup,
    pub counts_toward_completion: bool,
    pub default_duration_min: u32,
    pub requires_trainer_approval: bool,
}

impl ActivityTypeConfig {
    fn new(
        category: ActivityCategory,
        label: &'static str,
        group: ActivityGroup,
        default_duration_min: u32,
    ) -> Self {
        ActivityTypeConfig {
            category,
            label,
            group,
            counts_toward_completion: true,
            default_duration_min,
            requires_trainer_approval: false,
        }
    }

    fn with_trainer_approval(mut self) -> Self {
        self.requires_trainer_approval = true;
        self
    }

    fn excluded_from_completion(mut self) -> Self {
        self.counts_toward_completion = false;
        self
    }
}

impl ActivityCategory {
    /// Catalog entry for this category
    pub fn config(&self) -> ActivityTypeConfig {
        use ActivityCategory::*;
        use ActivityGroup as G;

        match self {
            Training => ActivityTypeConfig::new(*self, "Training", G::Training, 90),
            Match => ActivityTypeConfig::new(*self, "Match", G::Competition, 120),
            IndividualTraining => {
                ActivityTypeConfig::new(*self, "Individual training (coach)", G::Training, 90)
                    .with_trainer_approval()
            }
            GroupTraining => {
                ActivityTypeConfig::new(*self, "Group training (coach)", G::Training, 90)
                    .with_trainer_approval()
            }
            Sparring => ActivityTypeConfig::new(*self, "Sparring", G::Training, 120),
            LeagueMatch => ActivityTypeConfig::new(*self, "League match", G::Competition, 120),
            Americano => ActivityTypeConfig::new(*self, "Americano", G::Competition, 180),
            Tournament => ActivityTypeConfig::new(*self, "Tournament", G::Competition, 240),
            Gym => ActivityTypeConfig::new(*self, "Gym", G::Training, 60),
            Recovery => ActivityTypeConfig::new(*self, "Recovery", G::Recovery, 60),
            Mobility => ActivityTypeConfig::new(*self, "Mobility", G::Recovery, 45),
            WatchMatch => {
                ActivityTypeConfig::new(*self, "Watching a match", G::Other, 120)
                    .excluded_from_completion()
            }
            MachineTraining => {
                ActivityTypeConfig::new(*self, "Ball machine training", G::Training, 90)
            }
        }
    }

    /// Whether a rated, completed activity of this category adds training load
    pub fn is_load_bearing(&self) -> bool {
        !matches!(self, ActivityCategory::WatchMatch)
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    /// Status a new activity of this category starts in
    pub fn initial_schedule_status(&self) -> ScheduleStatus {
        if self.config().requires_trainer_approval {
            ScheduleStatus::PendingApproval
        } else {
            ScheduleStatus::Scheduled
        }
    }
}
