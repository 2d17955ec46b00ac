use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainLoadError};

/// Activity categories recorded on the training calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Training,
    Match,
    #[serde(alias = "sparing")]
    Sparring,
    Americano,
    Tournament,
    Gym,
    IndividualTraining,
    GroupTraining,
    LeagueMatch,
    Recovery,
    Mobility,
    WatchMatch,
    MachineTraining,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 13] = [
        ActivityCategory::Training,
        ActivityCategory::Match,
        ActivityCategory::Sparring,
        ActivityCategory::Americano,
        ActivityCategory::Tournament,
        ActivityCategory::Gym,
        ActivityCategory::IndividualTraining,
        ActivityCategory::GroupTraining,
        ActivityCategory::LeagueMatch,
        ActivityCategory::Recovery,
        ActivityCategory::Mobility,
        ActivityCategory::WatchMatch,
        ActivityCategory::MachineTraining,
    ];

    /// Canonical snake_case identifier, as used in JSON/CSV input
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Training => "training",
            ActivityCategory::Match => "match",
            ActivityCategory::Sparring => "sparring",
            ActivityCategory::Americano => "americano",
            ActivityCategory::Tournament => "tournament",
            ActivityCategory::Gym => "gym",
            ActivityCategory::IndividualTraining => "individual_training",
            ActivityCategory::GroupTraining => "group_training",
            ActivityCategory::LeagueMatch => "league_match",
            ActivityCategory::Recovery => "recovery",
            ActivityCategory::Mobility => "mobility",
            ActivityCategory::WatchMatch => "watch_match",
            ActivityCategory::MachineTraining => "machine_training",
        }
    }
}

impl std::fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        if normalized == "sparing" {
            return Ok(ActivityCategory::Sparring);
        }
        ActivityCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| format!("Unknown activity category: {}", s))
    }
}

/// Lifecycle status of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Planned,
    Done,
    #[serde(alias = "cancelled")]
    Canceled,
}

impl std::str::FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planned" => Ok(ActivityStatus::Planned),
            "done" => Ok(ActivityStatus::Done),
            "canceled" | "cancelled" => Ok(ActivityStatus::Canceled),
            _ => Err(format!("Unknown activity status: {}", s)),
        }
    }
}

/// A single scheduled or completed activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Opaque identifier supplied by the data layer
    pub id: String,

    /// Local calendar date of the activity
    pub date: NaiveDate,

    /// Activity category
    #[serde(rename = "type", alias = "category")]
    pub category: ActivityCategory,

    /// Duration in minutes
    #[serde(alias = "durationMin")]
    pub duration_min: u32,

    /// Session RPE (0-10), present once the activity has been rated
    #[serde(default, alias = "sRPE", alias = "srpe")]
    pub rating: Option<Decimal>,

    /// Lifecycle status
    pub status: ActivityStatus,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        category: ActivityCategory,
        duration_min: u32,
        status: ActivityStatus,
    ) -> Self {
        Activity {
            id: id.into(),
            date,
            category,
            duration_min,
            rating: None,
            status,
        }
    }

    pub fn with_rating(mut self, rating: Decimal) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == ActivityStatus::Done
    }
}

/// Total load (AU) for one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoad {
    pub date: NaiveDate,

    /// Load in arbitrary units (rating × minutes)
    #[serde(alias = "au")]
    pub load: Decimal,
}

impl DailyLoad {
    pub fn new(date: NaiveDate, load: Decimal) -> Self {
        DailyLoad { date, load }
    }
}

/// Subjective readiness/recovery sample (0-10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessSample {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Chronic baseline smoothing method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronicMethod {
    /// Arithmetic mean of the daily points inside the chronic window
    #[default]
    #[serde(alias = "avg4w")]
    TrailingAvg,
    /// Exponentially weighted moving average seeded with the first point
    #[serde(alias = "ewma28")]
    Ewma,
}

impl std::fmt::Display for ChronicMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChronicMethod::TrailingAvg => write!(f, "trailing_avg"),
            ChronicMethod::Ewma => write!(f, "ewma"),
        }
    }
}

impl std::str::FromStr for ChronicMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trailing_avg" | "trailing-avg" | "avg" | "avg4w" => Ok(ChronicMethod::TrailingAvg),
            "ewma" | "ewma28" => Ok(ChronicMethod::Ewma),
            _ => Err(format!("Invalid chronic method: {}", s)),
        }
    }
}

/// Display color tag shared by the metric classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
}

/// Parse a canonical `YYYY-MM-DD` calendar date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| TrainLoadError::DateParse {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("15.01.2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            "league_match".parse::<ActivityCategory>().unwrap(),
            ActivityCategory::LeagueMatch
        );
        assert_eq!(
            "Group Training".parse::<ActivityCategory>().unwrap(),
            ActivityCategory::GroupTraining
        );
        assert_eq!(
            "sparing".parse::<ActivityCategory>().unwrap(),
            ActivityCategory::Sparring
        );
        assert!("yoga".parse::<ActivityCategory>().is_err());
    }

    #[test]
    fn test_chronic_method_parsing() {
        assert_eq!("ewma".parse::<ChronicMethod>().unwrap(), ChronicMethod::Ewma);
        assert_eq!("avg4w".parse::<ChronicMethod>().unwrap(), ChronicMethod::TrailingAvg);
        assert_eq!(ChronicMethod::default(), ChronicMethod::TrailingAvg);
    }

    #[test]
    fn test_activity_deserializes_dashboard_shape() {
        let json = r#"{
            "id": "1",
            "date": "2024-01-15",
            "type": "sparing",
            "durationMin": 90,
            "sRPE": 7,
            "status": "done"
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.category, ActivityCategory::Sparring);
        assert_eq!(activity.duration_min, 90);
        assert_eq!(activity.rating, Some(dec!(7)));
        assert!(activity.is_done());
    }

    #[test]
    fn test_activity_without_rating() {
        let json = r#"{"id":"2","date":"2024-01-16","type":"match","duration_min":60,"status":"planned"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.rating, None);
        assert_eq!(activity.status, ActivityStatus::Planned);
    }
}
