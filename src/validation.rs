//! Session field validation at the data-entry boundary
//!
//! Validation collects every problem instead of stopping at the first one, so
//! a form can show all messages at once.

use crate::error::{Result, TrainLoadError};
use crate::models::ActivityCategory;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const TIME_FORMAT: &str = "%H:%M";

/// A session as submitted by the entry form, before it is accepted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDraft {
    #[serde(rename = "type", alias = "session_type")]
    pub session_type: Option<ActivityCategory>,
    pub date: Option<NaiveDate>,
    #[serde(alias = "startTime")]
    pub start_time: Option<String>,
    #[serde(alias = "durationMin")]
    pub duration_min: Option<i64>,
    pub rating: Option<SessionRating>,
}

/// Post-session rating, each field on a 1-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRating {
    pub intensity: i32,
    pub difficulty: i32,
    pub satisfaction: i32,
}

pub fn validate_session(draft: &SessionDraft) -> Vec<String> {
    let mut errors = Vec::new();

    if draft.session_type.is_none() {
        errors.push("Session type is required".to_string());
    }
    if draft.date.is_none() {
        errors.push("Date is required".to_string());
    }
    match draft.start_time.as_deref().map(str::trim) {
        None | Some("") => errors.push("Start time is required".to_string()),
        Some(time) if NaiveTime::parse_from_str(time, TIME_FORMAT).is_err() => {
            errors.push("Start time must use the HH:mm format".to_string())
        }
        Some(_) => {}
    }
    if draft.duration_min.map_or(true, |minutes| minutes <= 0) {
        errors.push("Duration must be greater than 0".to_string());
    }
    if let Some(rating) = &draft.rating {
        errors.extend(validate_rating(rating));
    }

    errors
}

pub fn validate_rating(rating: &SessionRating) -> Vec<String> {
    let fields = [
        ("Intensity", rating.intensity),
        ("Difficulty", rating.difficulty),
        ("Satisfaction", rating.satisfaction),
    ];

    fields
        .iter()
        .filter(|(_, value)| !(1..=10).contains(value))
        .map(|(name, _)| format!("{} must be between 1 and 10", name))
        .collect()
}

impl SessionDraft {
    /// Fail with every validation message when the draft is not acceptable
    pub fn validate(&self) -> Result<()> {
        let errors = validate_session(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TrainLoadError::Validation(errors))
        }
    }
}

/// End time of a session starting at `start_time` (`HH:mm`), wrapping past midnight
pub fn end_time(start_time: &str, duration_min: u32) -> Result<String> {
    let start = NaiveTime::parse_from_str(start_time.trim(), TIME_FORMAT).map_err(|_| {
        TrainLoadError::Validation(vec![format!("Invalid start time: {}", start_time)])
    })?;
    let (end, _) = start.overflowing_add_signed(Duration::minutes(i64::from(duration_min)));
    Ok(end.format(TIME_FORMAT).to_string())
}
