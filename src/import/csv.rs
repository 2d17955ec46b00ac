use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, TrainLoadError};
use crate::import::{has_extension, read_input, ImportFormat};
use crate::models::{parse_date, Activity, ActivityCategory, ActivityStatus};

/// One row of an activity log export
#[derive(Debug, Deserialize)]
struct ActivityRecord {
    #[serde(default)]
    id: Option<String>,
    date: String,
    #[serde(alias = "type", alias = "activity_type")]
    category: String,
    #[serde(alias = "durationMin", alias = "duration")]
    duration_min: u32,
    #[serde(default, alias = "sRPE", alias = "srpe")]
    rating: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// CSV importer for activity logs.
///
/// Rows without an `id` get a random one; rows without a `status` are
/// treated as completed.
pub struct CsvImporter {
    delimiter: u8,
}

impl CsvImporter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse CSV text, collecting every row problem before failing
    pub fn parse_str(&self, content: &str) -> Result<Vec<Activity>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let mut activities = Vec::new();
        let mut problems = Vec::new();

        for (index, row) in reader.deserialize::<ActivityRecord>().enumerate() {
            // Header is line 1
            let line = index + 2;
            match row {
                Ok(record) => match Self::record_to_activity(record) {
                    Ok(activity) => activities.push(activity),
                    Err(message) => problems.push(format!("line {}: {}", line, message)),
                },
                Err(err) => problems.push(format!("line {}: {}", line, err)),
            }
        }

        if !problems.is_empty() {
            return Err(TrainLoadError::Import(problems));
        }

        debug!(count = activities.len(), "Parsed CSV activities");
        Ok(activities)
    }

    fn record_to_activity(record: ActivityRecord) -> std::result::Result<Activity, String> {
        let date = parse_date(&record.date).map_err(|err| err.to_string())?;
        let category = ActivityCategory::from_str(&record.category)?;
        let status = match non_empty(record.status.as_deref()) {
            Some(status) => ActivityStatus::from_str(status)?,
            None => ActivityStatus::Done,
        };
        let id = match non_empty(record.id.as_deref()) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let mut activity = Activity::new(id, date, category, record.duration_min, status);
        if let Some(rating) = non_empty(record.rating.as_deref()) {
            let rating = Decimal::from_str(rating)
                .map_err(|_| format!("Invalid rating: {}", rating))?;
            activity = activity.with_rating(rating);
        }

        Ok(activity)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for CsvImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "csv")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<Activity>> {
        let content = read_input(file_path)?;
        self.parse_str(&content)
    }

    fn get_format_name(&self) -> &'static str {
        "CSV"
    }
}
