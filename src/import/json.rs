use std::path::Path;

use crate::error::Result;
use crate::import::{has_extension, read_input, ImportFormat};
use crate::models::Activity;

/// Importer for a JSON array of activities
pub struct JsonImporter;

impl JsonImporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for JsonImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "json")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<Activity>> {
        let content = read_input(file_path)?;
        let activities: Vec<Activity> = serde_json::from_str(&content)?;
        tracing::debug!(count = activities.len(), "Parsed JSON activities");
        Ok(activities)
    }

    fn get_format_name(&self) -> &'static str {
        "JSON"
    }
}
