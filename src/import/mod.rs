use crate::dashboard::DashboardInputs;
use crate::error::{Result, TrainLoadError};
use crate::models::Activity;
use crate::validation::SessionDraft;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub mod csv;
pub mod json;

/// Trait for importing activities from different file formats
pub trait ImportFormat {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Import activities from the file
    fn import_file(&self, file_path: &Path) -> Result<Vec<Activity>>;

    /// Get the format name for this importer
    fn get_format_name(&self) -> &'static str;
}

/// Manager for coordinating different import formats
pub struct ImportManager {
    importers: Vec<Box<dyn ImportFormat>>,
}

impl ImportManager {
    /// Create a new import manager with all available importers
    pub fn new() -> Self {
        let importers: Vec<Box<dyn ImportFormat>> = vec![
            Box::new(csv::CsvImporter::new()),
            Box::new(json::JsonImporter::new()),
        ];

        Self { importers }
    }

    /// Import a single file, auto-detecting the format
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<Activity>> {
        for importer in &self.importers {
            if importer.can_import(file_path) {
                info!(
                    path = %file_path.display(),
                    format = importer.get_format_name(),
                    "Importing activities"
                );
                return importer.import_file(file_path);
            }
        }

        Err(TrainLoadError::UnsupportedFormat(
            file_path.display().to_string(),
        ))
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn has_extension(file_path: &Path, expected: &str) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(expected))
}

pub(crate) fn read_input(file_path: &Path) -> Result<String> {
    fs::read_to_string(file_path).map_err(|source| TrainLoadError::InputFile {
        path: file_path.to_path_buf(),
        source,
    })
}

/// Load a complete dashboard input bundle from a JSON file
pub fn load_dashboard_inputs(file_path: &Path) -> Result<DashboardInputs> {
    let content = read_input(file_path)?;
    let inputs: DashboardInputs = serde_json::from_str(&content)?;

    debug!(
        activities = inputs.activities.len(),
        readiness = inputs.readiness.len(),
        history = inputs.history.len(),
        "Loaded dashboard inputs"
    );

    Ok(inputs)
}

/// Load a session draft as submitted by the entry form
pub fn load_session_draft(file_path: &Path) -> Result<SessionDraft> {
    let content = read_input(file_path)?;
    Ok(serde_json::from_str(&content)?)
}
