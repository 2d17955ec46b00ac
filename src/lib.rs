// Library interface for TrainLoad modules
// This allows integration tests and the CLI to share the metric engine

pub mod activity_types;
pub mod acwr;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod import;
pub mod load;
pub mod logging;
pub mod models;
pub mod plan;
pub mod readiness;
pub mod recommendations;
pub mod report;
pub mod validation;

// Re-export commonly used types for convenience
pub use models::*;
pub use acwr::{classify_ratio, RatioClassification, RiskBand};
pub use config::AppConfig;
pub use dashboard::{DashboardEngine, DashboardInputs, DashboardMetrics};
pub use load::{LoadCalculator, LoadConfig, LoadMetrics};
pub use plan::{PlanCalculator, PlanConfig, PlanRealization, PlanStatus};
pub use readiness::ReadinessSummary;
pub use recommendations::{generate_recommendations, Recommendation, RecommendationInputs};
pub use validation::{validate_session, SessionDraft, SessionRating};
pub use error::{TrainLoadError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
