// Library interface for the SoloRun analytics core
// This allows the CLI and integration tests to share the same modules

pub mod acwr;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod routine;
pub mod tracker;

// Re-export commonly used types for convenience
pub use acwr::{LoadAssessment, LoadRatioClassifier, LoadStatus};
pub use config::AppConfig;
pub use error::{Result, SoloRunError};
pub use import::ImportManager;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{GeoFix, RunnerLevel, UserProfile, WorkloadSample};
pub use routine::{
    pace_feedback, PaceCue, RoutineGenerator, RoutineKind, RoutinePhase, RoutinePlan, RoutineStep,
};
pub use tracker::{
    haversine_distance_km, PositionTracker, SharedTracker, TrackError, TrackSummary,
};
