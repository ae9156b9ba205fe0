//! Acute:Chronic Workload Ratio (ACWR) classification
//!
//! Compares a runner's recent training load against their longer-term
//! average and maps the ratio onto injury-risk/training-readiness zones.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::WorkloadSample;

/// Risk/training-zone classification for an ACWR value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    /// No chronic history to compare against
    InsufficientData,
    /// Ratio below 0.8: undertraining
    LowLoadRisk,
    /// Ratio 0.8-1.3: optimal training zone
    SweetSpot,
    /// Ratio 1.3-1.5: elevated load, monitor closely
    HighLoadCaution,
    /// Ratio above 1.5: high injury risk
    InjuryRiskWarning,
}

impl LoadStatus {
    /// Get status description
    pub fn description(&self) -> &'static str {
        match self {
            LoadStatus::InsufficientData => "Not enough training history for a ratio",
            LoadStatus::LowLoadRisk => "Below the adaptation zone (undertraining)",
            LoadStatus::SweetSpot => "Optimal training zone (sweet spot)",
            LoadStatus::HighLoadCaution => "Elevated load (caution)",
            LoadStatus::InjuryRiskWarning => "Load spike (high injury risk)",
        }
    }

    /// Get training recommendation
    pub fn recommendation(&self) -> &'static str {
        match self {
            LoadStatus::InsufficientData => {
                "Log a few weeks of sessions before trusting the ratio"
            }
            LoadStatus::LowLoadRisk => "Build volume gradually to re-enter the sweet spot",
            LoadStatus::SweetSpot => "Continue the current progression",
            LoadStatus::HighLoadCaution => "Hold volume steady and watch for fatigue",
            LoadStatus::InjuryRiskWarning => "Cut back sharply and prioritize recovery",
        }
    }
}

/// Result of classifying a workload sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadAssessment {
    /// Acute:chronic ratio, 0.0 when no chronic history exists
    pub ratio: f64,

    /// Zone classification for the ratio
    pub status: LoadStatus,
}

/// ACWR classification engine
pub struct LoadRatioClassifier;

impl LoadRatioClassifier {
    /// Classify a recent load against a chronic load.
    ///
    /// Both loads are expected to be non-negative aggregates from the
    /// caller's bookkeeping. A zero chronic load yields the
    /// `InsufficientData` sentinel (ratio 0.0) instead of dividing.
    ///
    /// Zone boundaries are inclusive on the lower branch: 0.8 and 1.3
    /// belong to the sweet spot, 1.5 is still caution rather than warning.
    pub fn classify(recent_load: f64, chronic_load: f64) -> LoadAssessment {
        if chronic_load == 0.0 {
            return LoadAssessment {
                ratio: 0.0,
                status: LoadStatus::InsufficientData,
            };
        }

        let ratio = recent_load / chronic_load;
        let status = if ratio < 0.8 {
            LoadStatus::LowLoadRisk
        } else if ratio <= 1.3 {
            LoadStatus::SweetSpot
        } else if ratio <= 1.5 {
            LoadStatus::HighLoadCaution
        } else {
            LoadStatus::InjuryRiskWarning
        };

        debug!(ratio, ?status, "classified workload ratio");
        LoadAssessment { ratio, status }
    }

    /// Classify a prepared workload sample
    pub fn classify_sample(sample: &WorkloadSample) -> LoadAssessment {
        Self::classify(sample.recent_load, sample.chronic_load)
    }
}
