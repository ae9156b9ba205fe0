use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Runner experience levels used to pick a session routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl RunnerLevel {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => anyhow::bail!("Unknown runner level: {}", s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Runner profile supplied by the caller.
///
/// Only `level` influences routine generation. Everything else the
/// surrounding application knows about the runner travels in `attributes`
/// and is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Self-reported experience level
    pub level: Option<RunnerLevel>,

    /// Auxiliary attributes owned by the caller (ignored by the core)
    #[serde(default, flatten)]
    pub attributes: HashMap<String, String>,
}

impl UserProfile {
    /// Profile carrying only an experience level
    pub fn with_level(level: RunnerLevel) -> Self {
        UserProfile {
            level: Some(level),
            attributes: HashMap::new(),
        }
    }
}

/// Transient pair of load aggregates evaluated for one classification.
///
/// Both values are non-negative totals supplied by the caller's own
/// bookkeeping; a zero chronic load means there is no usable history yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSample {
    /// Recent (acute) training load, e.g. the last-7-day total
    pub recent_load: f64,

    /// Chronic training load, e.g. a 28-day rolling average
    pub chronic_load: f64,
}

/// A single GPS position reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    /// Latitude in degrees, -90..=90
    pub latitude: f64,

    /// Longitude in degrees, -180..=180
    pub longitude: f64,

    /// Instant the fix was taken; consecutive fixes are non-decreasing
    pub timestamp: DateTime<Utc>,
}

impl GeoFix {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        GeoFix {
            latitude,
            longitude,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_level_round_trip() {
        for (name, level) in [
            ("beginner", RunnerLevel::Beginner),
            ("intermediate", RunnerLevel::Intermediate),
            ("advanced", RunnerLevel::Advanced),
        ] {
            assert_eq!(RunnerLevel::from_str(name).unwrap(), level);
            assert_eq!(level.as_str(), name);
        }
        assert!(RunnerLevel::from_str("elite").is_err());
    }

    #[test]
    fn test_profile_keeps_unknown_attributes() {
        let json = r#"{"level":"beginner","coach":"jihye","shoe":"vaporfly"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.level, Some(RunnerLevel::Beginner));
        assert_eq!(
            profile.attributes.get("coach").map(String::as_str),
            Some("jihye")
        );
        assert_eq!(profile.attributes.len(), 2);
    }

    #[test]
    fn test_profile_without_level() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.level, None);
        assert!(profile.attributes.is_empty());
    }
}
