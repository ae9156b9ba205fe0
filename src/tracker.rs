//! GPS position tracking
//!
//! Accumulates great-circle distance from a stream of geographic fixes and
//! derives a minutes-per-kilometre pace from elapsed time. Fixes below the
//! noise floor still join the track but do not move the odometer, which
//! suppresses GPS jitter at the cost of slightly undercounting genuinely
//! slow movement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::GeoFix;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance deltas at or below this value (5 m) are treated as jitter
pub const NOISE_FLOOR_KM: f64 = 0.005;

/// Below this accumulated distance a pace figure is meaningless
pub const MIN_PACE_DISTANCE_KM: f64 = 0.01;

/// Fix validation errors
#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("Latitude out of range: {0} (expected -90..=90)")]
    InvalidLatitude(f64),
    #[error("Longitude out of range: {0} (expected -180..=180)")]
    InvalidLongitude(f64),
    #[error("Fix timestamp {fix} precedes last accepted fix {last}")]
    NonMonotonicTimestamp {
        fix: DateTime<Utc>,
        last: DateTime<Utc>,
    },
}

/// Great-circle distance between two coordinate pairs, in kilometres.
///
/// Haversine formula over a spherical Earth; inputs in degrees.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Snapshot of a tracking session for display or export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Session this snapshot belongs to
    pub session_id: Uuid,

    /// Number of fixes on the track, accepted deltas or not
    pub fix_count: usize,

    /// Filtered distance in kilometres
    pub total_distance_km: f64,

    /// Seconds between the first and last fix
    pub elapsed_seconds: f64,

    /// Minutes per kilometre over the elapsed span (0.0 below the distance floor)
    pub pace_min_per_km: f64,
}

/// Per-session accumulator turning fixes into distance and pace.
///
/// State is session-scoped: create one at session start, feed it fixes,
/// drop it when the run ends. The track only grows and the odometer never
/// decreases. A single logical writer must own the mutable half; when fixes
/// arrive on one thread while another reads pace, wrap the tracker in
/// [`SharedTracker`] instead of sharing it bare.
#[derive(Debug)]
pub struct PositionTracker {
    session_id: Uuid,
    points: Vec<GeoFix>,
    total_distance_km: f64,
}

impl PositionTracker {
    pub fn new() -> Self {
        PositionTracker {
            session_id: Uuid::new_v4(),
            points: Vec::new(),
            total_distance_km: 0.0,
        }
    }

    /// Identifier correlating this session's log lines and summaries
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Filtered distance accumulated so far, in kilometres
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// All fixes recorded this session, in arrival order
    pub fn points(&self) -> &[GeoFix] {
        &self.points
    }

    pub fn fix_count(&self) -> usize {
        self.points.len()
    }

    /// Record a position stamped with the current instant.
    pub fn update_position(&mut self, latitude: f64, longitude: f64) -> Result<(), TrackError> {
        self.record_fix(GeoFix::new(latitude, longitude, Utc::now()))
    }

    /// Record a fix with an explicit timestamp.
    ///
    /// Live callbacks and track replay share this path, so the noise filter
    /// and validation apply identically to both. Rejects non-finite or
    /// out-of-range coordinates and timestamps earlier than the last
    /// accepted fix; equal timestamps pass (platform location services may
    /// batch fixes onto one instant).
    pub fn record_fix(&mut self, fix: GeoFix) -> Result<(), TrackError> {
        if !(-90.0..=90.0).contains(&fix.latitude) {
            return Err(TrackError::InvalidLatitude(fix.latitude));
        }
        if !(-180.0..=180.0).contains(&fix.longitude) {
            return Err(TrackError::InvalidLongitude(fix.longitude));
        }

        if let Some(last) = self.points.last() {
            if fix.timestamp < last.timestamp {
                warn!(
                    session = %self.session_id,
                    fix = %fix.timestamp,
                    last = %last.timestamp,
                    "rejecting non-monotonic fix"
                );
                return Err(TrackError::NonMonotonicTimestamp {
                    fix: fix.timestamp,
                    last: last.timestamp,
                });
            }

            let delta_km =
                haversine_distance_km(last.latitude, last.longitude, fix.latitude, fix.longitude);
            if delta_km > NOISE_FLOOR_KM {
                self.total_distance_km += delta_km;
                debug!(
                    session = %self.session_id,
                    delta_km,
                    total_km = self.total_distance_km,
                    "accumulated distance"
                );
            } else {
                debug!(session = %self.session_id, delta_km, "dropped sub-threshold delta");
            }
        }

        self.points.push(fix);
        Ok(())
    }

    /// Minutes per kilometre over the accumulated distance.
    ///
    /// Returns 0.0 until the odometer passes the 0.01 km floor, for any
    /// elapsed time; a near-zero denominator would otherwise produce a
    /// meaningless pace figure.
    pub fn pace_min_per_km(&self, elapsed_seconds: f64) -> f64 {
        if self.total_distance_km < MIN_PACE_DISTANCE_KM {
            return 0.0;
        }
        (elapsed_seconds / 60.0) / self.total_distance_km
    }

    /// Snapshot the session, deriving elapsed time from the fix timestamps.
    pub fn summary(&self) -> TrackSummary {
        let elapsed_seconds = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0
            }
            _ => 0.0,
        };
        TrackSummary {
            session_id: self.session_id,
            fix_count: self.points.len(),
            total_distance_km: self.total_distance_km,
            elapsed_seconds,
            pace_min_per_km: self.pace_min_per_km(elapsed_seconds),
        }
    }
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, mutex-guarded handle around a [`PositionTracker`].
///
/// The surrounding application typically feeds fixes from a location
/// callback while a timer thread reads distance and pace; this handle
/// serializes both sides on one lock.
#[derive(Debug, Clone)]
pub struct SharedTracker {
    inner: Arc<Mutex<PositionTracker>>,
}

impl SharedTracker {
    pub fn new() -> Self {
        SharedTracker {
            inner: Arc::new(Mutex::new(PositionTracker::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PositionTracker> {
        // A panic mid-update cannot leave the tracker half-written (the
        // push happens after accumulation), so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update_position(&self, latitude: f64, longitude: f64) -> Result<(), TrackError> {
        self.lock().update_position(latitude, longitude)
    }

    pub fn record_fix(&self, fix: GeoFix) -> Result<(), TrackError> {
        self.lock().record_fix(fix)
    }

    pub fn total_distance_km(&self) -> f64 {
        self.lock().total_distance_km()
    }

    pub fn pace_min_per_km(&self, elapsed_seconds: f64) -> f64 {
        self.lock().pace_min_per_km(elapsed_seconds)
    }

    pub fn summary(&self) -> TrackSummary {
        self.lock().summary()
    }
}

impl Default for SharedTracker {
    fn default() -> Self {
        Self::new()
    }
}
