//! Session routine generation
//!
//! Turns an ACWR value and an optional runner profile into a structured
//! session plan: ordered phases, a target pace, and the audio program tag
//! the coaching layer plays alongside the session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{RunnerLevel, UserProfile};

/// Current pace is considered on target within this margin (seconds per km)
const PACE_TOLERANCE_SECS: f64 = 15.0;

/// Session templates the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutineKind {
    /// Run/walk introduction for runners with no base
    FirstRun,
    /// Volume progression when the ratio shows undertraining
    BuildUp,
    /// Steady session inside the sweet spot
    Maintenance,
    /// Light session when the ratio shows overload
    RecoveryLight,
}

impl RoutineKind {
    /// Display label for the session
    pub fn label(&self) -> &'static str {
        match self {
            RoutineKind::FirstRun => "First Run",
            RoutineKind::BuildUp => "Build Up",
            RoutineKind::Maintenance => "Maintenance",
            RoutineKind::RecoveryLight => "Recovery (Light)",
        }
    }
}

/// Named phases of a session, in the order they are run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutinePhase {
    Warmup,
    /// Alternating 1-minute run / 1-minute walk intervals for the whole block
    RunWalk,
    Run,
    Jog,
    Cooldown,
}

impl RoutinePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutinePhase::Warmup => "warmup",
            RoutinePhase::RunWalk => "run_walk",
            RoutinePhase::Run => "run",
            RoutinePhase::Jog => "jog",
            RoutinePhase::Cooldown => "cooldown",
        }
    }
}

/// One timed phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub phase: RoutinePhase,
    pub duration_secs: u32,
}

impl RoutineStep {
    fn new(phase: RoutinePhase, duration_secs: u32) -> Self {
        RoutineStep {
            phase,
            duration_secs,
        }
    }
}

/// A generated session plan.
///
/// Immutable once returned; a fresh plan is built on every call. Phase
/// order is meaningful (warmup precedes work precedes cooldown).
/// `total_duration_secs` and the step durations are independently
/// authoritative; callers editing a plan may let them diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutinePlan {
    /// Session template this plan was built from
    pub kind: RoutineKind,

    /// Target pace in seconds per kilometre
    pub target_pace_secs_per_km: u32,

    /// Advertised session length in seconds
    pub total_duration_secs: u32,

    /// Ordered phases of the session
    pub steps: Vec<RoutineStep>,

    /// Audio coaching program tag consumed by the playback layer
    pub audio_program: String,
}

impl RoutinePlan {
    /// Sum of the individual phase durations
    pub fn steps_duration_secs(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_secs).sum()
    }
}

/// Cue comparing a live pace reading against a plan's target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaceCue {
    /// Running faster than the target band
    Ahead,
    /// Within the target band
    OnPace,
    /// Running slower than the target band
    Behind,
}

/// Routine generation engine
pub struct RoutineGenerator;

impl RoutineGenerator {
    /// Generate a session plan for an ACWR value and an optional profile.
    ///
    /// A beginner profile always receives the "First Run" plan; otherwise
    /// the plan branches purely on the ratio and the profile is ignored.
    /// Deterministic and total: an absent profile takes the ratio branch.
    pub fn generate(acwr: f64, profile: Option<&UserProfile>) -> RoutinePlan {
        if profile.and_then(|p| p.level) == Some(RunnerLevel::Beginner) {
            debug!(acwr, "beginner profile overrides ratio branch");
            return RoutinePlan {
                kind: RoutineKind::FirstRun,
                target_pace_secs_per_km: 480,
                total_duration_secs: 1200,
                steps: vec![
                    RoutineStep::new(RoutinePhase::Warmup, 300),
                    RoutineStep::new(RoutinePhase::RunWalk, 600),
                    RoutineStep::new(RoutinePhase::Cooldown, 300),
                ],
                audio_program: "beginner_1".to_string(),
            };
        }

        let (kind, total_duration_secs, steps) = if acwr < 0.8 {
            (
                RoutineKind::BuildUp,
                2400,
                vec![
                    RoutineStep::new(RoutinePhase::Warmup, 600),
                    RoutineStep::new(RoutinePhase::Run, 1200),
                    RoutineStep::new(RoutinePhase::Cooldown, 600),
                ],
            )
        } else if acwr <= 1.3 {
            (
                RoutineKind::Maintenance,
                1800,
                vec![
                    RoutineStep::new(RoutinePhase::Warmup, 300),
                    RoutineStep::new(RoutinePhase::Run, 1200),
                    RoutineStep::new(RoutinePhase::Cooldown, 300),
                ],
            )
        } else {
            (
                RoutineKind::RecoveryLight,
                1200,
                vec![
                    RoutineStep::new(RoutinePhase::Warmup, 300),
                    RoutineStep::new(RoutinePhase::Jog, 600),
                    RoutineStep::new(RoutinePhase::Cooldown, 300),
                ],
            )
        };

        debug!(acwr, kind = kind.label(), "generated routine");
        RoutinePlan {
            kind,
            target_pace_secs_per_km: 390,
            total_duration_secs,
            steps,
            audio_program: "recovery_run".to_string(),
        }
    }
}

/// Compare a live pace reading to a plan's target pace.
///
/// Returns `None` while the tracker has no usable pace yet (a 0.0 reading).
pub fn pace_feedback(current_pace_min_per_km: f64, target_pace_secs_per_km: u32) -> Option<PaceCue> {
    if current_pace_min_per_km <= 0.0 {
        return None;
    }

    let current_secs = current_pace_min_per_km * 60.0;
    let target_secs = f64::from(target_pace_secs_per_km);
    let cue = if current_secs < target_secs - PACE_TOLERANCE_SECS {
        PaceCue::Ahead
    } else if current_secs > target_secs + PACE_TOLERANCE_SECS {
        PaceCue::Behind
    } else {
        PaceCue::OnPace
    };
    Some(cue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beginner_gets_first_run_regardless_of_ratio() {
        let profile = UserProfile::with_level(RunnerLevel::Beginner);
        for acwr in [0.0, 0.5, 1.0, 1.4, 2.0] {
            let plan = RoutineGenerator::generate(acwr, Some(&profile));
            assert_eq!(plan.kind, RoutineKind::FirstRun);
            assert_eq!(plan.kind.label(), "First Run");
            assert_eq!(plan.target_pace_secs_per_km, 480);
            assert_eq!(plan.total_duration_secs, 1200);
            assert_eq!(plan.steps.len(), 3);
            assert_eq!(plan.audio_program, "beginner_1");
        }
    }

    #[test]
    fn test_ratio_branches() {
        let plan = RoutineGenerator::generate(0.5, None);
        assert_eq!(plan.kind, RoutineKind::BuildUp);
        assert_eq!(plan.total_duration_secs, 2400);
        assert_eq!(plan.steps[0], RoutineStep::new(RoutinePhase::Warmup, 600));
        assert_eq!(plan.steps[1], RoutineStep::new(RoutinePhase::Run, 1200));
        assert_eq!(plan.steps[2], RoutineStep::new(RoutinePhase::Cooldown, 600));

        let plan = RoutineGenerator::generate(1.0, None);
        assert_eq!(plan.kind, RoutineKind::Maintenance);
        assert_eq!(plan.total_duration_secs, 1800);

        let plan = RoutineGenerator::generate(1.4, None);
        assert_eq!(plan.kind, RoutineKind::RecoveryLight);
        assert_eq!(plan.total_duration_secs, 1200);
        assert_eq!(plan.steps[1], RoutineStep::new(RoutinePhase::Jog, 600));
    }

    #[test]
    fn test_ratio_branch_boundaries() {
        assert_eq!(RoutineGenerator::generate(0.8, None).kind, RoutineKind::Maintenance);
        assert_eq!(RoutineGenerator::generate(1.3, None).kind, RoutineKind::Maintenance);
        assert_eq!(
            RoutineGenerator::generate(1.3001, None).kind,
            RoutineKind::RecoveryLight
        );
    }

    #[test]
    fn test_non_beginner_profile_does_not_change_plan() {
        let intermediate = UserProfile::with_level(RunnerLevel::Intermediate);
        let advanced = UserProfile::with_level(RunnerLevel::Advanced);
        let baseline = RoutineGenerator::generate(1.0, None);
        assert_eq!(RoutineGenerator::generate(1.0, Some(&intermediate)), baseline);
        assert_eq!(RoutineGenerator::generate(1.0, Some(&advanced)), baseline);
    }

    #[test]
    fn test_non_beginner_defaults() {
        for acwr in [0.5, 1.0, 1.4] {
            let plan = RoutineGenerator::generate(acwr, None);
            assert_eq!(plan.target_pace_secs_per_km, 390);
            assert_eq!(plan.audio_program, "recovery_run");
        }
    }

    #[test]
    fn test_builtin_plans_happen_to_sum_to_total() {
        // Coincidental per branch, not an enforced invariant
        let profile = UserProfile::with_level(RunnerLevel::Beginner);
        for plan in [
            RoutineGenerator::generate(1.0, Some(&profile)),
            RoutineGenerator::generate(0.5, None),
            RoutineGenerator::generate(1.0, None),
            RoutineGenerator::generate(1.4, None),
        ] {
            assert_eq!(plan.steps_duration_secs(), plan.total_duration_secs);
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let profile = UserProfile::with_level(RunnerLevel::Advanced);
        assert_eq!(
            RoutineGenerator::generate(1.1, Some(&profile)),
            RoutineGenerator::generate(1.1, Some(&profile))
        );
    }

    #[test]
    fn test_pace_feedback_bands() {
        // target 390 s/km = 6.5 min/km, tolerance 15 s
        assert_eq!(pace_feedback(6.5, 390), Some(PaceCue::OnPace));
        assert_eq!(pace_feedback(6.75, 390), Some(PaceCue::OnPace));
        assert_eq!(pace_feedback(6.0, 390), Some(PaceCue::Ahead));
        assert_eq!(pace_feedback(7.0, 390), Some(PaceCue::Behind));
        assert_eq!(pace_feedback(0.0, 390), None);
    }
}
