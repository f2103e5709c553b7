//! Client-onboarding wizard state machine.
//!
//! Five linear steps drive a trainer through onboarding a new client:
//! client selection, daily goals, weekly schedule (with an existing or new
//! workout plan), program duration, and a final review. Transitions move by
//! exactly one step and clamp at the ends; direct jumps are bounds-checked,
//! and the review UI additionally refuses jumps past the furthest step the
//! trainer has completed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The five steps of the onboarding wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ClientSelection,
    DailyGoals,
    WeeklySchedule,
    ProgramDuration,
    Review,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 5;

/// First step index (0-based).
pub const MIN_STEP: u8 = 0;

/// Last step index (0-based).
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    /// Convert a 0-based step index to a `WizardStep`.
    pub fn from_index(n: u8) -> Result<Self, CoreError> {
        match n {
            0 => Ok(Self::ClientSelection),
            1 => Ok(Self::DailyGoals),
            2 => Ok(Self::WeeklySchedule),
            3 => Ok(Self::ProgramDuration),
            4 => Ok(Self::Review),
            _ => Err(CoreError::Validation(format!(
                "Invalid step index {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 0-based step index.
    pub fn to_index(self) -> u8 {
        match self {
            Self::ClientSelection => 0,
            Self::DailyGoals => 1,
            Self::WeeklySchedule => 2,
            Self::ProgramDuration => 3,
            Self::Review => 4,
        }
    }

    /// The step after this one, clamped at [`WizardStep::Review`].
    pub fn next(self) -> Self {
        match self {
            Self::ClientSelection => Self::DailyGoals,
            Self::DailyGoals => Self::WeeklySchedule,
            Self::WeeklySchedule => Self::ProgramDuration,
            Self::ProgramDuration => Self::Review,
            Self::Review => Self::Review,
        }
    }

    /// The step before this one, clamped at [`WizardStep::ClientSelection`].
    pub fn prev(self) -> Self {
        match self {
            Self::ClientSelection => Self::ClientSelection,
            Self::DailyGoals => Self::ClientSelection,
            Self::WeeklySchedule => Self::DailyGoals,
            Self::ProgramDuration => Self::WeeklySchedule,
            Self::Review => Self::ProgramDuration,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::ClientSelection => "Client Selection",
            Self::DailyGoals => "Daily Goals",
            Self::WeeklySchedule => "Weekly Schedule",
            Self::ProgramDuration => "Program Duration",
            Self::Review => "Review",
        }
    }
}

// ---------------------------------------------------------------------------
// Accumulated wizard data
// ---------------------------------------------------------------------------

/// Daily targets collected in the goals step. All three must be positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalTargets {
    pub steps: i32,
    pub water_ml: i32,
    pub sleep_hours: f64,
}

impl GoalTargets {
    /// All three targets must be strictly positive to proceed.
    pub fn is_complete(&self) -> bool {
        self.steps > 0 && self.water_ml > 0 && self.sleep_hours > 0.0
    }
}

/// Which workout plan the program is built on: an existing plan of the
/// trainer's, or a new one to be created on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "plan_id")]
pub enum PlanChoice {
    Existing(DbId),
    New,
}

/// Mutable wizard state: current position plus everything collected so far.
///
/// The state itself permits arbitrary in-bounds jumps via [`WizardState::go_to`];
/// the stricter completed-steps-only rule used by the review screen lives in
/// [`WizardState::go_to_completed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    /// Furthest step ever reached via [`WizardState::advance`]. Jump target
    /// ceiling for [`WizardState::go_to_completed`].
    pub furthest: WizardStep,
    pub client_id: Option<DbId>,
    pub goals: GoalTargets,
    pub plan: Option<PlanChoice>,
    /// Scheduled weekdays, 0 = Monday .. 6 = Sunday.
    pub schedule_days: Vec<u8>,
    pub program_name: String,
    pub duration_weeks: i32,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Fresh wizard positioned on the first step with nothing collected.
    pub fn new() -> Self {
        Self {
            step: WizardStep::ClientSelection,
            furthest: WizardStep::ClientSelection,
            client_id: None,
            goals: GoalTargets::default(),
            plan: None,
            schedule_days: Vec::new(),
            program_name: String::new(),
            duration_weeks: 0,
        }
    }

    /// Whether the current step has everything it needs to move on.
    ///
    /// One exhaustive match per step:
    /// - client selection: a client is selected
    /// - daily goals: all three targets positive
    /// - weekly schedule: a plan chosen (existing or new) and at least one day
    /// - program duration: non-empty program name and positive duration
    /// - review: always ready (submission does its own validation)
    pub fn can_proceed(&self) -> bool {
        match self.step {
            WizardStep::ClientSelection => self.client_id.is_some(),
            WizardStep::DailyGoals => self.goals.is_complete(),
            WizardStep::WeeklySchedule => {
                self.plan.is_some() && !self.schedule_days.is_empty()
            }
            WizardStep::ProgramDuration => {
                !self.program_name.trim().is_empty() && self.duration_weeks > 0
            }
            WizardStep::Review => true,
        }
    }

    /// Move one step forward, clamped at the last step. No validation.
    pub fn next_step(&mut self) {
        self.step = self.step.next();
        if self.step > self.furthest {
            self.furthest = self.step;
        }
    }

    /// Move one step back, clamped at the first step.
    pub fn prev_step(&mut self) {
        self.step = self.step.prev();
    }

    /// Validate the current step, then move forward.
    pub fn advance(&mut self) -> Result<(), CoreError> {
        if !self.can_proceed() {
            return Err(CoreError::Validation(format!(
                "Step '{}' is incomplete",
                self.step.label()
            )));
        }
        self.next_step();
        Ok(())
    }

    /// Jump directly to any in-bounds step.
    pub fn go_to(&mut self, step: WizardStep) {
        self.step = step;
        if self.step > self.furthest {
            self.furthest = self.step;
        }
    }

    /// Jump only to a step already reached (the review screen's edit links).
    /// Jumping ahead of the furthest reached step is refused.
    pub fn go_to_completed(&mut self, step: WizardStep) -> Result<(), CoreError> {
        if step > self.furthest {
            return Err(CoreError::Validation(format!(
                "Cannot jump ahead to '{}': step not reached yet",
                step.label()
            )));
        }
        self.step = step;
        Ok(())
    }

    /// Validate every step and produce the submission payload.
    ///
    /// Succeeds only from the review step with all earlier steps complete.
    pub fn submission(&self) -> Result<WizardSubmission, CoreError> {
        if self.step != WizardStep::Review {
            return Err(CoreError::Validation(format!(
                "Cannot submit from step '{}'",
                self.step.label()
            )));
        }
        let client_id = self
            .client_id
            .ok_or_else(|| CoreError::Validation("No client selected".into()))?;
        if !self.goals.is_complete() {
            return Err(CoreError::Validation("Daily goals are incomplete".into()));
        }
        let plan = self
            .plan
            .ok_or_else(|| CoreError::Validation("No workout plan chosen".into()))?;
        if self.schedule_days.is_empty() {
            return Err(CoreError::Validation("No schedule days selected".into()));
        }
        if self.schedule_days.iter().any(|&d| d > 6) {
            return Err(CoreError::Validation(
                "Schedule days must be between 0 (Monday) and 6 (Sunday)".into(),
            ));
        }
        if self.program_name.trim().is_empty() {
            return Err(CoreError::Validation("Program name is empty".into()));
        }
        if self.duration_weeks <= 0 {
            return Err(CoreError::Validation(
                "Program duration must be positive".into(),
            ));
        }

        Ok(WizardSubmission {
            client_id,
            goals: self.goals,
            plan,
            schedule_days: self.schedule_days.clone(),
            program_name: self.program_name.trim().to_string(),
            duration_weeks: self.duration_weeks,
        })
    }
}

/// Everything the submission endpoint needs to run the four persistence
/// calls (goals, plan, program metadata, session population), in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSubmission {
    pub client_id: DbId,
    pub goals: GoalTargets,
    pub plan: PlanChoice,
    pub schedule_days: Vec<u8>,
    pub program_name: String,
    pub duration_weeks: i32,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_state() -> WizardState {
        let mut s = WizardState::new();
        s.client_id = Some(7);
        s.goals = GoalTargets {
            steps: 8000,
            water_ml: 2000,
            sleep_hours: 8.0,
        };
        s.plan = Some(PlanChoice::New);
        s.schedule_days = vec![0, 2, 4];
        s.program_name = "Spring Cut".to_string();
        s.duration_weeks = 12;
        s
    }

    // -- WizardStep --

    #[test]
    fn step_from_index_valid() {
        assert_eq!(
            WizardStep::from_index(0).unwrap(),
            WizardStep::ClientSelection
        );
        assert_eq!(WizardStep::from_index(4).unwrap(), WizardStep::Review);
    }

    #[test]
    fn step_from_index_invalid() {
        assert!(WizardStep::from_index(5).is_err());
        assert!(WizardStep::from_index(255).is_err());
    }

    #[test]
    fn step_index_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(WizardStep::from_index(n).unwrap().to_index(), n);
        }
    }

    #[test]
    fn next_clamps_at_review() {
        assert_eq!(WizardStep::Review.next(), WizardStep::Review);
    }

    #[test]
    fn prev_clamps_at_client_selection() {
        assert_eq!(
            WizardStep::ClientSelection.prev(),
            WizardStep::ClientSelection
        );
    }

    #[test]
    fn next_prev_are_inverse_in_the_middle() {
        for n in (MIN_STEP + 1)..MAX_STEP {
            let step = WizardStep::from_index(n).unwrap();
            assert_eq!(step.next().prev(), step);
            assert_eq!(step.prev().next(), step);
        }
    }

    // -- can_proceed --

    #[test]
    fn fresh_state_cannot_proceed() {
        assert!(!WizardState::new().can_proceed());
    }

    #[test]
    fn client_selected_can_proceed() {
        let mut s = WizardState::new();
        s.client_id = Some(7);
        assert!(s.can_proceed());
    }

    #[test]
    fn goals_require_all_three_positive() {
        let mut s = WizardState::new();
        s.step = WizardStep::DailyGoals;
        s.goals = GoalTargets {
            steps: 8000,
            water_ml: 0,
            sleep_hours: 8.0,
        };
        assert!(!s.can_proceed());
        s.goals.water_ml = 2000;
        assert!(s.can_proceed());
    }

    #[test]
    fn schedule_requires_plan_and_a_day() {
        let mut s = WizardState::new();
        s.step = WizardStep::WeeklySchedule;
        s.plan = Some(PlanChoice::Existing(3));
        assert!(!s.can_proceed());
        s.schedule_days.push(1);
        assert!(s.can_proceed());
    }

    #[test]
    fn duration_requires_name_and_positive_weeks() {
        let mut s = WizardState::new();
        s.step = WizardStep::ProgramDuration;
        s.program_name = "  ".to_string();
        s.duration_weeks = 8;
        assert!(!s.can_proceed());
        s.program_name = "Bulk".to_string();
        assert!(s.can_proceed());
        s.duration_weeks = 0;
        assert!(!s.can_proceed());
    }

    #[test]
    fn review_always_proceeds() {
        let mut s = WizardState::new();
        s.step = WizardStep::Review;
        assert!(s.can_proceed());
    }

    // -- transitions --

    #[test]
    fn advance_refuses_incomplete_step() {
        let mut s = WizardState::new();
        assert!(s.advance().is_err());
        assert_eq!(s.step, WizardStep::ClientSelection);
    }

    #[test]
    fn advance_moves_and_tracks_furthest() {
        let mut s = WizardState::new();
        s.client_id = Some(7);
        s.advance().unwrap();
        assert_eq!(s.step, WizardStep::DailyGoals);
        assert_eq!(s.furthest, WizardStep::DailyGoals);
    }

    #[test]
    fn prev_does_not_lower_furthest() {
        let mut s = filled_state();
        s.go_to(WizardStep::Review);
        s.prev_step();
        assert_eq!(s.step, WizardStep::ProgramDuration);
        assert_eq!(s.furthest, WizardStep::Review);
    }

    #[test]
    fn go_to_completed_refuses_jumping_ahead() {
        let mut s = WizardState::new();
        s.client_id = Some(7);
        s.advance().unwrap();
        assert!(s.go_to_completed(WizardStep::Review).is_err());
        assert!(s.go_to_completed(WizardStep::ClientSelection).is_ok());
        assert_eq!(s.step, WizardStep::ClientSelection);
    }

    #[test]
    fn go_to_allows_arbitrary_in_bounds_jump() {
        let mut s = WizardState::new();
        s.go_to(WizardStep::ProgramDuration);
        assert_eq!(s.step, WizardStep::ProgramDuration);
    }

    // -- submission --

    #[test]
    fn submission_from_review_with_full_state() {
        let mut s = filled_state();
        s.go_to(WizardStep::Review);
        let sub = s.submission().unwrap();
        assert_eq!(sub.client_id, 7);
        assert_eq!(sub.schedule_days, vec![0, 2, 4]);
        assert_eq!(sub.program_name, "Spring Cut");
        assert_eq!(sub.duration_weeks, 12);
    }

    #[test]
    fn submission_refused_off_review() {
        let s = filled_state();
        assert!(s.submission().is_err());
    }

    #[test]
    fn submission_refuses_missing_client() {
        let mut s = filled_state();
        s.client_id = None;
        s.go_to(WizardStep::Review);
        assert!(s.submission().is_err());
    }

    #[test]
    fn submission_refuses_out_of_range_day() {
        let mut s = filled_state();
        s.schedule_days = vec![7];
        s.go_to(WizardStep::Review);
        assert!(s.submission().is_err());
    }

    #[test]
    fn submission_trims_program_name() {
        let mut s = filled_state();
        s.program_name = "  Leg Day Program  ".to_string();
        s.go_to(WizardStep::Review);
        assert_eq!(s.submission().unwrap().program_name, "Leg Day Program");
    }
}
