//! Timer state machine
//!
//! Authoritative countdown state for the Pomodoro cycle. All transitions
//! are pure methods taking an explicit `now_millis`, so the machine can be
//! driven and tested without a real clock. The wall-clock timestamp is
//! carried only for the continuous progress projection; the countdown
//! itself is tick-decremented and never derived from wall-clock deltas.

use crate::progress;

use super::{snapshot::format_clock, Phase, TimerSnapshot};

/// Default focus phase length in minutes
pub const DEFAULT_WORK_MINUTES: i64 = 25;
/// Default break phase length in minutes
pub const DEFAULT_BREAK_MINUTES: i64 = 5;
/// Shortest configurable phase length in minutes
pub const MIN_PHASE_MINUTES: i64 = 1;
/// Longest configurable phase length in minutes
pub const MAX_PHASE_MINUTES: i64 = 60;

/// Timer state for the single session-wide Pomodoro cycle
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    /// Current phase; the cycle starts in focus
    pub phase: Phase,
    /// Countdown value for the active phase, in [0, current phase duration]
    pub remaining_seconds: u64,
    /// Whether a 1 Hz tick driver is expected to be live
    pub running: bool,
    pub work_duration_seconds: u64,
    pub break_duration_seconds: u64,
    /// Count of focus phases reached, starting at 1; bumps only on the
    /// automatic focus-to-break transition
    pub round: u64,
    /// Epoch millis marking when the current phase's elapsed-time
    /// accounting began; read only by the progress sampler
    pub phase_started_at_millis: i64,
}

impl TimerState {
    /// Create a fresh timer with the classic 25/5 cycle
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }

    /// Create a fresh timer with the given phase lengths in minutes,
    /// each clamped to [1, 60]
    pub fn with_durations(work_minutes: i64, break_minutes: i64) -> Self {
        let work_duration_seconds = clamp_minutes(work_minutes) * 60;
        let break_duration_seconds = clamp_minutes(break_minutes) * 60;

        Self {
            phase: Phase::Focus,
            remaining_seconds: work_duration_seconds,
            running: false,
            work_duration_seconds,
            break_duration_seconds,
            round: 1,
            phase_started_at_millis: 0,
        }
    }

    /// Configured duration of the currently active phase, in seconds
    pub fn current_phase_duration(&self) -> u64 {
        match self.phase {
            Phase::Focus => self.work_duration_seconds,
            Phase::Break => self.break_duration_seconds,
        }
    }

    /// Elapsed time in the active phase, derived from the authoritative
    /// countdown rather than the wall clock
    pub fn elapsed_millis_in_phase(&self) -> i64 {
        let elapsed_seconds = self
            .current_phase_duration()
            .saturating_sub(self.remaining_seconds);
        (elapsed_seconds * 1000) as i64
    }

    /// Mark the timer running and rebase the phase start timestamp so
    /// that resuming a paused mid-phase state keeps sampler continuity
    pub fn begin_running(&mut self, now_millis: i64) {
        self.running = true;
        self.phase_started_at_millis = now_millis - self.elapsed_millis_in_phase();
    }

    /// Clear the running flag; the caller owns the driver shutdown
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Apply one authoritative 1 Hz step. Returns true when the step
    /// exhausted the phase and performed the automatic transition.
    pub fn tick(&mut self, now_millis: i64) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        if self.remaining_seconds > 0 {
            return false;
        }

        match self.phase {
            Phase::Focus => {
                self.round += 1;
                self.phase = Phase::Break;
                self.remaining_seconds = self.break_duration_seconds;
            }
            Phase::Break => {
                self.phase = Phase::Focus;
                self.remaining_seconds = self.work_duration_seconds;
            }
        }
        self.phase_started_at_millis = now_millis;
        true
    }

    /// Stop and return to a fresh focus phase at full duration, round 1.
    /// Configured durations are untouched.
    pub fn reset(&mut self, now_millis: i64) {
        self.running = false;
        self.phase = Phase::Focus;
        self.remaining_seconds = self.work_duration_seconds;
        self.round = 1;
        self.phase_started_at_millis = now_millis;
    }

    /// Store new phase lengths and force a full reset. A missing value
    /// keeps the prior configured length; present values clamp to [1, 60]
    /// minutes.
    pub fn configure(
        &mut self,
        work_minutes: Option<i64>,
        break_minutes: Option<i64>,
        now_millis: i64,
    ) {
        if let Some(minutes) = work_minutes {
            self.work_duration_seconds = clamp_minutes(minutes) * 60;
        }
        if let Some(minutes) = break_minutes {
            self.break_duration_seconds = clamp_minutes(minutes) * 60;
        }
        self.reset(now_millis);
    }

    /// Jump to `target` at its full duration. Switching to the already
    /// active phase is a no-op and returns false. Leaves the round count
    /// and running flag untouched.
    pub fn switch_phase(&mut self, target: Phase, now_millis: i64) -> bool {
        if self.phase == target {
            return false;
        }
        self.phase = target;
        self.remaining_seconds = self.current_phase_duration();
        self.phase_started_at_millis = now_millis;
        true
    }

    /// Completion fraction of the active phase: sampled from the wall
    /// clock while running, projected from the countdown while paused
    pub fn progress_fraction(&self, now_millis: i64) -> f64 {
        if self.running {
            progress::sample(
                now_millis,
                self.phase_started_at_millis,
                self.current_phase_duration(),
            )
        } else {
            progress::from_remaining(self.current_phase_duration(), self.remaining_seconds)
        }
    }

    /// Build the readout published to renderers
    pub fn snapshot(&self, now_millis: i64) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            round: self.round,
            progress_fraction: self.progress_fraction(now_millis),
            work_duration_seconds: self.work_duration_seconds,
            break_duration_seconds: self.break_duration_seconds,
            clock: format_clock(self.remaining_seconds),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_minutes(minutes: i64) -> u64 {
    minutes.clamp(MIN_PHASE_MINUTES, MAX_PHASE_MINUTES) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn fresh_timer_uses_the_classic_defaults() {
        let state = TimerState::new();
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.work_duration_seconds, 1500);
        assert_eq!(state.break_duration_seconds, 300);
        assert_eq!(state.round, 1);
        assert!(!state.running);
    }

    #[test]
    fn full_cycle_with_defaults() {
        let mut state = TimerState::new();
        state.begin_running(NOW);

        for _ in 0..1500 {
            state.tick(NOW);
        }
        assert_eq!(state.phase, Phase::Break);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.round, 2);

        for _ in 0..300 {
            state.tick(NOW);
        }
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn work_duration_ticks_produce_exactly_one_transition() {
        let mut state = TimerState::with_durations(1, 1);
        state.begin_running(NOW);

        let transitions = (0..60).filter(|_| state.tick(NOW)).count();
        assert_eq!(transitions, 1);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn break_completion_never_touches_the_round() {
        let mut state = TimerState::with_durations(1, 1);
        state.begin_running(NOW);
        state.switch_phase(Phase::Break, NOW);

        for _ in 0..60 {
            state.tick(NOW);
        }
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.round, 1);
    }

    #[test]
    fn reset_returns_to_a_fresh_focus_phase() {
        let mut state = TimerState::with_durations(10, 2);
        state.begin_running(NOW);
        for _ in 0..123 {
            state.tick(NOW);
        }
        state.round = 4;

        state.reset(NOW);
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 600);
        assert_eq!(state.round, 1);
        assert!(!state.running);
        assert_eq!(state.work_duration_seconds, 600);
        assert_eq!(state.break_duration_seconds, 120);
    }

    #[test]
    fn configure_clamps_to_the_nearest_bound() {
        let mut state = TimerState::new();
        state.configure(Some(0), Some(120), NOW);
        assert_eq!(state.work_duration_seconds, 60);
        assert_eq!(state.break_duration_seconds, 3600);
        assert_eq!(state.remaining_seconds, 60);
    }

    #[test]
    fn configure_forces_a_full_reset() {
        let mut state = TimerState::new();
        state.begin_running(NOW);
        for _ in 0..1500 {
            state.tick(NOW);
        }
        assert_eq!(state.round, 2);

        state.configure(Some(10), Some(2), NOW);
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 600);
        assert_eq!(state.round, 1);
        assert!(!state.running);
    }

    #[test]
    fn configure_keeps_prior_lengths_for_missing_values() {
        let mut state = TimerState::with_durations(30, 10);
        state.configure(None, Some(3), NOW);
        assert_eq!(state.work_duration_seconds, 1800);
        assert_eq!(state.break_duration_seconds, 180);
    }

    #[test]
    fn switching_to_the_active_phase_is_a_no_op() {
        let state = TimerState::new();
        let mut probed = state.clone();
        assert!(!probed.switch_phase(Phase::Focus, NOW + 5_000));
        assert_eq!(probed, state);
    }

    #[test]
    fn switching_phases_jumps_to_the_full_duration() {
        let mut state = TimerState::new();
        state.begin_running(NOW);
        for _ in 0..40 {
            state.tick(NOW);
        }

        assert!(state.switch_phase(Phase::Break, NOW + 40_000));
        assert_eq!(state.phase, Phase::Break);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.round, 1);
        assert!(state.running);
        assert_eq!(state.phase_started_at_millis, NOW + 40_000);
    }

    #[test]
    fn resuming_rebases_the_phase_start_behind_now() {
        let mut state = TimerState::new();
        state.begin_running(NOW);
        for _ in 0..90 {
            state.tick(NOW);
        }
        state.halt();

        let later = NOW + 600_000;
        state.begin_running(later);
        assert_eq!(state.phase_started_at_millis, later - 90_000);
        assert!((state.progress_fraction(later) - 0.06).abs() < 1e-9);
    }

    #[test]
    fn paused_progress_projects_from_the_countdown() {
        let mut state = TimerState::new();
        state.begin_running(NOW);
        for _ in 0..750 {
            state.tick(NOW);
        }
        state.halt();
        assert!((state.progress_fraction(NOW + 9_999_999) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn automatic_transition_rebases_the_phase_start() {
        let mut state = TimerState::with_durations(1, 1);
        state.begin_running(NOW);
        for _ in 0..59 {
            state.tick(NOW);
        }
        let boundary = NOW + 60_000;
        assert!(state.tick(boundary));
        assert_eq!(state.phase_started_at_millis, boundary);
        assert!(state.progress_fraction(boundary).abs() < 1e-9);
    }
}
