//! Continuous progress sampling
//!
//! Derives a fraction-complete value for smooth rendering, decoupled from
//! the 1 Hz authoritative countdown. The projection is read-only and never
//! feeds back into the integer state.

/// Fraction of the active phase completed at `now_millis`, given the
/// timestamp the phase's elapsed-time accounting began at. Clamped to
/// [0, 1]; pure, so it is safe to call once per rendered frame.
pub fn sample(now_millis: i64, phase_started_at_millis: i64, phase_duration_seconds: u64) -> f64 {
    if phase_duration_seconds == 0 {
        return 1.0;
    }
    let elapsed_seconds = (now_millis - phase_started_at_millis) as f64 / 1000.0;
    (elapsed_seconds / phase_duration_seconds as f64).clamp(0.0, 1.0)
}

/// Discrete projection used while the timer is paused, derived from the
/// authoritative countdown instead of the wall clock
pub fn from_remaining(phase_duration_seconds: u64, remaining_seconds: u64) -> f64 {
    if phase_duration_seconds == 0 {
        return 1.0;
    }
    let elapsed = phase_duration_seconds.saturating_sub(remaining_seconds);
    elapsed as f64 / phase_duration_seconds as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000_000;

    #[test]
    fn sample_is_zero_at_the_phase_start() {
        assert_eq!(sample(START, START, 1500), 0.0);
    }

    #[test]
    fn sample_is_one_at_the_phase_end() {
        assert_eq!(sample(START + 1500 * 1000, START, 1500), 1.0);
    }

    #[test]
    fn sample_is_monotonic_within_the_phase() {
        let mut previous = 0.0;
        for elapsed_millis in (0..=1_500_000).step_by(16) {
            let fraction = sample(START + elapsed_millis, START, 1500);
            assert!(fraction >= previous);
            previous = fraction;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn sample_clamps_outside_the_phase() {
        assert_eq!(sample(START - 10_000, START, 300), 0.0);
        assert_eq!(sample(START + 400_000, START, 300), 1.0);
    }

    #[test]
    fn zero_duration_counts_as_complete() {
        assert_eq!(sample(START, START, 0), 1.0);
        assert_eq!(from_remaining(0, 0), 1.0);
    }

    #[test]
    fn paused_projection_tracks_the_countdown() {
        assert_eq!(from_remaining(300, 300), 0.0);
        assert_eq!(from_remaining(300, 150), 0.5);
        assert_eq!(from_remaining(300, 0), 1.0);
    }
}
