//! Timer engine
//!
//! Single authoritative owner of the timer state. All intents funnel
//! through its methods, each of which mutates under the lock, publishes a
//! fresh snapshot for renderers, and manages the 1 Hz tick driver task.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::state::{Phase, TimerSnapshot, TimerState};
use crate::tasks::run_tick_driver;

/// Fired exactly once per automatic phase transition. Manual phase
/// switches, resets and reconfigurations never produce one.
#[derive(Debug, Clone, Copy)]
pub struct PhaseCompleted;

/// The timer state machine plus its notification channels and the handle
/// of the currently live tick driver, if any
#[derive(Clone)]
pub struct TimerEngine {
    state: Arc<Mutex<TimerState>>,
    /// Handle of the spawned 1 Hz driver; pausing takes and aborts it so
    /// no callback outlives the running flag
    driver: Arc<Mutex<Option<JoinHandle<()>>>>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    phase_tx: broadcast::Sender<PhaseCompleted>,
    last_intent: Arc<Mutex<Option<(String, DateTime<Utc>)>>>,
    /// Keep one receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl TimerEngine {
    /// Create an idle engine with the given phase lengths in minutes,
    /// each clamped to [1, 60]
    pub fn new(work_minutes: i64, break_minutes: i64) -> Self {
        let state = TimerState::with_durations(work_minutes, break_minutes);
        let (snapshot_tx, snapshot_rx) =
            watch::channel(state.snapshot(Utc::now().timestamp_millis()));
        let (phase_tx, _) = broadcast::channel(16);

        Self {
            state: Arc::new(Mutex::new(state)),
            driver: Arc::new(Mutex::new(None)),
            snapshot_tx,
            phase_tx,
            last_intent: Arc::new(Mutex::new(None)),
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Current readout of the timer
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        let state = self
            .state
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        Ok(state.snapshot(Utc::now().timestamp_millis()))
    }

    /// Watch channel carrying the snapshot published after every mutation
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Broadcast channel carrying end-of-phase events
    pub fn phase_events(&self) -> broadcast::Receiver<PhaseCompleted> {
        self.phase_tx.subscribe()
    }

    /// Whether the 1 Hz driver is active
    pub fn is_running(&self) -> Result<bool, String> {
        self.state
            .lock()
            .map(|state| state.running)
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Begin or resume the countdown. A no-op while already running.
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        let now = Utc::now().timestamp_millis();
        let snapshot = {
            let mut state = self
                .state
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            if state.running {
                return Ok(state.snapshot(now));
            }
            state.begin_running(now);
            state.snapshot(now)
        };

        self.spawn_driver()?;
        self.record_intent("start");
        self.publish(snapshot.clone());
        info!(
            "Timer started: {} phase, {} remaining",
            snapshot.phase.label(),
            snapshot.clock
        );
        Ok(snapshot)
    }

    /// Halt the countdown and abort the driver. A no-op while paused.
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        let now = Utc::now().timestamp_millis();
        let snapshot = {
            let mut state = self
                .state
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            if !state.running {
                return Ok(state.snapshot(now));
            }
            state.halt();
            state.snapshot(now)
        };

        self.abort_driver()?;
        self.record_intent("pause");
        self.publish(snapshot.clone());
        info!("Timer paused with {} remaining", snapshot.clock);
        Ok(snapshot)
    }

    /// The single-button intent: pause if running, start otherwise
    pub fn toggle_start_pause(&self) -> Result<TimerSnapshot, String> {
        if self.is_running()? {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Apply one authoritative 1 Hz step. Invoked by the tick driver;
    /// returns false without mutating when the timer is no longer
    /// running, so the driver knows to exit.
    pub fn tick(&self) -> Result<bool, String> {
        let now = Utc::now().timestamp_millis();
        let (snapshot, transitioned) = {
            let mut state = self
                .state
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            if !state.running {
                return Ok(false);
            }
            let transitioned = state.tick(now);
            (state.snapshot(now), transitioned)
        };

        if transitioned {
            info!(
                "Phase completed, entering {} (round {})",
                snapshot.phase.label(),
                snapshot.round
            );
            // A send error only means no collaborator is subscribed
            let _ = self.phase_tx.send(PhaseCompleted);
        }
        self.publish(snapshot);
        Ok(true)
    }

    /// Stop and return to a fresh focus phase at full duration, round 1
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.abort_driver()?;
        let now = Utc::now().timestamp_millis();
        let snapshot = {
            let mut state = self
                .state
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            state.reset(now);
            state.snapshot(now)
        };

        self.record_intent("reset");
        self.publish(snapshot.clone());
        info!("Timer reset: {} on the clock", snapshot.clock);
        Ok(snapshot)
    }

    /// Store new phase lengths (clamped to [1, 60] minutes, missing
    /// values keeping the prior length) and force a full reset
    pub fn configure(
        &self,
        work_minutes: Option<i64>,
        break_minutes: Option<i64>,
    ) -> Result<TimerSnapshot, String> {
        self.abort_driver()?;
        let now = Utc::now().timestamp_millis();
        let snapshot = {
            let mut state = self
                .state
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            state.configure(work_minutes, break_minutes, now);
            state.snapshot(now)
        };

        self.record_intent("configure");
        self.publish(snapshot.clone());
        info!(
            "Durations configured: work={}s, break={}s",
            snapshot.work_duration_seconds, snapshot.break_duration_seconds
        );
        Ok(snapshot)
    }

    /// Jump to `target` at its full duration, leaving the round count and
    /// running flag untouched. Switching to the active phase is a no-op.
    pub fn switch_phase(&self, target: Phase) -> Result<TimerSnapshot, String> {
        let now = Utc::now().timestamp_millis();
        let (snapshot, switched) = {
            let mut state = self
                .state
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            let switched = state.switch_phase(target, now);
            (state.snapshot(now), switched)
        };

        if switched {
            self.record_intent(match target {
                Phase::Focus => "focus",
                Phase::Break => "break",
            });
            self.publish(snapshot.clone());
            info!("Switched to {} phase", snapshot.phase.label());
        }
        Ok(snapshot)
    }

    /// Name and time of the last accepted intent
    pub fn last_intent(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_intent.lock() {
            Ok(guard) => match guard.as_ref() {
                Some((intent, at)) => (Some(intent.clone()), Some(*at)),
                None => (None, None),
            },
            Err(_) => (None, None),
        }
    }

    fn spawn_driver(&self) -> Result<(), String> {
        let mut driver = self
            .driver
            .lock()
            .map_err(|e| format!("Failed to lock driver handle: {}", e))?;
        if let Some(handle) = driver.take() {
            handle.abort();
        }
        *driver = Some(tokio::spawn(run_tick_driver(self.clone())));
        Ok(())
    }

    fn abort_driver(&self) -> Result<(), String> {
        let mut driver = self
            .driver
            .lock()
            .map_err(|e| format!("Failed to lock driver handle: {}", e))?;
        if let Some(handle) = driver.take() {
            handle.abort();
        }
        Ok(())
    }

    fn record_intent(&self, intent: &str) {
        if let Ok(mut last) = self.last_intent.lock() {
            *last = Some((intent.to_string(), Utc::now()));
        }
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish timer snapshot: {}", e);
        }
    }
}
