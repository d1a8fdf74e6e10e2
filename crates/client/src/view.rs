//! Timer view state.
//!
//! [`TimerView`] holds everything the terminal renders: the two input fields,
//! the last known countdown record, and the locally projected value. It does
//! no I/O; the main loop feeds it loads, pushes, ticks, and keystrokes.

use countdown_core::projection::{
    calculate_current_value, format_count, format_decimal_string, get_max_decimal_places,
    is_valid_decimal_input, parse_decimal_input, MIN_DISPLAY_VALUE,
};
use countdown_core::types::Timestamp;

use crate::record::CountdownRecord;

/// Start value input shown before anything is loaded.
pub const DEFAULT_START_INPUT: &str = "100";

/// Rate input shown before anything is loaded.
pub const DEFAULT_RATE_INPUT: &str = "1";

/// Coarse state of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Stopped,
    Running,
}

/// Everything the terminal shows, plus the last record the server returned.
#[derive(Debug, Clone)]
pub struct TimerView {
    start_input: String,
    rate_input: String,
    countdown: Option<CountdownRecord>,
    current_value: f64,
    loading: bool,
    seeded: bool,
    /// The countdown hit zero locally while the server row is still running.
    stopped_locally: bool,
}

impl Default for TimerView {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerView {
    /// A loading view with the default inputs.
    pub fn new() -> Self {
        Self {
            start_input: DEFAULT_START_INPUT.to_string(),
            rate_input: DEFAULT_RATE_INPUT.to_string(),
            countdown: None,
            current_value: parse_decimal_input(DEFAULT_START_INPUT),
            loading: true,
            seeded: false,
            stopped_locally: false,
        }
    }

    // ---- events ----

    /// Apply the result of the initial (or any full) load.
    ///
    /// The input fields are seeded from the record only on the first load
    /// that finds one. With no record the display falls back to the start
    /// value input.
    pub fn on_loaded(&mut self, record: Option<CountdownRecord>, now: Timestamp) {
        self.loading = false;
        match record {
            Some(record) => {
                if !self.seeded {
                    self.start_input = format_decimal_string(record.start_value);
                    self.rate_input = format_decimal_string(record.rate_per_second);
                    self.seeded = true;
                }
                self.adopt(record, now);
            }
            None => {
                self.countdown = None;
                self.stopped_locally = false;
                self.current_value = self.start_value();
            }
        }
    }

    /// A load failed. Leave the loading state and keep whatever is shown.
    pub fn on_load_failed(&mut self) {
        self.loading = false;
        if self.countdown.is_none() {
            self.current_value = self.start_value();
        }
    }

    /// Take `record` as the new truth (command response or pushed refresh).
    pub fn adopt(&mut self, record: CountdownRecord, now: Timestamp) {
        self.current_value = calculate_current_value(&record, now);
        self.countdown = Some(record);
        self.stopped_locally = false;
    }

    /// Re-project the running countdown at `now`.
    ///
    /// Returns `true` when this tick brought the value to zero, at which
    /// point the view stops locally without telling the backend. The server
    /// row stays running, so resume is withheld until a record is adopted.
    pub fn on_tick(&mut self, now: Timestamp) -> bool {
        let Some(record) = self.countdown.as_mut().filter(|r| r.is_running) else {
            return false;
        };

        self.current_value = calculate_current_value(&*record, now);
        if self.current_value <= MIN_DISPLAY_VALUE {
            record.is_running = false;
            self.stopped_locally = true;
            return true;
        }
        false
    }

    /// Replace the start value input. Rejected while running or when the
    /// text is not a plain decimal.
    pub fn set_start_input(&mut self, text: &str) -> bool {
        if self.inputs_locked() || !is_valid_decimal_input(text) {
            return false;
        }
        self.start_input = text.to_string();
        true
    }

    /// Replace the rate input. Same rules as [`set_start_input`](Self::set_start_input).
    pub fn set_rate_input(&mut self, text: &str) -> bool {
        if self.inputs_locked() || !is_valid_decimal_input(text) {
            return false;
        }
        self.rate_input = text.to_string();
        true
    }

    // ---- queries ----

    /// Loading until the first load settles, then running or stopped.
    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else if self.is_running() {
            ViewPhase::Running
        } else {
            ViewPhase::Stopped
        }
    }

    /// Whether the view is animating a running countdown.
    pub fn is_running(&self) -> bool {
        self.countdown.as_ref().is_some_and(|r| r.is_running)
    }

    /// The last adopted record, if any.
    pub fn countdown(&self) -> Option<&CountdownRecord> {
        self.countdown.as_ref()
    }

    /// The most recently projected value.
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Start value input text as typed.
    pub fn start_input(&self) -> &str {
        &self.start_input
    }

    /// Rate input text as typed.
    pub fn rate_input(&self) -> &str {
        &self.rate_input
    }

    /// Parsed start value input (0 when empty or unparsable).
    pub fn start_value(&self) -> f64 {
        parse_decimal_input(&self.start_input)
    }

    /// Parsed rate input (0 when empty or unparsable).
    pub fn rate(&self) -> f64 {
        parse_decimal_input(&self.rate_input)
    }

    /// Inputs cannot be edited while running.
    pub fn inputs_locked(&self) -> bool {
        self.is_running()
    }

    /// Start needs a stopped view, a non-zero value, and a non-zero rate.
    pub fn can_start(&self) -> bool {
        self.phase() == ViewPhase::Stopped
            && self.current_value != 0.0
            && self.rate() != 0.0
    }

    /// Pause is offered only while running.
    pub fn can_pause(&self) -> bool {
        self.phase() == ViewPhase::Running
    }

    /// Resume is offered when stopped with a paused record on the server.
    pub fn can_resume(&self) -> bool {
        self.phase() == ViewPhase::Stopped && self.countdown.is_some() && !self.stopped_locally
    }

    /// Whether the countdown reached zero locally but not on the server.
    pub fn stopped_locally(&self) -> bool {
        self.stopped_locally
    }

    /// Number of decimals used to render the value.
    pub fn decimals(&self) -> usize {
        get_max_decimal_places(&self.start_input, &self.rate_input)
    }

    /// The value as rendered.
    pub fn display(&self) -> String {
        format_count(self.current_value, self.decimals())
    }

    /// One-line summary for the terminal.
    pub fn status_line(&self) -> String {
        match self.phase() {
            ViewPhase::Loading => "Loading...".to_string(),
            phase => {
                let label = if phase == ViewPhase::Running {
                    "running"
                } else {
                    "stopped"
                };
                format!(
                    "[{label}] {}   start={} rate={}/s",
                    self.display(),
                    self.start_input,
                    self.rate_input
                )
            }
        }
    }
}
