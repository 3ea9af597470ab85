/// Fixed length of each timer mode, in seconds.
pub const POMODORO_SECS: u32 = 25 * 60;
pub const SHORT_BREAK_SECS: u32 = 5 * 60;
pub const LONG_BREAK_SECS: u32 = 15 * 60;

/// The three timer presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [
        TimerMode::Pomodoro,
        TimerMode::ShortBreak,
        TimerMode::LongBreak,
    ];

    pub fn duration_secs(self) -> u32 {
        match self {
            TimerMode::Pomodoro => POMODORO_SECS,
            TimerMode::ShortBreak => SHORT_BREAK_SECS,
            TimerMode::LongBreak => LONG_BREAK_SECS,
        }
    }

    /// Mode entered automatically once this one runs out.
    /// Long break is never entered this way.
    pub fn next(self) -> TimerMode {
        match self {
            TimerMode::Pomodoro => TimerMode::ShortBreak,
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Pomodoro,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Pomodoro",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was paused, nothing changed.
    Idle,
    /// One second elapsed.
    Counting,
    /// The countdown reached zero; the timer moved on to `next` and stopped.
    Completed { finished: TimerMode, next: TimerMode },
}

/// Countdown state: mode x {running, paused} plus remaining seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    mode: TimerMode,
    remaining: u32,
    running: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new(TimerMode::Pomodoro)
    }
}

impl Timer {
    pub fn new(mode: TimerMode) -> Self {
        Timer {
            mode,
            remaining: mode.duration_secs(),
            running: false,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.mode.duration_secs();
    }

    /// Switches to `mode`, dropping whatever countdown was in progress.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.remaining = mode.duration_secs();
        self.running = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return TickOutcome::Counting;
        }

        let finished = self.mode;
        let next = finished.next();
        self.set_mode(next);
        TickOutcome::Completed { finished, next }
    }

    /// Fraction of the current mode that has elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.mode.duration_secs() as f64;
        (total - self.remaining as f64) / total
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut Timer, n: u32) -> Vec<TickOutcome> {
        (0..n).map(|_| timer.tick()).collect()
    }

    #[test]
    fn test_new_timer_is_paused_at_full_duration() {
        let timer = Timer::default();
        assert_eq!(timer.mode(), TimerMode::Pomodoro);
        assert_eq!(timer.remaining(), 1500);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_tick_while_paused_is_ignored() {
        let mut timer = Timer::default();
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.remaining(), 1500);
    }

    #[test]
    fn test_start_and_pause_keep_remaining() {
        let mut timer = Timer::default();
        timer.start();
        run_ticks(&mut timer, 10);
        timer.pause();
        assert_eq!(timer.remaining(), 1490);
        assert_eq!(timer.mode(), TimerMode::Pomodoro);

        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 1490);
    }

    #[test]
    fn test_full_pomodoro_moves_to_short_break() {
        let mut timer = Timer::default();
        timer.start();
        let outcomes = run_ticks(&mut timer, 1500);

        assert_eq!(
            outcomes.last(),
            Some(&TickOutcome::Completed {
                finished: TimerMode::Pomodoro,
                next: TimerMode::ShortBreak
            })
        );
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o, TickOutcome::Completed { .. }))
                .count(),
            1
        );
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.remaining(), 300);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_breaks_return_to_pomodoro() {
        let mut timer = Timer::new(TimerMode::ShortBreak);
        timer.start();
        run_ticks(&mut timer, 300);
        assert_eq!(timer.mode(), TimerMode::Pomodoro);
        assert_eq!(timer.remaining(), 1500);

        let mut timer = Timer::new(TimerMode::LongBreak);
        timer.start();
        run_ticks(&mut timer, 900);
        assert_eq!(timer.mode(), TimerMode::Pomodoro);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_set_mode_while_running_discards_progress() {
        let mut timer = Timer::default();
        timer.start();
        run_ticks(&mut timer, 42);

        timer.set_mode(TimerMode::LongBreak);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 900);

        // Re-selecting the same mode restarts it too
        timer.start();
        run_ticks(&mut timer, 5);
        timer.set_mode(TimerMode::LongBreak);
        assert_eq!(timer.remaining(), 900);
    }

    #[test]
    fn test_reset_restores_current_mode_duration() {
        let mut timer = Timer::new(TimerMode::ShortBreak);
        timer.start();
        run_ticks(&mut timer, 100);
        timer.reset();
        assert_eq!(timer.remaining(), 300);
        assert!(!timer.is_running());
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
    }

    #[test]
    fn test_progress() {
        let mut timer = Timer::new(TimerMode::ShortBreak);
        assert_eq!(timer.progress(), 0.0);
        timer.start();
        run_ticks(&mut timer, 150);
        assert!((timer.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(0), "00:00");
    }
}
