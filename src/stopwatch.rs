// Wall-clock stopwatch that can be paused and restarted.
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    accumulated: Duration,      // time banked by earlier run segments
    running_since: Option<Instant>,
}

impl Stopwatch {
    /// Zero the clock and start it running.
    pub fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    /// Freeze the clock. Pausing a paused stopwatch does nothing.
    pub fn pause(&mut self) {
        if let Some(start) = self.running_since.take() {
            self.accumulated += start.elapsed();
        }
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.running_since.is_none()
    }

    pub fn elapsed(&self) -> Duration {
        match self.running_since {
            Some(start) => self.accumulated + start.elapsed(),
            None => self.accumulated,
        }
    }

    /// Whole seconds, rounded down.
    pub fn secs(&self) -> u64 {
        self.elapsed().as_secs()
    }
}
