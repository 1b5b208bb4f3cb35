/// Frame clock - turns monotonic time samples into per-tick deltas
/// The first sample only seeds the clock
#[derive(Debug, Default, Clone, Copy)]
pub struct Clock {
    last_tick: Option<f64>,
}

impl Clock {
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds, 0 on the first tick
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = match self.last_tick {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_tick = Some(now);
        delta
    }

    /// Forget the last sample; the next tick reports zero
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

/// Wall-clock seconds since construction
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: std::time::Instant,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
