/// Throttled timer - minimum interval between fires
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    /// Create throttled timer with minimum interval
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: 0.0,
        }
    }

    /// Accumulate delta, returns the elapsed window once it reaches the interval
    pub fn try_tick(&mut self, delta: f32) -> Option<f32> {
        self.time_since_last += delta;

        if self.time_since_last >= self.min_interval {
            let elapsed = self.time_since_last;
            self.time_since_last = 0.0;
            Some(elapsed)
        } else {
            None
        }
    }
}

/// Frames per second averaged over a reporting window
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    window: Throttled,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(report_interval: f32) -> Self {
        Self {
            window: Throttled::new(report_interval),
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a frame; returns the new average when a window closes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.window.try_tick(delta)?;
        self.fps = self.frames as f32 / elapsed;
        self.frames = 0;
        Some(self.fps)
    }

    /// Last reported average
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttled_enforces_minimum() {
        let mut timer = Throttled::new(0.1);

        assert_eq!(timer.try_tick(0.05), None);
        let elapsed = timer.try_tick(0.06).unwrap();
        assert!((elapsed - 0.11).abs() < 1e-6);
        assert_eq!(timer.try_tick(0.05), None);
    }

    #[test]
    fn fps_counter_averages_window() {
        let mut counter = FpsCounter::new(1.0);

        for _ in 0..7 {
            assert_eq!(counter.tick(0.125), None);
        }
        let fps = counter.tick(0.125).unwrap();

        assert_eq!(fps, 8.0);
        assert_eq!(counter.fps(), fps);
    }
}
