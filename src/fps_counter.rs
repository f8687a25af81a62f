//! Smoothed frames-per-second readout.

/// Seconds between moving-average updates.
const AVERAGE_INTERVAL: f64 = 1.0 / 15.0;
const SMOOTHING: f64 = 0.25;

/// Exponential moving average of frame time.
///
/// Frame times longer than twice the current average are clamped so one
/// hitch does not swamp the readout.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    last_tick: f64,
    last_average: f64,
    frame_time_sum: f64,
    frame_count: u32,
    average_frame_time: f64,
}

impl FpsCounter {
    /// `now` is the current time in seconds.
    pub fn new(now: f64) -> Self {
        Self {
            last_tick: now,
            last_average: now,
            frame_time_sum: 0.0,
            frame_count: 0,
            average_frame_time: 1.0 / 30.0,
        }
    }

    /// Records a frame ending at `now`. Returns the raw frame time.
    pub fn tick(&mut self, now: f64) -> f64 {
        let frame_time = now - self.last_tick;
        self.last_tick = now;

        self.frame_time_sum += frame_time.min(2.0 * self.average_frame_time);
        self.frame_count += 1;

        if now - self.last_average > AVERAGE_INTERVAL {
            let mean = self.frame_time_sum / f64::from(self.frame_count);
            self.average_frame_time = SMOOTHING * mean + (1.0 - SMOOTHING) * self.average_frame_time;
            self.last_average = now;
            self.frame_time_sum = 0.0;
            self.frame_count = 0;
        }

        frame_time
    }

    pub fn average_frame_time(&self) -> f64 {
        self.average_frame_time
    }

    pub fn fps(&self) -> u32 {
        (1.0 / self.average_frame_time).round() as u32
    }
}
