use std::time::Duration;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

/// Samples animation-frame timestamps and turns them into a frames-per-second
/// figure that only refreshes every `refresh_interval`, so the label does not flicker.
pub struct FrameRateCounter {
    refresh_interval: Duration,
    frame_rate: f32,
    last_frame_time: Option<Instant>,
    frame_count: u32,
    accumulated_time: Duration,
    running: bool,
}

impl FrameRateCounter {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            refresh_interval,
            frame_rate: 0.0,
            last_frame_time: None,
            frame_count: 0,
            accumulated_time: Duration::ZERO,
            running: false,
        }
    }

    /// Resets the sampler. Starting a counter that is already running does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.frame_rate = 0.0;
        self.last_frame_time = None;
        self.frame_count = 0;
        self.accumulated_time = Duration::ZERO;
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn label(&self) -> String {
        format!("FPS: {:.2}", self.frame_rate())
    }

    /// Records one frame. Returns `true` when the displayed rate changed.
    pub fn measure(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        let Some(last) = self.last_frame_time.replace(now) else {
            return false;
        };

        let delta = now.saturating_duration_since(last);
        if delta.is_zero() {
            return false;
        }

        self.frame_count += 1;
        self.accumulated_time += delta;

        if self.accumulated_time >= self.refresh_interval {
            self.frame_rate = self.frame_count as f32 / self.accumulated_time.as_secs_f32();
            self.frame_count = 0;
            self.accumulated_time = Duration::ZERO;
            return true;
        }

        false
    }
}
