use std::time::Duration;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

/// Recognizes double clicks from button presses and releases, since winit
/// only reports the individual transitions.
///
/// A release counts as a click only when the pointer stayed within
/// `max_distance` of where the button went down. Two clicks form a double
/// click when their press positions are close and the second press follows
/// the first release within `interval`.
pub struct ClickTracker {
    interval: Duration,
    max_distance: f32,
    pressed: Option<(Instant, [f32; 2])>,
    last_click: Option<(Instant, [f32; 2])>,
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

impl ClickTracker {
    pub fn new(interval: Duration, max_distance: f32) -> Self {
        Self {
            interval,
            max_distance,
            pressed: None,
            last_click: None,
        }
    }

    pub fn press(&mut self, now: Instant, position: [f32; 2]) {
        self.pressed = Some((now, position));
    }

    /// Records a release at `position`. Returns `true` when it completes a
    /// double click; the pair is then consumed.
    pub fn release(&mut self, now: Instant, position: [f32; 2]) -> bool {
        let Some((pressed_at, press_pos)) = self.pressed.take() else {
            return false;
        };

        if distance(press_pos, position) > self.max_distance {
            // the pointer travelled between press and release
            self.last_click = None;
            return false;
        }

        if let Some((released_at, previous)) = self.last_click.take() {
            let close = distance(press_pos, previous) <= self.max_distance;
            if close && pressed_at.saturating_duration_since(released_at) <= self.interval {
                return true;
            }
        }

        self.last_click = Some((now, press_pos));
        false
    }
}
