/// Elapsed-time accumulator fed by frame timestamps.
///
/// The first frame after a reset or a pause only establishes the anchor, so
/// time spent paused (or between frames while nobody was listening) is never
/// counted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    elapsed_ms: f64,
    anchor_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `now_ms` and return the time added
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let delta = match self.anchor_ms {
            Some(previous) if now_ms.is_finite() => (now_ms - previous).max(0.0),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.anchor_ms = Some(now_ms);
        }
        self.elapsed_ms += delta;
        delta
    }

    /// Anchor at `now_ms` with `elapsed_ms` already on the clock
    pub fn start_at(&mut self, now_ms: f64, elapsed_ms: f64) {
        self.elapsed_ms = elapsed_ms.max(0.0);
        self.anchor_ms = now_ms.is_finite().then_some(now_ms);
    }

    /// Drop the anchor, keep the accumulated time
    pub fn pause(&mut self) {
        self.anchor_ms = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_only_anchors() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5_000.0), 0.0);
        assert_eq!(clock.advance(5_016.0), 16.0);
        assert_eq!(clock.elapsed_ms(), 16.0);
    }

    #[test]
    fn pause_skips_the_gap() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(100.0);
        clock.pause();
        clock.advance(10_000.0);
        clock.advance(10_050.0);
        assert_eq!(clock.elapsed_ms(), 150.0);
    }

    #[test]
    fn start_at_counts_from_the_given_offset() {
        let mut clock = FrameClock::new();
        clock.start_at(1_000.0, 250.0);
        assert!(clock.is_anchored());
        assert_eq!(clock.advance(1_100.0), 100.0);
        assert_eq!(clock.elapsed_ms(), 350.0);
    }

    #[test]
    fn backwards_time_adds_nothing() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        clock.advance(50.0);
        assert_eq!(clock.elapsed_ms(), 0.0);
    }
}
