use super::{FrameClock, FrameRequest};

/// Where a counter starts when it receives a new target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterStart {
    /// Restart from 0 on every new target
    #[default]
    Zero,
    /// Interpolate from whatever value is currently shown
    Current,
}

/// Frame-driven linear interpolator.
///
/// Progress is elapsed frame time over the duration, so the value tracks real
/// time regardless of frame rate. Once the target is reached the counter stops
/// asking for frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedCounter {
    from: f64,
    target: f64,
    current: f64,
    duration_ms: f64,
    start: CounterStart,
    clock: FrameClock,
    settled: bool,
}

impl AnimatedCounter {
    pub fn new(duration_ms: f64, start: CounterStart) -> Self {
        Self {
            from: 0.0,
            target: 0.0,
            current: 0.0,
            duration_ms: sanitize(duration_ms),
            start,
            clock: FrameClock::new(),
            settled: true,
        }
    }

    /// Counter that animates from 0 to `target`
    pub fn with_target(target: f64, duration_ms: f64) -> Self {
        let mut counter = Self::new(duration_ms, CounterStart::Zero);
        counter.set_target(target);
        counter
    }

    pub fn set_target(&mut self, target: f64) {
        self.from = match self.start {
            CounterStart::Zero => 0.0,
            CounterStart::Current => self.current,
        };
        self.target = sanitize(target);
        self.restart();
    }

    /// Rewind to 0 and animate towards the current target again
    pub fn reset(&mut self) {
        self.from = 0.0;
        self.restart();
    }

    fn restart(&mut self) {
        self.current = self.from;
        self.clock.reset();
        self.settled = false;
        if self.duration_ms <= 0.0 || self.target == 0.0 || self.target == self.from {
            self.settle();
        }
    }

    pub fn tick(&mut self, now_ms: f64) -> FrameRequest {
        if self.settled {
            return FrameRequest::Idle;
        }
        self.clock.advance(now_ms);
        self.apply_progress()
    }

    fn apply_progress(&mut self) -> FrameRequest {
        let progress = self.raw_progress();
        if progress >= 1.0 {
            self.settle();
            return FrameRequest::Idle;
        }
        self.current = self.from + (self.target - self.from) * progress;
        FrameRequest::Continue
    }

    /// Run as if `elapsed_ms` had already passed when the frame at `now_ms`
    /// arrived. Lets a follow-up animation pick up time an earlier one
    /// overran.
    pub fn start_at(&mut self, now_ms: f64, elapsed_ms: f64) -> FrameRequest {
        if self.settled {
            return FrameRequest::Idle;
        }
        self.clock.start_at(now_ms, elapsed_ms);
        self.apply_progress()
    }

    /// Time run past the end of the animation, 0 while still running
    pub fn overshoot_ms(&self) -> f64 {
        (self.clock.elapsed_ms() - self.duration_ms).max(0.0)
    }

    /// Drop the frame anchor; the next tick resumes without a time jump
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Jump straight to the target
    pub fn settle(&mut self) {
        self.current = self.target;
        self.settled = true;
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Fraction of the animation completed, 0..=1
    pub fn progress(&self) -> f64 {
        if self.settled {
            1.0
        } else {
            self.raw_progress()
        }
    }

    fn raw_progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.clock.elapsed_ms() / self.duration_ms).clamp(0.0, 1.0)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(counter: &mut AnimatedCounter, from_ms: f64, to_ms: f64, step_ms: f64) -> Vec<f64> {
        let mut values = Vec::new();
        let mut now = from_ms;
        while now <= to_ms {
            counter.tick(now);
            values.push(counter.value());
            now += step_ms;
        }
        values
    }

    #[test]
    fn reaches_target_within_duration() {
        let mut counter = AnimatedCounter::with_target(240.0, 1000.0);
        let values = run(&mut counter, 0.0, 1016.0, 16.0);
        assert!(values.windows(2).all(|w| w[1] >= w[0]), "values must not decrease");
        assert_eq!(counter.value(), 240.0);
        assert!(counter.is_settled());
        assert_eq!(counter.tick(2000.0), FrameRequest::Idle);
    }

    #[test]
    fn zero_target_or_duration_settles_immediately() {
        let zero = AnimatedCounter::with_target(0.0, 1000.0);
        assert!(zero.is_settled());

        let mut instant = AnimatedCounter::with_target(12.0, 0.0);
        assert!(instant.is_settled());
        assert_eq!(instant.value(), 12.0);
        assert_eq!(instant.tick(0.0), FrameRequest::Idle);
    }

    #[test]
    fn nan_target_is_treated_as_zero() {
        let counter = AnimatedCounter::with_target(f64::NAN, 500.0);
        assert_eq!(counter.value(), 0.0);
        assert!(counter.is_settled());
    }

    #[test]
    fn pause_resume_only_shifts_completion_time() {
        let mut counter = AnimatedCounter::with_target(100.0, 1000.0);
        counter.tick(0.0);
        counter.tick(400.0);
        let before_pause = counter.value();
        counter.pause();
        // Five seconds pass while paused; the next frame only re-anchors.
        counter.tick(5_400.0);
        assert_eq!(counter.value(), before_pause);
        counter.tick(5_700.0);
        assert!(!counter.is_settled());
        counter.tick(6_000.0);
        assert!(counter.is_settled());
        assert_eq!(counter.value(), 100.0);
    }

    #[test]
    fn current_start_interpolates_from_shown_value() {
        let mut counter = AnimatedCounter::new(1000.0, CounterStart::Current);
        counter.set_target(10.0);
        counter.tick(0.0);
        counter.tick(500.0);
        assert_eq!(counter.value(), 5.0);
        counter.set_target(20.0);
        assert_eq!(counter.value(), 5.0);
        counter.tick(600.0);
        counter.tick(1100.0);
        assert_eq!(counter.value(), 12.5);
    }

    #[test]
    fn reset_rewinds_to_zero() {
        let mut counter = AnimatedCounter::with_target(50.0, 100.0);
        counter.tick(0.0);
        counter.tick(200.0);
        assert!(counter.is_settled());
        counter.reset();
        assert_eq!(counter.value(), 0.0);
        assert!(!counter.is_settled());
    }
}
