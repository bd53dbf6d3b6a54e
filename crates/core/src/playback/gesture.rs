//! Wheel and swipe input turned into discrete navigation steps
//!
//! Wheel deltas accumulate along the dominant axis until they cross
//! `WHEEL_THRESHOLD_PX`. A swipe counts when its horizontal travel reaches
//! `SWIPE_THRESHOLD_PX` and outweighs the vertical travel. After a step every
//! input is ignored for `NAVIGATION_COOLDOWN_MS`; wheel input arriving during
//! the cooldown re-arms it, so one long trackpad fling yields one step.

pub const WHEEL_THRESHOLD_PX: f64 = 20.0;
pub const SWIPE_THRESHOLD_PX: f64 = 40.0;
pub const NAVIGATION_COOLDOWN_MS: f64 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Next,
    Previous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureNavigator {
    wheel_threshold: f64,
    swipe_threshold: f64,
    cooldown_ms: f64,
    accumulated: f64,
    locked_until: Option<f64>,
    touch_start: Option<(f64, f64)>,
    touch_last: Option<(f64, f64)>,
}

impl Default for GestureNavigator {
    fn default() -> Self {
        Self::new(WHEEL_THRESHOLD_PX, SWIPE_THRESHOLD_PX, NAVIGATION_COOLDOWN_MS)
    }
}

impl GestureNavigator {
    pub fn new(wheel_threshold: f64, swipe_threshold: f64, cooldown_ms: f64) -> Self {
        Self {
            wheel_threshold,
            swipe_threshold,
            cooldown_ms,
            accumulated: 0.0,
            locked_until: None,
            touch_start: None,
            touch_last: None,
        }
    }

    pub fn is_locked(&self, now_ms: f64) -> bool {
        self.locked_until.is_some_and(|until| now_ms < until)
    }

    /// Feed one wheel event. Positive deltas scroll towards the next scene.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64, now_ms: f64) -> Option<NavDirection> {
        if self.is_locked(now_ms) {
            self.lock(now_ms);
            return None;
        }
        let delta = if delta_y.abs() >= delta_x.abs() {
            delta_y
        } else {
            delta_x
        };
        if delta == 0.0 || !delta.is_finite() {
            return None;
        }

        self.accumulated += delta;
        if self.accumulated.abs() < self.wheel_threshold {
            return None;
        }
        let direction = if self.accumulated > 0.0 {
            NavDirection::Next
        } else {
            NavDirection::Previous
        };
        self.accumulated = 0.0;
        self.lock(now_ms);
        Some(direction)
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.touch_start = Some((x, y));
        self.touch_last = Some((x, y));
    }

    pub fn touch_move(&mut self, x: f64, y: f64) {
        if self.touch_start.is_some() {
            self.touch_last = Some((x, y));
        }
    }

    /// Finish a swipe. Swiping left (negative x travel) moves forward.
    pub fn touch_end(&mut self, now_ms: f64) -> Option<NavDirection> {
        let start = self.touch_start.take()?;
        let end = self.touch_last.take().unwrap_or(start);
        if self.is_locked(now_ms) {
            return None;
        }
        let dx = end.0 - start.0;
        let dy = end.1 - start.1;
        if dx.abs() < self.swipe_threshold || dx.abs() < dy.abs() {
            return None;
        }
        self.lock(now_ms);
        Some(if dx < 0.0 {
            NavDirection::Next
        } else {
            NavDirection::Previous
        })
    }

    pub fn touch_cancel(&mut self) {
        self.touch_start = None;
        self.touch_last = None;
    }

    fn lock(&mut self, now_ms: f64) {
        self.locked_until = Some(now_ms + self.cooldown_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_accumulates_to_threshold() {
        let mut nav = GestureNavigator::default();
        assert_eq!(nav.on_wheel(0.0, 15.0, 0.0), None);
        assert_eq!(nav.on_wheel(0.0, 10.0, 10.0), Some(NavDirection::Next));
        assert!(nav.is_locked(500.0));
    }

    #[test]
    fn wheel_during_cooldown_extends_it() {
        let mut nav = GestureNavigator::default();
        assert_eq!(nav.on_wheel(0.0, 30.0, 0.0), Some(NavDirection::Next));
        assert_eq!(nav.on_wheel(0.0, 30.0, 600.0), None);
        assert_eq!(nav.on_wheel(0.0, 30.0, 1200.0), None, "lock was re-armed at 600");
        assert_eq!(nav.on_wheel(0.0, -30.0, 2000.0), Some(NavDirection::Previous));
    }

    #[test]
    fn wheel_uses_dominant_axis() {
        let mut nav = GestureNavigator::default();
        assert_eq!(nav.on_wheel(-25.0, 5.0, 0.0), Some(NavDirection::Previous));
    }

    #[test]
    fn swipe_left_moves_forward() {
        let mut nav = GestureNavigator::default();
        nav.touch_start(200.0, 100.0);
        nav.touch_move(150.0, 110.0);
        assert_eq!(nav.touch_end(0.0), Some(NavDirection::Next));

        nav.touch_start(100.0, 100.0);
        nav.touch_move(160.0, 100.0);
        assert_eq!(nav.touch_end(100.0), None, "still cooling down");

        nav.touch_start(100.0, 100.0);
        nav.touch_move(160.0, 100.0);
        assert_eq!(nav.touch_end(1000.0), Some(NavDirection::Previous));
    }

    #[test]
    fn short_or_vertical_swipes_are_ignored() {
        let mut nav = GestureNavigator::default();
        nav.touch_start(100.0, 100.0);
        nav.touch_move(70.0, 100.0);
        assert_eq!(nav.touch_end(0.0), None);

        nav.touch_start(100.0, 100.0);
        nav.touch_move(50.0, 200.0);
        assert_eq!(nav.touch_end(0.0), None);

        assert_eq!(nav.touch_end(0.0), None, "no touch in progress");
    }
}
