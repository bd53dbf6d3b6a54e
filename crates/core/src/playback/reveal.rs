//! Reveal helpers shared by the scenes
//!
//! Two policies exist. A sliced reveal shows `ceil(progress * n)` items from a
//! single timeline. A chained reveal runs one counter per item and starts the
//! next item only once the previous counter has settled.

use super::{AnimatedCounter, FrameRequest};

/// Progress through `[start_ms, start_ms + length_ms)`, clamped to 0..=1
pub fn window_progress(elapsed_ms: f64, start_ms: f64, length_ms: f64) -> f64 {
    if length_ms <= 0.0 {
        return if elapsed_ms >= start_ms { 1.0 } else { 0.0 };
    }
    ((elapsed_ms - start_ms) / length_ms).clamp(0.0, 1.0)
}

/// Items visible after `elapsed_ms` of a sliced reveal over `count` items
pub fn sliced_reveal_count(elapsed_ms: f64, duration_ms: f64, count: usize) -> usize {
    let progress = window_progress(elapsed_ms, 0.0, duration_ms);
    ((progress * count as f64).ceil() as usize).min(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    Pending,
    Active,
    Done,
}

/// Order in which a chained reveal walks its items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOrder {
    FrontToBack,
    /// Last item first, so the top entry lands at the end
    BackToFront,
}

/// One counter per item, started strictly one after another.
///
/// Indices always refer to the item list as given; `RevealOrder` only decides
/// which one runs first. At most one item is `Active` at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainedReveal {
    counters: Vec<AnimatedCounter>,
    phases: Vec<ItemPhase>,
    order: RevealOrder,
}

impl ChainedReveal {
    pub fn new(targets: impl IntoIterator<Item = f64>, item_ms: f64, order: RevealOrder) -> Self {
        let counters: Vec<AnimatedCounter> = targets
            .into_iter()
            .map(|target| AnimatedCounter::with_target(target, item_ms))
            .collect();
        let phases = vec![ItemPhase::Pending; counters.len()];
        Self {
            counters,
            phases,
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Activate the first item if nothing has started yet
    pub fn start(&mut self) {
        if self.phases.iter().all(|p| *p == ItemPhase::Pending) {
            if let Some(first) = self.next_pending() {
                self.activate(first);
            }
        }
    }

    pub fn tick(&mut self, now_ms: f64) -> FrameRequest {
        let Some(mut index) = self.active_index() else {
            return FrameRequest::Idle;
        };
        // Time the previous item ran past its end belongs to the next one
        let mut carry: Option<f64> = None;
        loop {
            let counter = &mut self.counters[index];
            if !counter.is_settled() {
                match carry {
                    Some(elapsed_ms) => counter.start_at(now_ms, elapsed_ms),
                    None => counter.tick(now_ms),
                };
                if !counter.is_settled() {
                    return FrameRequest::Continue;
                }
                carry = Some(counter.overshoot_ms());
            }
            self.phases[index] = ItemPhase::Done;
            match self.next_pending() {
                Some(next) => {
                    self.activate(next);
                    index = next;
                }
                None => return FrameRequest::Idle,
            }
        }
    }

    pub fn pause(&mut self) {
        if let Some(index) = self.active_index() {
            self.counters[index].pause();
        }
    }

    /// Back to all-pending with every counter at 0
    pub fn reset(&mut self) {
        for counter in &mut self.counters {
            counter.reset();
        }
        self.phases.fill(ItemPhase::Pending);
    }

    /// Every item done at its final value
    pub fn finish(&mut self) {
        for counter in &mut self.counters {
            counter.settle();
        }
        self.phases.fill(ItemPhase::Done);
    }

    pub fn active_index(&self) -> Option<usize> {
        self.phases.iter().position(|p| *p == ItemPhase::Active)
    }

    /// Items that are active or done
    pub fn visible_count(&self) -> usize {
        self.phases
            .iter()
            .filter(|p| **p != ItemPhase::Pending)
            .count()
    }

    pub fn phase(&self, index: usize) -> ItemPhase {
        self.phases.get(index).copied().unwrap_or(ItemPhase::Pending)
    }

    /// Current counter value, 0 while pending
    pub fn value(&self, index: usize) -> f64 {
        match self.phase(index) {
            ItemPhase::Pending => 0.0,
            _ => self.counters[index].value(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phases.iter().all(|p| *p == ItemPhase::Done)
    }

    fn activate(&mut self, index: usize) {
        self.counters[index].reset();
        self.phases[index] = ItemPhase::Active;
    }

    fn next_pending(&self) -> Option<usize> {
        let pending = |i: &usize| self.phases[*i] == ItemPhase::Pending;
        match self.order {
            RevealOrder::FrontToBack => (0..self.phases.len()).find(pending),
            RevealOrder::BackToFront => (0..self.phases.len()).rev().find(pending),
        }
    }
}
