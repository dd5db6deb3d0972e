//! Handle animation.
//!
//! The engine only says where the handle should go and how long the move
//! takes. The animator eases the displayed position toward that target on
//! the UI clock.

use std::time::Duration;

use pplayer_engine::HandleVisual;

/// Eases the displayed handle position toward the engine's target.
#[derive(Debug, Clone)]
pub struct HandleAnimator {
    target: HandleVisual,
    from: f64,
    started: Duration,
}

impl HandleAnimator {
    /// Start at rest on `visual`.
    pub fn new(visual: HandleVisual) -> Self {
        Self {
            target: visual,
            from: visual.percent,
            started: Duration::ZERO,
        }
    }

    /// Follow a new target. A target equal to the current one is ignored, so
    /// this can be called every frame.
    pub fn retarget(&mut self, visual: HandleVisual, now: Duration) {
        if visual == self.target {
            return;
        }
        self.from = self.position(now);
        self.started = now;
        self.target = visual;
    }

    /// Displayed position at `now`.
    pub fn position(&self, now: Duration) -> f64 {
        let duration = self.target.transition.duration();
        if duration.is_zero() {
            return self.target.percent;
        }
        let t = (now.saturating_sub(self.started).as_secs_f64() / duration.as_secs_f64())
            .clamp(0.0, 1.0);
        self.from + (self.target.percent - self.from) * ease(t)
    }

    /// Check if the handle is still moving at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        now.saturating_sub(self.started) < self.target.transition.duration()
            && self.from != self.target.percent
    }
}

/// Smoothstep easing.
fn ease(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
