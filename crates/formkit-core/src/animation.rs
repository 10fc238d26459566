#![forbid(unsafe_code)]

//! Tweens for scroll reveals.
//!
//! The host drives time: it calls [`Animation::tick`] once per frame with the
//! elapsed duration. Nothing here owns a clock or a thread.

use std::time::Duration;

/// Cubic deceleration, the curve used for reveal scrolling. Input is clamped
/// to `[0, 1]`.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Something that advances with frame time.
pub trait Animation {
    fn tick(&mut self, dt: Duration);

    fn is_complete(&self) -> bool;

    /// Eased progress in `[0, 1]`.
    fn value(&self) -> f32;
}

/// Moves an `f32` from `from` to `to` over a duration along [`ease_out`].
///
/// To interrupt, read [`Tween::current`] and start a new tween from there.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    /// A zero duration finishes on the first tick.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: duration.max(Duration::from_nanos(1)),
        }
    }

    fn fraction(&self) -> f32 {
        let ratio = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (ratio as f32).min(1.0)
    }

    /// Interpolated value. Exactly `to` once complete.
    pub fn current(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.value()
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        ease_out(self.fraction())
    }
}
