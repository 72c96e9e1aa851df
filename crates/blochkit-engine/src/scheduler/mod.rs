//! Animation scheduling.
//!
//! A [`FrameScheduler`] turns an [`AnimationSpec`] into a sequence of
//! `on_frame(progress)` calls with eased progress running up to exactly
//! 1.0, followed by one `on_complete()` call. How time advances is up to
//! the implementation:
//!
//! - [`ManualScheduler`]: a single-threaded tick loop advanced explicitly
//! - [`TokioScheduler`]: one timer task per animation on the tokio runtime
//!
//! Cancelling (or dropping) the returned [`AnimationHandle`] stops the
//! animation in place. No further frames are delivered and `on_complete`
//! never runs.

mod manual;
mod timer;

pub use manual::ManualScheduler;
pub use timer::TokioScheduler;

use std::fmt;
use std::time::Duration;

use crate::easing::Easing;
use crate::error::EngineResult;

/// Per-frame callback receiving eased progress in [0, 1].
pub type FrameCallback = Box<dyn FnMut(f64) + Send + 'static>;

/// Called once after the final frame.
pub type CompleteCallback = Box<dyn FnOnce() + Send + 'static>;

/// Timing parameters for one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Total running time.
    pub duration: Duration,
    /// Time between frames.
    pub frame_interval: Duration,
    /// Time curve.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Linear time fraction after `elapsed`, capped at 1. A zero duration
    /// is complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1200),
            frame_interval: Duration::from_millis(16),
            easing: Easing::EaseInOut,
        }
    }
}

/// Something that can drive animations.
pub trait FrameScheduler {
    /// Start an animation.
    fn start(
        &self,
        spec: AnimationSpec,
        on_frame: FrameCallback,
        on_complete: CompleteCallback,
    ) -> EngineResult<AnimationHandle>;
}

/// Scoped ownership of a running animation.
///
/// Stops the animation in place when cancelled or dropped. Stopping an
/// animation that already finished does nothing.
pub struct AnimationHandle {
    stop: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl AnimationHandle {
    /// Wrap the scheduler-specific stop action.
    pub fn new(stop: impl FnOnce() + Send + 'static) -> Self {
        Self {
            stop: Some(Box::new(stop)),
        }
    }

    /// Stop the animation where it is.
    pub fn cancel(mut self) {
        self.stop_in_place();
    }

    fn stop_in_place(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop_in_place();
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("active", &self.stop.is_some())
            .finish()
    }
}
