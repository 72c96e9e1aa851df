//! Timer-driven scheduler on the tokio runtime.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use super::{AnimationHandle, AnimationSpec, CompleteCallback, FrameCallback, FrameScheduler};
use crate::error::{EngineError, EngineResult};

/// Spawns one task per animation that ticks on a `tokio::time::interval`.
///
/// Cancelling the handle aborts the task. Must be started from within a
/// tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    handle: Option<Handle>,
}

impl TokioScheduler {
    /// Use whichever runtime is current when an animation starts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always spawn on `handle`.
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    fn runtime(&self) -> EngineResult<Handle> {
        match &self.handle {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current().map_err(|_| EngineError::NoRuntime),
        }
    }
}

impl FrameScheduler for TokioScheduler {
    fn start(
        &self,
        spec: AnimationSpec,
        mut on_frame: FrameCallback,
        on_complete: CompleteCallback,
    ) -> EngineResult<AnimationHandle> {
        let runtime = self.runtime()?;
        // tokio panics on a zero interval period.
        let period = spec.frame_interval.max(Duration::from_millis(1));

        let task = runtime.spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let t = spec.progress(started.elapsed());
                on_frame(spec.easing.apply(t));
                if t >= 1.0 {
                    break;
                }
            }
            on_complete();
            trace!("timer animation complete");
        });

        Ok(AnimationHandle::new(move || task.abort()))
    }
}
