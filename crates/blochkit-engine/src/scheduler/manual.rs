//! Explicitly advanced tick-loop scheduler.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::trace;

use super::{AnimationHandle, AnimationSpec, CompleteCallback, FrameCallback, FrameScheduler};
use crate::error::EngineResult;

struct Running {
    id: u64,
    spec: AnimationSpec,
    elapsed: Duration,
    on_frame: FrameCallback,
    on_complete: Option<CompleteCallback>,
}

#[derive(Default)]
struct Queue {
    next_id: u64,
    running: Vec<Running>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Nothing happens between calls to `advance`; frames are only delivered
/// from the thread that advances the clock. Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Queue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move the clock forward by `dt`, delivering one frame to every
    /// running animation. Returns how many animations completed.
    pub fn advance(&self, dt: Duration) -> usize {
        let mut queue = self.lock();
        let mut completed = 0;
        queue.running.retain_mut(|anim| {
            anim.elapsed += dt;
            let t = anim.spec.progress(anim.elapsed);
            (anim.on_frame)(anim.spec.easing.apply(t));
            if t < 1.0 {
                return true;
            }
            if let Some(on_complete) = anim.on_complete.take() {
                on_complete();
            }
            trace!(id = anim.id, "manual animation complete");
            completed += 1;
            false
        });
        completed
    }

    /// Advance one frame interval of the oldest running animation.
    pub fn step(&self) -> usize {
        let dt = self.lock().running.first().map(|a| a.spec.frame_interval);
        dt.map_or(0, |dt| self.advance(dt))
    }

    /// Advance until every running animation has completed.
    pub fn run_until_idle(&self) -> usize {
        let remaining = self
            .lock()
            .running
            .iter()
            .map(|a| a.spec.duration.saturating_sub(a.elapsed))
            .max();
        remaining.map_or(0, |dt| self.advance(dt))
    }

    /// Number of animations still running.
    pub fn pending(&self) -> usize {
        self.lock().running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(
        &self,
        spec: AnimationSpec,
        on_frame: FrameCallback,
        on_complete: CompleteCallback,
    ) -> EngineResult<AnimationHandle> {
        let id = {
            let mut queue = self.lock();
            let id = queue.next_id;
            queue.next_id += 1;
            queue.running.push(Running {
                id,
                spec,
                elapsed: Duration::ZERO,
                on_frame,
                on_complete: Some(on_complete),
            });
            id
        };

        let queue = Arc::clone(&self.queue);
        Ok(AnimationHandle::new(move || {
            let mut queue = queue.lock().unwrap_or_else(PoisonError::into_inner);
            queue.running.retain(|anim| anim.id != id);
        }))
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
