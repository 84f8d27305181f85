use std::collections::VecDeque;

use crate::player::event::FrameRequestId;

/// Display-refresh scheduler, the `requestAnimationFrame` half of the host.
///
/// After `request_animation_frame` the host delivers
/// [`crate::PlayerEvent::AnimationFrame`] with the returned id on the next refresh, unless the
/// id was cancelled first.
pub trait FrameClock {
    fn request_animation_frame(&mut self) -> FrameRequestId;

    fn cancel_animation_frame(&mut self, id: FrameRequestId);
}

/// Clock driven by explicit calls, for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    next: u64,
    pending: VecDeque<FrameRequestId>,
    requested: u64,
    cancelled: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest scheduled, uncancelled request.
    pub fn take_due(&mut self) -> Option<FrameRequestId> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameClock for ManualClock {
    fn request_animation_frame(&mut self) -> FrameRequestId {
        self.next += 1;
        self.requested += 1;
        let id = FrameRequestId(self.next);
        self.pending.push_back(id);
        id
    }

    fn cancel_animation_frame(&mut self, id: FrameRequestId) {
        let before = self.pending.len();
        self.pending.retain(|p| *p != id);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}
