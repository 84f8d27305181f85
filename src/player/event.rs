use std::sync::mpsc;

use crate::foundation::core::{SlotIndex, ViewportGeometry};
use crate::foundation::error::ScrollreelError;
use crate::progress::ScrollGeometry;

/// Handle for one scheduled animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Everything that can happen to a player. All state changes flow through these.
#[derive(Debug)]
pub enum PlayerEvent<H> {
    Scroll(ScrollGeometry),
    Resize(ViewportGeometry),
    /// The display is about to refresh; runs the frame scheduled under this id.
    AnimationFrame(FrameRequestId),
    FrameLoaded {
        slot: SlotIndex,
        result: Result<H, ScrollreelError>,
    },
    Unmount,
}

/// Cloneable producer side of a player's event queue.
///
/// Sends never block. They report `false` once the player has been dropped.
#[derive(Debug)]
pub struct EventSender<H> {
    tx: mpsc::Sender<PlayerEvent<H>>,
}

impl<H> Clone for EventSender<H> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<H> EventSender<H> {
    pub(crate) fn new(tx: mpsc::Sender<PlayerEvent<H>>) -> Self {
        Self { tx }
    }

    pub fn send(&self, event: PlayerEvent<H>) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn scroll(&self, geometry: ScrollGeometry) -> bool {
        self.send(PlayerEvent::Scroll(geometry))
    }

    pub fn resize(&self, viewport: ViewportGeometry) -> bool {
        self.send(PlayerEvent::Resize(viewport))
    }

    pub fn animation_frame(&self, id: FrameRequestId) -> bool {
        self.send(PlayerEvent::AnimationFrame(id))
    }

    pub fn frame_loaded(&self, slot: SlotIndex, result: Result<H, ScrollreelError>) -> bool {
        self.send(PlayerEvent::FrameLoaded { slot, result })
    }

    pub fn unmount(&self) -> bool {
        self.send(PlayerEvent::Unmount)
    }
}
