use crate::foundation::core::SlotIndex;

/// Load state of one sequence position.
#[derive(Clone, Debug, Default)]
pub enum FrameSlot<H> {
    #[default]
    Empty,
    Loading,
    Ready(H),
    /// Fetch or decode failed; never retried.
    Failed,
}

impl<H> FrameSlot<H> {
    pub fn is_issued(&self) -> bool {
        !matches!(self, FrameSlot::Empty)
    }

    pub fn ready(&self) -> Option<&H> {
        match self {
            FrameSlot::Ready(h) => Some(h),
            FrameSlot::Empty | FrameSlot::Loading | FrameSlot::Failed => None,
        }
    }
}

/// What a completion did to the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotTransition {
    Filled,
    Failed,
    /// The slot was not loading (unknown index, duplicate or late completion).
    Ignored,
}

/// Fixed-size table of frame slots, one per sequence position.
#[derive(Clone, Debug)]
pub struct SlotTable<H> {
    slots: Vec<FrameSlot<H>>,
}

impl<H> SlotTable<H> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| FrameSlot::Empty).take(len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, idx: SlotIndex) -> Option<&FrameSlot<H>> {
        self.slots.get(idx.0)
    }

    pub fn ready(&self, idx: SlotIndex) -> Option<&H> {
        self.get(idx).and_then(FrameSlot::ready)
    }

    /// `Empty -> Loading`. Returns false when the slot was already issued or does not exist.
    pub fn mark_loading(&mut self, idx: SlotIndex) -> bool {
        match self.slots.get_mut(idx.0) {
            Some(slot @ FrameSlot::Empty) => {
                *slot = FrameSlot::Loading;
                true
            }
            _ => false,
        }
    }

    /// `Loading -> Ready | Failed`.
    pub fn complete<E>(&mut self, idx: SlotIndex, result: Result<H, E>) -> SlotTransition {
        match self.slots.get_mut(idx.0) {
            Some(slot @ FrameSlot::Loading) => match result {
                Ok(h) => {
                    *slot = FrameSlot::Ready(h);
                    SlotTransition::Filled
                }
                Err(_) => {
                    *slot = FrameSlot::Failed;
                    SlotTransition::Failed
                }
            },
            _ => SlotTransition::Ignored,
        }
    }

    pub fn count_ready(&self) -> usize {
        self.slots.iter().filter(|s| s.ready().is_some()).count()
    }

    pub fn count_issued(&self) -> usize {
        self.slots.iter().filter(|s| s.is_issued()).count()
    }

    /// Drop every decoded handle and return all slots to `Empty`.
    pub fn release(&mut self) {
        for slot in &mut self.slots {
            *slot = FrameSlot::Empty;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/slot.rs"]
mod tests;
