//! Demand-driven, batched frame loading.

use crate::assets::fetch::FetchRequest;
use crate::foundation::core::SlotIndex;
use crate::progress::ScrollGeometry;
use crate::sequence::descriptor::SequenceDescriptor;
use crate::sequence::slot::SlotTable;

/// When frontier loading may begin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadTrigger {
    Immediate,
    /// Wait until the section is within `distance` px of the viewport. Latches once fired.
    WithinDistance { distance: f64, latched: bool },
}

impl LoadTrigger {
    pub fn from_distance(distance: Option<f64>) -> Self {
        match distance {
            Some(distance) => LoadTrigger::WithinDistance {
                distance,
                latched: false,
            },
            None => LoadTrigger::Immediate,
        }
    }

    pub fn is_open(&self) -> bool {
        match self {
            LoadTrigger::Immediate => true,
            LoadTrigger::WithinDistance { latched, .. } => *latched,
        }
    }
}

/// Issues fetches for frames up to a demand frontier ahead of the current frame.
///
/// Slot 0 is primed on mount. After that the frontier only moves forward: each advance issues the
/// slots between the previous frontier and `current + lookahead`, skipping anything already
/// issued. With `max_in_flight` set, issuing pauses at the cap and resumes as completions arrive.
#[derive(Clone, Debug)]
pub struct AssetLoader {
    lookahead: usize,
    max_in_flight: Option<usize>,
    trigger: LoadTrigger,
    /// Highest slot handed to the fetcher.
    frontier: Option<SlotIndex>,
    /// Highest slot demand has asked for.
    target: Option<SlotIndex>,
    in_flight: usize,
}

impl AssetLoader {
    pub fn new(lookahead: usize, max_in_flight: Option<usize>, trigger: LoadTrigger) -> Self {
        Self {
            lookahead,
            max_in_flight,
            trigger,
            frontier: None,
            target: None,
            in_flight: 0,
        }
    }

    pub fn frontier(&self) -> Option<SlotIndex> {
        self.frontier
    }

    pub fn target(&self) -> Option<SlotIndex> {
        self.target
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn trigger(&self) -> LoadTrigger {
        self.trigger
    }

    /// Queue slot 0, regardless of scroll position or trigger.
    pub fn prime<H>(
        &mut self,
        sequence: &SequenceDescriptor,
        slots: &mut SlotTable<H>,
    ) -> Vec<FetchRequest> {
        if self.target.is_none() {
            self.target = Some(SlotIndex(0));
        }
        self.fill(sequence, slots)
    }

    /// Feed the latest scroll geometry to the trigger. Returns true the moment it latches.
    pub fn observe(&mut self, geometry: &ScrollGeometry) -> bool {
        match &mut self.trigger {
            LoadTrigger::Immediate => false,
            LoadTrigger::WithinDistance { distance, latched } => {
                if *latched || !geometry.is_near_viewport(*distance) {
                    return false;
                }
                *latched = true;
                tracing::debug!(distance = *distance, "load trigger latched");
                true
            }
        }
    }

    /// Raise demand to `current + lookahead` and issue what is newly needed.
    #[tracing::instrument(level = "trace", skip_all, fields(current = current.0))]
    pub fn advance<H>(
        &mut self,
        current: SlotIndex,
        sequence: &SequenceDescriptor,
        slots: &mut SlotTable<H>,
    ) -> Vec<FetchRequest> {
        if !self.trigger.is_open() {
            return Vec::new();
        }
        let want = SlotIndex(
            current
                .0
                .saturating_add(self.lookahead)
                .min(sequence.last_slot().0),
        );
        if self.target.is_none_or(|t| want > t) {
            self.target = Some(want);
        }
        self.fill(sequence, slots)
    }

    /// Record one completion and top up to the in-flight cap.
    pub fn complete<H>(
        &mut self,
        sequence: &SequenceDescriptor,
        slots: &mut SlotTable<H>,
    ) -> Vec<FetchRequest> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.fill(sequence, slots)
    }

    /// Whether every demanded slot has been issued and resolved.
    pub fn is_settled(&self) -> bool {
        self.in_flight == 0 && self.frontier >= self.target
    }

    fn fill<H>(
        &mut self,
        sequence: &SequenceDescriptor,
        slots: &mut SlotTable<H>,
    ) -> Vec<FetchRequest> {
        let Some(target) = self.target else {
            return Vec::new();
        };
        let start = self.frontier.map_or(0, |f| f.0 + 1);
        let mut out = Vec::new();
        for i in start..=target.0 {
            if self.max_in_flight.is_some_and(|cap| self.in_flight >= cap) {
                break;
            }
            let slot = SlotIndex(i);
            self.frontier = Some(slot);
            if !slots.mark_loading(slot) {
                continue;
            }
            let (Some(id), Some(url)) = (sequence.id(slot), sequence.url(slot)) else {
                continue;
            };
            self.in_flight += 1;
            out.push(FetchRequest { slot, id, url });
        }
        if !out.is_empty() {
            tracing::debug!(
                first = out[0].slot.0,
                count = out.len(),
                in_flight = self.in_flight,
                "issuing frame batch"
            );
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/unit/loader.rs"]
mod tests;
