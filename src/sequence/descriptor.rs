use crate::foundation::core::{FrameId, SlotIndex};
use crate::foundation::error::{ScrollreelError, ScrollreelResult};

const PLACEHOLDER: &str = "{}";

/// Asset path pattern with a single `{}` placeholder for the zero-padded frame id.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UrlTemplate {
    pattern: String,
    pad: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    query: Option<String>,
}

impl UrlTemplate {
    /// Build a template; `pattern` must contain exactly one `{}`.
    pub fn new(pattern: impl Into<String>, pad: usize) -> ScrollreelResult<Self> {
        let out = Self {
            pattern: pattern.into(),
            pad,
            query: None,
        };
        out.validate()?;
        Ok(out)
    }

    /// Append a fixed query string (e.g. a cache-busting `?v=...`) to every resolved path.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let q = query.into();
        self.query = if q.is_empty() { None } else { Some(q) };
        self
    }

    pub fn validate(&self) -> ScrollreelResult<()> {
        let count = self.pattern.matches(PLACEHOLDER).count();
        if count != 1 {
            return Err(ScrollreelError::sequence(format!(
                "url template '{}' must contain exactly one '{PLACEHOLDER}', found {count}",
                self.pattern
            )));
        }
        Ok(())
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Substitute the zero-padded id into the pattern.
    pub fn resolve(&self, id: FrameId) -> String {
        let (head, tail) = self
            .pattern
            .split_once(PLACEHOLDER)
            .unwrap_or((self.pattern.as_str(), ""));
        let query = self.query.as_deref().unwrap_or("");
        format!("{head}{:0width$}{tail}{query}", id.0, width = self.pad)
    }

    /// Resolved path without the query suffix, for filesystem lookups.
    pub fn resolve_path(&self, id: FrameId) -> String {
        let url = self.resolve(id);
        match url.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => url,
        }
    }
}

/// Inclusive range of frame ids that exist on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdRange {
    pub first: u32,
    pub last: u32,
}

impl IdRange {
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }
}

/// Ordered list of frame ids plus the template that turns them into asset paths.
///
/// Ids are strictly increasing but need not be contiguous; slot `i` always maps to the `i`-th id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceDescriptor {
    ids: Vec<FrameId>,
    template: UrlTemplate,
}

impl SequenceDescriptor {
    pub fn new(ids: Vec<FrameId>, template: UrlTemplate) -> ScrollreelResult<Self> {
        template.validate()?;
        if ids.is_empty() {
            return Err(ScrollreelError::sequence("sequence must contain at least one frame"));
        }
        if let Some(w) = ids.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ScrollreelError::sequence(format!(
                "frame ids must be strictly increasing ({} followed by {})",
                w[0].0, w[1].0
            )));
        }
        Ok(Self { ids, template })
    }

    /// Build from contiguous ids `first..=first + count - 1`.
    pub fn contiguous(first: u32, count: u32, template: UrlTemplate) -> ScrollreelResult<Self> {
        if count == 0 {
            return Err(ScrollreelError::sequence("sequence must contain at least one frame"));
        }
        let last = first
            .checked_add(count - 1)
            .ok_or_else(|| ScrollreelError::sequence("frame id range overflows u32"))?;
        Self::from_ranges(&[IdRange::new(first, last)], template)
    }

    /// Concatenate inclusive id ranges in the order given.
    pub fn from_ranges(ranges: &[IdRange], template: UrlTemplate) -> ScrollreelResult<Self> {
        let mut ids = Vec::new();
        for r in ranges {
            if r.first > r.last {
                return Err(ScrollreelError::sequence(format!(
                    "id range {}..={} is reversed",
                    r.first, r.last
                )));
            }
            ids.extend((r.first..=r.last).map(FrameId));
        }
        Self::new(ids, template)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn last_slot(&self) -> SlotIndex {
        SlotIndex(self.ids.len() - 1)
    }

    pub fn ids(&self) -> &[FrameId] {
        &self.ids
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    pub fn id(&self, slot: SlotIndex) -> Option<FrameId> {
        self.ids.get(slot.0).copied()
    }

    pub fn url(&self, slot: SlotIndex) -> Option<String> {
        self.id(slot).map(|id| self.template.resolve(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/descriptor.rs"]
mod tests;
