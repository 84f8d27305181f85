//! Player tuning and JSON sequence configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{FrameId, VerticalBias};
use crate::foundation::error::{ScrollreelError, ScrollreelResult};
use crate::sequence::descriptor::{IdRange, SequenceDescriptor, UrlTemplate};

/// Per-player tuning knobs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Frames requested ahead of the current scroll frame.
    pub lookahead: usize,
    /// Cap on concurrently outstanding fetches; `None` issues each batch in full.
    pub max_in_flight: Option<usize>,
    /// Hold back frontier loading until the section is this close (px) to the viewport.
    pub trigger_distance: Option<f64>,
    /// Vertical alignment on mobile viewports.
    pub vertical_bias: VerticalBias,
    /// Viewports narrower than this (CSS px) count as mobile.
    pub mobile_breakpoint: f64,
    pub max_dpr: f64,
    /// Render at device pixel ratio 1 on mobile viewports.
    pub mobile_unit_dpr: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::full_page()
    }
}

impl PlayerConfig {
    /// Page-spanning background: loads on mount, bottom-aligned on phones.
    pub fn full_page() -> Self {
        Self {
            lookahead: 15,
            max_in_flight: None,
            trigger_distance: None,
            vertical_bias: VerticalBias::Bottom,
            mobile_breakpoint: 768.0,
            max_dpr: 2.0,
            mobile_unit_dpr: false,
        }
    }

    /// Section-scoped sequence: waits until within 500px of the viewport, then requests every
    /// frame at once.
    pub fn section() -> Self {
        Self {
            lookahead: usize::MAX,
            trigger_distance: Some(500.0),
            vertical_bias: VerticalBias::Center,
            mobile_unit_dpr: true,
            ..Self::full_page()
        }
    }

    pub fn validate(&self) -> ScrollreelResult<()> {
        if !(self.max_dpr.is_finite() && self.max_dpr > 0.0) {
            return Err(ScrollreelError::validation("max_dpr must be finite and > 0"));
        }
        if !(self.mobile_breakpoint.is_finite() && self.mobile_breakpoint >= 0.0) {
            return Err(ScrollreelError::validation(
                "mobile_breakpoint must be finite and >= 0",
            ));
        }
        if let Some(d) = self.trigger_distance
            && !d.is_finite()
        {
            return Err(ScrollreelError::validation("trigger_distance must be finite"));
        }
        if self.max_in_flight == Some(0) {
            return Err(ScrollreelError::validation("max_in_flight must be > 0"));
        }
        Ok(())
    }
}

/// JSON form of a [`SequenceDescriptor`]: explicit `ids` or inclusive `ranges`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceSpec {
    pub template: String,
    pub pad: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<IdRange>,
}

impl SequenceSpec {
    pub fn build(&self) -> ScrollreelResult<SequenceDescriptor> {
        let mut template = UrlTemplate::new(self.template.clone(), self.pad)?;
        if let Some(q) = &self.query {
            template = template.with_query(q.clone());
        }
        match (self.ids.is_empty(), self.ranges.is_empty()) {
            (false, true) => {
                SequenceDescriptor::new(self.ids.iter().copied().map(FrameId).collect(), template)
            }
            (true, false) => SequenceDescriptor::from_ranges(&self.ranges, template),
            (false, false) => Err(ScrollreelError::validation(
                "sequence must set either 'ids' or 'ranges', not both",
            )),
            (true, true) => Err(ScrollreelError::validation(
                "sequence must set 'ids' or 'ranges'",
            )),
        }
    }
}

/// A sequence plus the player settings it should run with.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceConfig {
    pub sequence: SequenceSpec,
    #[serde(default)]
    pub player: PlayerConfig,
}

impl SequenceConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollreelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollreelError::serde(format!("parse sequence config JSON: {e}")))?;
        cfg.player.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ScrollreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollreelError::validation(format!("open sequence config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> ScrollreelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScrollreelError::serde(format!("serialize sequence config: {e}")))
    }

    /// 192-frame full-page background sequence.
    pub fn mountain() -> Self {
        Self {
            sequence: SequenceSpec {
                template: "/images/sequence/{}.webp".to_string(),
                pad: 5,
                query: Some("?v=hd-q80".to_string()),
                ids: Vec::new(),
                ranges: vec![IdRange::new(1, 192)],
            },
            player: PlayerConfig::full_page(),
        }
    }

    /// 152-frame portrait sequence with gaps where frames were cut.
    pub fn founder() -> Self {
        Self {
            sequence: SequenceSpec {
                template: "/images/pussinboots/ezgif-frame-{}.webp".to_string(),
                pad: 3,
                query: None,
                ids: Vec::new(),
                ranges: vec![
                    IdRange::new(1, 110),
                    IdRange::new(142, 149),
                    IdRange::new(207, 240),
                ],
            },
            player: PlayerConfig::section(),
        }
    }
}
