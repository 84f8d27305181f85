//! scrollreel plays an image sequence in step with scrolling.
//!
//! A page scrolls; a canvas shows the frame of a pre-rendered sequence that matches how far the
//! reader has scrolled. scrollreel is the host-agnostic core of that effect:
//!
//! 1. **Map**: scroll geometry to progress in `[0, 1]` to a frame slot ([`ScrollGeometry`],
//!    [`frame_for_progress`]).
//! 2. **Load**: fetch frames lazily, a bounded batch ahead of the reader ([`AssetLoader`]),
//!    through a host-supplied [`FrameFetcher`].
//! 3. **Render**: draw the best available frame with cover-fit scaling, falling back to the last
//!    real frame while the requested one is still in flight ([`FrameRenderer`], [`Surface`]).
//! 4. **Coordinate**: a single-threaded, message-driven [`ScrollPlayer`] coalesces scroll and
//!    resize events into at most one render per animation frame ([`FrameClock`]).
//!
//! Playback never fails at runtime. A frame that cannot be fetched is skipped for good, a
//! surface without geometry defers rendering, and degenerate scroll ranges clamp. Errors
//! ([`ScrollreelError`]) only come from building descriptors, parsing configuration and IO.
//!
//! The crate ships a CPU [`RasterSurface`], a filesystem [`FsFetcher`] and a [`ManualClock`],
//! which together make a complete headless host (used by the `scrollreel` binary).
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;
mod loader;
mod player;
mod progress;
mod render;
mod reporter;
mod sequence;

pub use assets::decode::{FrameImage, decode_frame_image, load_frame_file};
pub use assets::fetch::{FetchRequest, FrameFetcher, FsFetcher};
pub use config::{PlayerConfig, SequenceConfig, SequenceSpec};
pub use foundation::core::{
    CanvasSize, FrameId, Rect, Size, SlotIndex, VerticalBias, ViewportGeometry,
};
pub use foundation::error::{ScrollreelError, ScrollreelResult};
pub use loader::{AssetLoader, LoadTrigger};
pub use player::clock::{FrameClock, ManualClock};
pub use player::coordinator::{PlayerState, PlayerStats, ScrollPlayer};
pub use player::event::{EventSender, FrameRequestId, PlayerEvent};
pub use progress::{ScrollGeometry, frame_for_progress};
pub use render::renderer::{FrameRenderer, RenderOutcome, cover_fit};
pub use render::surface::{FrameHandle, RasterSurface, Surface};
pub use reporter::{LoadingContext, ProgressHandle, ProgressReporter};
pub use sequence::descriptor::{IdRange, SequenceDescriptor, UrlTemplate};
pub use sequence::slot::{FrameSlot, SlotTable, SlotTransition};
