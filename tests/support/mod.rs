#![allow(dead_code)]

use scrollreel::{
    EventSender, FetchRequest, FrameFetcher, FrameImage, ManualClock, PlayerConfig, PlayerEvent,
    RasterSurface, ScrollGeometry, ScrollPlayer, ScrollreelError, SequenceDescriptor, Size,
    SlotIndex, UrlTemplate, ViewportGeometry,
};

pub type TestPlayer = ScrollPlayer<RecordingFetcher, RasterSurface, ManualClock>;

pub const VIEWPORT_HEIGHT: f64 = 1000.0;

/// Records requests; tests resolve them explicitly through the player.
#[derive(Default)]
pub struct RecordingFetcher {
    pub issued: Vec<FetchRequest>,
}

impl RecordingFetcher {
    pub fn slots(&self) -> Vec<usize> {
        self.issued.iter().map(|r| r.slot.0).collect()
    }
}

impl FrameFetcher for RecordingFetcher {
    type Image = FrameImage;

    fn fetch(&mut self, request: FetchRequest, _reply: EventSender<FrameImage>) {
        self.issued.push(request);
    }
}

pub fn seq(n: u32) -> SequenceDescriptor {
    SequenceDescriptor::contiguous(1, n, UrlTemplate::new("/images/sequence/{}.webp", 5).unwrap())
        .unwrap()
}

/// Opaque colour unique to a slot.
pub fn color(slot: usize) -> [u8; 4] {
    [(slot * 7 % 256) as u8, (slot * 13 % 256) as u8, 200, 255]
}

pub fn frame(slot: usize) -> FrameImage {
    FrameImage::solid(4, 2, color(slot)).unwrap()
}

pub fn desktop() -> ViewportGeometry {
    ViewportGeometry::new(Size::new(16.0, 16.0), 1280.0, 1.0)
}

/// Full-document geometry where `scroll_top == 10 * slot` lands exactly on `slot`.
pub fn doc_at_slot(slot: usize, n: usize) -> ScrollGeometry {
    let range = 10.0 * (n as f64 - 1.0);
    ScrollGeometry::FullDocument {
        scroll_top: 10.0 * slot as f64,
        scroll_height: range + VIEWPORT_HEIGHT,
        viewport_height: VIEWPORT_HEIGHT,
    }
}

pub fn player(n: u32, config: PlayerConfig) -> TestPlayer {
    let mut p = ScrollPlayer::new(
        seq(n),
        config,
        RecordingFetcher::default(),
        RasterSurface::new(),
        ManualClock::new(),
    )
    .unwrap();
    p.handle(PlayerEvent::Resize(desktop()));
    p
}

pub fn load(p: &mut TestPlayer, slot: usize) {
    p.handle(PlayerEvent::FrameLoaded {
        slot: SlotIndex(slot),
        result: Ok(frame(slot)),
    });
}

pub fn fail(p: &mut TestPlayer, slot: usize) {
    p.handle(PlayerEvent::FrameLoaded {
        slot: SlotIndex(slot),
        result: Err(ScrollreelError::decode("404")),
    });
}

pub fn scroll_to(p: &mut TestPlayer, slot: usize) {
    let n = p.sequence().len();
    p.handle(PlayerEvent::Scroll(doc_at_slot(slot, n)));
}

/// Mount, resolve frame 0 and run the first active frame.
pub fn mounted_active(n: u32, config: PlayerConfig) -> TestPlayer {
    let mut p = player(n, config);
    p.mount();
    p.tick();
    load(&mut p, 0);
    p.tick();
    p
}

pub fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "scrollreel_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub fn write_png(path: &std::path::Path, w: u32, h: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}
