use std::path::{Component, Path, PathBuf};

use crate::assets::decode::{FrameImage, load_frame_file};
use crate::foundation::core::{FrameId, SlotIndex};
use crate::foundation::error::{ScrollreelError, ScrollreelResult};
use crate::player::event::EventSender;
use crate::render::surface::FrameHandle;

/// One frame the loader wants fetched.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FetchRequest {
    pub slot: SlotIndex,
    pub id: FrameId,
    /// Resolved asset URL, query suffix included.
    pub url: String,
}

/// Host-side image pipeline.
///
/// `fetch` must not block: it starts the load and later reports exactly one
/// [`crate::PlayerEvent::FrameLoaded`] for `request.slot` through `reply`. Reports for a player
/// that has gone away are dropped silently.
pub trait FrameFetcher {
    type Image: FrameHandle + Send + 'static;

    fn fetch(&mut self, request: FetchRequest, reply: EventSender<Self::Image>);
}

/// Loads frames from a directory, decoding on the rayon global pool.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an asset URL onto a file under `root`. Query strings are dropped; parent
    /// components are rejected.
    pub fn resolve(&self, url: &str) -> ScrollreelResult<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or("");
        let rel = Path::new(path.trim_start_matches('/'));
        let mut out = self.root.clone();
        for c in rel.components() {
            match c {
                Component::Normal(part) => out.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ScrollreelError::validation(format!(
                        "frame url '{url}' escapes the asset root"
                    )));
                }
            }
        }
        Ok(out)
    }
}

impl FrameFetcher for FsFetcher {
    type Image = FrameImage;

    #[tracing::instrument(skip(self, reply), fields(slot = request.slot.0))]
    fn fetch(&mut self, request: FetchRequest, reply: EventSender<FrameImage>) {
        let slot = request.slot;
        let path = match self.resolve(&request.url) {
            Ok(p) => p,
            Err(e) => {
                reply.frame_loaded(slot, Err(e));
                return;
            }
        };
        rayon::spawn(move || {
            let result = load_frame_file(&path);
            if let Err(e) = &result {
                tracing::debug!(slot = slot.0, error = %e, "frame load failed");
            }
            reply.frame_loaded(slot, result);
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
