use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::assets::decode::decode_image;
use crate::foundation::color::Color;
use crate::foundation::core::Rect;
use crate::foundation::error::{PlanvizError, PlanvizResult};
use crate::render::surface::Surface;

/// The named raster assets strategies can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Gripper robot body.
    Robot,
    /// Depot truck.
    Truck,
    /// Depot package.
    Package,
    /// Rover.
    Rover,
    /// Rover camera-flash icon.
    Camera,
}

impl AssetKind {
    /// Every kind, in a fixed order.
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Robot,
        AssetKind::Truck,
        AssetKind::Package,
        AssetKind::Rover,
        AssetKind::Camera,
    ];

    /// File name looked up inside the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::Robot => "robot.png",
            AssetKind::Truck => "truck.png",
            AssetKind::Package => "package.png",
            AssetKind::Rover => "rover.png",
            AssetKind::Camera => "camera.png",
        }
    }

    /// Solid colour drawn in place of the image until it has loaded.
    pub fn placeholder(self) -> Color {
        match self {
            AssetKind::Robot => Color::rgb(0x60, 0x7d, 0x8b),
            AssetKind::Truck => Color::rgb(0x00, 0xbf, 0xff),
            AssetKind::Package => Color::rgb(0xff, 0xd7, 0x00),
            AssetKind::Rover => Color::rgb(0x8d, 0x6e, 0x63),
            AssetKind::Camera => Color::rgb(0xff, 0xf5, 0x9d),
        }
    }
}

/// A loaded image, by reference. Surfaces decide how to fetch the pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    /// Which asset.
    pub kind: AssetKind,
    /// Absolute file path.
    pub path: PathBuf,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

#[derive(Debug, Default)]
struct AssetSlot {
    loaded: AtomicBool,
    image: OnceLock<ImageRef>,
}

impl AssetSlot {
    fn get(&self) -> Option<&ImageRef> {
        if self.loaded.load(Ordering::Acquire) {
            self.image.get()
        } else {
            None
        }
    }

    fn fill(&self, image: ImageRef) {
        // A slot is written at most once; later loads of the same kind are dropped.
        if self.image.set(image).is_ok() {
            self.loaded.store(true, Ordering::Release);
        }
    }
}

/// Fixed set of image slots, each flipped to "loaded" once its file decodes.
///
/// Reads never block: [`AssetManager::image`] returns `None` until the slot is filled, and
/// [`draw_asset`] substitutes the placeholder colour in that case. Loading happens either on a
/// background thread ([`AssetManager::spawn_loader`]) or inline ([`AssetManager::load_blocking`]).
#[derive(Clone, Debug)]
pub struct AssetManager {
    root: Option<PathBuf>,
    slots: BTreeMap<AssetKind, Arc<AssetSlot>>,
}

impl AssetManager {
    /// Manager reading from `root`. Nothing is loaded until a load method is called.
    pub fn new(root: Option<PathBuf>) -> Self {
        let slots = AssetKind::ALL
            .iter()
            .map(|k| (*k, Arc::new(AssetSlot::default())))
            .collect();
        Self { root, slots }
    }

    /// Manager with no asset directory; every image-backed element draws its placeholder.
    pub fn placeholders_only() -> Self {
        Self::new(None)
    }

    /// Asset directory, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Whether `kind` has finished loading.
    pub fn is_loaded(&self, kind: AssetKind) -> bool {
        self.slots
            .get(&kind)
            .is_some_and(|s| s.loaded.load(Ordering::Acquire))
    }

    /// The loaded image for `kind`, or `None` while it is still pending or failed.
    pub fn image(&self, kind: AssetKind) -> Option<&ImageRef> {
        self.slots.get(&kind).and_then(|s| s.get())
    }

    /// Fill a slot from an already-decoded image.
    pub fn insert(&self, image: ImageRef) {
        if let Some(slot) = self.slots.get(&image.kind) {
            slot.fill(image);
        }
    }

    /// Load every asset on the calling thread. Returns how many slots are loaded afterwards.
    ///
    /// Missing or undecodable files are logged and leave their slot on the placeholder.
    #[tracing::instrument(skip(self), fields(root = ?self.root))]
    pub fn load_blocking(&self) -> usize {
        if let Some(root) = &self.root {
            load_all(root, &self.slots);
        }
        AssetKind::ALL.iter().filter(|k| self.is_loaded(**k)).count()
    }

    /// Load every asset on a background thread. Frames rendered meanwhile use placeholders.
    pub fn spawn_loader(&self) -> JoinHandle<usize> {
        let root = self.root.clone();
        let slots = self.slots.clone();
        std::thread::spawn(move || {
            if let Some(root) = &root {
                load_all(root, &slots);
            }
            slots
                .values()
                .filter(|s| s.loaded.load(Ordering::Acquire))
                .count()
        })
    }
}

fn load_all(root: &Path, slots: &BTreeMap<AssetKind, Arc<AssetSlot>>) {
    for (kind, slot) in slots {
        if slot.loaded.load(Ordering::Acquire) {
            continue;
        }
        match load_one(root, *kind) {
            Ok(image) => {
                tracing::debug!(kind = ?kind, path = %image.path.display(), "asset loaded");
                slot.fill(image);
            }
            Err(err) => tracing::warn!(kind = ?kind, %err, "asset unavailable, using placeholder"),
        }
    }
}

fn load_one(root: &Path, kind: AssetKind) -> PlanvizResult<ImageRef> {
    let path = root.join(kind.file_name());
    if !path.is_file() {
        return Err(PlanvizError::asset(format!("missing '{}'", path.display())));
    }
    let bytes = std::fs::read(&path)
        .with_context(|| format!("read asset bytes from '{}'", path.display()))?;
    let info = decode_image(&bytes)?;
    let path = std::fs::canonicalize(&path)
        .with_context(|| format!("canonicalize '{}'", path.display()))?;
    Ok(ImageRef {
        kind,
        path,
        width: info.width,
        height: info.height,
    })
}

/// Draw `kind` into `rect`, or a solid placeholder of the same bounds when it is not loaded.
pub fn draw_asset(surface: &mut dyn Surface, assets: &AssetManager, kind: AssetKind, rect: Rect) {
    match assets.image(kind) {
        Some(image) => surface.draw_image(image, rect),
        None => surface.fill_rect(rect, kind.placeholder()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
