//! Sprite asset cache.
//!
//! [`SpriteStore`] owns every GPU texture the session uses and hands out
//! [`SpriteHandle`]s. Requests are keyed by [`SpriteKey`] (path, crop, size,
//! flip) so asking twice for the same scaled tile returns the cached handle
//! instead of decoding the file again. Each handle carries the frame's
//! collision [`Mask`], computed once from the image alpha at load time.
//!
//! This is a non-send resource because raylib textures must be accessed
//! from the main thread only. Pass it to whatever builds sprites; there is no
//! process-wide cache.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::mask::Mask;
use crate::components::sprite::{SpriteHandle, TextureId};

/// Identity of a derived sprite image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    pub path: PathBuf,
    /// Source rectangle `[x, y, w, h]`; whole image when `None`.
    pub crop: Option<[i32; 4]>,
    /// Final size `[w, h]`; source size when `None`.
    pub size: Option<[i32; 2]>,
    pub flip_h: bool,
}

impl SpriteKey {
    /// The whole image at its native size.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            crop: None,
            size: None,
            flip_h: false,
        }
    }

    pub fn cropped(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.crop = Some([x, y, w, h]);
        self
    }

    pub fn scaled(mut self, w: i32, h: i32) -> Self {
        self.size = Some([w, h]);
        self
    }

    pub fn flipped(mut self, flip_h: bool) -> Self {
        self.flip_h = flip_h;
        self
    }
}

/// Non-send registry of loaded textures, keyed by [`SpriteKey`].
pub struct SpriteStore {
    textures: Vec<Texture2D>,
    cache: FxHashMap<SpriteKey, SpriteHandle>,
}

impl Default for SpriteStore {
    fn default() -> Self {
        Self::new()
    }
}

fn path_str(path: &Path) -> Result<&str, String> {
    path.to_str()
        .ok_or_else(|| format!("Asset path is not valid UTF-8: {}", path.display()))
}

fn load_image(path: &Path) -> Result<Image, String> {
    Image::load_image(path_str(path)?)
        .map_err(|e| format!("Failed to load image {}: {}", path.display(), e))
}

/// Apply crop, scale and flip from `key` to a copy of `source`.
fn derive_image(source: &Image, key: &SpriteKey) -> Image {
    let mut image = source.clone();
    if let Some([x, y, w, h]) = key.crop {
        image.crop(Rectangle::new(x as f32, y as f32, w as f32, h as f32));
    }
    if let Some([w, h]) = key.size {
        image.resize_nn(w, h);
    }
    if key.flip_h {
        image.flip_horizontal();
    }
    image
}

fn image_mask(image: &Image) -> Mask {
    let width = image.width().max(0) as u32;
    let height = image.height().max(0) as u32;
    let colors = image.get_image_data();
    Mask::from_alpha(width, height, colors.iter().map(|c| c.a))
}

impl SpriteStore {
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            cache: FxHashMap::default(),
        }
    }

    /// Texture behind a handle, if it has one.
    pub fn texture(&self, id: TextureId) -> Option<&Texture2D> {
        self.textures.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Cached handle for `key`, loading and deriving the image on first use.
    pub fn get_or_load(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: &SpriteKey,
    ) -> Result<SpriteHandle, String> {
        if let Some(handle) = self.cache.get(key) {
            debug!("Sprite cache hit: {:?}", key);
            return Ok(handle.clone());
        }
        let source = load_image(&key.path)?;
        self.upload(rl, th, key, &source)
    }

    /// Like [`get_or_load`](Self::get_or_load) for a whole image scaled to
    /// `size`, trying `preferred` first and then `default`.
    ///
    /// A missing default is the only unrecoverable asset error.
    pub fn load_with_fallback(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        preferred: Option<&Path>,
        default: &Path,
        size: [i32; 2],
    ) -> Result<SpriteHandle, String> {
        if let Some(path) = preferred {
            if path.exists() {
                let key = SpriteKey::new(path).scaled(size[0], size[1]);
                match self.get_or_load(rl, th, &key) {
                    Ok(handle) => return Ok(handle),
                    Err(e) => warn!("{}; falling back to {}", e, default.display()),
                }
            } else {
                debug!(
                    "Asset {} not found, using default {}",
                    path.display(),
                    default.display()
                );
            }
        }
        let key = SpriteKey::new(default).scaled(size[0], size[1]);
        self.get_or_load(rl, th, &key)
            .map_err(|e| format!("Default asset unavailable: {}", e))
    }

    /// Slice every PNG in `dir` into `frame_w`x`frame_h` frames scaled x2.
    ///
    /// Buckets are named after the file stem. When `directional` is set each
    /// file yields `<stem>_right` and a mirrored `<stem>_left`.
    pub fn load_sheet_dir(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        dir: &Path,
        frame_w: i32,
        frame_h: i32,
        directional: bool,
    ) -> Result<FxHashMap<String, Vec<SpriteHandle>>, String> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| format!("Failed to read sprite directory {}: {}", dir.display(), e))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        files.sort();

        let mut buckets = FxHashMap::default();
        for file in files {
            let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let stem = stem.to_string();
            let source = load_image(&file)?;
            let count = if frame_w > 0 { source.width() / frame_w } else { 0 };

            let flips: &[(bool, &str)] = if directional {
                &[(false, "_right"), (true, "_left")]
            } else {
                &[(false, "")]
            };
            for (flip, suffix) in flips {
                let mut frames = Vec::with_capacity(count.max(0) as usize);
                for i in 0..count {
                    let key = SpriteKey::new(&file)
                        .cropped(i * frame_w, 0, frame_w, frame_h)
                        .scaled(frame_w * 2, frame_h * 2)
                        .flipped(*flip);
                    let handle = match self.cache.get(&key) {
                        Some(handle) => handle.clone(),
                        None => self.upload(rl, th, &key, &source)?,
                    };
                    frames.push(handle);
                }
                buckets.insert(format!("{}{}", stem, suffix), frames);
            }
        }
        debug!("Loaded {} buckets from {}", buckets.len(), dir.display());
        Ok(buckets)
    }

    fn upload(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: &SpriteKey,
        source: &Image,
    ) -> Result<SpriteHandle, String> {
        let image = derive_image(source, key);
        let mask = image_mask(&image);
        let texture = rl
            .load_texture_from_image(th, &image)
            .map_err(|e| format!("Failed to upload texture {}: {}", key.path.display(), e))?;
        let id = TextureId(self.textures.len());
        self.textures.push(texture);
        let handle = SpriteHandle {
            texture: Some(id),
            width: mask.width(),
            height: mask.height(),
            mask: Arc::new(mask),
        };
        debug!("Loaded sprite {:?} as {:?}", key, id);
        self.cache.insert(key.clone(), handle.clone());
        Ok(handle)
    }
}
