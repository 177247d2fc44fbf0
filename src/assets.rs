// Turns an ImageId into the pixels shown under a cell's mask, at the cell's size.
// With an asset directory, `check.png` / `blank.png` are decoded and scaled;
// otherwise the two pictures are drawn procedurally.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::mask::distance_sq_to_segment;
use crate::types::{FrameBuffer, ImageId, Position};

const PAPER: Rgba<u8> = Rgba([0xF5, 0xF5, 0xF5, 0xFF]);
const CHECK_GREEN: Rgba<u8> = Rgba([0x2E, 0x9E, 0x4F, 0xFF]);

/// Draw `id` at `width` x `height`.
pub fn procedural(id: ImageId, width: u32, height: u32) -> RgbaImage {
    match id {
        ImageId::Blank => RgbaImage::from_pixel(width, height, PAPER),
        ImageId::Check => {
            let (w, h) = (width as f32, height as f32);
            let points = [
                Position::new(0.22 * w, 0.52 * h),
                Position::new(0.42 * w, 0.72 * h),
                Position::new(0.80 * w, 0.30 * h),
            ];
            let half = 0.05 * w.min(h);
            let half2 = half * half;

            RgbaImage::from_fn(width, height, |x, y| {
                let p = Position::new(x as f32 + 0.5, y as f32 + 0.5);
                let on_check = points
                    .windows(2)
                    .any(|seg| distance_sq_to_segment(p, seg[0], seg[1]) <= half2);
                if on_check { CHECK_GREEN } else { PAPER }
            })
        }
    }
}

/// Decode `<dir>/<stem>.png` and scale it to `width` x `height`.
pub fn load(dir: &Path, id: ImageId, width: u32, height: u32) -> Result<RgbaImage> {
    let path = dir.join(format!("{}.png", id.file_stem()));
    let decoded = image::open(&path)
        .map_err(|e| Error::AssetLoad(format!("{}: {e}", path.display())))?
        .to_rgba8();
    if decoded.dimensions() == (width, height) {
        return Ok(decoded);
    }
    Ok(imageops::resize(&decoded, width, height, FilterType::Triangle))
}

/// Flatten onto the paper color and pack as 0x00RRGGBB for the window.
pub fn to_frame_buffer(img: &RgbaImage) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize));
    for (_x, _y, pixel) in img.enumerate_pixels() {
        let a = pixel[3] as u32;
        let mix = |c: u8, bg: u8| (c as u32 * a + bg as u32 * (255 - a) + 127) / 255;
        let r = mix(pixel[0], PAPER[0]);
        let g = mix(pixel[1], PAPER[1]);
        let b = mix(pixel[2], PAPER[2]);
        out.push((r << 16) | (g << 8) | b);
    }
    FrameBuffer { width: w as usize, height: h as usize, pixels: out }
}

/// Hands out cell images, decoding/drawing each (id, size) only once.
pub struct ImageStore {
    dir: Option<PathBuf>,
    cache: HashMap<(ImageId, u32, u32), FrameBuffer>,
}

impl ImageStore {
    /// `dir = None` draws the pictures instead of loading files.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir, cache: HashMap::new() }
    }

    pub fn get(&mut self, id: ImageId, width: u32, height: u32) -> Result<&FrameBuffer> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width: width as i64, height: height as i64 });
        }
        let key = (id, width, height);
        if !self.cache.contains_key(&key) {
            let img = match &self.dir {
                Some(dir) => load(dir, id, width, height)?,
                None => procedural(id, width, height),
            };
            log::debug!("image {id:?} ready at {width}x{height}");
            self.cache.insert(key, to_frame_buffer(&img));
        }
        self.cache
            .get(&key)
            .ok_or_else(|| Error::AssetLoad(format!("{id:?} missing from cache")))
    }
}
