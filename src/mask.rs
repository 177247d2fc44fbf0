// The opaque scratch layer that sits on top of one cell.
// Pixels start as a fully opaque gray gradient; strokes only ever lower alpha.
// The only way back to opaque is building a fresh layer.

use crate::error::{Error, Result};
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, Position};

/// Gradient stops, 0xAARRGGBB.
pub const DARK_GRAY: u32 = 0xFF44_4444;
pub const GRAY: u32 = 0xFF88_8888;

const ALPHA_SHIFT: u32 = 24;

#[inline]
fn alpha_of(px: u32) -> u8 {
    (px >> ALPHA_SHIFT) as u8
}

#[inline]
fn lerp_channel(a: u32, b: u32, shift: u32, t: f32) -> u32 {
    let ca = ((a >> shift) & 0xFF) as f32;
    let cb = ((b >> shift) & 0xFF) as f32;
    ((ca + (cb - ca) * t).round().clamp(0.0, 255.0) as u32) << shift
}

/// Three-stop diagonal gradient: dark gray at (0,0), gray halfway, dark gray at (w,h).
fn gradient_color(t: f32) -> u32 {
    let (from, to, local) = if t <= 0.5 {
        (DARK_GRAY, GRAY, t / 0.5)
    } else {
        (GRAY, DARK_GRAY, (t - 0.5) / 0.5)
    };
    0xFF00_0000
        | lerp_channel(from, to, 16, local)
        | lerp_channel(from, to, 8, local)
        | lerp_channel(from, to, 0, local)
}

/// Shortest distance from `p` to the segment `a`..`b` (squared).
/// A zero-length segment degrades to the distance to `a`.
pub(crate) fn distance_sq_to_segment(p: Position, a: Position, b: Position) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    if len2 <= f32::EPSILON {
        return p.distance_sq(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0);
    p.distance_sq(Position::new(a.x + t * abx, a.y + t * aby))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskLayer {
    width: usize,
    height: usize,
    pixels: Vec<u32>, // 0xAARRGGBB, row-major
}

impl MaskLayer {
    /// Allocate a `width` x `height` layer filled with the opaque gradient.
    /// Zero or negative sizes are refused with `Error::InvalidDimensions`.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width: width as i64, height: height as i64 });
        }
        let (w, h) = (width as usize, height as usize);

        // Project every pixel center onto the (0,0)->(w,h) diagonal.
        let (fw, fh) = (w as f32, h as f32);
        let len2 = fw * fw + fh * fh;
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            let py = y as f32 + 0.5;
            for x in 0..w {
                let px = x as f32 + 0.5;
                let t = ((px * fw + py * fh) / len2).clamp(0.0, 1.0);
                pixels.push(gradient_color(t));
            }
        }

        Ok(Self { width: w, height: h, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw 0xAARRGGBB pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> Option<u8> {
        self.pixel(x, y).map(alpha_of)
    }

    /// Clear a round-capped stroke of `radius` from `from` to `to`.
    ///
    /// Pixels whose center lies within `radius` of the segment become fully
    /// transparent; a one pixel band at the rim is feathered. A pixel's alpha
    /// is only ever lowered, so repeating a stroke changes nothing and
    /// consecutive segments join without gaps (each end is a full disc).
    /// Anything outside the layer is clipped.
    ///
    /// Returns how many pixels changed.
    pub fn erase_segment(&mut self, from: Position, to: Position, radius: f32) -> usize {
        if !(radius > 0.0 && radius.is_finite()) {
            return 0;
        }
        if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
            return 0;
        }

        // Bounding box of the capsule (+1 for the feathered rim), clamped to the layer.
        let reach = radius + 1.0;
        let x0 = (from.x.min(to.x) - reach).floor().clamp(0.0, self.width as f32) as usize;
        let x1 = (from.x.max(to.x) + reach).ceil().clamp(0.0, self.width as f32) as usize;
        let y0 = (from.y.min(to.y) - reach).floor().clamp(0.0, self.height as f32) as usize;
        let y1 = (from.y.max(to.y) + reach).ceil().clamp(0.0, self.height as f32) as usize;

        let mut changed = 0;
        for y in y0..y1 {
            let row = y * self.width;
            for x in x0..x1 {
                let center = Position::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = distance_sq_to_segment(center, from, to).sqrt();
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }

                let target = ((1.0 - coverage) * 255.0).round() as u8;
                let px = &mut self.pixels[row + x];
                if target >= alpha_of(*px) {
                    continue;
                }
                *px = if target == 0 {
                    0 // "clear": color and alpha both gone
                } else {
                    ((target as u32) << ALPHA_SHIFT) | (*px & 0x00FF_FFFF)
                };
                changed += 1;
            }
        }
        changed
    }

    /// Circular dab at a single point (a tap without movement).
    pub fn erase_dab(&mut self, center: Position, radius: f32) -> usize {
        self.erase_segment(center, center, radius)
    }

    /// Draw this mask over `image` (source-over, per-pixel mask alpha).
    /// Fully erased pixels show the image unchanged; fully opaque pixels show the mask.
    /// Pure read: any number of calls, no side effects.
    pub fn composite(&self, image: &FrameBuffer, lut: &GammaLut) -> Result<FrameBuffer> {
        if image.width != self.width || image.height != self.height {
            return Err(Error::InvalidDimensions {
                width: image.width as i64,
                height: image.height as i64,
            });
        }

        let pixels = self
            .pixels
            .iter()
            .zip(image.pixels.iter())
            .map(|(&m, &under)| lut.over(m, under, alpha_of(m)))
            .collect();

        Ok(FrameBuffer { width: self.width, height: self.height, pixels })
    }

    /// Pixels still at full opacity.
    pub fn opaque_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|&&px| alpha_of(px) == 0xFF).count()
    }

    /// Pixels cleared all the way to transparent.
    pub fn transparent_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|&&px| alpha_of(px) == 0).count()
    }

    /// Share of pixels that are no longer fully opaque, 0.0..=1.0.
    pub fn erased_fraction(&self) -> f32 {
        let total = self.pixels.len();
        (total - self.opaque_pixel_count()) as f32 / total as f32
    }

    pub fn is_fully_opaque(&self) -> bool {
        self.pixels.iter().all(|&px| alpha_of(px) == 0xFF)
    }
}
