// Lookup tables for gamma-correct mixing of the mask's soft edge over the cell image.
// Only partially transparent mask pixels go through here; fully opaque and
// fully erased pixels are copied as-is.

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    // (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = (i as f32) / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Source-over of `top` (coverage `alpha`, 0..=255) onto `bottom`, both 0x..RRGGBB.
    /// Result is 0x00RRGGBB.
    pub fn over(&self, top: u32, bottom: u32, alpha: u8) -> u32 {
        match alpha {
            0 => bottom & 0x00FF_FFFF,
            255 => top & 0x00FF_FFFF,
            _ => {
                let a = alpha as f32 / 255.0;
                let inv = 1.0 - a;
                let mut out = 0u32;
                for shift in [16u32, 8, 0] {
                    let t = self.srgb_u8_to_linear(((top >> shift) & 0xFF) as u8);
                    let b = self.srgb_u8_to_linear(((bottom >> shift) & 0xFF) as u8);
                    out |= (self.linear_to_srgb_u8(a * t + inv * b) as u32) << shift;
                }
                out
            }
        }
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
