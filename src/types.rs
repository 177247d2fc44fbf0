// Core types shared by the mask, the cells and the window.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer of the given size filled with one color.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// A pointer sample in the local coordinate space of one cell (device pixels).
/// May lie outside the cell while a captured drag leaves its bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_sq(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Which cell this is and what it reports when revealed.
/// Handed to the cell at construction / round start and echoed back verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellSpec {
    pub index: usize,
    pub is_winning: bool,
}

impl CellSpec {
    pub const fn new(index: usize, is_winning: bool) -> Self {
        Self { index, is_winning }
    }
}

/// Opaque name of the picture under a cell's mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageId {
    Check,
    Blank,
}

impl ImageId {
    /// Winning fields show a check, all others stay blank.
    pub const fn for_answer(is_winning: bool) -> Self {
        if is_winning { ImageId::Check } else { ImageId::Blank }
    }

    pub const fn file_stem(self) -> &'static str {
        match self {
            ImageId::Check => "check",
            ImageId::Blank => "blank",
        }
    }
}
