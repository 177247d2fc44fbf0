// One scratchable field: pointer events in, erase strokes on its mask, a single
// "revealed" notification per round out.

use crate::error::Result;
use crate::gamma::GammaLut;
use crate::mask::MaskLayer;
use crate::stroke::{StrokePath, StrokeRetention};
use crate::types::{CellSpec, FrameBuffer, ImageId, Position};

/// Brush radius in device pixels when nothing else is configured.
pub const DEFAULT_BRUSH_RADIUS: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellConfig {
    pub brush_radius: f32,
    pub stroke_retention: StrokeRetention,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self { brush_radius: DEFAULT_BRUSH_RADIUS, stroke_retention: StrokeRetention::default() }
    }
}

/// Raw pointer input in the cell's local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Position),
    Move(Position),
    Release(Position),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Idle,
    Dragging,
    Revealed,
}

/// Receiver of the once-per-round reveal notification.
pub trait RevealSink {
    fn on_reveal(&mut self, cell: CellSpec);
}

impl<F: FnMut(CellSpec)> RevealSink for F {
    fn on_reveal(&mut self, cell: CellSpec) {
        self(cell)
    }
}

pub struct ScratchCell {
    spec: CellSpec,
    image: ImageId,
    config: CellConfig,
    size: (i32, i32),
    mask: Option<MaskLayer>, // None until a usable size is known
    stroke: StrokePath,
    pointer_down: bool,
    dragging: bool,
    revealed: bool,
    mask_changed: bool,
}

impl ScratchCell {
    pub fn new(spec: CellSpec, image: ImageId, config: CellConfig) -> Self {
        Self {
            spec,
            image,
            config,
            size: (0, 0),
            mask: None,
            stroke: StrokePath::new(),
            pointer_down: false,
            dragging: false,
            revealed: false,
            mask_changed: false,
        }
    }

    pub fn spec(&self) -> CellSpec {
        self.spec
    }

    pub fn image(&self) -> ImageId {
        self.image
    }

    pub fn config(&self) -> CellConfig {
        self.config
    }

    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    pub fn mask(&self) -> Option<&MaskLayer> {
        self.mask.as_ref()
    }

    pub fn stroke(&self) -> &StrokePath {
        &self.stroke
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn state(&self) -> CellState {
        if self.dragging {
            CellState::Dragging
        } else if self.revealed {
            CellState::Revealed
        } else {
            CellState::Idle
        }
    }

    /// Tell the cell its rendered size. A new size throws away the mask and the
    /// trail and starts over with an opaque layer; scratch progress is lost.
    /// Zero or negative sizes leave the cell without a mask until a real size arrives.
    pub fn layout(&mut self, width: i32, height: i32) {
        if self.size == (width, height) && self.mask.is_some() {
            return;
        }
        self.size = (width, height);
        self.rebuild_mask();
        self.stroke.clear();
    }

    /// Begin a new round with `spec` / `image`: opaque mask, empty trail, not revealed.
    pub fn start_round(&mut self, spec: CellSpec, image: ImageId) {
        log::debug!("cell {}: new round ({:?}, winning={})", spec.index, image, spec.is_winning);
        self.spec = spec;
        self.image = image;
        self.rebuild_mask();
        self.stroke.clear();
        self.pointer_down = false;
        self.dragging = false;
        self.revealed = false;
    }

    /// Same as `start_round`, but only when `spec` or `image` actually differ.
    /// Returns whether the cell was reset.
    pub fn assign(&mut self, spec: CellSpec, image: ImageId) -> bool {
        if self.spec == spec && self.image == image {
            return false;
        }
        self.start_round(spec, image);
        true
    }

    /// Feed one pointer sample. Every contact sample is erased right away; the
    /// release fires `sink` if this cell has not been revealed yet this round.
    pub fn handle(&mut self, event: PointerEvent, sink: &mut impl RevealSink) {
        match event {
            PointerEvent::Press(p) => {
                self.pointer_down = true;
                if self.config.stroke_retention == StrokeRetention::PerGesture {
                    self.stroke.clear();
                }
                self.extend_stroke(p);
            }
            PointerEvent::Move(p) => {
                if !self.pointer_down {
                    return; // hover
                }
                self.dragging = true;
                self.extend_stroke(p);
            }
            PointerEvent::Release(_) => {
                if !self.pointer_down {
                    return;
                }
                self.pointer_down = false;
                self.dragging = false;
                if !self.revealed {
                    self.revealed = true;
                    log::info!("cell {} revealed (winning={})", self.spec.index, self.spec.is_winning);
                    sink.on_reveal(self.spec);
                }
            }
        }
    }

    /// Consume the "mask changed" signal. A render loop calls this once per
    /// frame and recomposites only when it returns true.
    pub fn take_mask_changed(&mut self) -> bool {
        std::mem::take(&mut self.mask_changed)
    }

    /// Mask over `image`, or `None` while the cell has no usable size.
    pub fn render(&self, image: &FrameBuffer, lut: &GammaLut) -> Result<Option<FrameBuffer>> {
        self.mask.as_ref().map(|m| m.composite(image, lut)).transpose()
    }

    fn extend_stroke(&mut self, p: Position) {
        let (from, to) = self.stroke.push(p);
        if let Some(mask) = self.mask.as_mut() {
            if mask.erase_segment(from, to, self.config.brush_radius) > 0 {
                self.mask_changed = true;
            }
        }
    }

    fn rebuild_mask(&mut self) {
        let (w, h) = self.size;
        self.mask = match MaskLayer::new(w, h) {
            Ok(mask) => {
                log::debug!("cell {}: mask created at {w}x{h}", self.spec.index);
                Some(mask)
            }
            Err(e) => {
                log::debug!("cell {}: mask deferred ({e})", self.spec.index);
                None
            }
        };
        self.mask_changed = true;
    }
}
