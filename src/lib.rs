//! Scratch card minigame: nine fields hidden under gray scratch masks.
//! Drag across a field to erase its mask; uncover three checks to win.
//!
//! The core is [`mask::MaskLayer`] (the erasable overlay) and
//! [`cell::ScratchCell`] (pointer events -> erase strokes -> one reveal per round).
//! [`game::GameSession`] keeps score, [`board::Board`] lays the fields out and
//! [`draw::Drawer`] puts everything in a window.

pub mod assets;
pub mod board;
pub mod cell;
pub mod config;
pub mod draw;
pub mod error;
pub mod game;
pub mod gamma;
pub mod mask;
pub mod stroke;
pub mod types;

pub use cell::{CellConfig, CellState, PointerEvent, RevealSink, ScratchCell};
pub use error::{Error, Result};
pub use game::{GameSession, GameState};
pub use mask::MaskLayer;
pub use stroke::{StrokePath, StrokeRetention};
pub use types::{CellSpec, FrameBuffer, ImageId, Position};
