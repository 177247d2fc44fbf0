// Command line options of the game window.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::cell::{CellConfig, DEFAULT_BRUSH_RADIUS};
use crate::stroke::StrokeRetention;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RetentionArg {
    /// every press starts a new stroke
    PerGesture,
    /// strokes continue across gestures until the round resets
    Round,
}

impl From<RetentionArg> for StrokeRetention {
    fn from(arg: RetentionArg) -> Self {
        match arg {
            RetentionArg::PerGesture => StrokeRetention::PerGesture,
            RetentionArg::Round => StrokeRetention::Round,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "scratch-card")]
#[command(about = "Scratch three checks out of nine fields to win")]
pub struct Config {
    /// Edge length of one square field, in pixels
    #[arg(long, default_value_t = 160)]
    pub cell_size: u32,

    /// Space between fields and around the grid, in pixels
    #[arg(long, default_value_t = 10)]
    pub gap: u32,

    /// Eraser radius, in pixels
    #[arg(long, default_value_t = DEFAULT_BRUSH_RADIUS)]
    pub brush_radius: f32,

    #[arg(long, value_enum, default_value_t = RetentionArg::PerGesture)]
    pub stroke_retention: RetentionArg,

    /// Fixed seed for the winning fields (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory with check.png / blank.png (drawn in code when omitted)
    #[arg(long)]
    pub assets: Option<PathBuf>,
}

impl Config {
    pub fn cell_config(&self) -> CellConfig {
        CellConfig {
            brush_radius: self.brush_radius,
            stroke_retention: self.stroke_retention.into(),
        }
    }
}
