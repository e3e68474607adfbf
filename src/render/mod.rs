//! Character-cell terminal that records frames into an animated GIF.
//!
//! Text is placed on a grid of cells derived from the active font's metrics,
//! rasterized straight onto a pixel canvas, and every emission snapshots the
//! canvas as a frame held for a number of ticks.

use std::io;
use std::path::PathBuf;

pub mod ansi;
pub mod font;
pub mod frames;
pub mod scramble;
pub mod terminal;

pub use font::{FontFace, FontLoader, FontSpec, TtfLoader, Typeface};
pub use scramble::TextScramble;
pub use terminal::{CanvasConfig, Terminal, TextOpts};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read font {}: {source}", path.display())]
    FontIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a usable font", path.display())]
    InvalidFont { path: PathBuf },
    #[error("row {row} is outside the canvas (1..={rows})")]
    RowOutOfBounds { row: usize, rows: usize },
    #[error("column {col} is outside the canvas (1..={cols})")]
    ColumnOutOfBounds { col: usize, cols: usize },
    #[error("a {width}x{height} canvas cannot hold a single {cell_width}x{cell_height} cell")]
    CanvasTooSmall {
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    },
    #[error("gif encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
