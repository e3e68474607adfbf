use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use super::{RenderError, Result};

/// A monospace face that can rasterize single characters into a cell.
pub trait FontFace: Send + Sync {
    /// Width and height of one cell in pixels, line spacing excluded.
    fn cell_size(&self) -> (u32, u32);

    /// Draws `c` with the top-left corner of its cell at (`x`, `y`).
    fn draw_glyph(&self, c: char, x: i64, y: i64, color: Rgba<u8>, canvas: &mut RgbaImage);
}

/// Where a font lives on disk and how it is laid out on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub path: PathBuf,
    pub size: f32,
    /// Extra pixels between rows.
    #[serde(default)]
    pub line_spacing: u32,
}

impl FontSpec {
    pub fn new(path: impl Into<PathBuf>, size: f32, line_spacing: u32) -> Self {
        Self {
            path: path.into(),
            size,
            line_spacing,
        }
    }
}

/// A loaded face together with its row spacing.
#[derive(Clone)]
pub struct Typeface {
    pub face: Arc<dyn FontFace>,
    pub line_spacing: u32,
}

pub trait FontLoader {
    fn load(&self, spec: &FontSpec) -> Result<Typeface>;
}

/// Loads TrueType / OpenType files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtfLoader;

impl FontLoader for TtfLoader {
    fn load(&self, spec: &FontSpec) -> Result<Typeface> {
        let face = TtfFace::load(&spec.path, spec.size)?;
        log::debug!(
            "loaded {} at {}px, cell {:?}",
            spec.path.display(),
            spec.size,
            face.cell_size()
        );
        Ok(Typeface {
            face: Arc::new(face),
            line_spacing: spec.line_spacing,
        })
    }
}

pub struct TtfFace {
    font: FontVec,
    scale: PxScale,
    ascent: f32,
    cell: (u32, u32),
}

impl TtfFace {
    pub fn load(path: &Path, size: f32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| RenderError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| RenderError::InvalidFont {
            path: path.to_path_buf(),
        })?;
        let scale = PxScale::from(size);
        let scaled = font.as_scaled(scale);
        // Cell width comes from a wide glyph; the faces used here are monospace.
        let width = scaled.h_advance(scaled.glyph_id('W')).ceil().max(1.0) as u32;
        let height = (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32;
        let ascent = scaled.ascent();
        Ok(Self {
            font,
            scale,
            ascent,
            cell: (width, height),
        })
    }
}

impl FontFace for TtfFace {
    fn cell_size(&self) -> (u32, u32) {
        self.cell
    }

    fn draw_glyph(&self, c: char, x: i64, y: i64, color: Rgba<u8>, canvas: &mut RgbaImage) {
        let glyph = self
            .font
            .glyph_id(c)
            .with_scale_and_position(self.scale, point(x as f32, y as f32 + self.ascent));
        let Some(outline) = self.font.outline_glyph(glyph) else {
            return;
        };
        let bounds = outline.px_bounds();
        outline.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i64 + i64::from(gx);
            let py = bounds.min.y as i64 + i64::from(gy);
            blend(canvas, px, py, color, coverage);
        });
    }
}

/// Mixes `color` into the pixel at (`x`, `y`) by `coverage`; off-canvas
/// coordinates are ignored.
pub(crate) fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    let dst = canvas.get_pixel_mut(x, y);
    for i in 0..3 {
        let mixed = f32::from(color[i]) * alpha + f32::from(dst[i]) * (1.0 - alpha);
        dst[i] = mixed.round() as u8;
    }
    dst[3] = 255;
}
