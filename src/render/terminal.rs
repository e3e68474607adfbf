use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use serde::{Deserialize, Serialize};

use super::ansi;
use super::font::Typeface;
use super::frames::FrameRecorder;
use super::{RenderError, Result};
use crate::theme::{Palette, PaletteType};

/// Pixel geometry and encoding settings for the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Horizontal margin in pixels on each side.
    pub xpad: u32,
    /// Vertical margin in pixels on each side.
    pub ypad: u32,
    /// Length of one tick. Every repeat-count is a number of ticks.
    pub frame_ms: u32,
    /// GIF quantization speed, 1 (best) to 30 (fastest).
    pub encoder_speed: i32,
    pub palette: PaletteType,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 750,
            height: 500,
            xpad: 15,
            ypad: 15,
            frame_ms: 50,
            encoder_speed: 10,
            palette: PaletteType::default(),
        }
    }
}

/// Placement and timing for one emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOpts {
    /// Start column. Defaults to the cursor column when continuing on the
    /// cursor's row, otherwise to column 1.
    pub col: Option<usize>,
    /// Ticks the resulting frame is held for; 0 emits no frame.
    pub count: u32,
    /// Append to the row instead of clearing it first.
    pub contin: bool,
}

impl Default for TextOpts {
    fn default() -> Self {
        Self {
            col: None,
            count: 1,
            contin: false,
        }
    }
}

impl TextOpts {
    #[must_use]
    pub fn at_col(mut self, col: usize) -> Self {
        self.col = Some(col);
        self
    }

    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn contin(mut self) -> Self {
        self.contin = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Grid {
    rows: usize,
    cols: usize,
    cell_width: u32,
    row_height: u32,
    cell_height: u32,
}

/// Animated terminal builder. Rows and columns are 1-based.
///
/// The grid follows the active font. Swapping fonts recomputes the grid but
/// leaves already drawn pixels on the canvas, so text in several faces can
/// share one frame.
pub struct Terminal {
    width: u32,
    height: u32,
    xpad: u32,
    ypad: u32,
    typeface: Typeface,
    grid: Grid,
    cells: Buffer,
    canvas: RgbaImage,
    palette: &'static Palette,
    pen: Style,
    prompt: String,
    curr_row: usize,
    curr_col: usize,
    show_cursor: bool,
    recorder: FrameRecorder,
    output: PathBuf,
}

impl Terminal {
    /// Sets up an empty canvas. The GIF is only written to `output` by
    /// [`Terminal::finish`].
    pub fn new(config: &CanvasConfig, typeface: Typeface, output: &Path) -> Result<Self> {
        let grid = layout(config.width, config.height, config.xpad, config.ypad, &typeface)?;
        let palette = config.palette.palette();
        let canvas = RgbaImage::from_pixel(config.width, config.height, palette.bg(Color::Reset));
        let recorder = FrameRecorder::create(output, config.frame_ms, config.encoder_speed)?;
        debug!(
            "canvas {}x{} with {} rows x {} cols, {} palette",
            config.width,
            config.height,
            grid.rows,
            grid.cols,
            config.palette.label()
        );
        Ok(Self {
            width: config.width,
            height: config.height,
            xpad: config.xpad,
            ypad: config.ypad,
            typeface,
            grid,
            cells: empty_cells(grid),
            canvas,
            palette,
            pen: Style::default(),
            prompt: "> ".to_string(),
            curr_row: 1,
            curr_col: 1,
            show_cursor: true,
            recorder,
            output: output.to_path_buf(),
        })
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.grid.rows
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.grid.cols
    }

    #[must_use]
    pub fn curr_row(&self) -> usize {
        self.curr_row
    }

    #[must_use]
    pub fn curr_col(&self) -> usize {
        self.curr_col
    }

    /// Style applied to the next unstyled text.
    #[must_use]
    pub fn pen(&self) -> Style {
        self.pen
    }

    /// ANSI text printed by [`Terminal::gen_prompt`].
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    pub fn toggle_show_cursor(&mut self, show: bool) {
        self.show_cursor = show;
    }

    /// Text currently held by `row` in the active grid, trailing blanks
    /// trimmed.
    pub fn row_text(&self, row: usize) -> Result<String> {
        self.check_row(row)?;
        let text: String = (1..=self.grid.cols)
            .filter_map(|col| self.cell(row, col).map(|c| c.symbol().to_string()))
            .collect();
        Ok(text.trim_end().to_string())
    }

    /// Foreground and background of one cell in the active grid.
    pub fn cell_colors(&self, row: usize, col: usize) -> Result<(Color, Color)> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self
            .cell(row, col)
            .map_or((Color::Reset, Color::Reset), |c| (c.fg, c.bg)))
    }

    /// Prints ANSI `text` at `row`. Escape sequences update the pen, which
    /// stays active for later calls; `\n` continues on the next row at the
    /// start column.
    pub fn gen_text(&mut self, text: &str, row: usize, opts: TextOpts) -> Result<()> {
        let (lines, pen) = ansi::parse(text, self.pen);
        self.pen = pen;
        self.gen_lines(&lines, row, opts)
    }

    /// Prints pre-styled lines starting at `row`. The pen is left untouched.
    pub fn gen_lines(&mut self, lines: &[Line<'_>], row: usize, opts: TextOpts) -> Result<()> {
        let start = self.begin(row, lines.len(), opts)?;
        for (i, line) in lines.iter().enumerate() {
            let r = row + i;
            let col = if i == 0 { start } else { opts.col.unwrap_or(1) };
            if i > 0 && !opts.contin {
                self.clear_cells(r, 1);
            }
            let mut end = col;
            for span in &line.spans {
                for c in span.content.chars() {
                    self.put_char(r, end, c, span.style);
                    end += 1;
                }
            }
            self.move_cursor(r, end);
        }
        self.capture(opts.count)
    }

    /// Types `text` one character per frame, each held `opts.count` ticks.
    pub fn gen_typing_text(&mut self, text: &str, row: usize, opts: TextOpts) -> Result<()> {
        let (lines, pen) = ansi::parse(text, self.pen);
        self.pen = pen;
        let start = self.begin(row, lines.len(), opts)?;
        let ticks = opts.count.max(1);
        for (i, line) in lines.iter().enumerate() {
            let r = row + i;
            let mut col = if i == 0 { start } else { opts.col.unwrap_or(1) };
            if i > 0 && !opts.contin {
                self.clear_cells(r, 1);
            }
            self.move_cursor(r, col);
            for span in &line.spans {
                for c in span.content.chars() {
                    self.put_char(r, col, c, span.style);
                    col += 1;
                    self.move_cursor(r, col);
                    self.capture(ticks)?;
                }
            }
        }
        Ok(())
    }

    /// Prints the configured prompt at the start of `row`.
    pub fn gen_prompt(&mut self, row: usize, count: u32) -> Result<()> {
        let prompt = self.prompt.clone();
        self.gen_text(&prompt, row, TextOpts::default().count(count))
    }

    /// Clears `row` from `col` (default 1) to the end and parks the cursor
    /// there. No frame is emitted.
    pub fn delete_row(&mut self, row: usize, col: Option<usize>) -> Result<()> {
        self.check_row(row)?;
        let col = col.unwrap_or(1);
        self.check_col(col)?;
        self.clear_cells(row, col);
        self.move_cursor(row, col);
        Ok(())
    }

    /// Blanks the whole canvas and homes the cursor. No frame is emitted.
    pub fn clear_frame(&mut self) {
        self.cells = empty_cells(self.grid);
        let background = self.palette.bg(Color::Reset);
        for pixel in self.canvas.pixels_mut() {
            *pixel = background;
        }
        self.move_cursor(1, 1);
    }

    /// Holds the current canvas for `count` more ticks.
    pub fn clone_frame(&mut self, count: u32) -> Result<()> {
        self.capture(count)
    }

    /// Switches to `typeface` and rebuilds the grid for its metrics. Pixels
    /// already drawn stay; the cursor returns home.
    pub fn set_font(&mut self, typeface: &Typeface) -> Result<()> {
        let grid = layout(self.width, self.height, self.xpad, self.ypad, typeface)?;
        debug!("font swap: grid is now {} rows x {} cols", grid.rows, grid.cols);
        self.typeface = typeface.clone();
        self.grid = grid;
        self.cells = empty_cells(grid);
        self.move_cursor(1, 1);
        Ok(())
    }

    /// Encodes every recorded frame and writes the GIF to the output path.
    pub fn finish(mut self) -> Result<PathBuf> {
        if self.recorder.is_empty() {
            self.capture(1)?;
        }
        let Terminal {
            recorder, output, ..
        } = self;
        let frames = recorder.finish(&output)?;
        info!("encoded {frames} frames into {}", output.display());
        Ok(output)
    }

    fn begin(&mut self, row: usize, line_count: usize, opts: TextOpts) -> Result<usize> {
        self.check_row(row)?;
        self.check_row(row + line_count.saturating_sub(1))?;
        let start = match opts.col {
            Some(col) => {
                self.check_col(col)?;
                col
            }
            None if opts.contin && row == self.curr_row => self.curr_col,
            None => 1,
        };
        if !opts.contin {
            self.clear_cells(row, 1);
        }
        Ok(start)
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row == 0 || row > self.grid.rows {
            return Err(RenderError::RowOutOfBounds {
                row,
                rows: self.grid.rows,
            });
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col == 0 || col > self.grid.cols {
            return Err(RenderError::ColumnOutOfBounds {
                col,
                cols: self.grid.cols,
            });
        }
        Ok(())
    }

    fn move_cursor(&mut self, row: usize, col: usize) {
        self.curr_row = row;
        self.curr_col = col;
    }

    fn cell(&self, row: usize, col: usize) -> Option<&ratatui::buffer::Cell> {
        let (x, y) = cell_position(row, col)?;
        self.cells.cell((x, y))
    }

    fn origin(&self, row: usize, col: usize) -> (i64, i64) {
        let x = i64::from(self.xpad) + (col as i64 - 1) * i64::from(self.grid.cell_width);
        let y = i64::from(self.ypad) + (row as i64 - 1) * i64::from(self.grid.row_height);
        (x, y)
    }

    // Characters past the last column are dropped.
    fn put_char(&mut self, row: usize, col: usize, c: char, style: Style) {
        if col > self.grid.cols {
            return;
        }
        let fg = style.fg.unwrap_or(Color::Reset);
        let bg = style.bg.unwrap_or(Color::Reset);
        if let Some(cell) = cell_position(row, col).and_then(|p| self.cells.cell_mut(p)) {
            cell.set_char(c).set_fg(fg).set_bg(bg);
        }
        let (x, y) = self.origin(row, col);
        let background = self.palette.bg(bg);
        fill(
            &mut self.canvas,
            x,
            y,
            self.grid.cell_width,
            self.grid.row_height,
            background,
        );
        if !c.is_whitespace() {
            let color = self.palette.fg(fg);
            self.typeface.face.draw_glyph(c, x, y, color, &mut self.canvas);
        }
    }

    fn clear_cells(&mut self, row: usize, from_col: usize) {
        for col in from_col..=self.grid.cols {
            if let Some(cell) = cell_position(row, col).and_then(|p| self.cells.cell_mut(p)) {
                cell.reset();
            }
        }
        let (x, y) = self.origin(row, from_col);
        let right = i64::from(self.width.saturating_sub(self.xpad));
        let width = u32::try_from(right - x).unwrap_or(0);
        let background = self.palette.bg(Color::Reset);
        fill(&mut self.canvas, x, y, width, self.grid.row_height, background);
    }

    fn capture(&mut self, count: u32) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let mut frame = self.canvas.clone();
        if self.show_cursor && self.curr_row <= self.grid.rows && self.curr_col <= self.grid.cols {
            let (x, y) = self.origin(self.curr_row, self.curr_col);
            fill(
                &mut frame,
                x,
                y,
                self.grid.cell_width,
                self.grid.cell_height,
                self.palette.cursor(),
            );
        }
        self.recorder.push(frame, count)
    }
}

fn layout(width: u32, height: u32, xpad: u32, ypad: u32, typeface: &Typeface) -> Result<Grid> {
    let (cell_width, cell_height) = typeface.face.cell_size();
    let cell_width = cell_width.max(1);
    let cell_height = cell_height.max(1);
    let row_height = cell_height + typeface.line_spacing;
    let usable_width = width.saturating_sub(2 * xpad);
    let usable_height = height.saturating_sub(2 * ypad);
    // The last row needs no trailing spacing.
    let rows = (usable_height + typeface.line_spacing) / row_height;
    let cols = usable_width / cell_width;
    let limit = u32::from(u16::MAX);
    if rows == 0 || cols == 0 {
        return Err(RenderError::CanvasTooSmall {
            width,
            height,
            cell_width,
            cell_height,
        });
    }
    Ok(Grid {
        rows: rows.min(limit) as usize,
        cols: cols.min(limit) as usize,
        cell_width,
        row_height,
        cell_height,
    })
}

fn empty_cells(grid: Grid) -> Buffer {
    Buffer::empty(Rect::new(0, 0, grid.cols as u16, grid.rows as u16))
}

fn cell_position(row: usize, col: usize) -> Option<(u16, u16)> {
    let x = u16::try_from(col.checked_sub(1)?).ok()?;
    let y = u16::try_from(row.checked_sub(1)?).ok()?;
    Some((x, y))
}

fn fill(canvas: &mut RgbaImage, x: i64, y: i64, width: u32, height: u32, color: image::Rgba<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(width)).min(i64::from(canvas.width()));
    let y1 = (y + i64::from(height)).min(i64::from(canvas.height()));
    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}
