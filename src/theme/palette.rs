use image::Rgba;
use ratatui::style::Color;

/// Terminal colors for one theme.
///
/// `normal` and `bright` follow SGR order: black, red, green, yellow, blue,
/// magenta, cyan, white. Every entry is expected to be `Color::Rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,
    pub normal: [Color; 8],
    pub bright: [Color; 8],
}

impl Palette {
    /// Pixel color for a cell foreground. `Reset` maps to the theme foreground.
    #[must_use]
    pub fn fg(&self, color: Color) -> Rgba<u8> {
        rgba(self.resolve(color, self.foreground))
    }

    /// Pixel color for a cell background. `Reset` maps to the theme background.
    #[must_use]
    pub fn bg(&self, color: Color) -> Rgba<u8> {
        rgba(self.resolve(color, self.background))
    }

    #[must_use]
    pub fn cursor(&self) -> Rgba<u8> {
        rgba(self.cursor)
    }

    fn resolve(&self, color: Color, default: Color) -> Color {
        match color {
            Color::Reset => default,
            Color::Black => self.normal[0],
            Color::Red => self.normal[1],
            Color::Green => self.normal[2],
            Color::Yellow => self.normal[3],
            Color::Blue => self.normal[4],
            Color::Magenta => self.normal[5],
            Color::Cyan => self.normal[6],
            Color::Gray => self.normal[7],
            Color::DarkGray => self.bright[0],
            Color::LightRed => self.bright[1],
            Color::LightGreen => self.bright[2],
            Color::LightYellow => self.bright[3],
            Color::LightBlue => self.bright[4],
            Color::LightMagenta => self.bright[5],
            Color::LightCyan => self.bright[6],
            Color::White => self.bright[7],
            Color::Indexed(i) => self.indexed(i),
            Color::Rgb(..) => color,
        }
    }

    // xterm 256-color layout: 16 theme colors, a 6x6x6 cube, 24 grays.
    fn indexed(&self, i: u8) -> Color {
        match i {
            0..=7 => self.normal[usize::from(i)],
            8..=15 => self.bright[usize::from(i - 8)],
            16..=231 => {
                let i = i - 16;
                let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                Color::Rgb(level(i / 36), level((i / 6) % 6), level(i % 6))
            }
            _ => {
                let gray = 8 + (i - 232) * 10;
                Color::Rgb(gray, gray, gray)
            }
        }
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    match color {
        Color::Rgb(r, g, b) => Rgba([r, g, b, 255]),
        _ => Rgba([0, 0, 0, 255]),
    }
}
