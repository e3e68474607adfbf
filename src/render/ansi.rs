//! ANSI SGR text into styled spans.
//!
//! Only `ESC [ ... m` is interpreted; every other control sequence is
//! dropped. Parsing starts from a caller-supplied pen and reports the pen left
//! active at the end, so color state carries across separate emissions the
//! way it does on a real terminal.

use std::mem;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use vte::{Params, Parser, Perform};

const BASE: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
];

const BRIGHT: [Color; 8] = [
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

const TAB: &str = "    ";

/// Splits `text` on newlines into styled lines. Always yields at least one
/// (possibly empty) line.
#[must_use]
pub fn parse(text: &str, pen: Style) -> (Vec<Line<'static>>, Style) {
    let mut collector = SpanCollector {
        pen,
        lines: Vec::new(),
        spans: Vec::new(),
        run: String::new(),
    };
    Parser::new().advance(&mut collector, text.as_bytes());
    collector.end_line();
    (collector.lines, collector.pen)
}

/// Applies one SGR parameter list to `pen`.
#[must_use]
pub fn apply_sgr(mut pen: Style, params: &[u16]) -> Style {
    if params.is_empty() {
        return Style::default();
    }
    let mut iter = params.iter().copied();
    while let Some(code) = iter.next() {
        pen = match code {
            0 => Style::default(),
            1 => pen.add_modifier(Modifier::BOLD),
            2 => pen.add_modifier(Modifier::DIM),
            3 => pen.add_modifier(Modifier::ITALIC),
            4 => pen.add_modifier(Modifier::UNDERLINED),
            22 => pen.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => pen.remove_modifier(Modifier::ITALIC),
            24 => pen.remove_modifier(Modifier::UNDERLINED),
            30..=37 => pen.fg(BASE[usize::from(code - 30)]),
            38 => extended_color(&mut iter).map_or(pen, |c| pen.fg(c)),
            39 => pen.fg(Color::Reset),
            40..=47 => pen.bg(BASE[usize::from(code - 40)]),
            48 => extended_color(&mut iter).map_or(pen, |c| pen.bg(c)),
            49 => pen.bg(Color::Reset),
            90..=97 => pen.fg(BRIGHT[usize::from(code - 90)]),
            100..=107 => pen.bg(BRIGHT[usize::from(code - 100)]),
            _ => pen,
        };
    }
    pen
}

// `5;n` selects a 256-color index, `2;r;g;b` a truecolor value.
fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    let channel = |v: u16| u8::try_from(v).ok();
    match iter.next()? {
        5 => channel(iter.next()?).map(Color::Indexed),
        2 => {
            let r = channel(iter.next()?)?;
            let g = channel(iter.next()?)?;
            let b = channel(iter.next()?)?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Plain text of a line with all styling dropped.
#[must_use]
pub fn plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

struct SpanCollector {
    pen: Style,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    run: String,
}

impl SpanCollector {
    fn flush_run(&mut self) {
        if !self.run.is_empty() {
            let text = mem::take(&mut self.run);
            self.spans.push(Span::styled(text, self.pen));
        }
    }

    fn end_line(&mut self) {
        self.flush_run();
        self.lines.push(Line::from(mem::take(&mut self.spans)));
    }
}

impl Perform for SpanCollector {
    fn print(&mut self, c: char) {
        self.run.push(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' => self.end_line(),
            b'\t' => self.run.push_str(TAB),
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, action: char) {
        if action != 'm' || !intermediates.is_empty() {
            return;
        }
        // Colon sub-parameters (`38:2:r:g:b`) flatten to the same list as
        // the semicolon form.
        let values: Vec<u16> = params.iter().flat_map(|p| p.iter().copied()).collect();
        let pen = apply_sgr(self.pen, &values);
        if pen != self.pen {
            self.flush_run();
            self.pen = pen;
        }
    }
}
