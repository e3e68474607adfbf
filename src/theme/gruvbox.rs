use super::palette::Palette;
use ratatui::style::Color;

pub const GRUVBOX: Palette = Palette {
    background: Color::Rgb(40, 40, 40),
    foreground: Color::Rgb(235, 219, 178),
    cursor: Color::Rgb(235, 219, 178),
    normal: [
        Color::Rgb(40, 40, 40),
        Color::Rgb(204, 36, 29),
        Color::Rgb(152, 151, 26),
        Color::Rgb(215, 153, 33),
        Color::Rgb(69, 133, 136),
        Color::Rgb(177, 98, 134),
        Color::Rgb(104, 157, 106),
        Color::Rgb(168, 153, 132),
    ],
    bright: [
        Color::Rgb(146, 131, 116),
        Color::Rgb(251, 73, 52),
        Color::Rgb(184, 187, 38),
        Color::Rgb(250, 189, 47),
        Color::Rgb(131, 165, 152),
        Color::Rgb(211, 134, 155),
        Color::Rgb(142, 192, 124),
        Color::Rgb(235, 219, 178),
    ],
};
