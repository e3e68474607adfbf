use super::palette::Palette;
use ratatui::style::Color;

pub const NORD: Palette = Palette {
    background: Color::Rgb(46, 52, 64),
    foreground: Color::Rgb(216, 222, 233),
    cursor: Color::Rgb(216, 222, 233),
    normal: [
        Color::Rgb(59, 66, 82),
        Color::Rgb(191, 97, 106),
        Color::Rgb(163, 190, 140),
        Color::Rgb(235, 203, 139),
        Color::Rgb(129, 161, 193),
        Color::Rgb(180, 142, 173),
        Color::Rgb(136, 192, 208),
        Color::Rgb(229, 233, 240),
    ],
    bright: [
        Color::Rgb(76, 86, 106),
        Color::Rgb(191, 97, 106),
        Color::Rgb(163, 190, 140),
        Color::Rgb(235, 203, 139),
        Color::Rgb(129, 161, 193),
        Color::Rgb(180, 142, 173),
        Color::Rgb(143, 188, 187),
        Color::Rgb(236, 239, 244),
    ],
};
