use super::palette::Palette;
use ratatui::style::Color;

pub const CATPPUCCIN_MOCHA: Palette = Palette {
    background: Color::Rgb(30, 30, 46),
    foreground: Color::Rgb(205, 214, 244),
    cursor: Color::Rgb(245, 224, 220), // rosewater
    normal: [
        Color::Rgb(69, 71, 90),
        Color::Rgb(243, 139, 168),
        Color::Rgb(166, 227, 161),
        Color::Rgb(249, 226, 175),
        Color::Rgb(137, 180, 250),
        Color::Rgb(245, 194, 231),
        Color::Rgb(148, 226, 213),
        Color::Rgb(186, 194, 222),
    ],
    bright: [
        Color::Rgb(88, 91, 112),
        Color::Rgb(243, 139, 168),
        Color::Rgb(166, 227, 161),
        Color::Rgb(249, 226, 175),
        Color::Rgb(137, 180, 250),
        Color::Rgb(245, 194, 231),
        Color::Rgb(148, 226, 213),
        Color::Rgb(166, 173, 200),
    ],
};
