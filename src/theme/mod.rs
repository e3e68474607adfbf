use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod gruvbox;
pub mod nord;
pub mod palette;

pub use palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    #[default]
    Gruvbox,
    Nord,
    #[serde(alias = "catppuccin")]
    CatppuccinMocha,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::Gruvbox => "Gruvbox",
            PaletteType::Nord => "Nord",
            PaletteType::CatppuccinMocha => "Catppuccin (Mocha)",
        }
    }

    #[must_use]
    pub fn palette(&self) -> &'static Palette {
        match self {
            PaletteType::Gruvbox => &gruvbox::GRUVBOX,
            PaletteType::Nord => &nord::NORD,
            PaletteType::CatppuccinMocha => &catppuccin::CATPPUCCIN_MOCHA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_every_palette_is_truecolor() {
        for kind in [
            PaletteType::Gruvbox,
            PaletteType::Nord,
            PaletteType::CatppuccinMocha,
        ] {
            let p = kind.palette();
            let entries = [p.background, p.foreground, p.cursor]
                .into_iter()
                .chain(p.normal)
                .chain(p.bright);
            for color in entries {
                assert!(
                    matches!(color, Color::Rgb(..)),
                    "{} has non-rgb entry {color:?}",
                    kind.label()
                );
            }
        }
    }

    #[test]
    fn test_palette_type_from_toml_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            palette: PaletteType,
        }
        let w: Wrapper = toml::from_str("palette = \"catppuccinmocha\"").unwrap();
        assert_eq!(w.palette, PaletteType::CatppuccinMocha);
        let w: Wrapper = toml::from_str("palette = \"catppuccin\"").unwrap();
        assert_eq!(w.palette, PaletteType::CatppuccinMocha);
    }
}
