//! The GitHub Mona mascot, drawn in a pictographic face where `}` is a
//! filled block.

pub const MONA_ART: &[&str] = &[
    "\x1b[49m     \x1b[90;100m}}\x1b[49m     \x1b[90;100m}}\x1b[0m",
    "\x1b[49m    \x1b[90;100m}}}}\x1b[49m   \x1b[90;100m}}}}\x1b[0m",
    "\x1b[49m    \x1b[90;100m}}}}}\x1b[49m \x1b[90;100m}}}}}\x1b[0m",
    "\x1b[49m   \x1b[90;100m}}}}}}}}}}}}}\x1b[0m",
    "\x1b[49m   \x1b[90;100m}}}}}}}}}}}}}}\x1b[0m",
    "\x1b[49m   \x1b[90;100m}}\x1b[37;47m}}}}}}}\x1b[90;100m}}}}}\x1b[0m",
    "\x1b[49m  \x1b[90;100m}}\x1b[37;47m}}}}}}}}}}\x1b[90;100m}}}\x1b[0m",
    "\x1b[49m  \x1b[90;100m}}\x1b[37;47m}\x1b[90;100m}\x1b[37;47m}}}}}\x1b[90;100m}\x1b[37;47m}}\x1b[90;100m}}}}\x1b[0m",
    "\x1b[49m  \x1b[90;100m}\x1b[37;47m}}\x1b[90;100m}\x1b[37;47m}}}}}\x1b[90;100m}\x1b[37;47m}}}\x1b[90;100m}}}\x1b[0m",
    "\x1b[90;100m}}}\x1b[37;47m}}}}\x1b[90;100m}}}\x1b[37;47m}}}}}\x1b[90;100m}}}}\x1b[0m",
    "\x1b[49m  \x1b[90;100m}\x1b[37;47m}}}}}\x1b[90;100m}}\x1b[37;47m}}}}}\x1b[90;100m}}}\x1b[0m",
    "\x1b[49m \x1b[90;100m}}\x1b[37;47m}}}}}}}}}}}}\x1b[90;100m}}}\x1b[0m",
    "\x1b[90;100m}\x1b[49m  \x1b[90;100m}}\x1b[37;47m}}}}}}}}\x1b[90;100m}}}\x1b[49m  \x1b[90;100m}\x1b[0m",
    "\x1b[49m        \x1b[90;100m}}}}}\x1b[0m",
    "\x1b[49m       \x1b[90;100m}}}}}}}\x1b[0m",
    "\x1b[49m       \x1b[90;100m}}}}}}}}\x1b[0m",
    "\x1b[49m      \x1b[90;100m}}}}}}}}}}\x1b[0m",
    "\x1b[49m     \x1b[90;100m}}}}}}}}}}}\x1b[0m",
    "\x1b[49m     \x1b[90;100m}}}}}}}}}}}}\x1b[0m",
    "\x1b[49m     \x1b[90;100m}}\x1b[49m \x1b[90;100m}}}}}}\x1b[49m \x1b[90;100m}}\x1b[0m",
    "\x1b[49m        \x1b[90;100m}}}}}}}\x1b[0m",
    "\x1b[49m         \x1b[90;100m}}}\x1b[49m \x1b[90;100m}}\x1b[0m",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ansi;
    use ratatui::style::Style;

    #[test]
    fn test_art_parses_without_literal_escapes() {
        assert_eq!(MONA_ART.len(), 22);
        for line in MONA_ART {
            let (parsed, pen) = ansi::parse(line, Style::default());
            assert_eq!(parsed.len(), 1);
            let text = ansi::plain(&parsed[0]);
            assert!(text.chars().all(|c| c == '}' || c == ' '), "{text:?}");
            assert_eq!(pen, Style::default());
        }
    }
}
