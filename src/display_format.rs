use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Glyphs {
    /// 帥 仕 相 傌 俥 炮 兵 for red and 將 士 象 馬 車 砲 卒 for black.
    Chinese,
    /// The board-text letter doubled, `KK` or `pp`, so cells stay two columns wide.
    Letters,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Layout {
    /// Ranks and files drawn out with the status underneath.
    Grid,
    /// Board text and the side to move on one line.
    Line,
}

/// How pieces, boards and games are turned into text.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DisplayFormat {
    pub glyphs: Glyphs,
    /// ANSI colour for red pieces and italics on the last move.
    pub colour: bool,
    pub layout: Layout,
}

const CHINESE: u8 = 1;
const COLOUR: u8 = 2;

static TERMINAL: AtomicU8 = AtomicU8::new(CHINESE | COLOUR);

impl DisplayFormat {
    /// The front end's format, as configured by [`DisplayFormat::set_terminal`].
    pub fn terminal() -> Self {
        let bits = TERMINAL.load(Ordering::Relaxed);
        Self {
            glyphs: if bits & CHINESE != 0 { Glyphs::Chinese } else { Glyphs::Letters },
            colour: bits & COLOUR != 0,
            layout: Layout::Grid,
        }
    }

    /// Letters on one line without escapes; what the `Display` impls print.
    pub fn plain() -> Self {
        Self {
            glyphs: Glyphs::Letters,
            colour: false,
            layout: Layout::Line,
        }
    }

    pub fn set_terminal(glyphs: Glyphs, colour: bool) {
        let mut bits = 0;
        if glyphs == Glyphs::Chinese {
            bits |= CHINESE;
        }
        if colour {
            bits |= COLOUR;
        }
        TERMINAL.store(bits, Ordering::Relaxed);
    }

    pub fn paint_red(self, text: &str) -> String {
        if self.colour {
            format!("\x1B[31m{text}\x1B[0m")
        } else {
            text.to_owned()
        }
    }

    pub fn emphasise(self, text: &str) -> String {
        if self.colour {
            format!("\x1B[3m{text}\x1B[0m")
        } else {
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_has_no_escapes() {
        let format = DisplayFormat::plain();
        assert_eq!("炮", format.paint_red("炮"));
        assert_eq!("CC", format.emphasise("CC"));
        assert_eq!(Layout::Line, format.layout);
    }

    #[test]
    fn colour_wraps_text() {
        let format = DisplayFormat {
            colour: true,
            ..DisplayFormat::plain()
        };
        assert_eq!("\x1B[31mKK\x1B[0m", format.paint_red("KK"));
        assert_eq!("\x1B[3mKK\x1B[0m", format.emphasise("KK"));
    }
}
