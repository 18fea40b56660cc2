use crate::display_format::{DisplayFormat, Glyphs};
use crate::error::SideError;
use crate::location::Location;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
    Empty,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Red, Side::Black];

    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    pub fn is_red(self) -> bool {
        self == Self::Red
    }

    /// Rank direction this side's soldiers advance in.
    pub fn forward(self) -> i8 {
        match self {
            Self::Red => 1,
            Self::Black => -1,
        }
    }

    /// Whether `location` lies in this side's half of the board.
    pub fn owns_half(self, location: Location) -> bool {
        location.normalize(self.is_red()).y() < 5
    }

    pub fn palace_contains(self, location: Location) -> bool {
        let location = location.normalize(self.is_red());
        (3..=5).contains(&location.x()) && (0..=2).contains(&location.y())
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Red => "Red",
            Self::Black => "Black",
        })
    }
}

impl FromStr for Side {
    type Err = SideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "black" => Ok(Self::Black),
            _ => Err(SideError(s.to_owned())),
        }
    }
}

/// Occupant of a board cell. Empty cells hold a piece of kind
/// [`PieceKind::Empty`] with no side.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    kind: PieceKind,
    side: Option<Side>,
    location: Location,
    crossed_river: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side, location: Location) -> Self {
        if kind == PieceKind::Empty {
            return Self::empty(location);
        }

        let mut piece = Self {
            kind,
            side: Some(side),
            location,
            crossed_river: false,
        };
        piece.relocate(location);
        piece
    }

    pub fn empty(location: Location) -> Self {
        Self {
            kind: PieceKind::Empty,
            side: None,
            location,
            crossed_river: false,
        }
    }

    pub fn from_fen_char(value: char, location: Location) -> Option<Self> {
        let kind = match value.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Advisor,
            'e' => PieceKind::Elephant,
            'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };

        let side = if value.is_ascii_uppercase() { Side::Red } else { Side::Black };
        Some(Self::new(kind, side, location))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_empty(&self) -> bool {
        self.kind == PieceKind::Empty
    }

    pub fn belongs_to(&self, side: Side) -> bool {
        self.side == Some(side)
    }

    pub fn is_enemy_of(&self, side: Side) -> bool {
        self.side == Some(side.opponent())
    }

    pub fn has_crossed_river(&self) -> bool {
        self.crossed_river
    }

    /// Moves the piece to `location`. A soldier landing past the river keeps
    /// that fact for the rest of the game.
    pub fn relocate(&mut self, location: Location) {
        self.location = location;
        if self.kind == PieceKind::Soldier
            && let Some(side) = self.side
            && !side.owns_half(location)
        {
            self.crossed_river = true;
        }
    }

    pub fn fen_char(&self) -> Option<char> {
        let result = match self.kind {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
            PieceKind::Empty => return None,
        };
        if self.belongs_to(Side::Red) {
            Some(result.to_ascii_uppercase())
        } else {
            Some(result)
        }
    }

    pub fn chinese_char(&self) -> Option<char> {
        let red = self.belongs_to(Side::Red);
        let result = match (red, self.kind) {
            (_, PieceKind::Empty) => return None,
            (true, PieceKind::General) => '帥',
            (true, PieceKind::Advisor) => '仕',
            (true, PieceKind::Elephant) => '相',
            (true, PieceKind::Horse) => '傌',
            (true, PieceKind::Chariot) => '俥',
            (true, PieceKind::Cannon) => '炮',
            (true, PieceKind::Soldier) => '兵',
            (false, PieceKind::General) => '將',
            (false, PieceKind::Advisor) => '士',
            (false, PieceKind::Elephant) => '象',
            (false, PieceKind::Horse) => '馬',
            (false, PieceKind::Chariot) => '車',
            (false, PieceKind::Cannon) => '砲',
            (false, PieceKind::Soldier) => '卒',
        };
        Some(result)
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display {
        let text = match (format.glyphs, self.fen_char(), self.chinese_char()) {
            (Glyphs::Chinese, _, Some(c)) => c.to_string(),
            (_, Some(c), _) => format!("{c}{c}"),
            _ => "  ".to_owned(),
        };
        if self.belongs_to(Side::Red) {
            format.paint_red(&text)
        } else {
            text
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::plain()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> Location {
        Location::parse(text).unwrap()
    }

    #[test]
    fn side_parsing_ignores_case() {
        assert_eq!(Ok(Side::Red), "red".parse());
        assert_eq!(Ok(Side::Red), "RED".parse());
        assert_eq!(Ok(Side::Black), "Black".parse());
        assert!("blue".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn palace_and_half() {
        assert!(Side::Red.palace_contains(at("d1")));
        assert!(Side::Red.palace_contains(at("f3")));
        assert!(!Side::Red.palace_contains(at("e4")));
        assert!(!Side::Red.palace_contains(at("c2")));
        assert!(Side::Black.palace_contains(at("e10")));
        assert!(Side::Black.palace_contains(at("d8")));
        assert!(!Side::Black.palace_contains(at("e7")));

        assert!(Side::Red.owns_half(at("a5")));
        assert!(!Side::Red.owns_half(at("a6")));
        assert!(Side::Black.owns_half(at("a6")));
        assert!(!Side::Black.owns_half(at("a5")));
    }

    #[test]
    fn soldier_remembers_crossing() {
        let mut soldier = Piece::new(PieceKind::Soldier, Side::Red, at("e4"));
        assert!(!soldier.has_crossed_river());
        soldier.relocate(at("e5"));
        assert!(!soldier.has_crossed_river());
        soldier.relocate(at("e6"));
        assert!(soldier.has_crossed_river());

        let soldier = Piece::new(PieceKind::Soldier, Side::Black, at("e5"));
        assert!(soldier.has_crossed_river());

        let mut chariot = Piece::new(PieceKind::Chariot, Side::Red, at("a1"));
        chariot.relocate(at("a9"));
        assert!(!chariot.has_crossed_river());
    }

    #[test]
    fn fen_chars() {
        let piece = Piece::from_fen_char('H', at("b1")).unwrap();
        assert_eq!(PieceKind::Horse, piece.kind());
        assert_eq!(Some(Side::Red), piece.side());
        assert_eq!(Some('H'), piece.fen_char());

        let piece = Piece::from_fen_char('k', at("e10")).unwrap();
        assert_eq!(PieceKind::General, piece.kind());
        assert_eq!(Some(Side::Black), piece.side());
        assert_eq!(Some('將'), piece.chinese_char());

        assert!(Piece::from_fen_char('x', at("a1")).is_none());
        assert_eq!(None, Piece::empty(at("a1")).fen_char());
        assert_eq!(None, Piece::empty(at("a1")).side());
    }

    #[test]
    fn glyphs() {
        let horse = Piece::new(PieceKind::Horse, Side::Black, at("b10"));
        let cannon = Piece::new(PieceKind::Cannon, Side::Red, at("b3"));
        let chinese = DisplayFormat {
            glyphs: Glyphs::Chinese,
            ..DisplayFormat::plain()
        };

        assert_eq!("hh", horse.to_string());
        assert_eq!("馬", horse.display(chinese).to_string());
        assert_eq!("炮", cannon.display(chinese).to_string());
        assert_eq!("  ", Piece::empty(at("e5")).display(chinese).to_string());

        let coloured = DisplayFormat { colour: true, ..chinese };
        assert_eq!("\x1B[31m炮\x1B[0m", cannon.display(coloured).to_string());
        assert_eq!("馬", horse.display(coloured).to_string());
    }
}
