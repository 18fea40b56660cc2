use crate::board::Board;
use crate::error::LocationError;
use std::fmt::Formatter;
use std::str::FromStr;

/// One of the 90 board cells. `x` is the file (`a` is 0) and `y` is the rank
/// counted from Red's home rank (rank `1` is 0).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Location {
    x: i8,
    y: i8,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Location,
    pub to: Location,
}

impl Location {
    pub fn new() -> Self {
        Self { x: 0, y: 0 }
    }

    pub fn from_xy(x: i8, y: i8) -> Option<Self> {
        Self::new().shift_xy(x, y)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= (Board::WIDTH * Board::HEIGHT) as usize {
            return None;
        }
        let x = index as i8 % Board::WIDTH;
        let y = index as i8 / Board::WIDTH;
        Self::from_xy(x, y)
    }

    /// Parses file+rank text such as `e1` or `a10`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file = chars.next()?;
        if !('a'..='i').contains(&file) {
            return None;
        }

        let rank = chars.as_str();
        if rank.is_empty() || rank.len() > 2 || rank.starts_with('0') || !rank.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let rank: i8 = rank.parse().ok()?;
        Self::from_xy((file as u8 - b'a') as i8, rank - 1)
    }

    /// File+rank text for a grid coordinate, `None` when it is off the board.
    pub fn notation(x: i8, y: i8) -> Option<String> {
        Self::from_xy(x, y).map(|location| location.to_string())
    }

    pub fn shift_x(&self, x: i8) -> Option<Self> {
        let new_x = self.x + x;
        if 0 > new_x || new_x >= Board::WIDTH {
            return None;
        }
        Some(Self { x: new_x, y: self.y })
    }

    pub fn shift_y(&self, y: i8) -> Option<Self> {
        let new_y = self.y + y;
        if 0 > new_y || new_y >= Board::HEIGHT {
            return None;
        }
        Some(Self { x: self.x, y: new_y })
    }

    pub fn shift_xy(&self, x: i8, y: i8) -> Option<Self> {
        self.shift_x(x)?.shift_y(y)
    }

    pub fn index(&self) -> usize {
        (self.x + self.y * Board::WIDTH) as usize
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Flips the rank for black so that both sides can be reasoned about from
    /// red's point of view.
    pub fn normalize(&self, red: bool) -> Self {
        if red {
            *self
        } else {
            Self {
                x: self.x,
                y: Board::HEIGHT - self.y - 1,
            }
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..(Board::WIDTH * Board::HEIGHT) as usize).filter_map(Self::from_index)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.x as u8) as char, self.y + 1)
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LocationError::Malformed(s.to_owned()))
    }
}

impl Move {
    pub fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Parses two concatenated squares, e.g. `b3b10`.
impl FromStr for Move {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LocationError::Malformed(s.to_owned());
        let split = s.char_indices().skip(1).find(|(_, c)| c.is_ascii_alphabetic()).ok_or_else(malformed)?.0;
        let (from, to) = s.split_at(split);
        Ok(Self {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let cases = [("a1", 0, 0), ("i1", 8, 0), ("e5", 4, 4), ("a10", 0, 9), ("i10", 8, 9), ("c7", 2, 6)];

        for (text, x, y) in cases {
            let location = Location::parse(text).unwrap();
            assert_eq!((x, y), (location.x(), location.y()), "{text}");
        }
    }

    #[test]
    fn parse_invalid() {
        let cases = ["", "a", "1", "j1", "a0", "a11", "a01", "a100", "A1", "e1x", " e1", "e-1", "10a"];

        for text in cases {
            assert!(Location::parse(text).is_none(), "{text} should be rejected");
            assert_eq!(Err(LocationError::Malformed(text.to_owned())), text.parse::<Location>());
        }
    }

    #[test]
    fn notation_round_trip() {
        for x in 0..Board::WIDTH {
            for y in 0..Board::HEIGHT {
                let text = Location::notation(x, y).unwrap();
                let location = Location::parse(&text).unwrap();
                assert_eq!((x, y), (location.x(), location.y()));
                assert_eq!(text, location.to_string());
            }
        }

        assert_eq!(None, Location::notation(9, 0));
        assert_eq!(None, Location::notation(0, 10));
        assert_eq!(None, Location::notation(-1, 3));
    }

    #[test]
    fn index_round_trip() {
        assert_eq!(90, Location::all().count());
        for location in Location::all() {
            assert_eq!(Some(location), Location::from_index(location.index()));
        }
        assert_eq!(None, Location::from_index(90));
    }

    #[test]
    fn normalize_flips_rank() {
        let location = Location::parse("c3").unwrap();
        assert_eq!(location, location.normalize(true));
        assert_eq!(Location::parse("c8").unwrap(), location.normalize(false));
    }

    #[test]
    fn parse_move() {
        let mv: Move = "b3b10".parse().unwrap();
        assert_eq!(Location::parse("b3").unwrap(), mv.from);
        assert_eq!(Location::parse("b10").unwrap(), mv.to);
        assert_eq!("b3b10", mv.to_string());

        assert!("a10i1".parse::<Move>().is_ok());
        assert!("b3".parse::<Move>().is_err());
        assert!("b3z4".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }
}
