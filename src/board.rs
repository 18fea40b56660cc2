use crate::display_format::DisplayFormat;
use crate::error::FenError;
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// The 10x9 grid. Every cell always holds a [`Piece`], empty cells included,
/// and each piece records the cell it sits in.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    pieces: Vec<Piece>,
}

impl Board {
    pub const WIDTH: i8 = 9;
    pub const HEIGHT: i8 = 10;

    /// Board text of [`Board::opening`].
    pub const OPENING: &'static str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR";

    pub fn new() -> Self {
        Self {
            pieces: Location::all().map(Piece::empty).collect(),
        }
    }

    /// Reads ranks from rank 10 down to rank 1 separated by `/`, with
    /// uppercase letters for red, lowercase for black and digits for runs of
    /// empty cells.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Self::new();
        let ranks: Vec<&str> = fen.trim().split('/').collect();
        if ranks.len() != Self::HEIGHT as usize {
            return Err(FenError::RankCount(ranks.len()));
        }

        for (row, rank) in ranks.into_iter().enumerate() {
            let y = Self::HEIGHT - 1 - row as i8;
            let mut x = 0;

            for current in rank.chars() {
                if let Some(run) = current.to_digit(10) {
                    x += run as i8;
                    if x > Self::WIDTH {
                        return Err(FenError::RankWidth { rank: y + 1 });
                    }
                    continue;
                }

                let location = Location::from_xy(x, y).ok_or(FenError::RankWidth { rank: y + 1 })?;
                let piece = Piece::from_fen_char(current, location).ok_or(FenError::UnknownPiece(current))?;
                board.set(piece);
                x += 1;
            }

            if x != Self::WIDTH {
                return Err(FenError::RankWidth { rank: y + 1 });
            }
        }

        Ok(board)
    }

    pub fn opening() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 9] = [Chariot, Horse, Elephant, Advisor, General, Advisor, Elephant, Horse, Chariot];

        let mut board = Self::new();
        for location in Location::all() {
            let side = if Side::Red.owns_half(location) { Side::Red } else { Side::Black };
            let home = location.normalize(side.is_red());
            let kind = match (home.y(), home.x()) {
                (0, x) => BACK_RANK[x as usize],
                (2, 1 | 7) => Cannon,
                (3, x) if x % 2 == 0 => Soldier,
                _ => continue,
            };
            board.set(Piece::new(kind, side, location));
        }
        board
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for y in (0..Self::HEIGHT).rev() {
            let mut empty = 0;
            for x in 0..Self::WIDTH {
                match self.cell(x, y).fen_char() {
                    Some(c) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(c);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if y > 0 {
                fen.push('/');
            }
        }
        fen
    }

    pub fn get(&self, location: Location) -> Piece {
        self.pieces[location.index()]
    }

    /// Places `piece` on the cell it records, replacing the previous occupant.
    pub fn set(&mut self, piece: Piece) {
        self.pieces[piece.location().index()] = piece;
    }

    pub fn clear(&mut self, location: Location) {
        self.set(Piece::empty(location));
    }

    /// Moves the occupant of `mv.from` onto `mv.to`. Returns the moved piece
    /// as it was before the move together with the previous occupant of
    /// `mv.to`, which is everything [`Board::undo`] needs.
    pub fn play(&mut self, mv: Move) -> (Piece, Piece) {
        let piece = self.get(mv.from);
        let capture = self.get(mv.to);

        let mut moved = piece;
        moved.relocate(mv.to);
        self.clear(mv.from);
        self.set(moved);

        (piece, capture)
    }

    pub fn undo(&mut self, piece: Piece, capture: Piece) {
        self.set(capture);
        self.set(piece);
    }

    fn cell(&self, x: i8, y: i8) -> &Piece {
        &self.pieces[(x + y * Self::WIDTH) as usize]
    }

    /// Every non-empty cell.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(|piece| !piece.is_empty())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    pub fn find_general(&self, side: Side) -> Option<Location> {
        self.pieces()
            .find(|piece| piece.kind() == PieceKind::General && piece.belongs_to(side))
            .map(Piece::location)
    }

    pub fn count_generals(&self, side: Side) -> usize {
        self.pieces()
            .filter(|piece| piece.kind() == PieceKind::General && piece.belongs_to(side))
            .count()
    }

    /// True when both generals share a file with nothing between them.
    pub fn generals_facing(&self) -> bool {
        let (Some(red), Some(black)) = (self.find_general(Side::Red), self.find_general(Side::Black)) else {
            return false;
        };
        if red.x() != black.x() {
            return false;
        }

        let (low, high) = (red.y().min(black.y()), red.y().max(black.y()));
        ((low + 1)..high).all(|y| self.cell(red.x(), y).is_empty())
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + '_ {
        struct Impl<'a>(&'a Board, DisplayFormat);
        return Impl(self, format);

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(board, format) = self;
                for y in (0..Board::HEIGHT).rev() {
                    write!(f, "{:>2}", y + 1)?;
                    for x in 0..Board::WIDTH {
                        write!(f, " {}", board.cell(x, y).display(format))?;
                    }
                    writeln!(f)?;
                }
                write!(f, "  ")?;
                for char in 'a'..='i' {
                    write!(f, "  {char}")?;
                }
                writeln!(f)
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Location> for Board {
    type Output = Piece;
    fn index(&self, index: Location) -> &Self::Output {
        &self.pieces[index.index()]
    }
}

impl Display for Board {
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
    fn opening_layout() {
        let board = Board::opening();
        assert_eq!(90, board.cells().count());
        assert_eq!(32, board.pieces().count());
        assert_eq!(Some(at("e1")), board.find_general(Side::Red));
        assert_eq!(Some(at("e10")), board.find_general(Side::Black));

        let cannon = board[at("b3")];
        assert_eq!(PieceKind::Cannon, cannon.kind());
        assert_eq!(Some(Side::Red), cannon.side());
        assert_eq!(PieceKind::Soldier, board[at("i7")].kind());
        assert!(board[at("i7")].belongs_to(Side::Black));
        assert!(board[at("e5")].is_empty());

        for location in Location::all() {
            assert_eq!(location, board[location].location());
        }
    }

    #[test]
    fn fen_round_trip() {
        let board = Board::opening();
        assert_eq!(Board::OPENING, board.fen());
        assert_eq!(board, Board::from_fen(Board::OPENING).unwrap());

        let fen = "4k4/9/9/9/9/9/9/9/9/R3K4";
        assert_eq!(fen, Board::from_fen(fen).unwrap().fen());
    }

    #[test]
    fn fen_errors() {
        assert_eq!(Err(FenError::RankCount(2)), Board::from_fen("9/9"));
        assert_eq!(
            Err(FenError::RankWidth { rank: 10 }),
            Board::from_fen("8/9/9/9/9/9/9/9/9/9")
        );
        assert_eq!(
            Err(FenError::RankWidth { rank: 1 }),
            Board::from_fen("9/9/9/9/9/9/9/9/9/RRRRRRRRRR")
        );
        assert_eq!(
            Err(FenError::UnknownPiece('x')),
            Board::from_fen("x8/9/9/9/9/9/9/9/9/9")
        );
    }

    #[test]
    fn set_and_clear() {
        let mut board = Board::new();
        board.set(Piece::new(PieceKind::Horse, Side::Black, at("c5")));
        assert_eq!(PieceKind::Horse, board.get(at("c5")).kind());

        board.set(Piece::new(PieceKind::Chariot, Side::Red, at("c5")));
        assert_eq!(PieceKind::Chariot, board.get(at("c5")).kind());
        assert_eq!(1, board.pieces().count());

        board.clear(at("c5"));
        assert!(board.get(at("c5")).is_empty());
        assert_eq!(at("c5"), board.get(at("c5")).location());
    }

    #[test]
    fn play_then_undo_restores() {
        let mut board = Board::opening();
        let before = board.clone();
        let mv = Move::new(at("b3"), at("b10"));

        let (piece, capture) = board.play(mv);
        assert_eq!(PieceKind::Cannon, board[at("b10")].kind());
        assert_eq!(at("b10"), board[at("b10")].location());
        assert!(board[at("b3")].is_empty());
        assert_eq!(PieceKind::Horse, capture.kind());

        board.undo(piece, capture);
        assert_eq!(before, board);
    }

    #[test]
    fn generals_facing() {
        let board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/4K4").unwrap();
        assert!(board.generals_facing());

        let board = Board::from_fen("4k4/9/9/9/4p4/9/9/9/9/4K4").unwrap();
        assert!(!board.generals_facing());

        let board = Board::from_fen("3k5/9/9/9/9/9/9/9/9/4K4").unwrap();
        assert!(!board.generals_facing());

        assert!(!Board::opening().generals_facing());
    }
}
