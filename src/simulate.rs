use crate::board::Board;
use crate::location::Move;
use crate::piece::{Piece, Side};
use crate::threats;
use std::ops::Deref;

/// A move played on a borrowed board that is taken back when the guard drops,
/// whichever way the scope is left.
pub struct Simulation<'a> {
    board: &'a mut Board,
    piece: Piece,
    capture: Piece,
}

impl<'a> Simulation<'a> {
    pub fn begin(board: &'a mut Board, mv: Move) -> Self {
        let (piece, capture) = board.play(mv);
        Self { board, piece, capture }
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.undo(self.piece, self.capture);
    }
}

/// Evaluates `predicate` on the board as it would be after `mv`.
pub fn simulate<F>(board: &mut Board, mv: Move, predicate: F) -> bool
where
    F: FnOnce(&Board) -> bool,
{
    let simulation = Simulation::begin(board, mv);
    predicate(&simulation)
}

/// True when `mv` leaves `side`'s general unattacked and the generals not
/// facing each other.
pub fn is_safe(board: &mut Board, mv: Move, side: Side) -> bool {
    simulate(board, mv, |board| !threats::in_check(board, side) && !board.generals_facing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::piece::PieceKind;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn mv(from: &str, to: &str) -> Move {
        Move::new(Location::parse(from).unwrap(), Location::parse(to).unwrap())
    }

    #[test]
    fn board_restored_after_capture() {
        let mut board = Board::opening();
        let before = board.clone();

        let seen = simulate(&mut board, mv("b3", "b10"), |board| {
            board[Location::parse("b10").unwrap()].kind() == PieceKind::Cannon
        });

        assert!(seen);
        assert_eq!(before, board);
    }

    #[test]
    fn board_restored_when_predicate_fails() {
        let mut board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/P3K4").unwrap();
        let before = board.clone();

        assert!(!simulate(&mut board, mv("a1", "a2"), |_| false));
        assert_eq!(before, board);
    }

    #[test]
    fn board_restored_on_panic() {
        let mut board = Board::opening();
        let before = board.clone();

        let result = catch_unwind(AssertUnwindSafe(|| {
            simulate(&mut board, mv("h1", "g3"), |_| panic!("predicate failed"))
        }));

        assert!(result.is_err());
        assert_eq!(before, board);
    }

    #[test]
    fn river_flag_is_restored() {
        let mut board = Board::from_fen("4k4/9/9/9/9/4P4/9/9/9/3K5").unwrap();
        let before = board.clone();

        assert!(simulate(&mut board, mv("e5", "e6"), |board| {
            board[Location::parse("e6").unwrap()].has_crossed_river()
        }));
        assert!(!board[Location::parse("e5").unwrap()].has_crossed_river());
        assert_eq!(before, board);
    }

    #[test]
    fn safety() {
        // the crossed black soldier screens the two generals
        let mut board = Board::from_fen("4k4/9/9/9/9/4p4/9/9/9/4K4").unwrap();
        assert!(!is_safe(&mut board, mv("e5", "d5"), Side::Black));
        assert!(is_safe(&mut board, mv("e5", "e4"), Side::Black));

        let mut board = Board::from_fen("4k4/9/9/9/4R4/9/9/9/9/3K5").unwrap();
        assert!(!is_safe(&mut board, mv("e10", "e9"), Side::Black));
        assert!(!is_safe(&mut board, mv("e10", "d10"), Side::Black));
        assert!(is_safe(&mut board, mv("e10", "f10"), Side::Black));
    }
}
