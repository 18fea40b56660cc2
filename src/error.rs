use crate::location::Location;
use crate::piece::Side;
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LocationError {
    #[error("'{0}' is not a square, expected a file a-i followed by a rank 1-10")]
    Malformed(String),
    #[error("({0}, {1}) is outside the board")]
    OutOfRange(i8, i8),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("'{0}' is not a side, expected 'red' or 'black'")]
pub struct SideError(pub String);

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FenError {
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("rank {rank} does not have exactly 9 files")]
    RankWidth { rank: i8 },
    #[error("expected 10 ranks, found {0}")]
    RankCount(usize),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SetupError {
    #[error("board text is invalid: {0}")]
    Fen(#[from] FenError),
    #[error("{side} must have exactly one general, found {count}")]
    GeneralCount { side: Side, count: usize },
    #[error("the generals face each other on an open file")]
    GeneralsFacing,
    #[error("{0} is in check but it is not their move")]
    WaitingSideInCheck(Side),
}

/// Reasons a move is refused. [`crate::game::Game::make_move`] collapses all of
/// them into `false`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error(transparent)]
    MalformedSquare(#[from] LocationError),
    #[error("the game is already decided")]
    GameDecided,
    #[error("{side} is to move but {at} does not hold a {side} piece")]
    OutOfTurn { side: Side, at: Location },
    #[error("{from} to {to} breaks the movement rules")]
    IllegalMove { from: Location, to: Location },
    #[error("{from} to {to} would leave the general exposed")]
    SelfCheck { from: Location, to: Location },
}
