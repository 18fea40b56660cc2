use crate::board::Board;
use crate::display_format::{DisplayFormat, Layout};
use crate::error::{MoveError, SetupError};
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};
use crate::{rules, simulate, threats};
use log::{debug, info, trace};
use std::fmt::{Display, Formatter};

#[derive(Clone)]
pub struct Game {
    board: Board,
    turn: Side,
    red_in_check: bool,
    black_in_check: bool,
    state: GameState,
    history: Vec<(Move, Piece)>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Unfinished,
    RedWon,
    BlackWon,
}

impl GameState {
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Red => Self::RedWon,
            Side::Black => Self::BlackWon,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::Unfinished => None,
            Self::RedWon => Some(Side::Red),
            Self::BlackWon => Some(Side::Black),
        }
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display {
        let general = |side| Piece::new(PieceKind::General, side, Location::new());
        match self {
            Self::Unfinished => "unfinished".to_owned(),
            Self::RedWon => format!("{} won by checkmating black", general(Side::Red).display(format)),
            Self::BlackWon => format!("{} won by checkmating red", general(Side::Black).display(format)),
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Unfinished => "UNFINISHED",
            Self::RedWon => "RED_WON",
            Self::BlackWon => "BLACK_WON",
        })
    }
}

impl Game {
    /// Starts a game from an arbitrary position. Each side needs exactly one
    /// general and the side that just moved may not be left in check. A side
    /// to move with no way out has already lost.
    pub fn new(board: Board, turn: Side) -> Result<Self, SetupError> {
        for side in Side::ALL {
            let count = board.count_generals(side);
            if count != 1 {
                return Err(SetupError::GeneralCount { side, count });
            }
        }

        if board.generals_facing() {
            return Err(SetupError::GeneralsFacing);
        }
        if threats::in_check(&board, turn.opponent()) {
            return Err(SetupError::WaitingSideInCheck(turn.opponent()));
        }

        let mut game = Self {
            board,
            turn,
            red_in_check: false,
            black_in_check: false,
            state: GameState::Unfinished,
            history: Vec::new(),
        };
        game.evaluate(turn.opponent());
        game.evaluate(turn);
        Ok(game)
    }

    pub fn opening() -> Self {
        Self {
            board: Board::opening(),
            turn: Side::Red,
            red_in_check: false,
            black_in_check: false,
            state: GameState::Unfinished,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str, turn: Side) -> Result<Self, SetupError> {
        Self::new(Board::from_fen(fen)?, turn)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.turn
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// Every committed move with the previous occupant of its destination.
    pub fn history(&self) -> &[(Move, Piece)] {
        &self.history
    }

    pub fn red_in_check(&self) -> bool {
        self.red_in_check
    }

    pub fn black_in_check(&self) -> bool {
        self.black_in_check
    }

    /// Moves a piece given two squares in file+rank notation such as `e1`.
    /// Reports failure without saying why; see [`Game::play`] for the reason.
    pub fn make_move(&mut self, from: &str, to: &str) -> bool {
        match self.play_notation(from, to) {
            Ok(()) => true,
            Err(err) => {
                debug!("rejected {from} to {to}: {err}");
                false
            }
        }
    }

    pub fn play_notation(&mut self, from: &str, to: &str) -> Result<(), MoveError> {
        let mv = Move::new(from.parse()?, to.parse()?);
        self.play(mv)
    }

    pub fn play(&mut self, mv: Move) -> Result<(), MoveError> {
        self.validate(mv)?;

        let (piece, capture) = self.board.play(mv);
        self.history.push((mv, capture));
        trace!("{} played {mv} with {piece}", self.turn);

        let mover = self.turn;
        self.turn = mover.opponent();

        self.evaluate(self.turn);
        self.evaluate(mover);
        Ok(())
    }

    fn validate(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.state != GameState::Unfinished {
            return Err(MoveError::GameDecided);
        }

        let side = self.turn;
        if !self.board[mv.from].belongs_to(side) {
            return Err(MoveError::OutOfTurn { side, at: mv.from });
        }

        let (from, to) = (mv.from, mv.to);
        if !rules::is_legal(&mut self.board, mv) {
            return Err(MoveError::IllegalMove { from, to });
        }
        if !simulate::is_safe(&mut self.board, mv, side) {
            return Err(MoveError::SelfCheck { from, to });
        }
        Ok(())
    }

    /// Evaluates `side_text` ("red" or "black", any case) against the live
    /// board. Like the other outcome checks after a move, this refreshes the
    /// stored check flag for that side and may end the game when the side has
    /// no way out. Unknown side names are never in check.
    pub fn is_in_check(&mut self, side_text: &str) -> bool {
        match side_text.parse::<Side>() {
            Ok(side) => self.evaluate(side),
            Err(err) => {
                debug!("{err}");
                false
            }
        }
    }

    fn evaluate(&mut self, side: Side) -> bool {
        let check = threats::in_check(&self.board, side);
        match side {
            Side::Red => self.red_in_check = check,
            Side::Black => self.black_in_check = check,
        }
        trace!("{side} in check: {check}");

        if self.state == GameState::Unfinished
            && (check || side == self.turn)
            && !has_legal_move(&mut self.board, side)
        {
            self.state = GameState::won_by(side.opponent());
            info!("{side} has no legal move, {} wins", side.opponent());
        }

        check
    }

    /// Every move the side to move could make right now.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut board = self.board.clone();
        legal_moves(&mut board, self.turn)
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + '_ {
        struct Impl<'a>(&'a Game, DisplayFormat);
        return Impl(self, format);

        impl Impl<'_> {
            fn format_row(&self, f: &mut Formatter<'_>, y: i8) -> std::fmt::Result {
                let &Self(game, format) = self;
                write!(f, "{:>2}", y + 1)?;

                let last = game.history.last().map(|&(mv, _)| mv);
                for x in 0..Board::WIDTH {
                    let Some(location) = Location::from_xy(x, y) else {
                        continue;
                    };
                    let piece = game.board[location];
                    let text = piece.display(format).to_string();

                    match last {
                        Some(mv) if mv.to == location => write!(f, " {}", format.emphasise(&text))?,
                        Some(mv) if mv.from == location && piece.is_empty() => write!(f, " ╶╴")?,
                        _ => write!(f, " {text}")?,
                    }
                }

                Ok(())
            }

            fn format_captured(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(game, format) = self;
                let captured: Vec<Piece> = game
                    .history
                    .iter()
                    .map(|&(_, capture)| capture)
                    .filter(|capture| !capture.is_empty())
                    .collect();
                if captured.is_empty() {
                    return Ok(());
                }

                write!(f, "captured:")?;
                for piece in captured {
                    write!(f, " {}", piece.display(format))?;
                }
                writeln!(f)
            }
        }

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(game, format) = self;
                write!(f, "{}", game.board.fen())?;

                if format.layout == Layout::Line {
                    return write!(f, " {}", game.turn.to_string().to_ascii_lowercase());
                }

                writeln!(f)?;

                for y in (0..Board::HEIGHT).rev() {
                    self.format_row(f, y)?;
                    writeln!(f)?;
                }

                write!(f, "  ")?;
                for char in 'a'..='i' {
                    write!(f, "  {char}")?;
                }
                writeln!(f)?;
                self.format_captured(f)?;

                if let Some(&(mv, _)) = game.history.last() {
                    let piece = game.board[mv.to].display(format);
                    write!(f, "({}) {mv} {piece} - ", game.history.len())?;
                }

                if game.state != GameState::Unfinished {
                    write!(f, "{}", game.state.display(format))?;
                } else {
                    let check = match game.turn {
                        Side::Red => game.red_in_check,
                        Side::Black => game.black_in_check,
                    };
                    let general = Piece::new(PieceKind::General, game.turn, Location::new());
                    let general = general.display(format);
                    write!(f, "{general} {} - ", if check { "in check" } else { "to play" })?;
                    write!(f, "{} legal moves", game.legal_moves().len())?;
                }

                writeln!(f)
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::opening()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::plain()))
    }
}

/// Standard starting position with red to move.
pub fn new_game() -> Game {
    Game::opening()
}

fn candidate_moves(board: &Board, side: Side) -> Vec<Move> {
    board
        .pieces()
        .filter(|piece| piece.belongs_to(side))
        .flat_map(|piece| {
            let from = piece.location();
            rules::destinations(board, from).into_iter().map(move |to| Move::new(from, to))
        })
        .collect()
}

fn legal_moves(board: &mut Board, side: Side) -> Vec<Move> {
    candidate_moves(board, side)
        .into_iter()
        .filter(|&mv| rules::is_legal(board, mv) && simulate::is_safe(board, mv, side))
        .collect()
}

/// Tries each candidate of each piece until one leaves `side` safe.
fn has_legal_move(board: &mut Board, side: Side) -> bool {
    candidate_moves(board, side)
        .into_iter()
        .any(|mv| rules::is_legal(board, mv) && simulate::is_safe(board, mv, side))
}
