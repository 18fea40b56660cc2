//! Per-kind movement. Each [`PieceKind`] maps to one [`Movement`] through a
//! fixed table; [`destinations`] and [`is_legal`] dispatch through it.

use crate::board::Board;
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};
use crate::simulate;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ELEPHANT: [(i8, i8); 4] = [(2, 2), (-2, 2), (2, -2), (-2, -2)];
const HORSE: [(i8, i8); 8] = [(1, 2), (-1, 2), (1, -2), (-1, -2), (2, 1), (-2, 1), (2, -1), (-2, -1)];

pub trait Movement: Sync {
    /// Cells the piece could move to judging by geometry and obstruction only.
    /// Cells held by the piece's own side are never included.
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location>;

    fn permits(&self, board: &mut Board, mv: Move) -> bool {
        self.destinations(&board[mv.from], board).contains(&mv.to)
    }
}

pub struct General;
pub struct Advisor;
pub struct Elephant;
pub struct Horse;
pub struct Chariot;
pub struct Cannon;
pub struct Soldier;
pub struct Empty;

static MOVEMENTS: [&dyn Movement; 8] = [&General, &Advisor, &Elephant, &Horse, &Chariot, &Cannon, &Soldier, &Empty];

pub fn movement(kind: PieceKind) -> &'static dyn Movement {
    MOVEMENTS[kind as usize]
}

/// Candidate destinations of whatever occupies `location`.
pub fn destinations(board: &Board, location: Location) -> Vec<Location> {
    let piece = board[location];
    movement(piece.kind()).destinations(&piece, board)
}

/// Full legality of a single move for the piece on `mv.from`. Only the
/// general's rule looks at whether its own side ends up exposed; callers that
/// commit moves check that separately with [`simulate::is_safe`].
pub fn is_legal(board: &mut Board, mv: Move) -> bool {
    let piece = board[mv.from];
    let Some(side) = piece.side() else {
        return false;
    };
    if mv.from == mv.to || board[mv.to].belongs_to(side) {
        return false;
    }
    movement(piece.kind()).permits(board, mv)
}

fn open_for(board: &Board, side: Side, location: Location) -> bool {
    !board[location].belongs_to(side)
}

fn steps(piece: &Piece, board: &Board, offsets: &[(i8, i8)], allowed: impl Fn(Side, Location) -> bool) -> Vec<Location> {
    let Some(side) = piece.side() else {
        return Vec::new();
    };

    offsets
        .iter()
        .filter_map(|&(x, y)| piece.location().shift_xy(x, y))
        .filter(|&to| allowed(side, to) && open_for(board, side, to))
        .collect()
}

/// Walks each orthogonal ray. A cannon needs exactly one screen between it and
/// a capture and may not move through any piece otherwise.
fn slide(piece: &Piece, board: &Board, cannon: bool) -> Vec<Location> {
    let Some(side) = piece.side() else {
        return Vec::new();
    };

    let mut result = Vec::new();
    for (x, y) in ORTHOGONAL {
        let mut screened = false;
        let mut current = piece.location();

        while let Some(next) = current.shift_xy(x, y) {
            current = next;
            let occupant = board[next];

            if occupant.is_empty() {
                if !screened {
                    result.push(next);
                }
                continue;
            }

            if cannon && !screened {
                screened = true;
                continue;
            }

            if occupant.is_enemy_of(side) {
                result.push(next);
            }
            break;
        }
    }
    result
}

impl Movement for General {
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location> {
        steps(piece, board, &ORTHOGONAL, Side::palace_contains)
    }

    fn permits(&self, board: &mut Board, mv: Move) -> bool {
        let Some(side) = board[mv.from].side() else {
            return false;
        };
        self.destinations(&board[mv.from], board).contains(&mv.to) && simulate::is_safe(board, mv, side)
    }
}

impl Movement for Advisor {
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location> {
        steps(piece, board, &DIAGONAL, Side::palace_contains)
    }
}

impl Movement for Elephant {
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location> {
        let from = piece.location();
        steps(piece, board, &ELEPHANT, |side, to| {
            let eye = from.shift_xy((to.x() - from.x()) / 2, (to.y() - from.y()) / 2);
            side.owns_half(to) && eye.is_some_and(|eye| board[eye].is_empty())
        })
    }
}

impl Movement for Horse {
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location> {
        let from = piece.location();
        steps(piece, board, &HORSE, |_, to| {
            let (x, y) = (to.x() - from.x(), to.y() - from.y());
            let leg = if x.abs() == 2 { from.shift_x(x / 2) } else { from.shift_y(y / 2) };
            leg.is_some_and(|leg| board[leg].is_empty())
        })
    }
}

impl Movement for Chariot {
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location> {
        slide(piece, board, false)
    }
}

impl Movement for Cannon {
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location> {
        slide(piece, board, true)
    }
}

impl Movement for Soldier {
    fn destinations(&self, piece: &Piece, board: &Board) -> Vec<Location> {
        let Some(side) = piece.side() else {
            return Vec::new();
        };

        let forward = (0, side.forward());
        if piece.has_crossed_river() {
            steps(piece, board, &[forward, (1, 0), (-1, 0)], |_, _| true)
        } else {
            steps(piece, board, &[forward], |_, _| true)
        }
    }
}

impl Movement for Empty {
    fn destinations(&self, _: &Piece, _: &Board) -> Vec<Location> {
        Vec::new()
    }

    fn permits(&self, _: &mut Board, _: Move) -> bool {
        false
    }
}
