use crate::board::Board;
use crate::location::Location;
use crate::piece::{Piece, Side};
use crate::rules;

/// Candidate destinations of every piece outside one side, keyed by piece.
pub struct ThreatMap {
    entries: Vec<(Piece, Vec<Location>)>,
}

impl ThreatMap {
    pub fn scan(board: &Board, excluded: Side) -> Self {
        let entries = board
            .pieces()
            .filter(|piece| !piece.belongs_to(excluded))
            .map(|piece| (*piece, rules::destinations(board, piece.location())))
            .collect();
        Self { entries }
    }

    pub fn attacks(&self, location: Location) -> bool {
        self.entries.iter().any(|(_, targets)| targets.contains(&location))
    }

    /// Pieces that can reach `location`.
    pub fn attackers(&self, location: Location) -> impl Iterator<Item = &Piece> + '_ {
        self.entries
            .iter()
            .filter(move |(_, targets)| targets.contains(&location))
            .map(|(piece, _)| piece)
    }

    pub fn get(&self, piece: &Piece) -> Option<&[Location]> {
        self.entries
            .iter()
            .find(|(key, _)| key == piece)
            .map(|(_, targets)| targets.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Piece, &[Location])> + '_ {
        self.entries.iter().map(|(piece, targets)| (piece, targets.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `side`'s general stands on a cell some opposing piece can reach.
pub fn in_check(board: &Board, side: Side) -> bool {
    board
        .find_general(side)
        .is_some_and(|general| ThreatMap::scan(board, side).attacks(general))
}
