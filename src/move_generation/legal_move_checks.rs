//! Attack oracle: which squares a side threatens, and whether a king is in
//! check.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::moves::piece_targets::{piece_targets, TargetMode};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find(PieceKind::King, color)
}

/// True when the king of `color` is attacked. Every reachable board holds
/// one king per color: FEN import rejects anything else and no legal move
/// captures a king. Without a king the answer is `false`.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let mut targets = Vec::with_capacity(32);
    for (from, piece) in board.pieces_of(attacker_color) {
        targets.clear();
        piece_targets(board, from, piece, TargetMode::Attack, &mut targets);
        if targets.contains(&square) {
            return true;
        }
    }
    false
}

/// Every piece of `attacker_color` that attacks `square`.
pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let mut attackers = Vec::new();
    let mut targets = Vec::with_capacity(32);
    for (from, piece) in board.pieces_of(attacker_color) {
        targets.clear();
        piece_targets(board, from, piece, TargetMode::Attack, &mut targets);
        if targets.contains(&square) {
            attackers.push((from, piece.kind));
        }
    }
    attackers
}

/// The square of whichever king is currently in check, for highlighting.
pub fn checked_king_square(board: &Board) -> Option<Square> {
    [Color::White, Color::Black]
        .into_iter()
        .find(|&color| is_king_in_check(board, color))
        .and_then(|color| king_square(board, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Piece;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square should be on the board")
    }

    #[test]
    fn nothing_is_in_check_at_the_start() {
        let board = Board::starting_position();
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
        assert_eq!(checked_king_square(&board), None);
    }

    #[test]
    fn pawns_attack_empty_diagonals() {
        let board = Board::starting_position();
        // e2 pawn covers d3 and f3; d3 is empty.
        assert!(is_square_attacked(&board, sq(5, 3), Color::White));
        // Nothing of White's reaches e4.
        assert!(!is_square_attacked(&board, sq(4, 4), Color::White));
    }

    #[test]
    fn rook_ray_is_blocked_by_intervening_piece() {
        let mut board = Board::empty();
        board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq(0, 4), Some(Piece::new(PieceKind::Rook, Color::Black)));
        board.set(sq(0, 0), Some(Piece::new(PieceKind::King, Color::Black)));
        assert!(is_king_in_check(&board, Color::White));
        assert_eq!(checked_king_square(&board), Some(sq(7, 4)));

        board.set(sq(4, 4), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    fn attackers_lists_every_checker() {
        let mut board = Board::empty();
        board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq(0, 4), Some(Piece::new(PieceKind::Rook, Color::Black)));
        board.set(sq(5, 3), Some(Piece::new(PieceKind::Knight, Color::Black)));
        board.set(sq(0, 0), Some(Piece::new(PieceKind::King, Color::Black)));

        let mut attackers = attackers_to_square(&board, sq(7, 4), Color::Black);
        attackers.sort();
        assert_eq!(
            attackers,
            vec![(sq(0, 4), PieceKind::Rook), (sq(5, 3), PieceKind::Knight)]
        );
    }
}
