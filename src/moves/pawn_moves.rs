use crate::game_state::board::Board;
use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

/// Forward pushes: one step into an empty square, and two steps from the
/// starting row when both squares ahead are empty.
pub fn pawn_pushes(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    let step = color.forward();
    let Some(one) = from.offset(step, 0) else {
        return;
    };
    if !board.is_empty(one) {
        return;
    }
    out.push(one);

    if from.row() == pawn_start_row(color) {
        if let Some(two) = one.offset(step, 0) {
            if board.is_empty(two) {
                out.push(two);
            }
        }
    }
}

/// Diagonal captures onto opposing pieces, plus the en-passant target even
/// though that square is empty, provided the passed pawn stands beside us.
pub fn pawn_captures(
    board: &Board,
    from: Square,
    color: Color,
    en_passant_target: Option<Square>,
    out: &mut Vec<Square>,
) {
    let step = color.forward();
    for d_col in [-1, 1] {
        let Some(to) = from.offset(step, d_col) else {
            continue;
        };
        match board.get(to) {
            Some(piece) if piece.color != color => out.push(to),
            None if en_passant_target == Some(to)
                && board.get(Square::at(from.row(), to.col()))
                    == Some(Piece::new(PieceKind::Pawn, color.opposite())) =>
            {
                out.push(to)
            }
            _ => {}
        }
    }
}

/// Squares a pawn threatens, whether or not anything stands on them.
pub fn pawn_attacks(from: Square, color: Color, out: &mut Vec<Square>) {
    let step = color.forward();
    for d_col in [-1, 1] {
        if let Some(to) = from.offset(step, d_col) {
            out.push(to);
        }
    }
}
