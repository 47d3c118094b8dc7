use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn rook_targets(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    for (d_row, d_col) in ROOK_DIRECTIONS {
        trace_ray(board, from, color, d_row, d_col, out);
    }
}

/// Walks one ray from `from`, stopping at the first occupied square. That
/// square is kept only when it holds a piece of the other color.
pub fn trace_ray(
    board: &Board,
    from: Square,
    color: Color,
    d_row: i8,
    d_col: i8,
    out: &mut Vec<Square>,
) {
    let mut cursor = from.offset(d_row, d_col);
    while let Some(square) = cursor {
        match board.get(square) {
            None => out.push(square),
            Some(piece) => {
                if piece.color != color {
                    out.push(square);
                }
                return;
            }
        }
        cursor = square.offset(d_row, d_col);
    }
}
