use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[inline]
pub fn knight_targets(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    step_targets(board, from, color, &KNIGHT_OFFSETS, out);
}

/// Single-step targets for jumping pieces: every on-board offset not held by
/// a piece of `color`.
pub fn step_targets(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match board.get(to) {
            Some(piece) if piece.color == color => {}
            _ => out.push(to),
        }
    }
}
