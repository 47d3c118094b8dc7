use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::bishop_moves::bishop_targets;
use crate::moves::rook_moves::rook_targets;

#[inline]
pub fn queen_targets(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    rook_targets(board, from, color, out);
    bishop_targets(board, from, color, out);
}

#[cfg(test)]
mod tests {
    use super::queen_targets;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Square};

    #[test]
    fn queen_in_center_of_empty_board_has_twenty_seven_targets() {
        let board = Board::empty();
        let d4 = Square::new(4, 3).expect("d4 is on the board");
        let mut out = Vec::new();
        queen_targets(&board, d4, Color::Black, &mut out);
        assert_eq!(out.len(), 27);
    }
}
