//! FEN-to-GameState parser.
//!
//! Builds a game from a Forsyth-Edwards Notation string: board layout, side
//! to move, castling rights, en-passant target and both clocks. Positions
//! without exactly one king per color, with the side not on move already in
//! check, or with an en-passant target no pawn could have produced are
//! rejected.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    for color in [Color::White, Color::Black] {
        let count = board.count(PieceKind::King, color);
        if count != 1 {
            return Err(ChessErrors::KingCount { color, count });
        }
    }

    let side_to_move = parse_side_to_move(side_part)?;
    if is_king_in_check(&board, side_to_move.opposite()) {
        return Err(ChessErrors::WaitingKingInCheck(side_to_move.opposite()));
    }

    let position = Position {
        board,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_target: parse_en_passant_square(en_passant_part, &board, side_to_move)?,
    };
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock '{halfmove_part}'")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number '{fullmove_part}'")))?;

    Ok(GameState::from_parts(
        position,
        side_to_move,
        halfmove_clock,
        fullmove_number,
    ))
}

fn invalid(detail: &str) -> ChessErrors {
    ChessErrors::InvalidFen(detail.to_owned())
}

/// FEN lists rank 8 first, which is row 0 of the board.
fn parse_board(board_part: &str) -> Result<Board, ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(&format!("'{board_part}' must contain 8 ranks")));
    }

    let mut board = Board::empty();
    for (row, rank_str) in (0u8..).zip(ranks.iter()) {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                col += empty_count as u8;
                if col > 8 {
                    return Err(invalid(&format!("rank '{rank_str}' has too many files")));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;
            let square = Square::new(row, col)
                .ok_or_else(|| invalid(&format!("rank '{rank_str}' has too many files")))?;
            board.set(square, Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid(&format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side-to-move field '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.grant(Color::White, CastleSide::Kingside),
            'Q' => rights.grant(Color::White, CastleSide::Queenside),
            'k' => rights.grant(Color::Black, CastleSide::Kingside),
            'q' => rights.grant(Color::Black, CastleSide::Queenside),
            _ => return Err(invalid(&format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

/// The target must sit on the row a double push of the side that just moved
/// passes over, be empty, and have that side's pawn directly beyond it.
fn parse_en_passant_square(
    en_passant_part: &str,
    board: &Board,
    side_to_move: Color,
) -> Result<Option<Square>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let bad_target = || invalid(&format!("en-passant square '{en_passant_part}'"));
    let target = algebraic_to_square(en_passant_part).map_err(|_| bad_target())?;

    let mover = side_to_move.opposite();
    let passed_row = pawn_start_row(mover) as i8 + mover.forward();
    let pushed_pawn = target
        .offset(mover.forward(), 0)
        .and_then(|square| board.get(square));

    if target.row() as i8 != passed_row
        || !board.is_empty(target)
        || pushed_pawn != Some(Piece::new(PieceKind::Pawn, mover))
    {
        return Err(bad_target());
    }

    Ok(Some(target))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, color))
}
