//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type of the crate. Two families exist:
//! - contract misuse by the caller (moving from an empty square, an illegal
//!   destination, acting while a promotion is pending or after the game has
//!   ended). The engine rejects the request and leaves its state untouched.
//! - malformed text handed to the FEN and coordinate parsers. The payload
//!   carries the offending input for display.
//!
//! There are no I/O or internal-corruption variants: no operation in the
//! crate performs I/O and no reachable position violates the board
//! invariants.

use crate::game_state::chess_types::{Color, GameStatus, PieceKind, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessErrors {
    /// The source square of a move holds no piece.
    #[error("no piece stands on {0}")]
    EmptySquare(Square),

    /// The piece on the source square belongs to the side not on move.
    #[error("the piece on {square} belongs to {owner}, but it is {to_move}'s turn")]
    NotSideToMove {
        square: Square,
        owner: Color,
        to_move: Color,
    },

    /// The destination is not among the legal moves of the source piece.
    #[error("{from} to {to} is not a legal move")]
    IllegalMove { from: Square, to: Square },

    /// A pawn is waiting on its promotion choice; nothing else may happen.
    #[error("the pawn on {0} must be promoted before play continues")]
    PromotionPending(Square),

    /// `choose_promotion` was called with no pawn waiting.
    #[error("no promotion is pending")]
    NoPromotionPending,

    /// Only queen, rook, bishop and knight are valid promotion choices.
    #[error("a pawn cannot be promoted to {0:?}")]
    InvalidPromotionPiece(PieceKind),

    /// The game ended; the board is read-only.
    #[error("the game is over ({0})")]
    GameOver(GameStatus),

    /// A square written as text (for example `e4`) could not be read.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// A FEN string was malformed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A position did not contain exactly one king of a color.
    #[error("position must contain exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    /// The side that just moved left its own king attacked.
    #[error("{0}'s king is in check although it is not {0}'s turn")]
    WaitingKingInCheck(Color),
}
