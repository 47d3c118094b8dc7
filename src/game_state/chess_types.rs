//! Value types shared by every layer of the rules engine.
//!
//! Squares use board coordinates as seen from White: row 0 is Black's back
//! rank (rank 8), row 7 is White's back rank (rank 1), and col 0..7 maps to
//! files a..h.

use std::fmt;

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Upper-case letter used in short algebraic notation. Pawns have none.
    #[inline]
    pub const fn letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Rook => Some('R'),
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// A board cell addressed by `(row, col)`, both in `0..8`. The fields are
/// private so every square handed to the engine is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Unchecked constructor for compile-time constants. Callers guarantee
    /// both coordinates are in range.
    #[inline]
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The square `(d_row, d_col)` away, or `None` when that is off the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::at(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideCastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl SideCastlingRights {
    pub const ALL: Self = Self {
        kingside: true,
        queenside: true,
    };
    pub const NONE: Self = Self {
        kingside: false,
        queenside: false,
    };

    #[inline]
    pub fn get(self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }
}

/// Per-color castling permissions. Rights are only ever cleared while a game
/// is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    sides: [SideCastlingRights; 2],
}

impl CastlingRights {
    pub const ALL: Self = Self {
        sides: [SideCastlingRights::ALL; 2],
    };
    pub const NONE: Self = Self {
        sides: [SideCastlingRights::NONE; 2],
    };

    #[inline]
    pub fn for_color(self, color: Color) -> SideCastlingRights {
        self.sides[color.index()]
    }

    #[inline]
    pub fn has(self, color: Color, side: CastleSide) -> bool {
        self.sides[color.index()].get(side)
    }

    #[inline]
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.sides[color.index()].kingside = true,
            CastleSide::Queenside => self.sides[color.index()].queenside = true,
        }
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.sides[color.index()].kingside = false,
            CastleSide::Queenside => self.sides[color.index()].queenside = false,
        }
    }

    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.sides[color.index()] = SideCastlingRights::NONE;
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::NONE
    }
}

/// Everything move legality depends on besides the side to move. Legality
/// checks simulate on a copy of this value, never on the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

impl Position {
    pub fn starting_position() -> Self {
        Self {
            board: Board::starting_position(),
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
        }
    }
}

/// Outcome of the game for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate => write!(f, "checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}
