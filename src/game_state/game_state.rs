//! The game state machine.
//!
//! `GameState` owns the one live position of a game together with the turn,
//! clocks, move history, the current selection and any pending promotion. It
//! is the only thing that mutates the board, and it only does so through
//! `apply_move` and `choose_promotion`. Status (check, checkmate, stalemate)
//! is never stored: it is recomputed from the board and the side to move on
//! every request.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{
    attackers_to_square, checked_king_square, is_king_in_check, king_square,
};
use crate::move_generation::legal_move_generator::{
    has_any_legal_move, legal_moves, legal_moves_for_color,
};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::short_algebraic::{move_to_short_algebraic, promotion_suffix};

/// One finished ply in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub notation: String,
}

/// The most recent move, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<Piece>,
}

/// A pawn standing on its last row, waiting for `choose_promotion`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingPromotion {
    from: Square,
    square: Square,
    notation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The turn passed to the other side.
    Completed,
    /// The move reached the last row; call `choose_promotion` to finish it.
    PromotionPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    position: Position,
    side_to_move: Color,
    halfmove_clock: u16,
    fullmove_number: u16,
    history: Vec<MoveRecord>,
    last_move: Option<LastMove>,
    pending_promotion: Option<PendingPromotion>,
    selected: Option<Square>,
    selected_moves: Vec<Square>,
    start_fen: String,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard starting position, White to move, all castling rights.
    pub fn new_game() -> Self {
        Self {
            position: Position::starting_position(),
            side_to_move: Color::White,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            last_move: None,
            pending_promotion: None,
            selected: None,
            selected_moves: Vec::new(),
            start_fen: STARTING_POSITION_FEN.to_owned(),
        }
    }

    /// Builds a game that starts from an arbitrary position. Used by the FEN
    /// parser, which has already validated the kings.
    pub(crate) fn from_parts(
        position: Position,
        side_to_move: Color,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let mut game = Self {
            position,
            side_to_move,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
            last_move: None,
            pending_promotion: None,
            selected: None,
            selected_moves: Vec::new(),
            start_fen: String::new(),
        };
        game.start_fen = generate_fen(&game);
        game
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Throws the current game away and starts a new one.
    pub fn reset(&mut self) {
        *self = Self::new_game();
    }

    // --- Read-only snapshot ---

    #[inline]
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.position.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.position.en_passant_target
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn move_notations(&self) -> Vec<&str> {
        self.history.iter().map(|record| record.notation.as_str()).collect()
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Square of the pawn awaiting its promotion choice.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion.as_ref().map(|pending| pending.square)
    }

    #[inline]
    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    /// Checkmate and stalemate are judged for the side to move. While a
    /// promotion is pending the turn has not finished, so the game is
    /// ongoing.
    pub fn status(&self) -> GameStatus {
        if self.pending_promotion.is_some() {
            return GameStatus::Ongoing;
        }
        evaluate_status(&self.position, self.side_to_move)
    }

    /// Whether the side to move has its king attacked.
    #[inline]
    pub fn in_check(&self) -> bool {
        is_king_in_check(&self.position.board, self.side_to_move)
    }

    /// Square of a king that is in check, if any.
    #[inline]
    pub fn in_check_square(&self) -> Option<Square> {
        checked_king_square(&self.position.board)
    }

    /// Enemy pieces attacking the king of the side to move.
    pub fn checkers(&self) -> Vec<(Square, PieceKind)> {
        let board = &self.position.board;
        king_square(board, self.side_to_move)
            .map(|king| attackers_to_square(board, king, self.side_to_move.opposite()))
            .unwrap_or_default()
    }

    pub fn winner(&self) -> Option<Color> {
        match self.status() {
            GameStatus::Checkmate => Some(self.side_to_move.opposite()),
            _ => None,
        }
    }

    /// PGN result token for the current state.
    pub fn result_token(&self) -> &'static str {
        match (self.status(), self.winner()) {
            (GameStatus::Checkmate, Some(Color::White)) => "1-0",
            (GameStatus::Checkmate, _) => "0-1",
            (GameStatus::Stalemate, _) => "1/2-1/2",
            (GameStatus::Ongoing, _) => "*",
        }
    }

    // --- Queries driving the UI ---

    /// Legal destinations of the piece on `square`. Empty for an empty
    /// square, a piece of the side not on move, a pending promotion or a
    /// finished game.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        if self.pending_promotion.is_some() {
            return Vec::new();
        }
        match self.position.board.get(square) {
            Some(piece) if piece.color == self.side_to_move => {}
            _ => return Vec::new(),
        }
        if self.status().is_over() {
            return Vec::new();
        }
        legal_moves(&self.position, square)
    }

    /// Every legal `(from, to)` pair of the side to move.
    pub fn legal_moves_for_side(&self) -> Vec<(Square, Square)> {
        if self.pending_promotion.is_some() {
            return Vec::new();
        }
        legal_moves_for_color(&self.position, self.side_to_move)
    }

    /// Selects the piece on `square` when it belongs to the side to move and
    /// caches its legal destinations. Anything else clears the selection.
    pub fn select(&mut self, square: Square) -> &[Square] {
        let moves = self.legal_moves(square);
        let selectable = matches!(
            self.position.board.get(square),
            Some(piece) if piece.color == self.side_to_move
        ) && self.pending_promotion.is_none()
            && !self.status().is_over();

        if selectable {
            self.selected = Some(square);
            self.selected_moves = moves;
        } else {
            self.clear_selection();
        }
        &self.selected_moves
    }

    #[inline]
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.selected_moves.clear();
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    #[inline]
    pub fn selected_moves(&self) -> &[Square] {
        &self.selected_moves
    }

    // --- Mutations ---

    /// Plays `from -> to` for the side to move. The destination must be one
    /// of `legal_moves(from)`; anything else is rejected without touching the
    /// game.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, ChessErrors> {
        if let Some(pending) = &self.pending_promotion {
            return Err(ChessErrors::PromotionPending(pending.square));
        }
        let status = self.status();
        if status.is_over() {
            return Err(ChessErrors::GameOver(status));
        }

        let piece = self
            .position
            .board
            .get(from)
            .ok_or(ChessErrors::EmptySquare(from))?;
        if piece.color != self.side_to_move {
            return Err(ChessErrors::NotSideToMove {
                square: from,
                owner: piece.color,
                to_move: self.side_to_move,
            });
        }
        if !legal_moves(&self.position, from).contains(&to) {
            return Err(ChessErrors::IllegalMove { from, to });
        }

        let notation = move_to_short_algebraic(&self.position, from, to)?;
        let effects = apply_move(&mut self.position, from, to)?;

        if effects.moved.kind == PieceKind::Pawn || effects.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        self.last_move = Some(LastMove {
            from,
            to,
            piece: effects.moved.kind,
            captured: effects.captured,
        });
        self.clear_selection();

        if effects.reaches_promotion {
            self.pending_promotion = Some(PendingPromotion {
                from,
                square: to,
                notation,
            });
            return Ok(MoveOutcome::PromotionPending);
        }

        self.finalize_turn(from, to, notation);
        Ok(MoveOutcome::Completed)
    }

    /// Completes a pending promotion with a queen, rook, bishop or knight.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Result<(), ChessErrors> {
        let Some(pending) = self.pending_promotion.take() else {
            return Err(ChessErrors::NoPromotionPending);
        };
        if !kind.is_promotion_choice() {
            self.pending_promotion = Some(pending);
            return Err(ChessErrors::InvalidPromotionPiece(kind));
        }

        self.position
            .board
            .set(pending.square, Some(Piece::new(kind, self.side_to_move)));
        let notation = pending.notation + &promotion_suffix(kind);
        self.finalize_turn(pending.from, pending.square, notation);
        Ok(())
    }

    /// Hands the turn over and records the move with its check suffix.
    fn finalize_turn(&mut self, from: Square, to: Square, mut notation: String) {
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.opposite();

        match evaluate_status(&self.position, self.side_to_move) {
            GameStatus::Checkmate => notation.push('#'),
            _ if self.in_check() => notation.push('+'),
            _ => {}
        }

        self.history.push(MoveRecord { from, to, notation });
    }
}

/// Status of `color` to move in `position`: no legal move while in check is
/// checkmate, without check it is stalemate.
pub fn evaluate_status(position: &Position, color: Color) -> GameStatus {
    if has_any_legal_move(position, color) {
        GameStatus::Ongoing
    } else if is_king_in_check(&position.board, color) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn play(game: &mut GameState, moves: &[(&str, &str)]) {
        for &(from, to) in moves {
            game.apply_move(sq(from), sq(to))
                .unwrap_or_else(|e| panic!("{from}{to} should be legal: {e}"));
        }
    }

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(game.move_history().is_empty());
        assert_eq!(game.legal_moves_for_side().len(), 20);
    }

    #[test]
    fn wrong_turn_piece_has_no_moves_and_is_rejected() {
        let mut game = GameState::new_game();
        assert!(game.legal_moves(sq("e7")).is_empty());

        let err = game
            .apply_move(sq("e7"), sq("e5"))
            .expect_err("Black cannot move first");
        assert_eq!(
            err,
            ChessErrors::NotSideToMove {
                square: sq("e7"),
                owner: Color::Black,
                to_move: Color::White,
            }
        );
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn illegal_destination_is_rejected_without_mutation() {
        let mut game = GameState::new_game();
        let err = game
            .apply_move(sq("e2"), sq("e5"))
            .expect_err("pawns cannot move three squares");
        assert_eq!(
            err,
            ChessErrors::IllegalMove {
                from: sq("e2"),
                to: sq("e5"),
            }
        );
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut game = GameState::new_game();
        play(
            &mut game,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );

        assert_eq!(game.status(), GameStatus::Checkmate);
        assert!(game.in_check());
        assert_eq!(game.winner(), Some(Color::Black));
        assert_eq!(game.result_token(), "0-1");
        assert_eq!(game.in_check_square(), Some(sq("e1")));
        assert_eq!(game.checkers(), vec![(sq("h4"), PieceKind::Queen)]);
        assert_eq!(game.move_notations(), vec!["f3", "e5", "g4", "Qh4#"]);

        let err = game
            .apply_move(sq("a2"), sq("a3"))
            .expect_err("finished games are read-only");
        assert_eq!(err, ChessErrors::GameOver(GameStatus::Checkmate));
        assert!(game.legal_moves(sq("a2")).is_empty());
    }

    #[test]
    fn check_adds_plus_suffix() {
        let mut game = GameState::new_game();
        play(
            &mut game,
            &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")],
        );
        assert!(game.in_check());
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(game.move_notations().last(), Some(&"Qh5+"));
    }

    #[test]
    fn stalemate_is_detected() {
        // Black king h8, White queen to g6 stalemates.
        let mut game =
            GameState::from_fen("7k/8/8/6Q1/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        play(&mut game, &[("g5", "g6")]);
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(!game.in_check());
        assert_eq!(game.winner(), None);
        assert_eq!(game.result_token(), "1/2-1/2");
        assert_eq!(game.move_notations(), vec!["Qg6"]);
    }

    #[test]
    fn en_passant_only_on_the_immediate_reply() {
        let mut game = GameState::new_game();
        play(
            &mut game,
            &[("a2", "a3"), ("d7", "d5"), ("a3", "a4"), ("d5", "d4"), ("e2", "e4")],
        );
        assert_eq!(game.en_passant_target(), Some(sq("e3")));
        assert!(game.legal_moves(sq("d4")).contains(&sq("e3")));

        let mut captured = game.clone();
        play(&mut captured, &[("d4", "e3")]);
        assert!(captured.board().is_empty(sq("e4")));
        assert_eq!(captured.move_notations().last(), Some(&"dxe3"));
        let last = captured.last_move().expect("a move was made");
        assert_eq!(
            last.captured,
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );

        // Waiting a move forfeits the capture.
        play(&mut game, &[("h7", "h6"), ("h2", "h3")]);
        assert_eq!(game.en_passant_target(), None);
        assert!(!game.legal_moves(sq("d4")).contains(&sq("e3")));
    }

    #[test]
    fn kingside_castle_relocates_rook_and_clears_rights() {
        let mut game = GameState::new_game();
        play(
            &mut game,
            &[
                ("e2", "e4"),
                ("e7", "e5"),
                ("g1", "f3"),
                ("b8", "c6"),
                ("f1", "c4"),
                ("g8", "f6"),
            ],
        );
        assert!(game.legal_moves(sq("e1")).contains(&sq("g1")));
        play(&mut game, &[("e1", "g1")]);

        assert_eq!(
            game.board().get(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(
            game.board().get(sq("g1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert!(game.board().is_empty(sq("h1")));
        assert_eq!(
            game.castling_rights().for_color(Color::White),
            SideCastlingRights::NONE
        );
        assert_eq!(game.move_notations().last(), Some(&"O-O"));
    }

    #[test]
    fn castling_through_attacked_square_is_not_offered() {
        // Black bishop on c4 covers f1.
        let game = GameState::from_fen("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1")
            .expect("FEN should parse");
        assert!(!game.legal_moves(sq("e1")).contains(&sq("g1")));

        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
            .expect("FEN should parse");
        assert!(game.legal_moves(sq("e1")).contains(&sq("g1")));

        // Attacked destination.
        let game = GameState::from_fen("4k3/8/8/8/8/8/7b/4K2R w K - 0 1")
            .expect("FEN should parse");
        assert!(!game.legal_moves(sq("e1")).contains(&sq("g1")));

        // In check.
        let game = GameState::from_fen("4k3/8/8/b7/8/8/8/4K2R w K - 0 1")
            .expect("FEN should parse");
        assert!(!game.legal_moves(sq("e1")).contains(&sq("g1")));

        // Blocked.
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4KN1R w K - 0 1")
            .expect("FEN should parse");
        assert!(!game.legal_moves(sq("e1")).contains(&sq("g1")));

        // No right.
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1")
            .expect("FEN should parse");
        assert!(!game.legal_moves(sq("e1")).contains(&sq("g1")));
    }

    #[test]
    fn moving_a_rook_revokes_only_its_side() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        play(&mut game, &[("h1", "h2"), ("a8", "a7"), ("h2", "h1")]);
        let white = game.castling_rights().for_color(Color::White);
        let black = game.castling_rights().for_color(Color::Black);
        assert!(!white.kingside);
        assert!(white.queenside);
        assert!(black.kingside);
        assert!(!black.queenside);

        // Returning home does not restore the right.
        play(&mut game, &[("a7", "a8")]);
        let king_moves = game.legal_moves(sq("e1"));
        assert!(!king_moves.contains(&sq("g1")));
        assert!(king_moves.contains(&sq("c1")));
    }

    #[test]
    fn promotion_waits_for_choice() {
        let mut game =
            GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let outcome = game
            .apply_move(sq("b7"), sq("b8"))
            .expect("b8 push should be legal");
        assert_eq!(outcome, MoveOutcome::PromotionPending);
        assert_eq!(game.pending_promotion(), Some(sq("b8")));
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.move_history().is_empty());

        let err = game
            .apply_move(sq("e1"), sq("e2"))
            .expect_err("nothing moves during a promotion");
        assert_eq!(err, ChessErrors::PromotionPending(sq("b8")));
        assert_eq!(
            game.choose_promotion(PieceKind::King),
            Err(ChessErrors::InvalidPromotionPiece(PieceKind::King))
        );
        assert_eq!(game.pending_promotion(), Some(sq("b8")));

        game.choose_promotion(PieceKind::Queen)
            .expect("queen is a valid choice");
        assert_eq!(
            game.board().get(sq("b8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.move_notations(), vec!["b8=Q+"]);
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(
            game.choose_promotion(PieceKind::Queen),
            Err(ChessErrors::NoPromotionPending)
        );
    }

    #[test]
    fn capture_promotion_with_mate() {
        let mut game = GameState::from_fen("1r4k1/P4ppp/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        play(&mut game, &[("a7", "b8")]);
        game.choose_promotion(PieceKind::Rook)
            .expect("rook is a valid choice");
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.move_notations(), vec!["axb8=R#"]);
    }

    #[test]
    fn selection_caches_legal_moves() {
        let mut game = GameState::new_game();
        let moves = game.select(sq("g1")).to_vec();
        assert_eq!(game.selected(), Some(sq("g1")));
        assert_eq!(moves.len(), 2);

        assert!(game.select(sq("g8")).is_empty());
        assert_eq!(game.selected(), None);

        game.select(sq("e2"));
        play(&mut game, &[("e2", "e4")]);
        assert_eq!(game.selected(), None);
        assert!(game.selected_moves().is_empty());
    }

    #[test]
    fn reset_restores_the_initial_game() {
        let mut game = GameState::new_game();
        play(&mut game, &[("e2", "e4"), ("c7", "c5"), ("e1", "e2")]);
        game.select(sq("d7"));
        assert_ne!(game, GameState::new_game());

        game.reset();
        assert_eq!(game, GameState::new_game());
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        assert_eq!(game.en_passant_target(), None);
        assert!(game.move_history().is_empty());
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn clocks_follow_pawn_moves_and_captures() {
        let mut game = GameState::new_game();
        play(&mut game, &[("g1", "f3"), ("g8", "f6"), ("f3", "g1")]);
        assert_eq!(game.halfmove_clock(), 3);
        assert_eq!(game.fullmove_number(), 2);
        play(&mut game, &[("e7", "e5")]);
        assert_eq!(game.halfmove_clock(), 0);
        assert_eq!(game.fullmove_number(), 3);
    }
}
