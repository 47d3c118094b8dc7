//! Perft: exhaustive move-path enumeration.
//!
//! Counts every legal move sequence of a fixed length from a position and
//! tallies the kinds of the final moves. A promoting move counts once per
//! promotion piece, which is how the published reference numbers are built.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::chess_types::{Color, Piece, Position};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, MoveEffects};
use crate::move_generation::legal_move_generator::legal_moves_for_color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn tally(&mut self, effects: &MoveEffects) {
        self.nodes += 1;
        if effects.is_capture() {
            self.captures += 1;
        }
        if effects.en_passant {
            self.en_passant += 1;
        }
        if effects.castle.is_some() {
            self.castles += 1;
        }
        if effects.reaches_promotion {
            self.promotions += 1;
        }
    }
}

pub fn perft(position: &Position, side_to_move: Color, depth: u8) -> Result<PerftCounts, ChessErrors> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }

    perft_recurse(position, side_to_move, depth, &mut counts)?;
    Ok(counts)
}

/// Perft from the current position of a game. A game waiting on a promotion
/// choice has no moves to enumerate.
pub fn perft_game(game_state: &GameState, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if let Some(square) = game_state.pending_promotion() {
        return Err(ChessErrors::PromotionPending(square));
    }
    perft(game_state.position(), game_state.side_to_move(), depth)
}

fn perft_recurse(
    position: &Position,
    color: Color,
    depth: u8,
    counts: &mut PerftCounts,
) -> Result<(), ChessErrors> {
    for (from, to) in legal_moves_for_color(position, color) {
        let mut child = *position;
        let effects = apply_move(&mut child, from, to)?;

        if effects.reaches_promotion {
            for kind in PROMOTION_CHOICES {
                let mut promoted = child;
                promoted.board.set(to, Some(Piece::new(kind, color)));
                visit(&promoted, &effects, color, depth, counts)?;
            }
        } else {
            visit(&child, &effects, color, depth, counts)?;
        }
    }

    Ok(())
}

#[inline]
fn visit(
    child: &Position,
    effects: &MoveEffects,
    color: Color,
    depth: u8,
    counts: &mut PerftCounts,
) -> Result<(), ChessErrors> {
    if depth == 1 {
        counts.tally(effects);
        Ok(())
    } else {
        perft_recurse(child, color.opposite(), depth - 1, counts)
    }
}
