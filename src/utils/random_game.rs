//! Seeded random self-play.
//!
//! Plays uniformly random legal moves (and uniformly random promotion
//! pieces) until the game ends or a ply limit is reached. The same seed
//! always produces the same game.

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::{GameState, MoveOutcome};

/// Random game from the standard starting position.
pub fn play_random_game(seed: u64, max_plies: u32) -> Result<GameState, ChessErrors> {
    play_random_game_from(&GameState::new_game(), seed, max_plies, |_| {})
}

/// Random game from `initial`. `observe` sees the game after every
/// completed ply.
pub fn play_random_game_from(
    initial: &GameState,
    seed: u64,
    max_plies: u32,
    mut observe: impl FnMut(&GameState),
) -> Result<GameState, ChessErrors> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = initial.clone();

    for _ in 0..max_plies {
        if game.status().is_over() {
            break;
        }

        let legal_moves = game.legal_moves_for_side();
        if legal_moves.is_empty() {
            break;
        }
        let (from, to) = legal_moves[rng.random_range(0..legal_moves.len())];

        if game.apply_move(from, to)? == MoveOutcome::PromotionPending {
            let kind = PROMOTION_CHOICES
                .choose(&mut rng)
                .copied()
                .unwrap_or(PieceKind::Queen);
            game.choose_promotion(kind)?;
        }

        observe(&game);
    }

    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, GameStatus};
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::legal_move_checks::is_king_in_check;

    #[test]
    fn same_seed_same_game() {
        let first = play_random_game(7, 80).expect("random game should run");
        let second = play_random_game(7, 80).expect("random game should run");
        assert_eq!(first, second);
        assert_eq!(first.get_fen(), second.get_fen());
    }

    #[test]
    fn ply_limit_is_respected() {
        let game = play_random_game(11, 10).expect("random game should run");
        assert_eq!(game.move_history().len(), 10);
        assert_eq!(game.fullmove_number(), 6);
    }

    #[test]
    fn random_games_keep_board_invariants() {
        for seed in 0..6u64 {
            let mut plies = 0usize;
            let game = play_random_game_from(&GameState::new_game(), seed, 300, |game| {
                plies += 1;
                for color in [Color::White, Color::Black] {
                    assert_eq!(game.board().count(PieceKind::King, color), 1);
                }
                // The side that just moved never leaves its own king attacked.
                assert!(!is_king_in_check(game.board(), game.side_to_move().opposite()));
                assert_eq!(game.move_history().len(), plies);
                assert_eq!(game.pending_promotion(), None);
            })
            .expect("random game should run");

            let any_move = !game.legal_moves_for_side().is_empty();
            match game.status() {
                GameStatus::Checkmate => {
                    assert!(game.in_check());
                    assert!(!any_move);
                    assert!(game.move_notations().last().is_some_and(|n| n.ends_with('#')));
                }
                GameStatus::Stalemate => {
                    assert!(!game.in_check());
                    assert!(!any_move);
                }
                GameStatus::Ongoing => assert!(any_move),
            }
        }
    }

    #[test]
    fn legal_moves_never_expose_the_mover() {
        let mut checked = 0usize;
        play_random_game_from(&GameState::new_game(), 99, 120, |game| {
            let color = game.side_to_move();
            for (from, to) in game.legal_moves_for_side() {
                let mut scratch = *game.position();
                apply_move(&mut scratch, from, to).expect("legal move should apply");
                assert!(!is_king_in_check(&scratch.board, color));
                checked += 1;
            }
        })
        .expect("random game should run");
        assert!(checked > 0);
    }
}
