//! Seeded random self-play runner.
//!
//! Run with:
//! `cargo run --release --bin random_game`
//! `cargo run --release --bin random_game -- --seed 42 --plies 300 --verbose`

use std::str::FromStr;

use plum_rules::game_state::game_state::GameState;
use plum_rules::utils::pgn::write_pgn;
use plum_rules::utils::random_game::play_random_game_from;

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let seed: u64 = flag_value(&args, "--seed")?.unwrap_or(1234);
    let max_plies: u32 = flag_value(&args, "--plies")?.unwrap_or(200);

    let game = play_random_game_from(&GameState::new_game(), seed, max_plies, |game| {
        if verbose {
            if let Some(record) = game.move_history().last() {
                println!(
                    "[ply {}] {} ({}{}) fen={}",
                    game.move_history().len(),
                    record.notation,
                    record.from,
                    record.to,
                    game.get_fen()
                );
            }
        }
    })
    .map_err(|e| e.to_string())?;

    println!("{}", write_pgn(&game));
    println!("final fen: {}", game.get_fen());
    println!(
        "seed={} plies={} status={} result={}",
        seed,
        game.move_history().len(),
        game.status(),
        game.result_token()
    );
    Ok(())
}

fn flag_value<T: FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    let Some(idx) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let raw = args
        .get(idx + 1)
        .ok_or_else(|| format!("{flag} needs a value"))?;
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| format!("invalid value for {flag}: {raw}"))
}
