//! PGN export of a game's move history.
//!
//! Writes the tag section and numbered short-algebraic movetext. Games that
//! did not start from the standard position carry `SetUp`/`FEN` tags so the
//! movetext can be replayed elsewhere.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;

/// PGN with the seven-tag roster filled in from the game and today's date.
pub fn write_pgn(game_state: &GameState) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Plum Rules Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), game_state.result_token().to_owned());

    let initial_fen = game_state.start_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen.to_owned());
    }

    write_pgn_with_headers(game_state, &headers)
}

/// PGN with caller-chosen tags. The movetext ends with the `Result` tag when
/// it holds a valid token, otherwise with the game's own result.
pub fn write_pgn_with_headers(game_state: &GameState, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let (mut move_number, mut color) = movetext_origin(game_state.start_fen());
    let history = game_state.move_history();
    let mut movetext_parts = Vec::<String>::with_capacity(history.len() + 1);

    for (ply, record) in history.iter().enumerate() {
        match color {
            Color::White => movetext_parts.push(format!("{}. {}", move_number, record.notation)),
            Color::Black if ply == 0 => {
                movetext_parts.push(format!("{}... {}", move_number, record.notation))
            }
            Color::Black => movetext_parts.push(record.notation.clone()),
        }
        if color == Color::Black {
            move_number += 1;
        }
        color = color.opposite();
    }

    let result = headers
        .get("Result")
        .map(|x| x.as_str())
        .filter(|x| is_result_token(x))
        .unwrap_or_else(|| game_state.result_token());
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Move number and side of the first ply, read from the starting FEN.
fn movetext_origin(start_fen: &str) -> (u32, Color) {
    let fields: Vec<&str> = start_fen.split_whitespace().collect();
    let color = match fields.get(1) {
        Some(&"b") => Color::Black,
        _ => Color::White,
    };
    let move_number = fields
        .get(5)
        .and_then(|x| x.parse::<u32>().ok())
        .unwrap_or(1);
    (move_number, color)
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
