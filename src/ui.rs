use std::io::{self, BufRead, Write};

use anyhow::Context;
use engine::{
    board::{translate_space, Square},
    constant::{BOARD_HEIGHT, BOARD_WIDTH},
    error::MoveError,
    game::{Game, GameState},
    piece::{Chess, PieceKind, Player},
};
use regex::Regex;
use tracing::info;

const ANSI_RED: &str = "\x1b[31m";
const ANSI_BLUE: &str = "\x1b[34m";
const ANSI_RESET: &str = "\x1b[0m";

// Two columns wide, like the hanja glyphs
fn glyph(chess: Chess, plain: bool) -> String {
    if plain {
        return format!(" {}", chess.fen_char());
    }
    let Some(kind) = chess.chess_type() else {
        return "十".to_owned();
    };
    let red = chess.belong_to(Player::Red);
    let text = match kind {
        PieceKind::General => if red { "漢" } else { "楚" },
        PieceKind::Soldier => if red { "兵" } else { "卒" },
        PieceKind::Guard => "士",
        PieceKind::Horse => "馬",
        PieceKind::Elephant => "象",
        PieceKind::Chariot => "車",
        PieceKind::Cannon => "包",
    };
    let colour = if red { ANSI_RED } else { ANSI_BLUE };
    format!("{colour}{text}{ANSI_RESET}")
}

fn redrawn<W: Write>(out: &mut W, game: &Game, plain: bool) -> io::Result<()> {
    let layout = game.board_layout();
    for row in 0..BOARD_HEIGHT as usize {
        write!(out, "{:>2} ", row + 1)?;
        for chess in layout[row] {
            write!(out, "{}", glyph(chess, plain))?;
        }
        writeln!(out)?;
    }
    write!(out, "   ")?;
    for col in 0..BOARD_WIDTH {
        write!(out, " {}", (b'a' + col as u8) as char)?;
    }
    writeln!(out)
}

enum Input {
    Move(Square, Square),
    Pass,
    Moves,
    Quit,
    Unknown,
}

fn parse_input(regex: &Regex, line: &str) -> Input {
    match line.trim() {
        "pass" => Input::Pass,
        "moves" => Input::Moves,
        "quit" | "exit" => Input::Quit,
        text => match regex.captures(text) {
            Some(captures) => Input::Move(translate_space(&captures["from"]), translate_space(&captures["to"])),
            None => Input::Unknown,
        },
    }
}

trait GameExt {
    fn select(&self, pos: Square) -> bool;
    fn move_to(&mut self, from: Square, to: Square) -> String;
}

impl GameExt for Game {
    // Source square holds a piece of the side to move
    fn select(&self, pos: Square) -> bool {
        self.board().chess_at(pos).belong_to(self.current_side())
    }

    fn move_to(&mut self, from: Square, to: Square) -> String {
        if from != to && !self.select(from) {
            return format!("no {} piece on {}", self.current_side(), from);
        }
        match self.try_move(from, to) {
            Ok(m) if m.is_pass() => format!("{} passes", m.player),
            Ok(m) => {
                let mut status = match m.capture.chess_type() {
                    Some(kind) => format!("{} {}, takes {}", m.player, m, kind),
                    None => format!("{} {}", m.player, m),
                };
                if let Some(winner) = self.game_state().winner() {
                    status.push_str(&format!(". checkmate, {winner} wins"));
                } else if self.is_in_check(self.current_side()) {
                    status.push_str(&format!(". {} is in check", self.current_side()));
                }
                status
            }
            Err(MoveError::GameOver) => format!("game over: {}", self.game_state()),
            Err(e) => format!("illegal: {e}"),
        }
    }
}

pub fn ui(mut game: Game, plain: bool) -> anyhow::Result<()> {
    let regex = Regex::new(r#"^(?P<from>[a-z]\d+)\s*(?P<to>[a-z]\d+)$"#)?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    redrawn(&mut out, &game, plain)?;
    loop {
        if game.game_state() != GameState::Unfinished {
            info!(state = %game.game_state(), "game finished");
            writeln!(out, "{}", game.game_state())?;
            break;
        }
        write!(out, "{} to move> ", game.current_side())?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("reading input")? == 0 {
            break;
        }
        match parse_input(&regex, &line) {
            Input::Move(from, to) => {
                let status = game.move_to(from, to);
                redrawn(&mut out, &game, plain)?;
                writeln!(out, "{status}")?;
            }
            Input::Pass => {
                let at = game.side(game.current_side()).general().square().unwrap_or(Square::new(0, 0));
                let status = game.move_to(at, at);
                writeln!(out, "{status}")?;
            }
            Input::Moves => {
                let moves: Vec<String> = game.legal_moves().iter().map(|m| m.to_string()).collect();
                writeln!(out, "{}", moves.join(" "))?;
            }
            Input::Quit => break,
            Input::Unknown => writeln!(out, "enter '<from> <to>' (e.g. a7 a6), 'pass', 'moves' or 'quit'")?,
        }
    }
    Ok(())
}
