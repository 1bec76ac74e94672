/* Line-protocol session: reads one command per line and drives a Game */
use crate::{
    board::{translate_space, Square},
    game::{Game, GameState},
    piece::Player,
};
use regex::Regex;
use std::{
    io::{self, BufRead, Write},
    sync::LazyLock,
};
use tracing::{debug, warn};

static POSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^position (?:fen (?P<fen>[kabnrcpKABNRCP1-9/]+ [rb])|(?P<startpos>startpos))(?: moves (?P<moves>[a-i0-9 ]+))?$"#,
    )
    .expect("position pattern compiles")
});

// "a10a9", "e2e1": two squares written back to back
static MOVE_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<from>[a-i](?:10|[1-9]))(?P<to>[a-i](?:10|[1-9]))$"#).expect("move pattern compiles")
});

static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^move (?:(?P<from>\S+) (?P<to>\S+)|(?P<pair>\S+))$"#).expect("move command pattern compiles")
});

static CHECK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^check (?P<player>red|blue)$"#).expect("check pattern compiles"));

// Splits "a10a9" into its two squares
fn split_pair(text: &str) -> Option<(Square, Square)> {
    let captures = MOVE_PAIR_RE.captures(text)?;
    Some((translate_space(&captures["from"]), translate_space(&captures["to"])))
}

pub struct Session {
    pub game: Game,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session { game: Game::new() }
    }

    pub fn with_game(game: Game) -> Self {
        Session { game }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let keep_going = self.execute(&line, &mut output)?;
            output.flush()?;
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    /// Handles one command line and writes its response.
    ///
    /// Returns `false` once the session should end (`quit`).
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        debug!(command = line, "session command");
        let cmd = line.split(' ').next().unwrap_or_default();
        match cmd {
            "" => {}
            "janggi" => self.info(out)?,
            "isready" => writeln!(out, "readyok")?,
            "position" => self.position(line),
            "move" => self.play(line, out)?,
            "pass" => {
                let at = Square::new(0, 0);
                match self.game.try_move(at, at) {
                    Ok(_) => writeln!(out, "ok")?,
                    Err(e) => writeln!(out, "illegal {e}")?,
                }
            }
            "check" => match CHECK_RE.captures(line).and_then(|c| Player::from_name(&c["player"])) {
                Some(player) => writeln!(out, "{}", self.game.is_in_check(player))?,
                None => writeln!(out, "unknown command")?,
            },
            "state" => writeln!(out, "{}", self.game.game_state())?,
            "turn" => writeln!(out, "{}", self.game.current_side())?,
            "moves" => {
                let moves: Vec<String> = self.game.legal_moves().iter().map(|m| m.to_string()).collect();
                if moves.is_empty() {
                    writeln!(out, "none")?;
                } else {
                    writeln!(out, "{}", moves.join(" "))?;
                }
            }
            "board" => write!(out, "{}", self.game.board())?,
            "fen" => writeln!(out, "{}", self.game.fen())?,
            "quit" => {
                writeln!(out, "bye")?;
                return Ok(false);
            }
            _ => writeln!(out, "unknown command")?,
        }
        Ok(true)
    }

    pub fn info<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name janggi {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id rules janggi")?;
        writeln!(out, "janggiok")
    }

    // Replaces the game; listed moves that are not legal are skipped
    pub fn position(&mut self, line: &str) {
        let Some(captures) = POSITION_RE.captures(line) else {
            warn!(line, "malformed position command");
            return;
        };
        if let Some(fen) = captures.name("fen") {
            match Game::from_fen(fen.as_str()) {
                Ok(game) => self.game = game,
                Err(e) => {
                    warn!(fen = fen.as_str(), error = %e, "position rejected");
                    return;
                }
            }
        }
        if captures.name("startpos").is_some() {
            self.game = Game::new();
        }
        if let Some(moves) = captures.name("moves") {
            for m in moves.as_str().split_whitespace() {
                match split_pair(m) {
                    Some((from, to)) => {
                        if !self.game.make_move(from, to) {
                            debug!(m, "skipping illegal listed move");
                        }
                    }
                    None => debug!(m, "skipping unreadable listed move"),
                }
            }
        }
    }

    fn play<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        let squares = MOVE_RE.captures(line).and_then(|c| match c.name("pair") {
            Some(pair) => split_pair(pair.as_str()),
            None => Some((translate_space(&c["from"]), translate_space(&c["to"]))),
        });
        let Some((from, to)) = squares else {
            return writeln!(out, "illegal unreadable move");
        };
        match self.game.try_move(from, to) {
            Ok(_) => match self.game.game_state() {
                GameState::Unfinished if self.game.is_in_check(self.game.current_side()) => writeln!(out, "ok check"),
                GameState::Unfinished => writeln!(out, "ok"),
                state => match state.winner() {
                    Some(winner) => writeln!(out, "ok checkmate {winner}"),
                    None => writeln!(out, "ok"),
                },
            },
            Err(e) => {
                debug!(%from, %to, reason = %e, "move rejected");
                writeln!(out, "illegal {e}")
            }
        }
    }
}
