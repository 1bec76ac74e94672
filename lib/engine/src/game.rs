/*
 * Game - turn order, move validation, check and checkmate
 *
 * - try_move: terminal, off-board, pass, ownership, candidates, simulate, commit, flip
 * - a rejected request leaves the position untouched
 */

use std::fmt;

use tracing::{debug, info};

use crate::{
    board::{in_board, in_own_palace, translate_space, Board, Square},
    constant::{BOARD_HEIGHT, BOARD_WIDTH, FEN_MAP, START_FEN},
    error::{FenError, MoveError},
    piece::{Chess, Move, PieceId, PieceKind, Player},
    side::{Side, Sides},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Unfinished,
    RedWon,
    BlueWon,
}

impl GameState {
    pub fn won_by(player: Player) -> GameState {
        match player {
            Player::Red => GameState::RedWon,
            Player::Blue => GameState::BlueWon,
        }
    }
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::Unfinished => None,
            GameState::RedWon => Some(Player::Red),
            GameState::BlueWon => Some(Player::Blue),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameState::Unfinished => "UNFINISHED",
            GameState::RedWon => "RED_WON",
            GameState::BlueWon => "BLUE_WON",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    sides: Sides,
    turn: Player,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

// Relocate, ask whether the mover's general is attacked, put everything back
fn leaves_in_check(board: &mut Board, sides: &mut Sides, piece: PieceId, to: Square) -> bool {
    let r = board.relocate(sides, piece, to);
    let checked = board.is_checked(piece.player);
    board.restore(sides, r);
    checked
}

// Candidates of one piece that are actually playable
fn legal_targets(board: &mut Board, sides: &mut Sides, piece: PieceId, from: Square) -> Vec<Square> {
    board
        .candidates(piece.kind, piece.player, from)
        .into_iter()
        .filter(|&to| {
            board.chess_at(to).chess_type() != Some(PieceKind::General) && !leaves_in_check(board, sides, piece, to)
        })
        .collect()
}

impl Game {
    // Standard opening, blue to move
    pub fn new() -> Self {
        Game::from_fen(START_FEN).expect("opening position is well formed")
    }

    // Rows from row 0 (rank 1) to row 9, uppercase red, then "r" or "b" for the side to move.
    // Pieces come out of each side's fixed roster; roster pieces left over start captured.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::RowCount(0))?;
        let turn = match parts.next() {
            None => return Err(FenError::MissingTurn),
            Some(t) => Player::from_name(t).ok_or_else(|| FenError::BadTurn(t.to_owned()))?,
        };

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_HEIGHT as usize {
            return Err(FenError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        let mut sides = Sides::new();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0;
            for c in text.chars() {
                if let Some(n) = c.to_digit(10) {
                    col += n as i32;
                    continue;
                }
                let chess = FEN_MAP.get(&c).ok_or(FenError::UnknownPiece(c))?;
                let (Some(player), Some(kind)) = (chess.player(), chess.chess_type()) else {
                    return Err(FenError::UnknownPiece(c));
                };
                if col >= BOARD_WIDTH {
                    return Err(FenError::RowWidth(row));
                }
                let id = sides.side(player).unplaced(kind).ok_or(FenError::TooManyPieces(c))?;
                board.relocate(&mut sides, id, Square::new(row as i32, col));
                col += 1;
            }
            if col != BOARD_WIDTH {
                return Err(FenError::RowWidth(row));
            }
        }

        for player in [Player::Red, Player::Blue] {
            match sides.side(player).general().square() {
                None => return Err(FenError::MissingGeneral(player)),
                Some(pos) if !in_own_palace(pos, player) => {
                    return Err(FenError::GeneralOutsidePalace(player, pos));
                }
                Some(_) => {}
            }
        }

        Ok(Game {
            board,
            sides,
            turn,
            state: GameState::Unfinished,
        })
    }

    pub fn fen(&self) -> String {
        let mut rows = vec![];
        for row in 0..BOARD_HEIGHT {
            let mut text = String::new();
            let mut empty = 0;
            for col in 0..BOARD_WIDTH {
                match self.board.chess_at(Square::new(row, col)) {
                    Chess::None => empty += 1,
                    chess => {
                        if empty > 0 {
                            text.push_str(&empty.to_string());
                            empty = 0;
                        }
                        text.push(chess.fen_char());
                    }
                }
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            rows.push(text);
        }
        let turn = match self.turn {
            Player::Red => "r",
            Player::Blue => "b",
        };
        format!("{} {}", rows.join("/"), turn)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_layout(&self) -> [[Chess; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        self.board.layout()
    }

    pub fn side(&self, player: Player) -> &Side {
        self.sides.side(player)
    }

    pub fn current_side(&self) -> Player {
        self.turn
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    pub fn is_in_check(&self, player: Player) -> bool {
        self.board.is_checked(player)
    }

    /// Attempts a move and reports only whether it happened.
    ///
    /// `from == to` is a pass. Every rejection reason collapses to `false`;
    /// use [`Game::try_move`] to learn which one applied.
    pub fn make_move(&mut self, from: Square, to: Square) -> bool {
        match self.try_move(from, to) {
            Ok(_) => true,
            Err(e) => {
                debug!(%from, %to, reason = %e, "move rejected");
                false
            }
        }
    }

    // Same as make_move with "a1"-style squares; unreadable squares are rejected
    pub fn make_move_notation(&mut self, from: &str, to: &str) -> bool {
        self.make_move(translate_space(from), translate_space(to))
    }

    pub fn try_move(&mut self, from: Square, to: Square) -> Result<Move, MoveError> {
        if self.state != GameState::Unfinished {
            return Err(MoveError::GameOver);
        }
        for pos in [from, to] {
            if !in_board(pos) {
                return Err(MoveError::OffBoard(pos));
            }
        }

        let player = self.turn;
        if from == to {
            if self.board.is_checked(player) {
                return Err(MoveError::PassInCheck);
            }
            self.turn = player.next();
            info!(%player, "pass");
            return Ok(Move::pass(player, from));
        }

        let piece = self.board.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
        if piece.player != player {
            return Err(MoveError::NotYourPiece(from, player));
        }
        if !self.board.candidates(piece.kind, player, from).contains(&to) {
            return Err(MoveError::Unreachable(from, to));
        }
        let capture = self.board.chess_at(to);
        if capture.chess_type() == Some(PieceKind::General) {
            return Err(MoveError::CapturesGeneral(to));
        }
        if leaves_in_check(&mut self.board, &mut self.sides, piece, to) {
            return Err(MoveError::SelfCheck(player));
        }

        self.board.relocate(&mut self.sides, piece, to);
        self.turn = player.next();
        let m = Move {
            player,
            from,
            to,
            chess: piece.chess(),
            capture,
        };
        info!(%player, kind = %piece.kind, %from, %to, capture = ?capture.chess_type(), "move");

        self.post_move_check();
        Ok(m)
    }

    // Runs after every committed move: is the side now to move checkmated
    fn post_move_check(&mut self) {
        let player = self.turn;
        if !self.board.is_checked(player) {
            return;
        }
        if self.has_escape(player) {
            info!(%player, "check");
        } else {
            self.state = GameState::won_by(player.next());
            info!(%player, state = %self.state, "checkmate");
        }
    }

    // Tries every (piece, candidate) pair of the side; stops at the first one that leaves it safe
    fn has_escape(&mut self, player: Player) -> bool {
        let pieces: Vec<(PieceId, Square)> = self
            .sides
            .side(player)
            .on_board()
            .filter_map(|p| p.square().map(|pos| (p.id(), pos)))
            .collect();
        pieces
            .into_iter()
            .any(|(piece, from)| !legal_targets(&mut self.board, &mut self.sides, piece, from).is_empty())
    }

    // Every playable move of the side to move, passes excluded
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state != GameState::Unfinished {
            return vec![];
        }
        let mut board = self.board.clone();
        let mut sides = self.sides.clone();
        let player = self.turn;
        let pieces: Vec<(PieceId, Square)> = sides
            .side(player)
            .on_board()
            .filter_map(|p| p.square().map(|pos| (p.id(), pos)))
            .collect();

        let mut moves = vec![];
        for (piece, from) in pieces {
            for to in legal_targets(&mut board, &mut sides, piece, from) {
                moves.push(Move {
                    player,
                    from,
                    to,
                    chess: piece.chess(),
                    capture: board.chess_at(to),
                });
            }
        }
        moves
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        write!(f, "turn: {}  state: {}", self.turn, self.state)
    }
}
