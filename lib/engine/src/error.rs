//! Error types for move requests, position loading and square notation.

use crate::{board::Square, piece::Player};

/// Why a move request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game already has a winner.
    #[display("game is already over")]
    GameOver,

    /// A coordinate lies outside the 10 x 9 grid.
    #[display("{} is off the board", _0)]
    OffBoard(Square),

    /// Nothing stands on the source square.
    #[display("no piece on {}", _0)]
    EmptySquare(Square),

    /// The piece on the source square belongs to the side not moving.
    #[display("piece on {} is not {}'s", _0, _1)]
    NotYourPiece(Square, Player),

    /// The destination is not among the piece's candidate squares.
    #[display("piece on {} cannot reach {}", _0, _1)]
    Unreachable(Square, Square),

    /// Generals are never taken; the game ends by checkmate first.
    #[display("cannot capture the general on {}", _0)]
    CapturesGeneral(Square),

    /// The move would leave the mover's own general attacked.
    #[display("move leaves the {} general in check", _0)]
    SelfCheck(Player),

    /// A pass was requested while the mover is in check.
    #[display("cannot pass while in check")]
    PassInCheck,
}

impl std::error::Error for MoveError {}

/// Why a position string could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum FenError {
    #[display("expected 10 rows, found {}", _0)]
    RowCount(usize),

    #[display("row {} does not cover 9 columns", _0)]
    RowWidth(usize),

    #[display("unknown piece letter '{}'", _0)]
    UnknownPiece(char),

    #[display("too many pieces for '{}'", _0)]
    TooManyPieces(char),

    #[display("missing side to move")]
    MissingTurn,

    #[display("bad side to move '{}'", _0)]
    BadTurn(String),

    #[display("{} has no general", _0)]
    MissingGeneral(Player),

    #[display("{} general at {} is outside its palace", _0, _1)]
    GeneralOutsidePalace(Player, Square),
}

impl std::error::Error for FenError {}

/// Why "a1"-style text is not a square.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SquareParseError {
    #[display("empty square")]
    Empty,

    #[display("file '{}' is not a..i", _0)]
    BadFile(char),

    #[display("rank '{}' is not 1..10", _0)]
    BadRank(String),
}

impl std::error::Error for SquareParseError {}
