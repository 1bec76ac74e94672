/*
 * Board - the 10 x 9 grid
 *
 * - red on rows 0-3, blue on rows 6-9
 * - cells hold Option<PieceId>; pieces live in their Side
 * - relocate/restore: the only writers of a piece square and its cell
 */

use std::{fmt, str::FromStr};

use crate::{
    constant::{BLUE_PALACE_ROWS, BOARD_HEIGHT, BOARD_WIDTH, PALACE_COLS, PALACE_EDGE_MIDPOINTS, RED_PALACE_ROWS},
    error::SquareParseError,
    piece::{Chess, PieceId, PieceKind, Player},
    side::Sides,
};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl From<(i32, i32)> for Square {
    fn from(value: (i32, i32)) -> Self {
        Square::new(value.0, value.1)
    }
}

impl Square {
    // What the notation adapter hands back for anything it cannot place on the board
    pub const OFF_BOARD: Square = Square { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Self {
        Square { row, col }
    }
    pub fn up(&self, delta: i32) -> Self {
        Square::new(self.row - delta, self.col)
    }
    pub fn down(&self, delta: i32) -> Self {
        Square::new(self.row + delta, self.col)
    }
    pub fn left(&self, delta: i32) -> Self {
        Square::new(self.row, self.col - delta)
    }
    pub fn right(&self, delta: i32) -> Self {
        Square::new(self.row, self.col + delta)
    }
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Square::new(self.row + d_row, self.col + d_col)
    }
}

// "a1" is row 0 column 0, "i10" is row 9 column 8
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(SquareParseError::Empty)?;
        if !('a'..='i').contains(&file) {
            return Err(SquareParseError::BadFile(file));
        }
        let rank_str = chars.as_str();
        // plain digits only: no sign, no leading zero
        if rank_str.starts_with('0') || !rank_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SquareParseError::BadRank(rank_str.to_owned()));
        }
        let rank: i32 = rank_str
            .parse()
            .map_err(|_| SquareParseError::BadRank(rank_str.to_owned()))?;
        if !(1..=BOARD_HEIGHT).contains(&rank) {
            return Err(SquareParseError::BadRank(rank_str.to_owned()));
        }
        Ok(Square::new(rank - 1, file as i32 - 'a' as i32))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if in_board(*self) {
            write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

/// Notation adapter: translates "e9" style text into a square.
///
/// Malformed or out-of-range input yields [`Square::OFF_BOARD`], which
/// `Game::make_move` rejects like any other illegal request.
pub fn translate_space(location: &str) -> Square {
    location.trim().parse().unwrap_or(Square::OFF_BOARD)
}

// Square is on the board
pub fn in_board(pos: Square) -> bool {
    pos.row >= 0 && pos.row < BOARD_HEIGHT && pos.col >= 0 && pos.col < BOARD_WIDTH
}

// Square is inside either palace
pub fn in_palace(pos: Square) -> bool {
    PALACE_COLS.contains(&pos.col) && (RED_PALACE_ROWS.contains(&pos.row) || BLUE_PALACE_ROWS.contains(&pos.row))
}

// Square is inside the palace the player's general lives in
pub fn in_own_palace(pos: Square, player: Player) -> bool {
    let rows = match player {
        Player::Red => RED_PALACE_ROWS,
        Player::Blue => BLUE_PALACE_ROWS,
    };
    PALACE_COLS.contains(&pos.col) && rows.contains(&pos.row)
}

// Palace corner or center: a diagonal line runs through it
pub fn on_palace_diagonal(pos: Square) -> bool {
    in_palace(pos) && !PALACE_EDGE_MIDPOINTS.contains(&(pos.row, pos.col))
}

/// Everything one relocation changed, enough to put it back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Relocation {
    pub piece: PieceId,
    pub from: Option<Square>,
    pub to: Square,
    pub captured: Option<PieceId>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [[Option<PieceId>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }

    pub fn piece_at(&self, pos: Square) -> Option<PieceId> {
        if in_board(pos) {
            self.cells[pos.row as usize][pos.col as usize]
        } else {
            None
        }
    }

    pub fn chess_at(&self, pos: Square) -> Chess {
        self.piece_at(pos).map_or(Chess::None, |id| id.chess())
    }

    fn set(&mut self, pos: Square, piece: Option<PieceId>) {
        self.cells[pos.row as usize][pos.col as usize] = piece;
    }

    pub(crate) fn clear(&mut self, pos: Square) {
        self.set(pos, None);
    }

    // Empty or holding an enemy of `player`; never true off the board
    pub fn empty_or_enemy(&self, pos: Square, player: Player) -> bool {
        in_board(pos) && self.piece_at(pos).map_or(true, |id| id.player != player)
    }

    // On the board and empty
    pub fn is_vacant(&self, pos: Square) -> bool {
        in_board(pos) && self.piece_at(pos).is_none()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    // Every occupied square with its piece, row by row
    pub fn occupants(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|id| (Square::new(row as i32, col as i32), id)))
        })
    }

    // Read-only snapshot for renderers
    pub fn layout(&self) -> [[Chess; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        let mut layout = [[Chess::None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (pos, id) in self.occupants() {
            layout[pos.row as usize][pos.col as usize] = id.chess();
        }
        layout
    }

    pub fn general_position(&self, player: Player) -> Option<Square> {
        let rows = match player {
            Player::Red => RED_PALACE_ROWS,
            Player::Blue => BLUE_PALACE_ROWS,
        };
        for row in rows {
            for col in PALACE_COLS {
                let pos = Square::new(row, col);
                if self.chess_at(pos) == Chess::new(player, PieceKind::General) {
                    return Some(pos);
                }
            }
        }
        None
    }

    /// Moves `piece` to `to`: vacates its old square, captures whatever stands
    /// on `to`, and updates the piece's own square, all in one step.
    pub fn relocate(&mut self, sides: &mut Sides, piece: PieceId, to: Square) -> Relocation {
        let from = sides.piece(piece).square;
        if let Some(from) = from {
            self.clear(from);
        }
        let captured = self.piece_at(to);
        if let Some(captured) = captured {
            sides.piece_mut(captured).square = None;
        }
        self.set(to, Some(piece));
        sides.piece_mut(piece).square = Some(to);
        Relocation {
            piece,
            from,
            to,
            captured,
        }
    }

    // Undo a relocation; must be the most recent one still applied
    pub fn restore(&mut self, sides: &mut Sides, r: Relocation) {
        self.set(r.to, r.captured);
        if let Some(captured) = r.captured {
            sides.piece_mut(captured).square = Some(r.to);
        }
        if let Some(from) = r.from {
            self.set(from, Some(r.piece));
        }
        sides.piece_mut(r.piece).square = r.from;
    }

    // Is the player's general attacked by any opposing piece on this board
    pub fn is_checked(&self, player: Player) -> bool {
        let general = if let Some(pos) = self.general_position(player) {
            pos
        } else {
            return true;
        };
        self.occupants()
            .filter(|(_, id)| id.player == player.next())
            .any(|(pos, id)| self.candidates(id.kind, id.player, pos).contains(&general))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_HEIGHT {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..BOARD_WIDTH {
                write!(f, " {}", self.chess_at(Square::new(row, col)).fen_char())?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..BOARD_WIDTH {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}
