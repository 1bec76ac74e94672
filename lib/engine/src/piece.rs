/*
 * Pieces
 *
 * - Player: Red or Blue, Blue moves first
 * - PieceKind: the seven kinds
 * - Chess: cell snapshot for renderers
 * - Piece / PieceId: a unit owned by a Side and the handle the Board stores
 */

use std::fmt;

use crate::board::Square;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub fn value(&self) -> usize {
        if self == &Player::Red { 0 } else { 1 }
    }
    pub fn next(&self) -> Player {
        if self == &Player::Red {
            Player::Blue
        } else {
            Player::Red
        }
    }
    // Row step of a soldier moving forward
    pub fn forward(&self) -> i32 {
        if self == &Player::Red { 1 } else { -1 }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }
    pub fn from_name(name: &str) -> Option<Player> {
        match name {
            "red" | "r" => Some(Player::Red),
            "blue" | "b" => Some(Player::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    General,  // 將 / 漢, the command piece
    Guard,    // 士
    Horse,    // 馬
    Elephant, // 象
    Chariot,  // 車
    Cannon,   // 包
    Soldier,  // 卒 / 兵
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Guard,
        PieceKind::Horse,
        PieceKind::Elephant,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    // How many of this kind a side owns
    pub fn count(&self) -> usize {
        match self {
            PieceKind::General => 1,
            PieceKind::Soldier => 5,
            _ => 2,
        }
    }

    pub fn fen_char(&self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Guard => 'a',
            PieceKind::Horse => 'n',
            PieceKind::Elephant => 'b',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }

    pub fn name_value(&self) -> &'static str {
        match self {
            PieceKind::General => "General",
            PieceKind::Guard => "Guard",
            PieceKind::Horse => "Horse",
            PieceKind::Elephant => "Elephant",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_value())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Chess {
    Red(PieceKind),
    Blue(PieceKind),
    None,
}

impl Chess {
    pub fn new(player: Player, kind: PieceKind) -> Chess {
        match player {
            Player::Red => Chess::Red(kind),
            Player::Blue => Chess::Blue(kind),
        }
    }
    pub fn belong_to(&self, player: Player) -> bool {
        Some(player) == self.player()
    }
    pub fn chess_type(&self) -> Option<PieceKind> {
        match self {
            Chess::Red(kind) | Chess::Blue(kind) => Some(*kind),
            Chess::None => None,
        }
    }
    pub fn player(&self) -> Option<Player> {
        match self {
            Chess::Red(_) => Some(Player::Red),
            Chess::Blue(_) => Some(Player::Blue),
            Chess::None => None,
        }
    }
    // FEN letter, uppercase for red; '.' for an empty square
    pub fn fen_char(&self) -> char {
        match self {
            Chess::Red(kind) => kind.fen_char().to_ascii_uppercase(),
            Chess::Blue(kind) => kind.fen_char(),
            Chess::None => '.',
        }
    }
}

/// Stable handle to one piece: its colour, kind and slot in the owning side's roster.
///
/// The board stores these instead of the pieces, so occupancy queries never
/// have to reach into a [`Side`](crate::side::Side).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceId {
    pub player: Player,
    pub kind: PieceKind,
    pub slot: usize,
}

impl PieceId {
    pub fn chess(&self) -> Chess {
        Chess::new(self.player, self.kind)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub(crate) id: PieceId,
    // Only written by Board::relocate and Board::restore
    pub(crate) square: Option<Square>,
}

impl Piece {
    pub(crate) fn new(id: PieceId) -> Self {
        Piece { id, square: None }
    }
    pub fn id(&self) -> PieceId {
        self.id
    }
    pub fn player(&self) -> Player {
        self.id.player
    }
    pub fn kind(&self) -> PieceKind {
        self.id.kind
    }
    pub fn square(&self) -> Option<Square> {
        self.square
    }
    pub fn on_board(&self) -> bool {
        self.square.is_some()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.player(), self.kind())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub player: Player, // side that moved
    pub from: Square,
    pub to: Square,
    pub chess: Chess,   // the piece that moved, Chess::None for a pass
    pub capture: Chess, // what was taken, Chess::None if nothing
}

impl Move {
    pub fn pass(player: Player, at: Square) -> Move {
        Move {
            player,
            from: at,
            to: at,
            chess: Chess::None,
            capture: Chess::None,
        }
    }
    pub fn is_pass(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_next_and_forward() {
        assert_eq!(Player::Red.next(), Player::Blue);
        assert_eq!(Player::Blue.next(), Player::Red);
        assert_eq!(Player::Red.forward(), 1);
        assert_eq!(Player::Blue.forward(), -1);
        assert_eq!(Player::from_name("blue"), Some(Player::Blue));
        assert_eq!(Player::from_name("green"), None);
    }

    #[test]
    fn test_roster_counts() {
        let total: usize = PieceKind::ALL.iter().map(|k| k.count()).sum();
        assert_eq!(total, 16);
    }

    #[test]
    fn test_chess_accessors() {
        let c = Chess::new(Player::Blue, PieceKind::Cannon);
        assert!(c.belong_to(Player::Blue));
        assert!(!c.belong_to(Player::Red));
        assert_eq!(c.chess_type(), Some(PieceKind::Cannon));
        assert_eq!(c.fen_char(), 'c');
        assert_eq!(Chess::Red(PieceKind::General).fen_char(), 'K');
        assert_eq!(Chess::None.player(), None);
    }
}
