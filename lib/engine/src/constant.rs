use crate::piece::{Chess, PieceKind};
use std::{collections::HashMap, sync::LazyLock};

pub const BOARD_WIDTH: i32 = 9;
pub const BOARD_HEIGHT: i32 = 10;

// Palace columns and the row span of each palace
pub const PALACE_COLS: std::ops::RangeInclusive<i32> = 3..=5;
pub const RED_PALACE_ROWS: std::ops::RangeInclusive<i32> = 0..=2;
pub const BLUE_PALACE_ROWS: std::ops::RangeInclusive<i32> = 7..=9;

// Palace squares with no diagonal line through them
pub const PALACE_EDGE_MIDPOINTS: [(i32, i32); 8] = [
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 4),
    (7, 4),
    (8, 3),
    (8, 5),
    (9, 4),
];

// Row 0 first, red at the top, blue to move
pub const START_FEN: &str = "RBNA1ABNR/4K4/1C5C1/P1P1P1P1P/9/9/p1p1p1p1p/1c5c1/4k4/rbna1abnr b";

pub static FEN_MAP: LazyLock<HashMap<char, Chess>> = LazyLock::new(|| {
    HashMap::from([
        ('K', Chess::Red(PieceKind::General)),
        ('A', Chess::Red(PieceKind::Guard)),
        ('N', Chess::Red(PieceKind::Horse)),
        ('B', Chess::Red(PieceKind::Elephant)),
        ('R', Chess::Red(PieceKind::Chariot)),
        ('C', Chess::Red(PieceKind::Cannon)),
        ('P', Chess::Red(PieceKind::Soldier)),
        ('k', Chess::Blue(PieceKind::General)),
        ('a', Chess::Blue(PieceKind::Guard)),
        ('n', Chess::Blue(PieceKind::Horse)),
        ('b', Chess::Blue(PieceKind::Elephant)),
        ('r', Chess::Blue(PieceKind::Chariot)),
        ('c', Chess::Blue(PieceKind::Cannon)),
        ('p', Chess::Blue(PieceKind::Soldier)),
    ])
});
