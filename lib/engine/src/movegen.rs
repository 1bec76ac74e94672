/*
 * Move generation - candidate destinations per piece kind
 *
 * - on board, empty or enemy; own-general safety is left to Game
 */

use crate::{
    board::{in_palace, on_palace_diagonal, Board, Square},
    piece::{PieceKind, Player},
};

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

// One orthogonal step, then the landing square
const HORSE_PATHS: [[(i32, i32); 2]; 8] = [
    [(1, 0), (2, 1)],
    [(1, 0), (2, -1)],
    [(-1, 0), (-2, 1)],
    [(-1, 0), (-2, -1)],
    [(0, -1), (1, -2)],
    [(0, -1), (-1, -2)],
    [(0, 1), (1, 2)],
    [(0, 1), (-1, 2)],
];

// One orthogonal step, one diagonal step, then the landing square further along that diagonal
const ELEPHANT_PATHS: [[(i32, i32); 3]; 8] = [
    [(1, 0), (2, 1), (3, 2)],
    [(1, 0), (2, -1), (3, -2)],
    [(-1, 0), (-2, 1), (-3, 2)],
    [(-1, 0), (-2, -1), (-3, -2)],
    [(0, -1), (1, -2), (2, -3)],
    [(0, -1), (-1, -2), (-2, -3)],
    [(0, 1), (1, 2), (2, 3)],
    [(0, 1), (-1, 2), (-2, 3)],
];

impl Board {
    pub fn candidates(&self, kind: PieceKind, player: Player, from: Square) -> Vec<Square> {
        let mut targets = vec![];
        match kind {
            PieceKind::General | PieceKind::Guard => {
                if on_palace_diagonal(from) {
                    for d_row in -1..=1 {
                        for d_col in -1..=1 {
                            let to = from.offset(d_row, d_col);
                            if to != from && in_palace(to) && self.empty_or_enemy(to, player) {
                                targets.push(to);
                            }
                        }
                    }
                } else {
                    for (d_row, d_col) in ORTHOGONAL {
                        let to = from.offset(d_row, d_col);
                        if in_palace(to) && self.empty_or_enemy(to, player) {
                            targets.push(to);
                        }
                    }
                }
            }
            PieceKind::Horse => {
                for path in &HORSE_PATHS {
                    self.follow_path(from, path, player, &mut targets);
                }
            }
            PieceKind::Elephant => {
                for path in &ELEPHANT_PATHS {
                    self.follow_path(from, path, player, &mut targets);
                }
            }
            PieceKind::Chariot => {
                for (d_row, d_col) in ORTHOGONAL {
                    self.slide(from, (d_row, d_col), player, false, &mut targets);
                }
                if on_palace_diagonal(from) {
                    for (d_row, d_col) in DIAGONAL {
                        self.slide(from, (d_row, d_col), player, true, &mut targets);
                    }
                }
            }
            PieceKind::Cannon => {
                for (d_row, d_col) in ORTHOGONAL {
                    self.jump(from, (d_row, d_col), player, false, &mut targets);
                }
                if in_palace(from) {
                    for (d_row, d_col) in DIAGONAL {
                        self.jump(from, (d_row, d_col), player, true, &mut targets);
                    }
                }
            }
            PieceKind::Soldier => {
                let forward = player.forward();
                for to in [from.left(1), from.right(1), from.offset(forward, 0)] {
                    if self.empty_or_enemy(to, player) {
                        targets.push(to);
                    }
                }
                if on_palace_diagonal(from) {
                    for to in [from.offset(forward, -1), from.offset(forward, 1)] {
                        if in_palace(to) && self.empty_or_enemy(to, player) {
                            targets.push(to);
                        }
                    }
                }
            }
        }
        targets
    }

    // Horse / elephant: every step before the last must be vacant, the last empty or enemy
    fn follow_path(&self, from: Square, path: &[(i32, i32)], player: Player, targets: &mut Vec<Square>) {
        let (last, steps) = match path.split_last() {
            Some(split) => split,
            None => return,
        };
        if steps.iter().all(|&(r, c)| self.is_vacant(from.offset(r, c))) {
            let to = from.offset(last.0, last.1);
            if self.empty_or_enemy(to, player) {
                targets.push(to);
            }
        }
    }

    // Chariot: run until the first piece, which is a target only if it is an enemy
    fn slide(&self, from: Square, dir: (i32, i32), player: Player, palace_only: bool, targets: &mut Vec<Square>) {
        let mut to = from.offset(dir.0, dir.1);
        while self.empty_or_enemy(to, player) && (!palace_only || in_palace(to)) {
            targets.push(to);
            if self.piece_at(to).is_some() {
                break;
            }
            to = to.offset(dir.0, dir.1);
        }
    }

    // Cannon: needs exactly one non-cannon screen, then lands on empty squares
    // or on the first enemy non-cannon behind it
    fn jump(&self, from: Square, dir: (i32, i32), player: Player, palace_only: bool, targets: &mut Vec<Square>) {
        let mut screened = false;
        let mut to = from.offset(dir.0, dir.1);
        while crate::board::in_board(to) && (!palace_only || in_palace(to)) {
            match self.piece_at(to) {
                None => {
                    if screened {
                        targets.push(to);
                    }
                }
                Some(id) if id.kind == PieceKind::Cannon => break,
                Some(id) => {
                    if !screened {
                        screened = true;
                    } else {
                        if id.player != player {
                            targets.push(to);
                        }
                        break;
                    }
                }
            }
            to = to.offset(dir.0, dir.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        board::*,
        constant::{BOARD_HEIGHT, BOARD_WIDTH},
        game::Game,
        piece::{PieceKind, Player},
    };

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn targets(game: &Game, from: &str) -> Vec<String> {
        let pos = sq(from);
        let id = game.board().piece_at(pos).unwrap();
        let mut v: Vec<String> = game
            .board()
            .candidates(id.kind, id.player, pos)
            .iter()
            .map(|s| s.to_string())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn test_opening_candidates() {
        let game = Game::new();
        assert_eq!(targets(&game, "h10"), vec!["g8", "i8"]);
        assert_eq!(targets(&game, "a10"), vec!["a8", "a9"]);
        assert_eq!(targets(&game, "b10"), vec!["d7"]);
        assert_eq!(targets(&game, "a7"), vec!["a6", "b7"]);
        // general on the palace center: any free palace square next to it
        assert_eq!(targets(&game, "e9"), vec!["d8", "d9", "e10", "e8", "f8", "f9"]);
        // no screen yet
        assert!(targets(&game, "b8").is_empty());
    }

    #[test]
    fn test_every_candidate_on_board() {
        let game = Game::new();
        for (pos, id) in game.board().occupants() {
            for to in game.board().candidates(id.kind, id.player, pos) {
                assert!(in_board(to));
                assert!(game.board().empty_or_enemy(to, id.player));
            }
        }
    }

    #[test]
    fn test_candidates_stay_on_board_from_every_square() {
        // a few pieces of both colours near the edges and in both palaces
        let game = Game::from_fen("R7c/4K4/9/P8/8p/2n6/9/1C7/3ak4/p7N r").unwrap();
        let board = game.board();
        for kind in PieceKind::ALL {
            for player in [Player::Red, Player::Blue] {
                for row in 0..BOARD_HEIGHT {
                    for col in 0..BOARD_WIDTH {
                        let from = Square::new(row, col);
                        for to in board.candidates(kind, player, from) {
                            assert!(in_board(to), "{player} {kind} {from} -> {to}");
                            assert!(board.empty_or_enemy(to, player), "{player} {kind} {from} -> {to}");
                            assert_ne!(to, from);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_corner_pieces() {
        let game = Game::from_fen("N7B/4K4/9/9/9/9/9/9/4k4/b7n r").unwrap();
        assert_eq!(targets(&game, "a1"), vec!["b3", "c2"]);
        assert_eq!(targets(&game, "i1"), vec!["f3", "g4"]);
        assert_eq!(targets(&game, "a10"), vec!["c7", "d8"]);
        assert_eq!(targets(&game, "i10"), vec!["g9", "h8"]);
    }

    #[test]
    fn test_soldier_on_last_rank() {
        let game = Game::from_fen("p8/4K4/9/9/9/9/9/9/4k4/8P b").unwrap();
        assert_eq!(targets(&game, "a1"), vec!["b1"]);
        assert_eq!(targets(&game, "i10"), vec!["h10"]);
    }

    fn diagonal_targets(game: &Game, from: &str) -> Vec<String> {
        let pos = sq(from);
        let id = game.board().piece_at(pos).unwrap();
        game.board()
            .candidates(id.kind, id.player, pos)
            .into_iter()
            .filter(|to| to.row != pos.row && to.col != pos.col)
            .map(|to| to.to_string())
            .collect()
    }

    #[test]
    fn test_cannon_on_edge_midpoint_has_no_diagonal() {
        // screens on d2 and f2, landings would be outside the palace
        let game = Game::from_fen("4CK3/3p1p3/9/9/9/9/9/9/4k4/9 r").unwrap();
        assert!(diagonal_targets(&game, "e1").is_empty());

        // screens on e1 and e3
        let game = Game::from_fen("4K4/3C5/4p4/9/9/9/9/9/4k4/9 r").unwrap();
        assert!(diagonal_targets(&game, "d2").is_empty());

        // from the corner the same jump lands on f3
        let game = Game::from_fen("3C5/4p4/3K5/9/9/9/9/9/4k4/9 r").unwrap();
        assert_eq!(diagonal_targets(&game, "d1"), vec!["f3"]);
    }

    #[test]
    fn test_general_on_edge_midpoint_is_orthogonal_only() {
        let game = Game::from_fen("4K4/9/9/9/9/9/9/9/9/4k4 b").unwrap();
        assert_eq!(targets(&game, "e1"), vec!["d1", "e2", "f1"]);
        assert_eq!(targets(&game, "e10"), vec!["d10", "e9", "f10"]);
    }

    #[test]
    fn test_guard_in_corner_moves_along_diagonal() {
        let game = Game::from_fen("3AK4/9/9/9/9/9/9/9/4k4/9 b").unwrap();
        assert_eq!(targets(&game, "d1"), vec!["d2", "e2"]);
    }

    #[test]
    fn test_horse_leg_block() {
        // blue soldier on e6 blocks both southward paths of the horse on e5
        let game = Game::from_fen("9/4K4/9/9/4N4/4p4/9/9/4k4/9 r").unwrap();
        assert_eq!(targets(&game, "e5"), vec!["c4", "c6", "d3", "f3", "g4", "g6"]);
    }

    #[test]
    fn test_elephant_needs_both_squares_clear() {
        // blue soldier on f7 sits on the g8 path
        let game = Game::from_fen("4K4/9/9/9/4B4/9/5p3/9/4k4/9 r").unwrap();
        assert_eq!(targets(&game, "e5"), vec!["b3", "b7", "c2", "c8", "g2", "h3", "h7"]);
    }

    #[test]
    fn test_chariot_stops_at_first_piece() {
        let game = Game::from_fen("R8/4K4/9/p8/9/9/9/9/4k4/9 r").unwrap();
        assert_eq!(
            targets(&game, "a1"),
            vec!["a2", "a3", "a4", "b1", "c1", "d1", "e1", "f1", "g1", "h1", "i1"]
        );

        // own piece on a3: neither it nor anything behind it
        let game = Game::from_fen("R8/4K4/P8/p8/9/9/9/9/4k4/9 r").unwrap();
        let t = targets(&game, "a1");
        assert!(t.contains(&"a2".to_string()));
        assert!(!t.contains(&"a3".to_string()));
        assert!(!t.contains(&"a4".to_string()));
    }

    #[test]
    fn test_chariot_palace_diagonal() {
        let game = Game::from_fen("9/4K4/9/9/9/9/9/3R5/9/4k4 r").unwrap();
        let t = targets(&game, "d8");
        assert!(t.contains(&"e9".to_string()));
        assert!(t.contains(&"f10".to_string()));
        assert!(!t.contains(&"c9".to_string()));
        assert!(!t.contains(&"c7".to_string()));
        assert!(!t.contains(&"e7".to_string()));

        // edge midpoint: no diagonal at all
        let game = Game::from_fen("9/4K4/9/9/9/9/9/4R4/9/3k5 r").unwrap();
        let t = targets(&game, "e8");
        assert!(!t.contains(&"d9".to_string()));
        assert!(!t.contains(&"f9".to_string()));
    }

    #[test]
    fn test_cannon_needs_non_cannon_screen() {
        let game = Game::from_fen("C8/4K4/9/p8/9/9/9/r8/4k4/9 r").unwrap();
        assert_eq!(targets(&game, "a1"), vec!["a5", "a6", "a7", "a8"]);

        // a cannon cannot be the screen
        let game = Game::from_fen("C8/4K4/9/c8/9/9/9/r8/4k4/9 r").unwrap();
        assert!(targets(&game, "a1").is_empty());

        // nor the target
        let game = Game::from_fen("C8/4K4/9/p8/9/c8/9/9/4k4/9 r").unwrap();
        assert_eq!(targets(&game, "a1"), vec!["a5"]);

        // own piece behind the screen ends the line
        let game = Game::from_fen("C8/4K4/9/p8/P8/9/9/9/4k4/9 r").unwrap();
        assert!(targets(&game, "a1").is_empty());
    }

    #[test]
    fn test_cannon_palace_diagonal() {
        // screen on e9, blue guard on f10
        let game = Game::from_fen("9/4K4/9/9/9/9/9/3C5/4a4/4ka3 r").unwrap();
        assert_eq!(targets(&game, "d8"), vec!["f10"]);

        let game = Game::from_fen("9/4K4/9/9/9/9/9/3C5/4c4/4ka3 r").unwrap();
        assert!(targets(&game, "d8").is_empty());
    }

    #[test]
    fn test_soldier_moves() {
        let game = Game::from_fen("9/4K4/9/4P4/9/9/9/9/4k4/9 b").unwrap();
        assert_eq!(targets(&game, "e4"), vec!["d4", "e5", "f4"]);
    }

    #[test]
    fn test_soldier_palace_diagonal() {
        // blue soldier on the red palace center
        let game = Game::from_fen("4K4/4p4/9/9/9/9/9/9/4k4/9 r").unwrap();
        assert_eq!(targets(&game, "e2"), vec!["d1", "d2", "e1", "f1", "f2"]);

        // edge midpoint: no diagonal
        let game = Game::from_fen("3K5/3p5/9/9/9/9/9/9/4k4/9 r").unwrap();
        assert_eq!(targets(&game, "d2"), vec!["c2", "d1", "e2"]);
    }
}
