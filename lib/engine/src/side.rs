/*
 * Side - the sixteen pieces of one colour
 *
 * - fixed roster, captured pieces stay in it
 * - Sides holds both colours for PieceId lookup
 */

use crate::piece::{Piece, PieceId, PieceKind, Player};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Side {
    player: Player,
    pieces: Vec<Piece>,
}

impl Side {
    // Roster order: General, 2 Guards, 2 Horses, 2 Elephants, 2 Chariots, 2 Cannons, 5 Soldiers
    pub fn new(player: Player) -> Self {
        let pieces = PieceKind::ALL
            .iter()
            .flat_map(|kind| std::iter::repeat(*kind).take(kind.count()))
            .enumerate()
            .map(|(slot, kind)| Piece::new(PieceId { player, kind, slot }))
            .collect();
        Side { player, pieces }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    // Pieces currently on the board (on_board = true) or captured (on_board = false)
    pub fn get_pieces(&self, on_board: bool) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.on_board() == on_board)
    }

    pub fn on_board(&self) -> impl Iterator<Item = &Piece> {
        self.get_pieces(true)
    }

    pub fn captured(&self) -> impl Iterator<Item = &Piece> {
        self.get_pieces(false)
    }

    pub fn general(&self) -> &Piece {
        &self.pieces[0]
    }

    // First roster piece of this kind that has not been placed yet
    pub(crate) fn unplaced(&self, kind: PieceKind) -> Option<PieceId> {
        self.pieces
            .iter()
            .find(|p| p.kind() == kind && !p.on_board())
            .map(Piece::id)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Sides([Side; 2]);

impl Sides {
    pub fn new() -> Self {
        Sides([Side::new(Player::Red), Side::new(Player::Blue)])
    }
    pub fn side(&self, player: Player) -> &Side {
        &self.0[player.value()]
    }
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.0[id.player.value()].pieces[id.slot]
    }
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.0[id.player.value()].pieces[id.slot]
    }
}

impl Default for Sides {
    fn default() -> Self {
        Sides::new()
    }
}
