/*
 * Janggi rules engine
 *
 * - board, piece, side: the grid, the pieces and who owns them
 * - movegen: candidate destinations for each of the seven piece kinds
 * - game: turn order, move validation, check and checkmate
 * - engine: a line-protocol session driving a Game
 */
pub mod board;
pub mod constant;
pub mod engine;
pub mod error;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod side;
