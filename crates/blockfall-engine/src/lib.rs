pub use self::{
    board::{Board, Cell, TurnEvent},
    config::BoardConfig,
    piece::{Piece, PieceKind},
};

pub mod board;
pub mod config;
pub mod piece;
pub mod rules;
