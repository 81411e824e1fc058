//! Tiled matrix descriptors and execution status.
//!
//! A matrix is partitioned into an `mt x nt` grid of tiles. The grid is
//! described by a [`TileLayout`]; the data lives in a [`TiledMatrix`] whose
//! tiles are addressed through [`Tile`] handles:
//!
//! ```text
//!            nb        nb      nb'
//!        ┌────────┬────────┬─────┐
//!   mb   │ (0, 0) │ (0, 1) │(0,2)│
//!        ├────────┼────────┼─────┤
//!   mb   │ (1, 0) │ (1, 1) │(1,2)│
//!        ├────────┼────────┼─────┤
//!   mb'  │ (2, 0) │ (2, 1) │(2,2)│   mb' = m - 2*mb, nb' = n - 2*nb
//!        └────────┴────────┴─────┘
//! ```
//!
//! Each tile is a contiguous column-major buffer whose leading dimension is
//! the tile's own row count, so tile `(i, j)` has leading dimension
//! `tile_mdim(i)`.
//!
//! A [`Sequence`] is the status shared by every operation of one logical
//! computation; a [`Request`] records what a single call observed.
//!
//! # Module Contents
//!
//! - [`tiling`](tiling): tile geometry and block iteration
//! - [`matrix`](matrix): tile storage and tile handles
//! - [`sequence`](sequence): shared status and per-call requests

mod matrix;
mod sequence;
mod tiling;

pub use matrix::{MatrixId, Tile, TileId, TiledMatrix};
pub use sequence::{Request, Sequence};
pub use tiling::{BlockIterator, TileLayout};
