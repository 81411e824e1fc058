//! Tile algorithms for Level-3 BLAS.
//!
//! Each algorithm walks the tile grid of its operands and submits one tile
//! kernel per unit of work to a [`TileDispatch`](crate::dispatch::TileDispatch).
//! The algorithms do no arithmetic of their own: they choose tile
//! coordinates, extents, leading dimensions and accumulation coefficients.
//!
//! # Ordering
//!
//! A scheduler only guarantees that submissions updating the same tile take
//! effect in submission order. The algorithms are responsible for choosing
//! that order:
//!
//! - [`pgemm`] submits the updates of `C(m, n)` in increasing `k`; the first
//!   carries `beta`, the rest carry `1`.
//! - [`ptrmm`] applies the diagonal tile of A to each tile of B before any
//!   trailing contribution, walking the outer index in the direction given
//!   by its [`TrmmPlan`]:
//!
//! | Side | Uplo | Trans | Outer axis | Direction | Trailing tile of A |
//! |------|------|-------|------------|-----------|--------------------|
//! | Left | Upper | N | rows | forward | `A(m, k)` |
//! | Left | Upper | T | rows | backward | `A(k, m)` |
//! | Left | Lower | N | rows | backward | `A(m, k)` |
//! | Left | Lower | T | rows | forward | `A(k, m)` |
//! | Right | Upper | N | cols | backward | `A(k, n)` |
//! | Right | Upper | T | cols | forward | `A(n, k)` |
//! | Right | Lower | N | cols | forward | `A(k, n)` |
//! | Right | Lower | T | cols | backward | `A(n, k)` |
//!
//! # Cancellation
//!
//! Both algorithms check the shared [`Sequence`](crate::core::Sequence) on
//! entry. If it has failed they record [`TileError::Sequence`](crate::TileError::Sequence)
//! on the request and submit nothing.

mod pgemm;
mod ptrmm;

pub use pgemm::pgemm;
pub use ptrmm::{ptrmm, Axis, Direction, Orientation, TrmmPlan};
