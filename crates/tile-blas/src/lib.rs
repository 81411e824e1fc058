//! Tile algorithms for Level-3 BLAS on multicore CPUs.
//!
//! This crate turns a whole-matrix operation over a tiled matrix into an
//! ordered sequence of tile kernel submissions. A dependency-inferring task
//! graph then runs those submissions in parallel while reproducing the
//! result of the unblocked operation.
//!
//! # Operations
//!
//! | Operation | Tile algorithm | Driver |
//! |-----------|----------------|--------|
//! | `C = alpha * op(A) * op(B) + beta * C` | [`pgemm`] | [`gemm`], [`gemm_async`] |
//! | `B = alpha * op(A) * B` / `B = alpha * B * op(A)` | [`ptrmm`] | [`trmm`], [`trmm_async`] |
//!
//! # Quick Start
//!
//! ```
//! use tile_blas::{trmm, Diag, Side, TileConfig, Transpose, Uplo};
//!
//! // A = [[2, 1], [0, 3]] (upper), B = [[1, 1], [1, 1]], column-major
//! let a = vec![2.0f64, 0.0, 1.0, 3.0];
//! let mut b = vec![1.0f64; 4];
//!
//! trmm(
//!     Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit,
//!     2, 2, 1.0, &a, 2, &mut b, 2,
//!     &TileConfig::new(1, None),
//! ).unwrap();
//! assert_eq!(b, vec![3.0, 3.0, 3.0, 3.0]);
//! ```
//!
//! # Tiled Interface
//!
//! Several operations can share one [`Sequence`] and one dispatcher. Each
//! call checks the sequence on entry and becomes a no-op once an earlier
//! operation has failed:
//!
//! ```
//! use tile_blas::{gemm_async, Request, Sequence, TaskGraph, TileLayout, TiledMatrix, Transpose};
//!
//! let layout = TileLayout::square(5, 5, 2);
//! let a = TiledMatrix::from_fn(layout, |i, j| (i + j) as f64).unwrap();
//! let b = TiledMatrix::from_fn(layout, |i, j| if i == j { 1.0 } else { 0.0 }).unwrap();
//! let c = TiledMatrix::<f64>::zeros(layout).unwrap();
//!
//! let sequence = Sequence::new();
//! let mut request = Request::new();
//! let mut graph = TaskGraph::new();
//! gemm_async(Transpose::NoTrans, Transpose::NoTrans, 1.0, &a, &b, 0.0, &c,
//!            &mut graph, &sequence, &mut request);
//! graph.execute(&sequence);
//!
//! assert!(sequence.status().is_ok());
//! assert_eq!(c.to_col_major().unwrap(), a.to_col_major().unwrap());
//! ```
//!
//! # Features
//!
//! - `parallel` (default): run task graphs on rayon worker threads.

pub mod api;
pub mod compute;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod kernels;
pub mod types;

pub use api::{gemm, gemm_async, trmm, trmm_async};
pub use compute::{pgemm, ptrmm, TrmmPlan};
pub use config::TileConfig;
pub use core::{Request, Sequence, Tile, TileId, TileLayout, TiledMatrix};
pub use dispatch::{Immediate, Recorder, TaskGraph, TileDispatch, TileGemm, TileTask, TileTrmm};
pub use error::{Result, TileError};
pub use types::{Diag, Scalar, Side, Transpose, Uplo};
