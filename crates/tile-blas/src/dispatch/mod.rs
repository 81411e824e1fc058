//! Tile kernel dispatch.
//!
//! Tile algorithms never run numeric code themselves; they hand every tile
//! kernel invocation to a [`TileDispatch`] implementation. A submission
//! declares the tiles it reads and the tile it updates, which is all a
//! scheduler needs to infer the dependencies between submissions.
//!
//! | Dispatcher | Behavior |
//! |------------|----------|
//! | [`Recorder`] | Stores submissions in order; nothing runs |
//! | [`Immediate`] | Runs each kernel on the calling thread as it is submitted |
//! | [`TaskGraph`] | Builds a data-flow graph and runs independent tasks in parallel |
//!
//! Submission never reports an error. Kernel failures surface through the
//! [`Sequence`](crate::core::Sequence) shared by the computation.

mod graph;
mod immediate;
mod recorder;
mod task;

pub use graph::TaskGraph;
pub use immediate::Immediate;
pub use recorder::Recorder;
pub use task::{TileGemm, TileTask, TileTrmm};

use crate::types::Scalar;

/// Receiver of tile kernel submissions.
///
/// Submissions that update the same tile must take effect in the order they
/// were submitted.
pub trait TileDispatch<T: Scalar> {
    /// Submit a tile multiply-accumulate.
    fn submit_gemm(&mut self, task: TileGemm<T>);

    /// Submit a triangular tile multiply.
    fn submit_trmm(&mut self, task: TileTrmm<T>);
}

impl<T: Scalar, D: TileDispatch<T> + ?Sized> TileDispatch<T> for &mut D {
    fn submit_gemm(&mut self, task: TileGemm<T>) {
        (**self).submit_gemm(task)
    }

    fn submit_trmm(&mut self, task: TileTrmm<T>) {
        (**self).submit_trmm(task)
    }
}
