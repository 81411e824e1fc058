use super::{TileDispatch, TileGemm, TileTask, TileTrmm};
use crate::core::Sequence;
use crate::types::Scalar;

/// Dispatcher that executes every kernel synchronously at submission.
///
/// Once the sequence has failed, further submissions are dropped.
#[derive(Debug, Clone, Copy)]
pub struct Immediate<'a> {
    sequence: &'a Sequence,
}

impl<'a> Immediate<'a> {
    pub fn new(sequence: &'a Sequence) -> Self {
        Self { sequence }
    }

    fn run<T: Scalar>(&self, task: TileTask<T>) {
        if self.sequence.is_failed() {
            return;
        }
        if let Err(err) = task.execute() {
            self.sequence.fail(err);
        }
    }
}

impl<T: Scalar> TileDispatch<T> for Immediate<'_> {
    fn submit_gemm(&mut self, task: TileGemm<T>) {
        self.run(TileTask::Gemm(task));
    }

    fn submit_trmm(&mut self, task: TileTrmm<T>) {
        self.run(TileTask::Trmm(task));
    }
}
