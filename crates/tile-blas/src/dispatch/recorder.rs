use super::{TileDispatch, TileGemm, TileTask, TileTrmm};
use crate::core::TileId;
use crate::types::Scalar;

/// Dispatcher that only records what was submitted.
#[derive(Debug, Clone)]
pub struct Recorder<T> {
    tasks: Vec<TileTask<T>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T: Scalar> Recorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions in order.
    pub fn tasks(&self) -> &[TileTask<T>] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<TileTask<T>> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Submissions that update `tile`, in submission order.
    pub fn writes_to(&self, tile: TileId) -> impl Iterator<Item = &TileTask<T>> + '_ {
        self.tasks.iter().filter(move |task| task.writes() == tile)
    }
}

impl<T: Scalar> TileDispatch<T> for Recorder<T> {
    fn submit_gemm(&mut self, task: TileGemm<T>) {
        self.tasks.push(TileTask::Gemm(task));
    }

    fn submit_trmm(&mut self, task: TileTrmm<T>) {
        self.tasks.push(TileTask::Trmm(task));
    }
}
