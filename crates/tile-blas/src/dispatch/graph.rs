use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use super::{TileDispatch, TileGemm, TileTask, TileTrmm};
use crate::core::{Sequence, TileId};
use crate::error::TileError;
use crate::types::Scalar;

struct Node<T> {
    task: TileTask<T>,
    deps: Vec<usize>,
    dependents: Vec<usize>,
}

/// Data-flow task graph built from the read and write sets of submissions.
///
/// A task depends on the last writer of every tile it touches, and a task
/// that writes a tile additionally depends on every reader of that tile
/// since its previous write. Submission order is therefore a valid
/// execution order; [`execute`](Self::execute) runs independent tasks
/// concurrently on the rayon pool when the `parallel` feature is enabled.
pub struct TaskGraph<T> {
    nodes: Vec<Node<T>>,
    last_writer: HashMap<TileId, usize>,
    readers: HashMap<TileId, Vec<usize>>,
}

impl<T> Default for TaskGraph<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            last_writer: HashMap::new(),
            readers: HashMap::new(),
        }
    }
}

impl<T: Scalar> TaskGraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Task `idx` as submitted.
    pub fn task(&self, idx: usize) -> Option<&TileTask<T>> {
        self.nodes.get(idx).map(|node| &node.task)
    }

    /// Indices of the tasks `idx` waits for, ascending.
    pub fn dependencies(&self, idx: usize) -> &[usize] {
        self.nodes.get(idx).map(|node| node.deps.as_slice()).unwrap_or(&[])
    }

    fn push(&mut self, task: TileTask<T>) {
        let idx = self.nodes.len();
        let mut deps = Vec::new();

        for tile in task.reads() {
            if let Some(&writer) = self.last_writer.get(&tile) {
                deps.push(writer);
            }
            self.readers.entry(tile).or_default().push(idx);
        }

        let target = task.writes();
        if let Some(writer) = self.last_writer.insert(target, idx) {
            deps.push(writer);
        }
        if let Some(readers) = self.readers.remove(&target) {
            deps.extend(readers);
        }

        deps.sort_unstable();
        deps.dedup();
        deps.retain(|&d| d != idx);
        for &dep in &deps {
            self.nodes[dep].dependents.push(idx);
        }

        tracing::trace!(task = idx, kernel = task.name(), tile = %target, deps = deps.len(), "task added");
        self.nodes.push(Node {
            task,
            deps,
            dependents: Vec::new(),
        });
    }

    /// Run every task, respecting the inferred dependencies.
    ///
    /// Execution failures are recorded on `sequence`; once it has failed,
    /// tasks that have not started yet are skipped.
    pub fn execute(self, sequence: &Sequence) {
        tracing::debug!(tasks = self.nodes.len(), "executing task graph");

        #[cfg(feature = "parallel")]
        self.execute_parallel(sequence);

        #[cfg(not(feature = "parallel"))]
        self.execute_serial(sequence);
    }

    /// Run on a dedicated thread pool.
    #[cfg(feature = "parallel")]
    pub fn execute_in(self, pool: &rayon::ThreadPool, sequence: &Sequence) {
        pool.install(|| self.execute(sequence));
    }

    /// Run every task on the calling thread in submission order.
    pub fn execute_serial(self, sequence: &Sequence) {
        for node in &self.nodes {
            run_task(&node.task, sequence);
        }
    }

    #[cfg(feature = "parallel")]
    fn execute_parallel(self, sequence: &Sequence) {
        use std::sync::atomic::AtomicUsize;

        let pending: Vec<AtomicUsize> = self
            .nodes
            .iter()
            .map(|node| AtomicUsize::new(node.deps.len()))
            .collect();
        let ctx = Scheduler {
            nodes: &self.nodes,
            pending: &pending,
            sequence,
        };
        let ctx = &ctx;

        rayon::scope(|s| {
            for (idx, node) in self.nodes.iter().enumerate() {
                if node.deps.is_empty() {
                    s.spawn(move |s| ctx.run(s, idx));
                }
            }
        });
    }
}

#[cfg(feature = "parallel")]
struct Scheduler<'g, T> {
    nodes: &'g [Node<T>],
    pending: &'g [std::sync::atomic::AtomicUsize],
    sequence: &'g Sequence,
}

#[cfg(feature = "parallel")]
impl<T: Scalar> Scheduler<'_, T> {
    fn run<'s>(&'s self, scope: &rayon::Scope<'s>, idx: usize) {
        use std::sync::atomic::Ordering;

        let node = &self.nodes[idx];
        run_task(&node.task, self.sequence);

        for &next in &node.dependents {
            if self.pending[next].fetch_sub(1, Ordering::AcqRel) == 1 {
                scope.spawn(move |s| self.run(s, next));
            }
        }
    }
}

fn run_task<T: Scalar>(task: &TileTask<T>, sequence: &Sequence) {
    if sequence.is_failed() {
        return;
    }
    match panic::catch_unwind(AssertUnwindSafe(|| task.execute())) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => sequence.fail(err),
        Err(payload) => sequence.fail(TileError::Kernel(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "tile kernel panicked".to_string()
    }
}

impl<T: Scalar> TileDispatch<T> for TaskGraph<T> {
    fn submit_gemm(&mut self, task: TileGemm<T>) {
        self.push(TileTask::Gemm(task));
    }

    fn submit_trmm(&mut self, task: TileTrmm<T>) {
        self.push(TileTask::Trmm(task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TileLayout, TiledMatrix};
    use crate::types::Transpose;

    fn scale(c: &TiledMatrix<f64>, row: usize, col: usize, beta: f64) -> TileGemm<f64> {
        TileGemm {
            trans_a: Transpose::NoTrans,
            trans_b: Transpose::NoTrans,
            m: c.tile_mdim(row),
            n: c.tile_ndim(col),
            k: 0,
            alpha: 0.0,
            a: c.tile(0, 0),
            lda: 1,
            b: c.tile(0, 0),
            ldb: 1,
            beta,
            c: c.tile(row, col),
            ldc: c.tile_mdim(row).max(1),
        }
    }

    fn accumulate(a: &TiledMatrix<f64>, c: &TiledMatrix<f64>, row: usize) -> TileGemm<f64> {
        TileGemm {
            trans_a: Transpose::NoTrans,
            trans_b: Transpose::NoTrans,
            m: 1,
            n: 1,
            k: 1,
            alpha: 1.0,
            a: a.tile(row, 0),
            lda: 1,
            b: a.tile(row, 0),
            ldb: 1,
            beta: 1.0,
            c: c.tile(row, 0),
            ldc: 1,
        }
    }

    fn ones(m: usize, n: usize) -> TiledMatrix<f64> {
        TiledMatrix::from_fn(TileLayout::square(m, n, 1), |_, _| 1.0).unwrap()
    }

    #[test]
    fn test_write_after_write_chains() {
        let c = ones(2, 1);
        let mut graph = TaskGraph::new();
        graph.submit_gemm(scale(&c, 0, 0, 2.0));
        graph.submit_gemm(scale(&c, 1, 0, 2.0));
        graph.submit_gemm(scale(&c, 0, 0, 3.0));

        assert_eq!(graph.dependencies(0), &[] as &[usize]);
        assert_eq!(graph.dependencies(1), &[] as &[usize]);
        assert_eq!(graph.dependencies(2), &[0]);
    }

    #[test]
    fn test_read_after_write_and_write_after_read() {
        let a = ones(1, 1);
        let c = ones(1, 1);
        let mut graph = TaskGraph::new();
        graph.submit_gemm(scale(&a, 0, 0, 2.0)); // writes A
        graph.submit_gemm(accumulate(&a, &c, 0)); // reads A, writes C
        graph.submit_gemm(scale(&a, 0, 0, 5.0)); // writes A again

        assert_eq!(graph.dependencies(1), &[0]);
        assert_eq!(graph.dependencies(2), &[0, 1]);

        let sequence = Sequence::new();
        graph.execute(&sequence);
        assert_eq!(sequence.status(), Ok(()));
        // C = 1 + 2 * 2, A = 2 * 5
        assert_eq!(c.get(0, 0).unwrap(), 5.0);
        assert_eq!(a.get(0, 0).unwrap(), 10.0);
    }

    #[test]
    fn test_execute_many_independent_tiles() {
        let c = ones(16, 16);
        let mut graph = TaskGraph::new();
        for step in 0..3 {
            for j in 0..16 {
                for i in 0..16 {
                    graph.submit_gemm(scale(&c, i, j, (step + 2) as f64));
                }
            }
        }
        assert_eq!(graph.len(), 3 * 256);

        let sequence = Sequence::new();
        graph.execute(&sequence);
        assert!(!sequence.is_failed());
        assert!(c.to_col_major().unwrap().iter().all(|&x| x == 24.0));
    }

    #[test]
    fn test_failed_sequence_skips_tasks() {
        let c = ones(1, 1);
        let mut graph = TaskGraph::new();
        graph.submit_gemm(scale(&c, 0, 0, 2.0));

        let sequence = Sequence::new();
        sequence.fail(TileError::Sequence);
        graph.execute(&sequence);

        assert_eq!(c.get(0, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_kernel_error_marks_sequence() {
        let c = ones(1, 1);
        let mut graph = TaskGraph::new();
        graph.submit_gemm(scale(&c, 3, 0, 2.0));

        let sequence = Sequence::new();
        graph.execute_serial(&sequence);
        assert!(matches!(sequence.status(), Err(TileError::TileOutOfRange { .. })));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("bad tile");
        assert_eq!(panic_message(payload.as_ref()), "bad tile");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "tile kernel panicked");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_execute_in_dedicated_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let c = ones(4, 4);
        let mut graph = TaskGraph::new();
        for j in 0..4 {
            for i in 0..4 {
                graph.submit_gemm(scale(&c, i, j, 0.5));
            }
        }

        let sequence = Sequence::new();
        graph.execute_in(&pool, &sequence);
        assert!(c.to_col_major().unwrap().iter().all(|&x| x == 0.5));
    }
}
