//! Parallel remesh driver: queue + worker pool wired to a chunk arena.
//!
//! The driver owns the machinery a terrain needs to rebuild dirty chunks
//! off-thread: a bounded task queue, a fixed worker pool whose closure maps
//! a [`RemeshTask`] to an arena rebuild, and the arena handle itself. One
//! remesh cycle is dispatch (drain the terrain's dirty set into the queue)
//! followed by the workers catching up; [`RemeshDriver::flush`] runs a whole
//! cycle synchronously for callers without a frame loop.
//!
//! Cycles never overlap: dispatch refuses while tasks from the previous
//! cycle are still in flight. That gate is what guarantees at most one
//! rebuild per chunk at any moment, which the arena's mesh storage relies
//! on.

use std::sync::Arc;
use std::thread;

use thiserror::Error;
use web_time::Instant;

#[cfg(feature = "tracing")]
use tracing::info_span;

use crate::chunk::{ChunkArena, ChunkHandle};
use crate::task_queue::{QueueFull, TaskQueue};
use crate::terrain::VoxelTerrain;
use crate::worker::WorkerPool;

/// One queued chunk rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemeshTask {
  /// Chunk to rebuild, as an arena handle.
  pub chunk: ChunkHandle,
}

/// Why a dispatch did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DispatchError {
  /// The previous cycle's tasks have not all completed yet.
  #[error("previous remesh cycle still in flight")]
  RebuildsInFlight,
  /// The queue rejected the batch.
  #[error(transparent)]
  Queue(#[from] QueueFull),
}

/// Outcome of one synchronous remesh cycle.
#[derive(Clone, Copy, Debug)]
pub struct FlushStats {
  /// Chunks rebuilt this cycle.
  pub chunks: usize,
  /// Wall-clock time from dispatch to the last completion.
  pub elapsed_us: u64,
}

/// Owns the worker pool and task queue for one terrain's rebuilds.
pub struct RemeshDriver {
  arena: Arc<ChunkArena>,
  queue: Arc<TaskQueue<RemeshTask>>,
  pool: WorkerPool<RemeshTask>,
}

impl RemeshDriver {
  /// Spawn `worker_count` rebuild workers against `terrain`'s chunk arena.
  ///
  /// `queue_capacity` bounds how many chunks one dispatch can cover; a
  /// dispatch of more dirty chunks than this is rejected whole.
  pub fn new(terrain: &VoxelTerrain, worker_count: usize, queue_capacity: usize) -> Self {
    let arena = Arc::clone(terrain.arena());
    let queue = Arc::new(TaskQueue::with_capacity(queue_capacity));
    let pool = {
      let arena = Arc::clone(&arena);
      WorkerPool::spawn(Arc::clone(&queue), worker_count, move |task: RemeshTask| {
        arena.rebuild_mesh(task.chunk)
      })
    };
    Self { arena, queue, pool }
  }

  /// Number of rebuild worker threads.
  pub fn worker_count(&self) -> usize {
    self.pool.worker_count()
  }

  /// Queue the rebuild of every dirty chunk and clear the dirty set.
  ///
  /// Returns the number of tasks queued. Fails with `RebuildsInFlight`
  /// while the previous cycle is still running, and with a queue error if
  /// the batch does not fit; either way the dirty set is untouched and the
  /// caller retries later.
  pub fn dispatch(&self, terrain: &mut VoxelTerrain) -> Result<usize, DispatchError> {
    assert!(
      Arc::ptr_eq(terrain.arena(), &self.arena),
      "terrain does not belong to this driver"
    );
    if !self.queue.all_done() {
      return Err(DispatchError::RebuildsInFlight);
    }

    #[cfg(feature = "tracing")]
    let _span = info_span!("remesh_dispatch", dirty = terrain.dirty_count()).entered();

    Ok(terrain.update_parallel(&self.queue)?)
  }

  /// Whether every dispatched rebuild has completed.
  pub fn all_done(&self) -> bool {
    self.queue.all_done()
  }

  /// Spin until every dispatched rebuild has completed.
  pub fn wait_idle(&self) {
    while !self.queue.all_done() {
      thread::yield_now();
    }
  }

  /// Dispatch and wait: one full remesh cycle on the calling thread's
  /// schedule, workers doing the actual rebuilds.
  pub fn flush(&self, terrain: &mut VoxelTerrain) -> Result<FlushStats, DispatchError> {
    let started = Instant::now();
    let chunks = self.dispatch(terrain)?;
    self.wait_idle();
    Ok(FlushStats {
      chunks,
      elapsed_us: started.elapsed().as_micros() as u64,
    })
  }

  /// Stop the workers and join them. Pending tasks are abandoned, so call
  /// [`RemeshDriver::wait_idle`] first if every rebuild must land.
  pub fn shutdown(self) {
    self.pool.shutdown();
  }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;
