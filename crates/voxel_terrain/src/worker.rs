//! Fixed worker thread pool draining one shared task queue.
//!
//! Each worker owns no state of its own: it repeatedly drains the queue and
//! then parks on the queue's semaphore until a push mints a credit. The
//! running flag and the join handles live in the pool, not in globals, so
//! tearing the pool down is an ordinary value drop.
//!
//! Tasks still sitting unclaimed in the queue at shutdown are abandoned:
//! the pool stops the workers, it does not flush the queue. Callers that
//! need every task to run await [`TaskQueue::all_done`] first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::task_queue::TaskQueue;

/// Fixed pool of worker threads executing tasks of type `T`.
pub struct WorkerPool<T: Copy + Send + 'static> {
  queue: Arc<TaskQueue<T>>,
  running: Arc<AtomicBool>,
  workers: Vec<JoinHandle<()>>,
}

impl<T: Copy + Send + 'static> WorkerPool<T> {
  /// Spawn `worker_count` threads draining `queue` through `run`.
  pub fn spawn<F>(queue: Arc<TaskQueue<T>>, worker_count: usize, run: F) -> Self
  where
    F: Fn(T) + Send + Sync + 'static,
  {
    let running = Arc::new(AtomicBool::new(true));
    let run = Arc::new(run);
    let workers = (0..worker_count)
      .map(|index| {
        let queue = Arc::clone(&queue);
        let running = Arc::clone(&running);
        let run = Arc::clone(&run);
        std::thread::Builder::new()
          .name(format!("remesh-worker-{index}"))
          .spawn(move || worker_loop(&queue, &running, &*run))
          .expect("failed to spawn worker thread")
      })
      .collect();
    Self {
      queue,
      running,
      workers,
    }
  }

  /// Number of worker threads in the pool.
  pub fn worker_count(&self) -> usize {
    self.workers.len()
  }

  /// Stop the pool and join every worker.
  ///
  /// Unclaimed tasks stay in the queue unrun.
  pub fn shutdown(mut self) {
    self.stop_and_join();
  }

  fn stop_and_join(&mut self) {
    if self.workers.is_empty() {
      return;
    }
    self.running.store(false, Ordering::Release);
    // Wake everything currently parked...
    self.queue.semaphore().notify_all();
    // ...and mint one credit per worker for threads that were between
    // their empty drain and the park, which notify_all alone would strand.
    for _ in 0..self.workers.len() {
      self.queue.semaphore().notify_one();
    }
    for worker in self.workers.drain(..) {
      let _ = worker.join();
    }
  }
}

impl<T: Copy + Send + 'static> Drop for WorkerPool<T> {
  fn drop(&mut self) {
    self.stop_and_join();
  }
}

fn worker_loop<T: Copy, F: Fn(T)>(queue: &TaskQueue<T>, running: &AtomicBool, run: &F) {
  while running.load(Ordering::Acquire) {
    queue.drain_available(|task| run(task));
    // Park until a producer pushes or shutdown mints a credit. Each pass
    // consumes exactly one credit, so a worker woken for shutdown re-checks
    // the flag and exits without stealing a task wake-up.
    queue.semaphore().wait();
  }
}

#[cfg(test)]
#[path = "worker_test.rs"]
mod worker_test;
