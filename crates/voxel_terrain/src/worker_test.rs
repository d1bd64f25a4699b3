use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::unbounded;

use super::*;

#[test]
fn workers_execute_pushed_tasks() {
  let queue = Arc::new(TaskQueue::with_capacity(64));
  let (done_tx, done_rx) = unbounded();
  let pool = WorkerPool::spawn(Arc::clone(&queue), 4, move |task: usize| {
    done_tx.send(task).unwrap();
  });

  for i in 0..32 {
    queue.push(i).unwrap();
  }

  let mut seen: Vec<usize> = (0..32)
    .map(|_| done_rx.recv_timeout(Duration::from_secs(5)).unwrap())
    .collect();
  seen.sort_unstable();
  assert_eq!(seen, (0..32).collect::<Vec<_>>());

  while !queue.all_done() {
    thread::yield_now();
  }
  pool.shutdown();
}

#[test]
fn tasks_pushed_in_bursts_all_run() {
  let queue = Arc::new(TaskQueue::with_capacity(128));
  let counter = Arc::new(AtomicUsize::new(0));
  let pool = {
    let counter = Arc::clone(&counter);
    WorkerPool::spawn(Arc::clone(&queue), 2, move |_task: usize| {
      counter.fetch_add(1, Ordering::Relaxed);
    })
  };

  // Several quiet periods in a row: workers must park and re-wake cleanly.
  for burst in 0..4 {
    for i in 0..20 {
      queue.push(burst * 20 + i).unwrap();
    }
    while !queue.all_done() {
      thread::yield_now();
    }
  }

  assert_eq!(counter.load(Ordering::Relaxed), 80);
  pool.shutdown();
}

#[test]
fn shutdown_joins_idle_workers() {
  let queue: Arc<TaskQueue<usize>> = Arc::new(TaskQueue::with_capacity(8));
  let pool = WorkerPool::spawn(Arc::clone(&queue), 4, |_task| {});
  // Workers may or may not have parked yet; shutdown must not hang either
  // way.
  pool.shutdown();
  assert!(queue.all_done());
}

#[test]
fn drop_joins_workers() {
  let queue: Arc<TaskQueue<usize>> = Arc::new(TaskQueue::with_capacity(8));
  let counter = Arc::new(AtomicUsize::new(0));
  {
    let counter = Arc::clone(&counter);
    let pool = WorkerPool::spawn(Arc::clone(&queue), 2, move |_task| {
      counter.fetch_add(1, Ordering::Relaxed);
    });
    queue.push(1).unwrap();
    queue.push(2).unwrap();
    while !queue.all_done() {
      thread::yield_now();
    }
    drop(pool);
  }
  assert_eq!(counter.load(Ordering::Relaxed), 2);
}

#[test]
fn shutdown_abandons_unclaimed_tasks() {
  let queue: Arc<TaskQueue<usize>> = Arc::new(TaskQueue::with_capacity(8));
  // A pool with zero threads gives the shutdown path with no consumer
  // racing for the task.
  let pool = WorkerPool::spawn(Arc::clone(&queue), 0, |_task| {});
  queue.push(7).unwrap();
  pool.shutdown();

  // The task never ran; it is still published and unclaimed.
  assert!(!queue.all_done());
  assert_eq!(queue.try_claim(), Some(7));
}
