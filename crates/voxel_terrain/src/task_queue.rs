//! Bounded multi-producer/multi-consumer task queue.
//!
//! Producers are serialized by a mutex; consumers claim tasks lock-free
//! through a single compare-and-swap on the claim counter. The asymmetry is
//! deliberate: pushes happen once per dirty chunk per frame, claims happen
//! in a hot loop on every worker thread.
//!
//! Three monotonically non-decreasing counters drive the ring:
//!
//! - `next_claim`: logical index of the next task to hand to a consumer
//! - `last_published`: one past the last task made visible by a producer
//! - `completed`: tasks fully executed
//!
//! `next_claim <= last_published` always holds, and
//! `completed == last_published` means the queue is fully drained. The slot
//! for logical index `i` is `i % capacity`.
//!
//! # Overflow policy
//!
//! A push is rejected with [`QueueFull`] while `capacity` tasks sit
//! published but unclaimed. Rejection is deliberate: silently wrapping
//! would alias a slot that still holds an unclaimed task. A slot is only
//! recycled after `capacity` further pushes, each gated behind the claim
//! counter, so a claimed task's copy-out is never raced by a producer for
//! any caller that respects the push result.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use crate::semaphore::Semaphore;

/// Push rejected: `capacity` tasks are already published and unclaimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("task queue full: {capacity} tasks published and unclaimed")]
pub struct QueueFull {
  /// Capacity of the rejecting queue.
  pub capacity: usize,
}

struct Slot<T>(UnsafeCell<MaybeUninit<T>>);

/// Bounded MPMC task queue with locked producers and lock-free consumers.
///
/// `T` is the task payload, copied by value into and out of the slots.
/// Workers park on [`TaskQueue::semaphore`] after an empty drain; every
/// push mints one wake-up credit.
pub struct TaskQueue<T> {
  slots: Box<[Slot<T>]>,
  /// Logical index of the next task to hand to a consumer.
  next_claim: AtomicU64,
  /// Logical index one past the last published task.
  last_published: AtomicU64,
  /// Tasks fully executed by consumers.
  completed: AtomicU64,
  /// Serializes producers. Consumers never touch it.
  push_lock: Mutex<()>,
  /// Workers park here when `try_claim` comes up empty.
  semaphore: Semaphore,
}

// Safety: slots are plain memory coordinated through the counters. A slot
// write is ordered before its consumer's read by the release store of
// `last_published` paired with the acquire load in `try_claim`, and the
// claim CAS makes that consumer the slot's only reader until the capacity
// policy allows the slot to be recycled.
unsafe impl<T: Send> Sync for TaskQueue<T> {}
unsafe impl<T: Send> Send for TaskQueue<T> {}

impl<T: Copy> TaskQueue<T> {
  /// Create a queue with a fixed number of task slots.
  pub fn with_capacity(capacity: usize) -> Self {
    assert!(capacity > 0, "task queue needs at least one slot");
    let slots = (0..capacity)
      .map(|_| Slot(UnsafeCell::new(MaybeUninit::uninit())))
      .collect::<Vec<_>>()
      .into_boxed_slice();
    Self {
      slots,
      next_claim: AtomicU64::new(0),
      last_published: AtomicU64::new(0),
      completed: AtomicU64::new(0),
      push_lock: Mutex::new(()),
      semaphore: Semaphore::new(),
    }
  }

  /// Number of task slots.
  pub fn capacity(&self) -> usize {
    self.slots.len()
  }

  /// Semaphore workers park on between drains.
  pub fn semaphore(&self) -> &Semaphore {
    &self.semaphore
  }

  /// Publish one task and wake one parked worker.
  ///
  /// Rejects with [`QueueFull`] while `capacity` earlier tasks are still
  /// unclaimed; see the overflow policy in the module docs.
  pub fn push(&self, task: T) -> Result<(), QueueFull> {
    let _guard = self.push_lock.lock().unwrap();
    let published = self.last_published.load(Ordering::Relaxed);
    let claimed = self.next_claim.load(Ordering::Acquire);
    debug_assert!(claimed <= published);
    if published - claimed >= self.slots.len() as u64 {
      return Err(QueueFull {
        capacity: self.slots.len(),
      });
    }

    let slot = &self.slots[(published % self.slots.len() as u64) as usize];
    // Safety: the capacity check above proved this slot's previous occupant
    // was claimed, so no consumer is reading it; the push lock keeps other
    // producers out.
    unsafe { (*slot.0.get()).write(task) };

    // Publish: the release store is what makes the slot write visible to
    // the consumer that claims this index.
    self.last_published.store(published + 1, Ordering::Release);
    self.semaphore.notify_one();
    Ok(())
  }

  /// Attempt to claim the next published task.
  ///
  /// Single attempt, no internal retry: a lost CAS race returns `None`
  /// exactly like an empty queue, and callers loop externally if they want
  /// to keep trying. Tasks are claimed in strictly increasing logical
  /// order; completion order across workers is unordered.
  pub fn try_claim(&self) -> Option<T> {
    let claim = self.next_claim.load(Ordering::Relaxed);
    // The acquire load pairs with the producer's release store and is the
    // happens-before edge that makes the slot read below safe.
    let published = self.last_published.load(Ordering::Acquire);
    if claim >= published {
      return None;
    }

    match self
      .next_claim
      .compare_exchange(claim, claim + 1, Ordering::AcqRel, Ordering::Relaxed)
    {
      Ok(_) => {
        let slot = &self.slots[(claim % self.slots.len() as u64) as usize];
        // Safety: `claim < published` proved the slot was initialized and
        // the write is visible (acquire load above); the successful CAS
        // makes this consumer the slot's only reader, and the overflow
        // policy keeps producers from recycling it underneath us.
        Some(unsafe { (*slot.0.get()).assume_init_read() })
      }
      // Another consumer won the race.
      Err(_) => None,
    }
  }

  /// Record one executed task.
  ///
  /// Pair every successful [`TaskQueue::try_claim`] with exactly one call
  /// after the task has run; [`TaskQueue::drain_available`] does the
  /// pairing for you.
  pub fn complete_one(&self) {
    self.completed.fetch_add(1, Ordering::AcqRel);
  }

  /// Claim and run tasks until the queue looks empty, then return.
  ///
  /// Never blocks; the worker loop parks on the semaphore afterwards.
  pub fn drain_available(&self, mut run: impl FnMut(T)) {
    while let Some(task) = self.try_claim() {
      run(task);
      self.complete_one();
    }
  }

  /// Whether every published task has been executed.
  ///
  /// Only meaningful as a termination check once no further pushes are
  /// expected concurrently.
  pub fn all_done(&self) -> bool {
    self.completed.load(Ordering::Acquire) == self.last_published.load(Ordering::Acquire)
  }

  /// Published-but-unclaimed task count. Approximate under concurrency.
  pub fn pending(&self) -> usize {
    let published = self.last_published.load(Ordering::Acquire);
    let claimed = self.next_claim.load(Ordering::Acquire);
    published.saturating_sub(claimed) as usize
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;
