//! Chunk storage arena.
//!
//! Chunks live in a slot vector and are addressed by index-based
//! [`ChunkHandle`]s everywhere outside the arena, so a queued rebuild task
//! never holds a pointer that a growing container could invalidate.
//!
//! Lock discipline:
//!
//! - structural growth (`insert`) and cell edits take the write lock;
//! - a rebuild holds the read lock for its whole run, which keeps growth
//!   out while any rebuild is in flight and lets arbitrarily many distinct
//!   chunks rebuild concurrently;
//! - mesh readers take the write lock, which keeps them out while rebuilds
//!   (read-lock holders) run.
//!
//! The remaining aliasing question, two rebuilds of the *same* chunk under
//! concurrent read locks, is ruled out by construction: the driver
//! enqueues at most one task per dirty coordinate per cycle and refuses to
//! start a cycle while the previous one is in flight.

use std::cell::UnsafeCell;
use std::sync::RwLock;

use glam::{IVec3, UVec3};

use crate::constants::CHUNK_VOLUME;
use crate::coords::local_cell_index;
use crate::mesher;
use crate::types::{MeshBuffer, Voxel};

/// Stable index-based identity of a chunk within its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkHandle(u32);

impl ChunkHandle {
  /// Raw arena slot index.
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// A 16³ block of voxel cells plus the mesh derived from them.
///
/// Mutated only by voxel edits (cells, under the arena write lock) and by
/// its own rebuild task (mesh). Chunks are never destroyed; the arena only
/// grows.
pub struct Chunk {
  coord: IVec3,
  cells: Box<[Voxel; CHUNK_VOLUME]>,
  /// Written only by this chunk's rebuild; see the module docs for why the
  /// cell needs no lock of its own.
  mesh: UnsafeCell<MeshBuffer>,
}

// Safety: the mesh cell is written only by `ChunkArena::rebuild_mesh` (one
// rebuild per chunk in flight, under the read lock) and read only under the
// arena write lock, which excludes every rebuild. All other fields are
// mutated under the write lock alone.
unsafe impl Sync for Chunk {}

impl Chunk {
  fn new(coord: IVec3) -> Self {
    Self {
      coord,
      cells: Box::new([Voxel::Air; CHUNK_VOLUME]),
      mesh: UnsafeCell::new(MeshBuffer::new()),
    }
  }

  /// Chunk coordinate this chunk sits at.
  pub fn coord(&self) -> IVec3 {
    self.coord
  }

  /// Dense cell array, X-major.
  pub fn cells(&self) -> &[Voxel; CHUNK_VOLUME] {
    &self.cells
  }
}

/// Owns every chunk; hands out handles instead of references.
#[derive(Default)]
pub struct ChunkArena {
  slots: RwLock<Vec<Chunk>>,
}

impl ChunkArena {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of chunks allocated so far.
  pub fn len(&self) -> usize {
    self.slots.read().unwrap().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Allocate a chunk of air cells at `coord` and return its handle.
  ///
  /// Blocks while rebuilds are running, so growth never moves a chunk out
  /// from under a worker.
  pub(crate) fn insert(&self, coord: IVec3) -> ChunkHandle {
    let mut slots = self.slots.write().unwrap();
    let handle = ChunkHandle(slots.len() as u32);
    slots.push(Chunk::new(coord));
    handle
  }

  /// Write one cell of one chunk.
  pub(crate) fn set_cell(&self, handle: ChunkHandle, local: UVec3, voxel: Voxel) {
    let mut slots = self.slots.write().unwrap();
    slots[handle.index()].cells[local_cell_index(local)] = voxel;
  }

  /// Read one cell of one chunk.
  pub fn cell(&self, handle: ChunkHandle, local: UVec3) -> Voxel {
    let slots = self.slots.read().unwrap();
    slots[handle.index()].cells[local_cell_index(local)]
  }

  /// Chunk coordinate behind a handle.
  pub fn coord_of(&self, handle: ChunkHandle) -> IVec3 {
    self.slots.read().unwrap()[handle.index()].coord
  }

  /// Regenerate one chunk's mesh from its current cells, replacing any
  /// previous contents.
  ///
  /// Runs under the read lock: rebuilds of distinct chunks proceed in
  /// parallel, and the caller guarantees at most one rebuild per chunk is
  /// in flight.
  pub(crate) fn rebuild_mesh(&self, handle: ChunkHandle) {
    let slots = self.slots.read().unwrap();
    let chunk = &slots[handle.index()];
    let mesh = mesher::build_chunk_mesh(&chunk.cells);
    // Safety: sole writer for this chunk (one rebuild in flight), and mesh
    // readers hold the write lock, which this read lock excludes.
    unsafe { *chunk.mesh.get() = mesh };
  }

  /// Run `f` against a chunk's current mesh.
  ///
  /// Takes the write lock, so it waits out any running rebuilds and can
  /// never observe a half-written buffer.
  pub fn with_mesh<R>(&self, handle: ChunkHandle, f: impl FnOnce(&MeshBuffer) -> R) -> R {
    let slots = self.slots.write().unwrap();
    let chunk = &slots[handle.index()];
    // Safety: holding the write lock excludes every rebuild (they hold
    // read locks), so no writer exists while this reference is alive.
    f(unsafe { &*chunk.mesh.get() })
  }
}

#[cfg(test)]
#[path = "chunk_test.rs"]
mod chunk_test;
