//! World-space voxel store with chunk-granular dirty tracking.
//!
//! The terrain maps infinite signed global coordinates onto 16³ chunks,
//! allocating chunks lazily on first write. Every edit marks the owning
//! chunk's coordinate dirty; a later update pass turns the dirty set into
//! mesh rebuilds, either inline ([`VoxelTerrain::update_sync`]) or as queued
//! tasks for a worker pool ([`VoxelTerrain::update_parallel`]).
//!
//! Dirtiness is tracked per chunk coordinate, not per task: marking the
//! same chunk dirty a hundred times still costs exactly one rebuild.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use glam::IVec3;

use crate::chunk::{ChunkArena, ChunkHandle};
use crate::coords::{global_to_tiered, TieredCoord};
use crate::driver::RemeshTask;
use crate::task_queue::{QueueFull, TaskQueue};
use crate::types::{MeshBuffer, Voxel};

/// Consumer of finished chunk meshes, e.g. a renderer upload path.
pub trait RenderSink {
  /// Receive one chunk's mesh. `chunk_coord` is the chunk coordinate, not a
  /// world position; multiply by the chunk edge to place the mesh.
  fn submit_mesh(&mut self, chunk_coord: IVec3, mesh: &MeshBuffer);
}

/// Sparse voxel world backed by a [`ChunkArena`].
#[derive(Default)]
pub struct VoxelTerrain {
  arena: Arc<ChunkArena>,
  index: HashMap<IVec3, ChunkHandle>,
  dirty: HashSet<IVec3>,
}

impl VoxelTerrain {
  pub fn new() -> Self {
    Self::default()
  }

  /// Shared chunk storage, for wiring up a remesh driver.
  pub fn arena(&self) -> &Arc<ChunkArena> {
    &self.arena
  }

  /// Write one voxel at a global coordinate, allocating the owning chunk if
  /// this is the first write into it, and mark that chunk dirty.
  pub fn set_voxel(&mut self, global: IVec3, voxel: Voxel) {
    let TieredCoord { chunk, local } = global_to_tiered(global);
    let handle = *self
      .index
      .entry(chunk)
      .or_insert_with(|| self.arena.insert(chunk));
    self.arena.set_cell(handle, local, voxel);
    self.dirty.insert(chunk);
  }

  /// Read one voxel at a global coordinate. Unallocated space is air.
  pub fn voxel(&self, global: IVec3) -> Voxel {
    let TieredCoord { chunk, local } = global_to_tiered(global);
    match self.index.get(&chunk) {
      Some(&handle) => self.arena.cell(handle, local),
      None => Voxel::Air,
    }
  }

  /// Number of chunks allocated so far.
  pub fn chunk_count(&self) -> usize {
    self.index.len()
  }

  /// Number of chunks awaiting a rebuild.
  pub fn dirty_count(&self) -> usize {
    self.dirty.len()
  }

  /// Whether the chunk at `chunk_coord` is awaiting a rebuild.
  pub fn is_dirty(&self, chunk_coord: IVec3) -> bool {
    self.dirty.contains(&chunk_coord)
  }

  /// Handle of the chunk at `chunk_coord`, if one has been allocated.
  pub fn chunk_handle(&self, chunk_coord: IVec3) -> Option<ChunkHandle> {
    self.index.get(&chunk_coord).copied()
  }

  /// Rebuild every dirty chunk's mesh on the calling thread, then clear the
  /// dirty set.
  pub fn update_sync(&mut self) -> usize {
    let rebuilt = self.dirty.len();
    for &coord in &self.dirty {
      let handle = self.lookup_dirty(coord);
      self.arena.rebuild_mesh(handle);
    }
    self.dirty.clear();
    rebuilt
  }

  /// Push one rebuild task per dirty chunk onto `queue`, then clear the
  /// dirty set. Returns the number of tasks pushed.
  ///
  /// All-or-nothing: if the queue rejects any push the dirty set is left
  /// untouched, so the caller can retry the whole pass next frame. The
  /// queue holds no duplicate either way, since a coordinate appears in the
  /// dirty set at most once.
  pub fn update_parallel(&mut self, queue: &TaskQueue<RemeshTask>) -> Result<usize, QueueFull> {
    let tasks: Vec<RemeshTask> = self
      .dirty
      .iter()
      .map(|&coord| RemeshTask {
        chunk: self.lookup_dirty(coord),
      })
      .collect();
    if tasks.len() > queue.capacity() - queue.pending() {
      return Err(QueueFull {
        capacity: queue.capacity(),
      });
    }
    for &task in &tasks {
      queue.push(task)?;
    }
    self.dirty.clear();
    Ok(tasks.len())
  }

  /// Run `f` against the mesh of the chunk at `chunk_coord`.
  ///
  /// `None` if no chunk was ever allocated there.
  pub fn with_mesh<R>(&self, chunk_coord: IVec3, f: impl FnOnce(&MeshBuffer) -> R) -> Option<R> {
    let handle = self.chunk_handle(chunk_coord)?;
    Some(self.arena.with_mesh(handle, f))
  }

  /// Hand every non-empty chunk mesh to `sink`.
  pub fn submit_meshes(&self, sink: &mut dyn RenderSink) {
    for (&coord, &handle) in &self.index {
      self.arena.with_mesh(handle, |mesh| {
        if !mesh.is_empty() {
          sink.submit_mesh(coord, mesh);
        }
      });
    }
  }

  /// A dirty coordinate always has a chunk behind it: the only writer of
  /// the dirty set is `set_voxel`, which allocates first. Anything else is
  /// internal state corruption and fatal.
  fn lookup_dirty(&self, coord: IVec3) -> ChunkHandle {
    match self.index.get(&coord) {
      Some(&handle) => handle,
      None => panic!("dirty chunk {coord} has no chunk in the store"),
    }
  }

  #[cfg(test)]
  pub(crate) fn force_dirty(&mut self, chunk_coord: IVec3) {
    self.dirty.insert(chunk_coord);
  }
}

#[cfg(test)]
#[path = "terrain_test.rs"]
mod terrain_test;
