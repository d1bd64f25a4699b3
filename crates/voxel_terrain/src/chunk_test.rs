use std::sync::Arc;
use std::thread;

use glam::{IVec3, UVec3};

use super::*;

#[test]
fn insert_returns_dense_handles() {
  let arena = ChunkArena::new();
  assert!(arena.is_empty());

  let a = arena.insert(IVec3::new(0, 0, 0));
  let b = arena.insert(IVec3::new(1, 0, 0));
  assert_ne!(a, b);
  assert_eq!(arena.len(), 2);
  assert_eq!(arena.coord_of(a), IVec3::new(0, 0, 0));
  assert_eq!(arena.coord_of(b), IVec3::new(1, 0, 0));
}

#[test]
fn cells_start_as_air() {
  let arena = ChunkArena::new();
  let handle = arena.insert(IVec3::ZERO);
  assert_eq!(arena.cell(handle, UVec3::new(3, 2, 1)), Voxel::Air);
}

#[test]
fn set_cell_round_trip() {
  let arena = ChunkArena::new();
  let handle = arena.insert(IVec3::ZERO);
  arena.set_cell(handle, UVec3::new(15, 0, 15), Voxel::Stone);
  assert_eq!(arena.cell(handle, UVec3::new(15, 0, 15)), Voxel::Stone);
  assert_eq!(arena.cell(handle, UVec3::new(0, 0, 0)), Voxel::Air);
}

#[test]
fn handles_stay_valid_across_growth() {
  let arena = ChunkArena::new();
  let first = arena.insert(IVec3::ZERO);
  arena.set_cell(first, UVec3::ZERO, Voxel::Dirt);

  // Grow well past any initial vector capacity.
  for i in 1..200 {
    arena.insert(IVec3::new(i, 0, 0));
  }
  assert_eq!(arena.cell(first, UVec3::ZERO), Voxel::Dirt);
}

#[test]
fn rebuild_replaces_previous_mesh() {
  let arena = ChunkArena::new();
  let handle = arena.insert(IVec3::ZERO);

  arena.set_cell(handle, UVec3::new(1, 1, 1), Voxel::Dirt);
  arena.rebuild_mesh(handle);
  assert_eq!(arena.with_mesh(handle, |mesh| mesh.face_count()), 6);

  // Clearing the voxel and rebuilding replaces the buffer outright.
  arena.set_cell(handle, UVec3::new(1, 1, 1), Voxel::Air);
  arena.rebuild_mesh(handle);
  assert!(arena.with_mesh(handle, |mesh| mesh.is_empty()));
}

#[test]
fn concurrent_rebuilds_of_distinct_chunks() {
  let arena = Arc::new(ChunkArena::new());
  let handles: Vec<_> = (0..8)
    .map(|i| {
      let handle = arena.insert(IVec3::new(i, 0, 0));
      arena.set_cell(handle, UVec3::ZERO, Voxel::Stone);
      handle
    })
    .collect();

  let rebuilds: Vec<_> = handles
    .iter()
    .map(|&handle| {
      let arena = Arc::clone(&arena);
      thread::spawn(move || arena.rebuild_mesh(handle))
    })
    .collect();
  for rebuild in rebuilds {
    rebuild.join().unwrap();
  }

  for handle in handles {
    assert_eq!(arena.with_mesh(handle, |mesh| mesh.face_count()), 6);
  }
}
