use glam::{IVec3, UVec3};

use super::*;

#[test]
fn origin_maps_to_origin_chunk() {
  let tiered = global_to_tiered(IVec3::ZERO);
  assert_eq!(tiered.chunk, IVec3::ZERO);
  assert_eq!(tiered.local, UVec3::ZERO);
}

#[test]
fn chunk_edges_stay_in_one_chunk() {
  // (0,0,0) and (15,0,0) both live in chunk (0,0,0).
  let tiered = global_to_tiered(IVec3::new(15, 0, 0));
  assert_eq!(tiered.chunk, IVec3::ZERO);
  assert_eq!(tiered.local, UVec3::new(15, 0, 0));

  // One more step crosses into the next chunk.
  let tiered = global_to_tiered(IVec3::new(16, 0, 0));
  assert_eq!(tiered.chunk, IVec3::new(1, 0, 0));
  assert_eq!(tiered.local, UVec3::ZERO);
}

#[test]
fn negative_coordinates_use_floor_semantics() {
  // Truncating division would put -1 in chunk 0; floor semantics puts it in
  // chunk -1 at the far local edge.
  let tiered = global_to_tiered(IVec3::new(-1, 0, 0));
  assert_eq!(tiered.chunk, IVec3::new(-1, 0, 0));
  assert_eq!(tiered.local, UVec3::new(15, 0, 0));

  let tiered = global_to_tiered(IVec3::new(-16, -17, -1));
  assert_eq!(tiered.chunk, IVec3::new(-1, -2, -1));
  assert_eq!(tiered.local, UVec3::new(0, 15, 15));
}

#[test]
fn tiered_round_trip() {
  for x in [-33, -16, -1, 0, 1, 15, 16, 100] {
    for y in [-5, 0, 31] {
      let global = IVec3::new(x, y, x - y);
      assert_eq!(tiered_to_global(global_to_tiered(global)), global);
    }
  }
}

#[test]
fn local_index_matches_cell_layout() {
  assert_eq!(local_cell_index(UVec3::ZERO), 0);
  assert_eq!(local_cell_index(UVec3::new(0, 0, 1)), 1);
  assert_eq!(local_cell_index(UVec3::new(1, 0, 0)), 256);
}
