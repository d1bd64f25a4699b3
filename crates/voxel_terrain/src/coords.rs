//! Global-to-chunk coordinate tiering.
//!
//! A global voxel coordinate splits into the coordinate of the chunk that
//! contains it and the cell coordinate inside that chunk. The split uses
//! euclidean (floor) division, so negative global coordinates land in the
//! correct chunk: global x = -1 belongs to chunk -1 at local cell 15, where
//! truncating division would misfile it in chunk 0.

use glam::{IVec3, UVec3};

use crate::constants::{cell_index, CHUNK_EDGE};

/// A global voxel coordinate split into its chunk and in-chunk parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TieredCoord {
  /// Coordinate of the chunk the voxel lives in.
  pub chunk: IVec3,
  /// Cell position inside that chunk, each component in `0..CHUNK_EDGE`.
  pub local: UVec3,
}

/// Split a global voxel coordinate into (chunk, local).
#[inline]
pub fn global_to_tiered(global: IVec3) -> TieredCoord {
  let edge = IVec3::splat(CHUNK_EDGE as i32);
  TieredCoord {
    chunk: global.div_euclid(edge),
    local: global.rem_euclid(edge).as_uvec3(),
  }
}

/// Reassemble a global voxel coordinate from its tiered parts.
#[inline]
pub fn tiered_to_global(tiered: TieredCoord) -> IVec3 {
  tiered.chunk * CHUNK_EDGE as i32 + tiered.local.as_ivec3()
}

/// Linear cell index for a chunk-local coordinate.
#[inline]
pub fn local_cell_index(local: UVec3) -> usize {
  cell_index(local.x as usize, local.y as usize, local.z as usize)
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;
