//! Chunk layout constants for 16³ voxel chunks.
//!
//! The chunk edge must stay a power of two so the local cell index is a pair
//! of bit shifts.
//!
//! # Memory Layout
//!
//! ```text
//! Cell memory layout (row-major, Z innermost):
//!
//! Address:  0    1    2   ...  15   16   17  ...   255   256 ...
//! Content: [0,0,0][0,0,1]...[0,0,15][0,1,0]...[0,15,15][1,0,0]...
//!          └─────── Z ───────┘└─────── Z ───────┘
//! ```
//!
//! # 3D Indexing
//!
//! ```text
//! index = x << 8 | y << 4 | z
//!       = x * 256 + y * 16 + z
//! ```

/// Voxels per chunk axis. Chunks are cubes.
pub const CHUNK_EDGE: usize = 16;

/// Cells in one chunk slice (16² = 256).
pub const CHUNK_EDGE_SQ: usize = CHUNK_EDGE * CHUNK_EDGE;

/// Cells in a whole chunk (16³ = 4096).
pub const CHUNK_VOLUME: usize = CHUNK_EDGE * CHUNK_EDGE * CHUNK_EDGE;

/// Bit shift for the Y axis (log2(16) = 4).
pub const Y_SHIFT: u32 = 4;

/// Bit shift for the X axis (log2(256) = 8).
pub const X_SHIFT: u32 = 8;

/// Mask extracting a single axis from a linear index (0xF = 15).
pub const INDEX_MASK: usize = 0xF;

/// Convert chunk-local 3D coordinates to a linear cell index.
///
/// Layout: X is the major axis (stride 256), Y is middle (stride 16), Z is
/// minor (stride 1).
#[inline(always)]
pub const fn cell_index(x: usize, y: usize, z: usize) -> usize {
  (x << X_SHIFT) | (y << Y_SHIFT) | z
}

/// Convert a linear cell index back to chunk-local 3D coordinates.
#[inline(always)]
pub const fn cell_coord(idx: usize) -> (usize, usize, usize) {
  let x = idx >> X_SHIFT;
  let y = (idx >> Y_SHIFT) & INDEX_MASK;
  let z = idx & INDEX_MASK;
  (x, y, z)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
