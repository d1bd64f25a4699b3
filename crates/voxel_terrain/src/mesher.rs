//! Per-chunk mesh extraction.
//!
//! Emits one quad per solid-cell face whose neighboring cell is empty.
//! Only the chunk's own cells are read; neighbors outside the chunk count
//! as empty, so a boundary face is always emitted. Reading nothing but the
//! chunk's own state is what lets rebuilds for different chunks run on
//! different worker threads with no cross-chunk locking.

use crate::constants::{cell_index, CHUNK_EDGE, CHUNK_VOLUME};
use crate::types::{MeshBuffer, Vertex, Voxel};

/// One face direction of a unit cube.
struct Face {
  /// Offset to the neighbor that occludes this face.
  neighbor: [i32; 3],
  /// Outward normal.
  normal: [f32; 3],
  /// Corner positions relative to the cell origin, counter-clockwise when
  /// viewed from outside the cube.
  corners: [[f32; 3]; 4],
}

const FACES: [Face; 6] = [
  // +X
  Face {
    neighbor: [1, 0, 0],
    normal: [1.0, 0.0, 0.0],
    corners: [
      [1.0, 0.0, 1.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [1.0, 1.0, 1.0],
    ],
  },
  // -X
  Face {
    neighbor: [-1, 0, 0],
    normal: [-1.0, 0.0, 0.0],
    corners: [
      [0.0, 0.0, 0.0],
      [0.0, 0.0, 1.0],
      [0.0, 1.0, 1.0],
      [0.0, 1.0, 0.0],
    ],
  },
  // +Y
  Face {
    neighbor: [0, 1, 0],
    normal: [0.0, 1.0, 0.0],
    corners: [
      [0.0, 1.0, 1.0],
      [1.0, 1.0, 1.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
    ],
  },
  // -Y
  Face {
    neighbor: [0, -1, 0],
    normal: [0.0, -1.0, 0.0],
    corners: [
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 0.0, 1.0],
      [0.0, 0.0, 1.0],
    ],
  },
  // +Z
  Face {
    neighbor: [0, 0, 1],
    normal: [0.0, 0.0, 1.0],
    corners: [
      [0.0, 0.0, 1.0],
      [1.0, 0.0, 1.0],
      [1.0, 1.0, 1.0],
      [0.0, 1.0, 1.0],
    ],
  },
  // -Z
  Face {
    neighbor: [0, 0, -1],
    normal: [0.0, 0.0, -1.0],
    corners: [
      [1.0, 0.0, 0.0],
      [0.0, 0.0, 0.0],
      [0.0, 1.0, 0.0],
      [1.0, 1.0, 0.0],
    ],
  },
];

/// Build a fresh mesh for one chunk's cells.
///
/// Deterministic for a given cell array: cells are scanned X-major, faces
/// in the fixed order above, so two rebuilds of identical cells produce
/// byte-identical buffers.
pub fn build_chunk_mesh(cells: &[Voxel; CHUNK_VOLUME]) -> MeshBuffer {
  let mut mesh = MeshBuffer::new();
  let edge = CHUNK_EDGE as i32;

  for x in 0..edge {
    for y in 0..edge {
      for z in 0..edge {
        let cell = cells[cell_index(x as usize, y as usize, z as usize)];
        if !cell.is_solid() {
          continue;
        }
        for face in &FACES {
          let nx = x + face.neighbor[0];
          let ny = y + face.neighbor[1];
          let nz = z + face.neighbor[2];
          if occludes(cells, nx, ny, nz) {
            continue;
          }
          emit_face(&mut mesh, [x as f32, y as f32, z as f32], face);
        }
      }
    }
  }

  mesh
}

/// Whether the cell at (x, y, z) hides the face pointing at it.
#[inline]
fn occludes(cells: &[Voxel; CHUNK_VOLUME], x: i32, y: i32, z: i32) -> bool {
  let edge = CHUNK_EDGE as i32;
  if x < 0 || y < 0 || z < 0 || x >= edge || y >= edge || z >= edge {
    // Out-of-chunk neighbors never occlude; the rebuild reads no other
    // chunk's state.
    return false;
  }
  cells[cell_index(x as usize, y as usize, z as usize)].is_solid()
}

fn emit_face(mesh: &mut MeshBuffer, origin: [f32; 3], face: &Face) {
  let base = mesh.vertices.len() as u32;
  for corner in &face.corners {
    mesh.vertices.push(Vertex {
      position: [
        origin[0] + corner[0],
        origin[1] + corner[1],
        origin[2] + corner[2],
      ],
      normal: face.normal,
    });
  }
  mesh
    .indices
    .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
#[path = "mesher_test.rs"]
mod mesher_test;
