//! Core voxel and mesh data types.

/// Contents of a single voxel cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Voxel {
  /// Empty space. Produces no geometry and never occludes a neighbor.
  #[default]
  Air,
  Dirt,
  GrassDirt,
  Stone,
}

impl Voxel {
  /// Whether the cell emits geometry and occludes adjacent faces.
  #[inline]
  pub fn is_solid(self) -> bool {
    !matches!(self, Voxel::Air)
  }
}

/// Output vertex with the attributes the render sink needs.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  /// Position in chunk-local coordinates.
  pub position: [f32; 3],
  /// Face normal (axis-aligned unit vector).
  pub normal: [f32; 3],
}

/// Mesh regeneration result for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
  /// Output vertices, four per emitted face.
  pub vertices: Vec<Vertex>,
  /// Triangle indices, 3 per triangle, 6 per face.
  pub indices: Vec<u32>,
}

impl MeshBuffer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear both buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Number of emitted quad faces (4 vertices each).
  pub fn face_count(&self) -> usize {
    self.vertices.len() / 4
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
