//! Carves a sphere of terrain, remeshes it on a worker pool, and logs what
//! a renderer would have received.

use std::thread;

use glam::IVec3;
use log::info;
use voxel_terrain::{MeshBuffer, RemeshDriver, RenderSink, Voxel, VoxelTerrain};

/// Stand-in for a GPU upload path: counts what it is handed.
struct LoggingSink {
  meshes: usize,
  vertices: usize,
}

impl RenderSink for LoggingSink {
  fn submit_mesh(&mut self, chunk_coord: IVec3, mesh: &MeshBuffer) {
    info!(
      "chunk {chunk_coord}: {} faces, {} vertices",
      mesh.face_count(),
      mesh.vertices.len()
    );
    self.meshes += 1;
    self.vertices += mesh.vertices.len();
  }
}

/// Fill a solid sphere of the given material.
fn carve_sphere(terrain: &mut VoxelTerrain, center: IVec3, radius: i32, voxel: Voxel) {
  for x in -radius..=radius {
    for y in -radius..=radius {
      for z in -radius..=radius {
        let offset = IVec3::new(x, y, z);
        if offset.length_squared() <= radius * radius {
          terrain.set_voxel(center + offset, voxel);
        }
      }
    }
  }
}

fn main() {
  env_logger::init();

  let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
  let mut terrain = VoxelTerrain::new();
  let driver = RemeshDriver::new(&terrain, workers, 256);
  info!("remeshing on {workers} workers");

  carve_sphere(&mut terrain, IVec3::ZERO, 24, Voxel::Stone);
  info!(
    "carved sphere: {} chunks, {} dirty",
    terrain.chunk_count(),
    terrain.dirty_count()
  );

  let stats = driver.flush(&mut terrain).expect("initial remesh cycle");
  info!(
    "initial remesh: {} chunks in {} us",
    stats.chunks, stats.elapsed_us
  );

  // Dig a band back out of the sphere and remesh only what changed.
  for x in -24..=24 {
    for z in -24..=24 {
      for y in -2..=2 {
        terrain.set_voxel(IVec3::new(x, y, z), Voxel::Air);
      }
    }
  }
  let stats = driver.flush(&mut terrain).expect("incremental remesh cycle");
  info!(
    "incremental remesh: {} chunks in {} us",
    stats.chunks, stats.elapsed_us
  );

  let mut sink = LoggingSink {
    meshes: 0,
    vertices: 0,
  };
  terrain.submit_meshes(&mut sink);
  info!(
    "submitted {} meshes, {} vertices total",
    sink.meshes, sink.vertices
  );

  driver.shutdown();
}
