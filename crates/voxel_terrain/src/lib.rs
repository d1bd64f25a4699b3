//! Chunked voxel terrain with parallel mesh rebuilds.
//!
//! A [`VoxelTerrain`] stores voxels in lazily allocated 16³ chunks and
//! tracks which chunks an edit has dirtied. A [`RemeshDriver`] turns the
//! dirty set into rebuild tasks on a bounded multi-producer/multi-consumer
//! queue, where a fixed pool of worker threads picks them up and rebuilds
//! each chunk's mesh independently.
//!
//! ```text
//!  set_voxel ──► dirty set ──► dispatch ──► TaskQueue ──► WorkerPool
//!                                              │              │
//!                                          Semaphore      rebuild_mesh
//!                                          (parking)     (per chunk, in
//!                                                          parallel)
//! ```
//!
//! # Example
//!
//! ```
//! use glam::IVec3;
//! use voxel_terrain::{RemeshDriver, Voxel, VoxelTerrain};
//!
//! let mut terrain = VoxelTerrain::new();
//! let driver = RemeshDriver::new(&terrain, 4, 256);
//!
//! terrain.set_voxel(IVec3::new(0, 0, 0), Voxel::GrassDirt);
//! terrain.set_voxel(IVec3::new(-1, 0, 0), Voxel::Dirt);
//!
//! let stats = driver.flush(&mut terrain).unwrap();
//! assert_eq!(stats.chunks, 2);
//!
//! let faces = terrain
//!   .with_mesh(IVec3::new(-1, 0, 0), |mesh| mesh.face_count())
//!   .unwrap();
//! assert_eq!(faces, 6);
//!
//! driver.shutdown();
//! ```

pub mod chunk;
pub mod constants;
pub mod coords;
pub mod driver;
pub mod mesher;
pub mod semaphore;
pub mod task_queue;
pub mod terrain;
pub mod types;
pub mod worker;

pub use chunk::{Chunk, ChunkArena, ChunkHandle};
pub use constants::{cell_coord, cell_index, CHUNK_EDGE, CHUNK_VOLUME};
pub use coords::{global_to_tiered, tiered_to_global, TieredCoord};
pub use driver::{DispatchError, FlushStats, RemeshDriver, RemeshTask};
pub use mesher::build_chunk_mesh;
pub use semaphore::Semaphore;
pub use task_queue::{QueueFull, TaskQueue};
pub use terrain::{RenderSink, VoxelTerrain};
pub use types::{MeshBuffer, Vertex, Voxel};
pub use worker::WorkerPool;
