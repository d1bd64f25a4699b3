use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use glam::IVec3;
use voxel_terrain::{
  build_chunk_mesh, cell_index, RemeshDriver, TaskQueue, Voxel, VoxelTerrain, CHUNK_EDGE,
  CHUNK_VOLUME,
};

fn checkerboard_cells() -> Box<[Voxel; CHUNK_VOLUME]> {
  let mut cells = Box::new([Voxel::Air; CHUNK_VOLUME]);
  for x in 0..CHUNK_EDGE {
    for y in 0..CHUNK_EDGE {
      for z in 0..CHUNK_EDGE {
        if (x + y + z) % 2 == 0 {
          cells[cell_index(x, y, z)] = Voxel::Stone;
        }
      }
    }
  }
  cells
}

// Worst case for the mesher: every solid cell exposes all six faces.
fn bench_mesher(c: &mut Criterion) {
  let cells = checkerboard_cells();
  c.bench_function("mesh_checkerboard_chunk", |b| {
    b.iter(|| build_chunk_mesh(&cells))
  });
}

fn bench_queue(c: &mut Criterion) {
  c.bench_function("queue_push_drain_256", |b| {
    let queue: TaskQueue<usize> = TaskQueue::with_capacity(256);
    b.iter(|| {
      for i in 0..256 {
        queue.push(i).unwrap();
      }
      let mut total = 0usize;
      queue.drain_available(|task| total += task);
      total
    })
  });
}

fn bench_parallel_flush(c: &mut Criterion) {
  c.bench_function("flush_64_chunks_4_workers", |b| {
    b.iter_batched(
      || {
        let mut terrain = VoxelTerrain::new();
        for x in 0..4 {
          for y in 0..4 {
            for z in 0..4 {
              let base = IVec3::new(x, y, z) * CHUNK_EDGE as i32;
              for i in 0..CHUNK_EDGE as i32 {
                terrain.set_voxel(base + IVec3::new(i, 0, i), Voxel::Dirt);
              }
            }
          }
        }
        let driver = RemeshDriver::new(&terrain, 4, 256);
        (terrain, driver)
      },
      |(mut terrain, driver)| {
        driver.flush(&mut terrain).unwrap();
        driver.shutdown();
      },
      BatchSize::LargeInput,
    )
  });
}

criterion_group!(benches, bench_mesher, bench_queue, bench_parallel_flush);
criterion_main!(benches);
