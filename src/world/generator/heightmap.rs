use glam::IVec3;
use noise::{NoiseFn, Perlin};
use std::sync::Arc;

use crate::utils::{Result, WorldError};
use crate::world::chunk::{Chunk, CHUNK_SIZE};
use crate::world::generator::ChunkGenerator;
use crate::world::material::{MaterialId, MaterialRegistry};

/// Noise input scale: world coordinates are divided by this before sampling.
const FREQUENCY_DIVISOR: f64 = 30.0;
/// Noise amplitude in blocks.
const AMPLITUDE: f64 = 6.0;
/// Base surface height in blocks.
const OFFSET: f64 = 8.0;

/// Height-map terrain: each (x, z) column gets a surface height from 2D
/// Perlin noise sampled at the column's world position. Cells below the
/// height are filler, the cell at the height is the surface material, the
/// rest stays air. Deterministic per (seed, chunk coordinate).
pub struct HeightmapGenerator {
    noise: Perlin,
    surface: MaterialId,
    filler: MaterialId,
}

impl HeightmapGenerator {
    pub fn new(seed: u32, materials: &Arc<MaterialRegistry>) -> Result<Self> {
        let surface = materials
            .find("GRASS")
            .ok_or_else(|| WorldError::UnknownMaterial("GRASS".to_string()))?;
        let filler = materials
            .find("DIRT")
            .ok_or_else(|| WorldError::UnknownMaterial("DIRT".to_string()))?;
        Ok(Self {
            noise: Perlin::new(seed),
            surface,
            filler,
        })
    }

    /// Surface height for a world-space column, in [1, CHUNK_SIZE - 1].
    fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        let sample = self.noise.get([
            world_x as f64 / FREQUENCY_DIVISOR,
            world_z as f64 / FREQUENCY_DIVISOR,
        ]);
        ((OFFSET + AMPLITUDE * sample).floor() as i32).clamp(1, CHUNK_SIZE - 1)
    }
}

impl ChunkGenerator for HeightmapGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        let origin = chunk.coord();
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let world_x = origin.x() * CHUNK_SIZE + x;
                let world_z = origin.z() * CHUNK_SIZE + z;
                let height = self.column_height(world_x, world_z);

                if height > 0 {
                    chunk.fill(
                        IVec3::new(x, 0, z),
                        IVec3::new(x, height - 1, z),
                        self.filler,
                    );
                }
                chunk.set(IVec3::new(x, height, z), self.surface);
            }
        }
    }
}
