use glam::IVec3;
use std::sync::Arc;

use crate::utils::{Result, WorldError};
use crate::world::chunk::{Chunk, CHUNK_SIZE};
use crate::world::generator::ChunkGenerator;
use crate::world::material::{MaterialId, MaterialRegistry};

const SLAB_TOP: i32 = 9;
const SURFACE_Y: i32 = 10;

/// Flat-slab baseline: a dirt slab from y = 0 through y = 9 with a single
/// grass layer at y = 10, identical in every chunk.
pub struct FlatGenerator {
    surface: MaterialId,
    filler: MaterialId,
}

impl FlatGenerator {
    pub fn new(materials: &Arc<MaterialRegistry>) -> Result<Self> {
        let surface = materials
            .find("GRASS")
            .ok_or_else(|| WorldError::UnknownMaterial("GRASS".to_string()))?;
        let filler = materials
            .find("DIRT")
            .ok_or_else(|| WorldError::UnknownMaterial("DIRT".to_string()))?;
        Ok(Self { surface, filler })
    }
}

impl ChunkGenerator for FlatGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        chunk.fill(
            IVec3::new(0, 0, 0),
            IVec3::new(CHUNK_SIZE - 1, SLAB_TOP, CHUNK_SIZE - 1),
            self.filler,
        );
        chunk.fill(
            IVec3::new(0, SURFACE_Y, 0),
            IVec3::new(CHUNK_SIZE - 1, SURFACE_Y, CHUNK_SIZE - 1),
            self.surface,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::chunk_coord::ChunkCoord;
    use crate::world::material::AIR;

    #[test]
    fn test_slab_layout() {
        let materials = Arc::new(MaterialRegistry::with_defaults());
        let gen = FlatGenerator::new(&materials).unwrap();
        let mut chunk = Chunk::new(ChunkCoord::new(-4, 0, 9));
        gen.generate(&mut chunk);

        let grass = materials.find("GRASS").unwrap();
        let dirt = materials.find("DIRT").unwrap();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..=SLAB_TOP {
                    assert_eq!(chunk.get(IVec3::new(x, y, z)), Some(dirt));
                }
                assert_eq!(chunk.get(IVec3::new(x, SURFACE_Y, z)), Some(grass));
                for y in (SURFACE_Y + 1)..CHUNK_SIZE {
                    assert_eq!(chunk.get(IVec3::new(x, y, z)), Some(AIR));
                }
            }
        }
    }
}
