mod flat;
mod heightmap;

pub use flat::FlatGenerator;
pub use heightmap::HeightmapGenerator;

use std::sync::Arc;

use crate::config::{GeneratorKind, WorldConfig};
use crate::utils::Result;
use crate::world::chunk::Chunk;
use crate::world::material::MaterialRegistry;

/// Terrain-generation strategy. Implementations fill a freshly created
/// chunk's grid and must be deterministic for a given (seed, coordinate)
/// pair.
pub trait ChunkGenerator: Send + Sync {
    fn generate(&self, chunk: &mut Chunk);
}

/// Builds the strategy selected in the config, resolving its palette
/// against the given registry.
pub fn build(config: &WorldConfig, materials: &Arc<MaterialRegistry>) -> Result<Box<dyn ChunkGenerator>> {
    Ok(match config.generator {
        GeneratorKind::Heightmap => Box::new(HeightmapGenerator::new(config.seed, materials)?),
        GeneratorKind::Flat => Box::new(FlatGenerator::new(materials)?),
    })
}
