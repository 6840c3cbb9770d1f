pub mod config;
pub mod engine;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::{GeneratorKind, WorldConfig};
pub use engine::{ViewerUpdate, VoxelEngine};
pub use utils::error::WorldError;
pub use world::{
    BlockView, Chunk, ChunkCoord, ChunkGenerator, ChunkRegistry, Face, FaceDirection, Material,
    MaterialId, MaterialRegistry, MeshUpdate, World, AIR, CHUNK_SIZE,
};
