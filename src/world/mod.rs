pub mod block;
pub mod chunk;
pub mod chunk_coord;
pub mod generator;
pub mod material;
pub mod registry;

pub use block::{BlockView, Face, FaceDirection};
pub use chunk::{Chunk, CHUNK_SIZE, CHUNK_VOLUME};
pub use chunk_coord::ChunkCoord;
pub use generator::ChunkGenerator;
pub use material::{Material, MaterialId, MaterialRegistry, AIR};
pub use registry::{ChunkRegistry, SharedChunk};

use crossbeam_channel::Sender;
use glam::IVec3;
use log::warn;
use std::sync::Arc;

use crate::config::WorldConfig;
use crate::utils::Result;

/// Outbound message toward the rendering collaborator, emitted once per
/// face recomputation. Everything in it is an owned value copy.
#[derive(Debug, Clone)]
pub struct MeshUpdate {
    pub coord: ChunkCoord,
    pub faces: Vec<Face>,
    /// Local coordinates that currently have at least one visible face.
    pub occupied: Vec<IVec3>,
    /// The chunk's mutation counter when the faces were computed, letting
    /// consumers drop stale messages.
    pub revision: u64,
}

/// One running world session: the material catalog, the chunk registry,
/// the active generation strategy and the outbound mesh-update channel.
pub struct World {
    config: WorldConfig,
    materials: Arc<MaterialRegistry>,
    generator: Box<dyn ChunkGenerator>,
    registry: ChunkRegistry,
    updates: Sender<MeshUpdate>,
}

impl World {
    pub fn new(
        config: WorldConfig,
        materials: Arc<MaterialRegistry>,
        updates: Sender<MeshUpdate>,
    ) -> Result<Self> {
        let generator = generator::build(&config, &materials)?;
        Ok(Self {
            config,
            materials,
            generator,
            registry: ChunkRegistry::new(),
            updates,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn materials(&self) -> &Arc<MaterialRegistry> {
        &self.materials
    }

    pub fn registry(&self) -> &ChunkRegistry {
        &self.registry
    }

    /// Returns the chunk at `coord`, creating it if absent. A new chunk is
    /// registered first so that re-entrant lookups during generation can
    /// see it, then filled by the generator, then recomputed along with
    /// every already-existing chunk within Manhattan distance 1 (fresh
    /// occupancy can occlude or expose faces in the neighbors).
    pub fn get_or_create(&self, coord: ChunkCoord) -> SharedChunk {
        if let Some(chunk) = self.registry.find(coord) {
            return chunk;
        }
        let (chunk, created) = self.registry.get_or_insert(coord);
        if created {
            self.generator.generate(&mut chunk.write());
            self.recompute(coord);
            for neighbor in coord.face_neighbors() {
                if self.registry.contains(neighbor) {
                    self.recompute(neighbor);
                }
            }
        }
        chunk
    }

    /// Recomputes the face list of the chunk at `coord` (no-op if absent)
    /// and publishes one MeshUpdate. Absent neighbor chunks count as
    /// transparent, so world-edge faces stay visible until the neighbor is
    /// generated.
    pub fn recompute(&self, coord: ChunkCoord) {
        let Some(chunk) = self.registry.find(coord) else {
            return;
        };

        // Snapshot the grid before probing neighbors so this thread never
        // holds more than one chunk lock at a time. Holding a read lock
        // across neighbor probes can deadlock once refresh tasks on
        // adjacent chunks queue writers against each other.
        let (staging, revision) = {
            let guard = chunk.read();
            (
                Chunk::from_grid(coord, guard.grid().to_vec()),
                guard.revision(),
            )
        };

        let (faces, occupied) = staging.compute_faces(
            &self.materials,
            &self.config.texture_pack,
            |neighbor_coord, neighbor_local| match self.registry.find(neighbor_coord) {
                Some(neighbor) => neighbor
                    .read()
                    .get(neighbor_local)
                    .map(|material| self.materials.is_transparent(material))
                    .unwrap_or(true),
                None => true,
            },
        );

        chunk.write().store_faces(faces.clone(), occupied.clone());
        self.publish(MeshUpdate {
            coord,
            faces,
            occupied,
            revision,
        });
    }

    /// Forces recomputation of every registered chunk. Used after edits
    /// that span chunk boundaries.
    pub fn update_all(&self) {
        for coord in self.registry.coords() {
            self.recompute(coord);
        }
    }

    /// Writes one cell addressed in world-space block coordinates, creating
    /// the owning chunk on demand. With `update` set, the owning chunk's
    /// faces are recomputed and published.
    pub fn set_block_at(&self, pos: IVec3, material: MaterialId, update: bool) {
        let coord = ChunkCoord::from_block_pos(pos);
        let chunk = self.get_or_create(coord);
        let local = pos - IVec3::from(coord) * CHUNK_SIZE;
        chunk.write().set(local, material);
        if update {
            self.recompute(coord);
        }
    }

    /// Reads a cell addressed in world-space block coordinates. Never
    /// creates chunks: a position in an unregistered chunk reads as air.
    pub fn get_block_at(&self, pos: IVec3) -> BlockView {
        let coord = ChunkCoord::from_block_pos(pos);
        let local = pos - IVec3::from(coord) * CHUNK_SIZE;
        match self.registry.find(coord) {
            Some(chunk) => chunk
                .read()
                .view(local)
                .unwrap_or_else(|| BlockView::new(AIR, local, coord)),
            None => BlockView::new(AIR, local, coord),
        }
    }

    /// Fills the inclusive world-space box spanned by the two corners,
    /// creating chunks as needed, then refreshes the whole registry once.
    pub fn fill(&self, a: IVec3, b: IVec3, material: MaterialId) {
        let min = a.min(b);
        let max = a.max(b);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_block_at(IVec3::new(x, y, z), material, false);
                }
            }
        }
        self.update_all();
    }

    fn publish(&self, update: MeshUpdate) {
        if self.updates.send(update).is_err() {
            warn!("Mesh update receiver disconnected; dropping update");
        }
    }
}
