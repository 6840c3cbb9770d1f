use glam::{IVec3, Vec3};
use std::cmp::Ordering;

use crate::world::chunk::CHUNK_SIZE;

/// Position of a chunk in the grid of chunks. One unit along any axis is
/// CHUNK_SIZE world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord(pub IVec3);

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.x.cmp(&other.0.x) {
            Ordering::Equal => match self.0.y.cmp(&other.0.y) {
                Ordering::Equal => self.0.z.cmp(&other.0.z),
                ord => ord,
            },
            ord => ord,
        }
    }
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    /// Chunk containing the given world-space position.
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self::new(
            (pos.x / CHUNK_SIZE as f32).floor() as i32,
            (pos.y / CHUNK_SIZE as f32).floor() as i32,
            (pos.z / CHUNK_SIZE as f32).floor() as i32,
        )
    }

    /// Chunk owning the given world-space block coordinate.
    pub fn from_block_pos(pos: IVec3) -> Self {
        Self(IVec3::new(
            pos.x.div_euclid(CHUNK_SIZE),
            pos.y.div_euclid(CHUNK_SIZE),
            pos.z.div_euclid(CHUNK_SIZE),
        ))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    pub fn z(&self) -> i32 {
        self.0.z
    }

    /// World-space position of this chunk's minimum corner.
    pub fn to_world_pos(&self) -> Vec3 {
        (self.0 * CHUNK_SIZE).as_vec3()
    }

    pub fn offset(&self, delta: IVec3) -> Self {
        Self(self.0 + delta)
    }

    /// The six face-adjacent chunk coordinates.
    pub fn face_neighbors(&self) -> [Self; 6] {
        [
            self.offset(IVec3::X),
            self.offset(-IVec3::X),
            self.offset(IVec3::Y),
            self.offset(-IVec3::Y),
            self.offset(IVec3::Z),
            self.offset(-IVec3::Z),
        ]
    }

    pub fn manhattan_distance(&self, other: &Self) -> i32 {
        (self.0.x - other.0.x).abs() + (self.0.y - other.0.y).abs() + (self.0.z - other.0.z).abs()
    }
}

impl From<IVec3> for ChunkCoord {
    fn from(vec: IVec3) -> Self {
        Self(vec)
    }
}

impl From<ChunkCoord> for IVec3 {
    fn from(coord: ChunkCoord) -> Self {
        coord.0
    }
}
