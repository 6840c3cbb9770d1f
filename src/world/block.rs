use glam::{IVec3, Quat, Vec3};
use once_cell::sync::Lazy;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::world::chunk::CHUNK_SIZE;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::material::{Material, MaterialId};

/// The six axis-aligned face directions of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDirection {
    Up,
    Down,
    Left,
    Right,
    Front,
    Back,
}

pub const FACE_DIRECTIONS: [FaceDirection; 6] = [
    FaceDirection::Up,
    FaceDirection::Down,
    FaceDirection::Left,
    FaceDirection::Right,
    FaceDirection::Front,
    FaceDirection::Back,
];

// Quarter-turn quaternions orienting a unit quad toward each direction.
// The quad's rest orientation faces +Z, so Front is the identity.
static ROTATIONS: Lazy<[Quat; 6]> = Lazy::new(|| {
    [
        Quat::from_rotation_x(FRAC_PI_2),  // Up
        Quat::from_rotation_x(-FRAC_PI_2), // Down
        Quat::from_rotation_y(-FRAC_PI_2), // Left
        Quat::from_rotation_y(FRAC_PI_2),  // Right
        Quat::IDENTITY,                    // Front
        Quat::from_rotation_y(PI),         // Back
    ]
});

impl FaceDirection {
    pub fn index(self) -> usize {
        match self {
            FaceDirection::Up => 0,
            FaceDirection::Down => 1,
            FaceDirection::Left => 2,
            FaceDirection::Right => 3,
            FaceDirection::Front => 4,
            FaceDirection::Back => 5,
        }
    }

    pub fn normal(self) -> IVec3 {
        match self {
            FaceDirection::Up => IVec3::new(0, 1, 0),
            FaceDirection::Down => IVec3::new(0, -1, 0),
            FaceDirection::Left => IVec3::new(-1, 0, 0),
            FaceDirection::Right => IVec3::new(1, 0, 0),
            FaceDirection::Front => IVec3::new(0, 0, 1),
            FaceDirection::Back => IVec3::new(0, 0, -1),
        }
    }

    pub fn rotation(self) -> Quat {
        ROTATIONS[self.index()]
    }

    /// Texture category for this face. The four lateral faces share one
    /// texture regardless of compass direction.
    pub fn texture_label(self) -> &'static str {
        match self {
            FaceDirection::Up => "top",
            FaceDirection::Down => "bottom",
            _ => "side",
        }
    }
}

/// One visible quad of a block: world transform plus the key the rendering
/// collaborator uses to resolve its texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub rotation: Quat,
    pub translation: Vec3,
    pub texture: String,
}

/// Lookup key for a face texture, e.g. `texturepacks/normal/grass/top.png`.
pub fn texture_key(pack: &str, material: &Material, direction: FaceDirection) -> String {
    format!(
        "texturepacks/{}/{}/{}.png",
        pack,
        material.name.to_lowercase(),
        direction.texture_label()
    )
}

/// Read-only projection of one grid cell into world space. Materialized on
/// demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockView {
    pub material: MaterialId,
    pub local: IVec3,
    pub chunk: ChunkCoord,
}

impl BlockView {
    pub fn new(material: MaterialId, local: IVec3, chunk: ChunkCoord) -> Self {
        Self {
            material,
            local,
            chunk,
        }
    }

    /// World-space center of this block's unit cube.
    pub fn world_center(&self) -> Vec3 {
        (IVec3::from(self.chunk) * CHUNK_SIZE + self.local).as_vec3()
    }

    /// Transform of the quad covering the given face: the block center
    /// pushed half a unit along the face normal, oriented by the fixed
    /// per-direction rotation.
    pub fn face_transform(&self, direction: FaceDirection) -> (Quat, Vec3) {
        let translation = self.world_center() + direction.normal().as_vec3() * 0.5;
        (direction.rotation(), translation)
    }
}
