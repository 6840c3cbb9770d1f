use glam::IVec3;

use crate::world::block::{texture_key, BlockView, Face, FACE_DIRECTIONS};
use crate::world::chunk_coord::ChunkCoord;
use crate::world::material::{MaterialId, MaterialRegistry, AIR};

pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Owner of one 16x16x16 grid of material indices plus the face list most
/// recently computed for it. Cells default to air; the grid is addressed by
/// the linear index `x + y*16 + z*256`.
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Vec<MaterialId>,
    revision: u64,
    faces: Vec<Face>,
    occupied: Vec<IVec3>,
}

fn in_bounds(local: IVec3) -> bool {
    local.cmpge(IVec3::ZERO).all() && local.cmplt(IVec3::splat(CHUNK_SIZE)).all()
}

fn linear_index(local: IVec3) -> usize {
    (local.x + local.y * CHUNK_SIZE + local.z * CHUNK_SIZE * CHUNK_SIZE) as usize
}

impl Chunk {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![AIR; CHUNK_VOLUME],
            revision: 0,
            faces: Vec::new(),
            occupied: Vec::new(),
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Mutation counter, bumped on every successful cell write.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn occupied(&self) -> &[IVec3] {
        &self.occupied
    }

    /// Raw grid access, linear-index order.
    pub fn grid(&self) -> &[MaterialId] {
        &self.blocks
    }

    /// Detached working copy built from a grid snapshot. Lets callers run
    /// [`Chunk::compute_faces`] without keeping the live chunk locked while
    /// neighbor chunks are probed.
    pub(crate) fn from_grid(coord: ChunkCoord, blocks: Vec<MaterialId>) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        Self {
            coord,
            blocks,
            revision: 0,
            faces: Vec::new(),
            occupied: Vec::new(),
        }
    }

    /// Material at a local coordinate, or `None` outside [0,16) on any axis.
    /// Callers doing visibility culling treat the absent case as air.
    pub fn get(&self, local: IVec3) -> Option<MaterialId> {
        if !in_bounds(local) {
            return None;
        }
        Some(self.blocks[linear_index(local)])
    }

    /// Projects a cell into world space. `None` outside the grid.
    pub fn view(&self, local: IVec3) -> Option<BlockView> {
        self.get(local)
            .map(|material| BlockView::new(material, local, self.coord))
    }

    /// Writes one cell. Out-of-range coordinates are silently ignored; the
    /// return value reports whether anything changed.
    pub fn set(&mut self, local: IVec3, material: MaterialId) -> bool {
        if !in_bounds(local) {
            return false;
        }
        self.blocks[linear_index(local)] = material;
        self.revision += 1;
        true
    }

    /// Sets every cell in the inclusive box spanned by the two corners,
    /// given in either order. Cells outside the grid are skipped.
    pub fn fill(&mut self, a: IVec3, b: IVec3, material: MaterialId) {
        let min = a.min(b);
        let max = a.max(b);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set(IVec3::new(x, y, z), material);
                }
            }
        }
    }

    /// Computes the visible-face list: for every non-air cell and each of
    /// the six directions, the face is included iff the neighboring cell is
    /// transparent. Neighbors inside this chunk are read from the own grid;
    /// neighbors in adjacent chunks go through `neighbor_transparent`, which
    /// must report `true` for chunks that do not exist yet.
    ///
    /// Returns the face list and the local coordinates that contributed at
    /// least one face, in scan order. Does not modify the chunk; pair with
    /// [`Chunk::store_faces`].
    pub fn compute_faces(
        &self,
        materials: &MaterialRegistry,
        pack: &str,
        neighbor_transparent: impl Fn(ChunkCoord, IVec3) -> bool,
    ) -> (Vec<Face>, Vec<IVec3>) {
        let mut faces = Vec::new();
        let mut occupied = Vec::new();

        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    let local = IVec3::new(x, y, z);
                    let material = self.blocks[linear_index(local)];
                    if materials.is_transparent(material) {
                        continue;
                    }

                    let view = BlockView::new(material, local, self.coord);
                    let mut any_visible = false;

                    for direction in FACE_DIRECTIONS {
                        let neighbor = local + direction.normal();
                        let transparent = if in_bounds(neighbor) {
                            materials.is_transparent(self.blocks[linear_index(neighbor)])
                        } else {
                            let neighbor_coord = self.coord.offset(direction.normal());
                            let wrapped = IVec3::new(
                                neighbor.x.rem_euclid(CHUNK_SIZE),
                                neighbor.y.rem_euclid(CHUNK_SIZE),
                                neighbor.z.rem_euclid(CHUNK_SIZE),
                            );
                            neighbor_transparent(neighbor_coord, wrapped)
                        };
                        if !transparent {
                            continue;
                        }

                        let (rotation, translation) = view.face_transform(direction);
                        faces.push(Face {
                            rotation,
                            translation,
                            texture: texture_key(pack, materials.get(material), direction),
                        });
                        any_visible = true;
                    }

                    if any_visible {
                        occupied.push(local);
                    }
                }
            }
        }

        (faces, occupied)
    }

    /// Replaces the stored face list wholesale.
    pub fn store_faces(&mut self, faces: Vec<Face>, occupied: Vec<IVec3>) {
        self.faces = faces;
        self.occupied = occupied;
    }
}
