use std::collections::HashMap;

use crate::utils::{Result, WorldError};

/// Stable index of a material in the registry. Index 0 is always air.
pub type MaterialId = u16;

pub const AIR: MaterialId = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    pub index: MaterialId,
}

/// Ordered catalog of block materials. Indices are assigned at registration
/// time, increase monotonically and are never reused. The registry is built
/// once before the world starts and shared read-only afterwards.
pub struct MaterialRegistry {
    materials: Vec<Material>,
    by_name: HashMap<String, MaterialId>,
}

impl MaterialRegistry {
    /// Creates a registry holding only the reserved air material.
    pub fn new() -> Self {
        let mut registry = Self {
            materials: Vec::new(),
            by_name: HashMap::new(),
        };
        registry
            .register("AIR")
            .expect("air registration cannot collide in an empty registry");
        registry
    }

    /// Registry preloaded with the fixed baseline palette.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for name in ["GRASS", "DIRT"] {
            registry
                .register(name)
                .expect("default palette has no duplicates");
        }
        registry
    }

    pub fn register(&mut self, name: &str) -> Result<MaterialId> {
        if self.by_name.contains_key(name) {
            return Err(WorldError::DuplicateMaterial(name.to_string()));
        }
        let index = self.materials.len() as MaterialId;
        self.materials.push(Material {
            name: name.to_string(),
            index,
        });
        self.by_name.insert(name.to_string(), index);
        Ok(index)
    }

    /// Looks up a material by index.
    ///
    /// # Panics
    /// Panics on an out-of-range index. Indices only ever come from prior
    /// registrations or chunk grids, so a miss means corrupted data.
    pub fn get(&self, index: MaterialId) -> &Material {
        &self.materials[index as usize]
    }

    pub fn find(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Whether a cell holding this material lets adjacent faces show through.
    pub fn is_transparent(&self, index: MaterialId) -> bool {
        index == AIR
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_index_zero() {
        let registry = MaterialRegistry::new();
        assert_eq!(registry.get(AIR).name, "AIR");
        assert_eq!(registry.find("AIR"), Some(0));
    }

    #[test]
    fn test_indices_are_sequential() {
        let mut registry = MaterialRegistry::new();
        let stone = registry.register("STONE").unwrap();
        let sand = registry.register("SAND").unwrap();
        assert_eq!(stone, 1);
        assert_eq!(sand, 2);
        assert_eq!(registry.get(sand).name, "SAND");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = MaterialRegistry::with_defaults();
        assert!(matches!(
            registry.register("GRASS"),
            Err(WorldError::DuplicateMaterial(_))
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_transparency() {
        let registry = MaterialRegistry::with_defaults();
        assert!(registry.is_transparent(AIR));
        assert!(!registry.is_transparent(registry.find("DIRT").unwrap()));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_lookup_panics() {
        let registry = MaterialRegistry::new();
        registry.get(999);
    }
}
