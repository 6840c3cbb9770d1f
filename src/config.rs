use serde::{Deserialize, Serialize};

use crate::utils::Result;

/// Which terrain strategy a world is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorKind {
    Heightmap,
    Flat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u32,
    pub generator: GeneratorKind,
    /// Texture pack namespace used when deriving face texture keys.
    pub texture_pack: String,
    /// Horizontal chunk radius materialized around the viewer.
    pub view_radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            generator: GeneratorKind::Heightmap,
            texture_pack: "normal".to_string(),
            view_radius: 2,
        }
    }
}

impl WorldConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.generator, GeneratorKind::Heightmap);
        assert_eq!(config.texture_pack, "normal");
        assert_eq!(config.view_radius, 2);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = WorldConfig::from_toml(
            r#"
            seed = 1337
            generator = "Flat"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 1337);
        assert_eq!(config.generator, GeneratorKind::Flat);
        assert_eq!(config.texture_pack, "normal");
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(WorldConfig::from_toml("seed = \"not a number\"").is_err());
    }
}
