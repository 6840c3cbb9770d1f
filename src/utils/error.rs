use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("Duplicate material name: {0}")]
    DuplicateMaterial(String),

    #[error("Unknown material name: {0}")]
    UnknownMaterial(String),

    #[error("Failed to parse world config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WorldError>;
