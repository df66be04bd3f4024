use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("not enough {0} available")]
    InsufficientResource(crate::core::types::PoolId),

    #[error("inventory has no empty slot")]
    InventoryFull,

    #[error("recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("a recipe with these exact ingredients already exists")]
    DuplicateRecipe,

    #[error("invalid slot: {0}")]
    InvalidSlot(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("hero not found: {0}")]
    HeroNotFound(crate::core::types::HeroId),

    #[error("no active hero selected")]
    NoActiveHero,

    #[error("location is locked: {0}")]
    LocationLocked(crate::core::types::Location),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
