use thiserror::Error;

use crate::scene::ResolveError;

/// Errors that make a flyer unusable. The host should discard the flyer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlyerError {
    #[error("no template named '{key}'")]
    TemplateNotFound { key: String },
    #[error("failed to resolve sprite: {0}")]
    ImageResolution(#[from] ResolveError),
    #[error("template '{key}' has an empty image list")]
    EmptyImageList { key: String },
    #[error("template '{key}' has an animation but no image")]
    AnimationWithoutImage { key: String },
    #[error("template '{key}' starts with non-positive life {life}")]
    InvalidLife { key: String, life: i32 },
    #[error("flyer used before a template was loaded")]
    Uninitialized,
}
