//! Catalog entities: models, their handles, posts and media files.

mod media;
mod model;
mod post;

pub use media::{MediaFile, MediaType, UnknownMediaType};
pub use model::{Model, ModelCard, ModelIndex, ModelIndexEntry, Username};
pub use post::{Post, PostCard};
