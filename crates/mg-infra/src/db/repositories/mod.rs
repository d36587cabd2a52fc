mod model_repo;
mod post_repo;

pub use model_repo::*;
pub use post_repo::*;
