pub mod model_mapper;
pub mod post_mapper;

pub use model_mapper::ModelRowMapper;
pub use post_mapper::PostRowMapper;
