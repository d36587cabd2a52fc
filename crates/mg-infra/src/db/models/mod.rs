mod media_file_row;
mod model_row;
mod post_row;
mod username_row;

pub use media_file_row::MediaFileRow;
pub use model_row::ModelRow;
pub use post_row::PostRow;
pub use username_row::UsernameRow;

/// Rows written for one model.
pub struct NewModelRows {
    pub model: ModelRow,
    pub usernames: Vec<UsernameRow>,
}

/// Rows written for one post.
pub struct NewPostRows {
    pub post: PostRow,
    pub media: Vec<MediaFileRow>,
}
