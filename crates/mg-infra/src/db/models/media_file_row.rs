use crate::db::schema::t_media_file;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = t_media_file)]
pub struct MediaFileRow {
    pub id: String,
    pub post_id: String,
    pub url: String,
    pub media_type: String,
    /// Order of the file within its post.
    pub position: i32,
}
