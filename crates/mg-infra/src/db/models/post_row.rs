use crate::db::schema::t_post;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = t_post)]
pub struct PostRow {
    pub id: String,
    pub model_id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub post_count: i32,
    pub published_at: i64,
    pub created_at: i64,
}
