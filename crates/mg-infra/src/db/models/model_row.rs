use crate::db::schema::t_model;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = t_model)]
pub struct ModelRow {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub location: Option<String>,
    pub created_at: i64,
}
