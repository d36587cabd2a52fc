use crate::db::schema::t_username;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = t_username)]
pub struct UsernameRow {
    pub id: String,
    pub model_id: String,
    pub username: String,
    pub is_primary: bool,
}
